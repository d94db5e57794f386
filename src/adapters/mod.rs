pub mod decisions;
pub mod filesystem;
pub mod system_tools;

pub use decisions::{DefaultDecisions, InteractiveDecisions};
pub use filesystem::FilesystemStore;
pub use system_tools::HostTools;
