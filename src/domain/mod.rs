pub mod catalog;
pub mod compose;
pub mod configuration;
pub mod environment;
pub mod error;
pub mod identifiers;
pub mod layout;
pub mod scaffold;

pub use catalog::{OptionalGroup, OptionalService, ServiceDescriptor};
pub use configuration::HomelabConfig;
pub use environment::Environment;
pub use error::AppError;
pub use identifiers::ServiceName;
pub use layout::Layout;
