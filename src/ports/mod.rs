mod compose_definition;
mod decision_source;
mod enablement_store;
mod env_archive;
mod service_catalog;
mod system_tools;

pub use compose_definition::ComposeDefinitionReader;
pub use decision_source::DecisionSource;
pub use enablement_store::EnablementStore;
pub use env_archive::{ArchivedEnv, EnvArchive};
pub use service_catalog::ServiceCatalog;
pub use system_tools::SystemTools;
