pub mod validation;

mod service_name;

pub use service_name::ServiceName;
