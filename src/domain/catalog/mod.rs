//! Service descriptors: dependency headers of `services-available/*.yml`.

mod descriptor;

pub use descriptor::{OptionalGroup, OptionalService, ServiceDescriptor, parse_descriptor_header};
