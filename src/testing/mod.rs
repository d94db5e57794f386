mod fixture;
pub mod ports;

#[allow(unused_imports)]
pub use fixture::{TestBase, svc};
#[allow(unused_imports)]
pub use ports::FakeTools;
#[allow(unused_imports)]
pub use ports::ScriptedDecisions;
