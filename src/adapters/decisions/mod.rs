//! `DecisionSource` implementations.

mod default_decisions;
mod interactive;

pub use default_decisions::DefaultDecisions;
pub use interactive::InteractiveDecisions;
