mod fake_tools;
mod scripted_decisions;

pub use self::fake_tools::FakeTools;
pub use self::scripted_decisions::ScriptedDecisions;
