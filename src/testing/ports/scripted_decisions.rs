use std::sync::Mutex;

use crate::ports::DecisionSource;

/// Decision source answering from a script keyed by prompt fragments.
///
/// The first scripted entry whose fragment occurs in the prompt wins;
/// unscripted prompts get their default. Every prompt asked is recorded.
#[derive(Default)]
pub struct ScriptedDecisions {
    confirms: Vec<(String, bool)>,
    selects: Vec<(String, usize)>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, fragment: &str, answer: bool) -> Self {
        self.confirms.push((fragment.to_string(), answer));
        self
    }

    pub fn select_with(mut self, fragment: &str, index: usize) -> Self {
        self.selects.push((fragment.to_string(), index));
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.confirms
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map_or(default, |(_, answer)| *answer)
    }

    fn select(&self, prompt: &str, _items: &[String], default: usize) -> usize {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.selects
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map_or(default, |(_, index)| *index)
    }
}
