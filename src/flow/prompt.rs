//! User-facing notices and yes/no decisions.

use std::collections::VecDeque;

/// Blocking notifications and binary decisions shown to the user.
pub trait Prompter {
    fn notify(&mut self, message: &str);

    /// Returns true for the affirmative choice.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompter replaying scripted answers and recording everything it was asked.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    default_answer: bool,
    notices: Vec<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer used once the scripted answers run out.
    #[must_use]
    pub fn with_default_answer(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    #[must_use]
    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

impl Prompter for ScriptedPrompter {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_then_default() {
        let mut prompter = ScriptedPrompter::new().with_default_answer(true);
        prompter.push_answer(false);

        assert!(!prompter.confirm("first?"));
        assert!(prompter.confirm("second?"));
        assert_eq!(prompter.questions(), ["first?", "second?"]);
    }

    #[test]
    fn notices_are_recorded() {
        let mut prompter = ScriptedPrompter::new();
        prompter.notify("hello");
        prompter.notify("bye");
        assert_eq!(prompter.last_notice(), Some("bye"));
        assert_eq!(prompter.take_notices().len(), 2);
        assert!(prompter.notices().is_empty());
    }
}
