use crate::osc::{MessageSender, OscTarget};
use tracing::debug;

/// A push-to-toggle key: every press flips its state between 0 and 1 and
/// sends the new state on its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyToggle {
    pub label: String,
    pub key: char,
    pub target: OscTarget,
    state: i32,
}

impl KeyToggle {
    pub fn new(label: impl Into<String>, key: char, target: OscTarget) -> Self {
        KeyToggle {
            label: label.into(),
            key,
            target,
            state: 0,
        }
    }

    pub fn state(&self) -> i32 {
        self.state
    }

    pub fn matches(&self, key: char) -> bool {
        self.key.eq_ignore_ascii_case(&key)
    }

    pub fn toggle(&mut self, sender: &dyn MessageSender) -> i32 {
        self.state = 1 - self.state;
        debug!(label = %self.label, state = self.state, "key toggled");
        sender.send(&self.target, self.state);
        self.state
    }
}
