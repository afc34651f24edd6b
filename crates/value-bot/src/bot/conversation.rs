//! Conversation state for the selection bot
//!
//! The selection menu is a short dialogue: the operator opens it, picks an
//! action, and for add/remove sends the tickers in a follow-up message.

/// Where the operator currently is in the selection dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// No dialogue running
    #[default]
    Idle,
    /// Selection menu shown, waiting for an action
    Choosing,
    /// Waiting for tickers to add
    Adding,
    /// Waiting for tickers to remove
    Removing,
}

impl ConversationState {
    /// Whether the next plain text message is a ticker list
    pub fn awaits_tickers(self) -> bool {
        matches!(self, Self::Adding | Self::Removing)
    }
}

/// Tracks the dialogue state of the operator chat
#[derive(Debug, Default)]
pub struct ConversationManager {
    state: ConversationState,
}

impl ConversationManager {
    /// Create a new conversation manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Move to `state`
    pub fn transition(&mut self, state: ConversationState) {
        tracing::debug!(from = ?self.state, to = ?state, "Conversation state change");
        self.state = state;
    }

    /// Return to idle, reporting whether a dialogue was running
    pub fn end(&mut self) -> bool {
        let was_running = self.state != ConversationState::Idle;
        self.transition(ConversationState::Idle);
        was_running
    }
}
