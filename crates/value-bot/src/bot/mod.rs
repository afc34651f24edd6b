//! Stock Selection Bot
//!
//! This module turns operator chat messages into registry calls and renders the
//! results as reply text. Message delivery is left to the caller; the console
//! driver in `bin/value-bot.rs` is one such caller.
//!
//! # Features
//!
//! - **Command-based interface**: `/add_tickers AAPL,MSFT`, `/list_tickers`, ...
//! - **Selection dialogue**: `/stocks_selection` opens a menu, `/add_tickers`
//!   without arguments asks for the tickers in a follow-up message
//! - **Single operator**: messages from any other chat id are ignored
//!
//! # Example
//!
//! ```rust,ignore
//! use value_bot::bot::SelectionBot;
//!
//! let mut bot = SelectionBot::new(registry)?;
//! for reply in bot.handle_message("1234", "/list_tickers").await {
//!     println!("{reply}");
//! }
//! ```

pub mod commands;
pub mod conversation;

use crate::error::{Result, SelectionError};
use crate::model::split_tickers;
use crate::registry::{BatchOutcome, TickerRegistry};
use tracing::info;

pub use commands::Command;
pub use conversation::{ConversationManager, ConversationState};

const MENU: &str = "Make your choice:\n\
    /show_profiles\n\
    /list_tickers /remove_all_stocks /reload_selection_config\n\
    /add_tickers /remove_tickers /cancel";

const ASK_FOR_TICKERS: &str =
    "Please provide the tickers separated by commas, if you submit one ticker you can leave out the comma";

const DONE: &str = "Done!";

/// Chat front end of the ticker registry
pub struct SelectionBot {
    registry: TickerRegistry,
    conversation: ConversationManager,
    chat_id: String,
}

impl SelectionBot {
    /// Create a bot answering the chat id configured in `chat.chat_id`
    pub fn new(registry: TickerRegistry) -> Result<Self> {
        let chat_id = registry
            .config()
            .chat
            .chat_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| SelectionError::Config("chat.chat_id must be set".to_string()))?;

        Ok(Self {
            registry,
            conversation: ConversationManager::new(),
            chat_id,
        })
    }

    /// Allow-listed chat id
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Greeting sent when the bot comes online
    pub fn greeting(&self) -> String {
        format!(
            "Hello my name is {}, I am an investment bot based on value investing principles. \
             How can I help you?",
            self.registry.config().chat.bot_name
        )
    }

    /// Get the registry
    pub fn registry(&self) -> &TickerRegistry {
        &self.registry
    }

    /// Current dialogue state
    pub fn state(&self) -> ConversationState {
        self.conversation.state()
    }

    pub fn is_authorized(&self, chat_id: &str) -> bool {
        chat_id.trim() == self.chat_id
    }

    /// Handle one message, returning the replies in sending order
    ///
    /// Messages from chats other than the configured one get no reply.
    pub async fn handle_message(&mut self, chat_id: &str, text: &str) -> Vec<String> {
        if !self.is_authorized(chat_id) {
            info!("Rejected unauthorized message from: {chat_id}");
            return Vec::new();
        }

        match Command::parse(text) {
            Ok(command) => {
                info!(chat_id, command = command.description(), "Executing handler");
                self.execute_command(command).await
            }
            Err(e) => vec![e.to_string()],
        }
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::StocksSelection => {
                self.conversation.transition(ConversationState::Choosing);
                vec![MENU.to_string()]
            }
            Command::AddTickers { tickers } if tickers.is_empty() => {
                self.conversation.transition(ConversationState::Adding);
                vec![ASK_FOR_TICKERS.to_string()]
            }
            Command::AddTickers { tickers } => {
                self.conversation.end();
                self.add_tickers(&tickers).await
            }
            Command::RemoveTickers { tickers } if tickers.is_empty() => {
                self.conversation.transition(ConversationState::Removing);
                vec![ASK_FOR_TICKERS.to_string()]
            }
            Command::RemoveTickers { tickers } => {
                self.conversation.end();
                self.remove_tickers(&tickers).await
            }
            Command::ListTickers => {
                self.conversation.end();
                self.list_tickers().await
            }
            Command::ShowProfiles => {
                self.conversation.end();
                self.show_profiles().await
            }
            Command::RemoveAllStocks => {
                self.conversation.end();
                self.remove_all_stocks().await
            }
            Command::ReloadSelectionConfig => {
                self.conversation.end();
                let outcome = self.registry.reload_from_config().await;
                batch_replies(&outcome, "added")
            }
            Command::Help => vec![Command::help_text().to_string()],
            Command::Version => vec![format!("*Version:* `{}`", crate::VERSION)],
            Command::Cancel => {
                self.conversation.end();
                info!("Conversation is canceled");
                vec!["Process has been canceled".to_string()]
            }
            Command::Exit => {
                self.conversation.end();
                vec!["Goodbye!".to_string()]
            }
            Command::Text { text } => self.on_text(&text).await,
        }
    }

    async fn on_text(&mut self, text: &str) -> Vec<String> {
        let state = self.conversation.state();
        if !state.awaits_tickers() {
            return vec!["Send /stocks_selection to manage your selection or /help for all commands"
                .to_string()];
        }

        self.conversation.end();
        let tickers = split_tickers(text);

        match state {
            ConversationState::Adding => self.add_tickers(&tickers).await,
            _ => self.remove_tickers(&tickers).await,
        }
    }

    async fn add_tickers(&self, tickers: &[String]) -> Vec<String> {
        if tickers.is_empty() {
            return vec!["No tickers provided".to_string(), DONE.to_string()];
        }
        let outcome = self.registry.add_many(tickers).await;
        batch_replies(&outcome, "added")
    }

    async fn remove_tickers(&self, tickers: &[String]) -> Vec<String> {
        if tickers.is_empty() {
            return vec!["No tickers provided".to_string(), DONE.to_string()];
        }
        let outcome = self.registry.remove_many(tickers).await;
        batch_replies(&outcome, "removed")
    }

    async fn list_tickers(&self) -> Vec<String> {
        match self.registry.list().await {
            Ok(tickers) if tickers.is_empty() => vec!["The selection is empty".to_string()],
            Ok(tickers) => vec![tickers.join(", ")],
            Err(e) => vec![e.to_string()],
        }
    }

    async fn remove_all_stocks(&self) -> Vec<String> {
        // An unreadable selection cannot be reported as cleared
        if let Err(e) = self.registry.list().await {
            return vec![e.to_string()];
        }

        let outcome = self.registry.clear_all().await;
        let mut replies = failure_lines(&outcome);
        if outcome.is_complete_success() {
            replies.push("Stock selection cleared".to_string());
        }
        replies
    }

    async fn show_profiles(&self) -> Vec<String> {
        match self.registry.entries().await {
            Ok(entries) if entries.is_empty() => vec!["The selection is empty".to_string()],
            Ok(entries) => vec![
                entries
                    .iter()
                    .map(|e| format!("*{}:* {} `{}`", e.ticker, e.company_name, e.category))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ],
            Err(e) => vec![e.to_string()],
        }
    }
}

fn failure_lines(outcome: &BatchOutcome) -> Vec<String> {
    outcome.failed.iter().map(|(_, e)| e.to_string()).collect()
}

/// Failures first, then the processed tickers, then "Done!"
fn batch_replies(outcome: &BatchOutcome, verb: &str) -> Vec<String> {
    let mut replies = failure_lines(outcome);
    if !outcome.succeeded.is_empty() {
        replies.push(format!("{} {verb}", outcome.succeeded.join(", ")));
    }
    replies.push(DONE.to_string());
    replies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;
    use crate::providers::DataProviderManager;
    use crate::storage::SqliteStore;
    use crate::storage::fake::FlakyStore;
    use std::sync::Arc;

    fn registry(config: SelectionConfig) -> (tempfile::TempDir, TickerRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SqliteStore::new(dir.path().join("selection.sqlite")));
        let registry =
            TickerRegistry::new(store, DataProviderManager::new(Vec::new()), Arc::new(config))
                .unwrap();
        (dir, registry)
    }

    #[test]
    fn test_requires_chat_id() {
        let (_dir, registry) = registry(SelectionConfig::default());
        assert!(matches!(
            SelectionBot::new(registry),
            Err(SelectionError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_ignores_other_chats() {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let (_dir, registry) = registry(config);
        let mut bot = SelectionBot::new(registry).unwrap();

        assert!(bot.handle_message("7", "/help").await.is_empty());
        assert!(!bot.handle_message("42", "/help").await.is_empty());
    }

    #[tokio::test]
    async fn test_dialogue_states() {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let (_dir, registry) = registry(config);
        let mut bot = SelectionBot::new(registry).unwrap();

        bot.handle_message("42", "/stocks_selection").await;
        assert_eq!(bot.state(), ConversationState::Choosing);

        let replies = bot.handle_message("42", "/remove_tickers").await;
        assert_eq!(replies, vec![ASK_FOR_TICKERS.to_string()]);
        assert_eq!(bot.state(), ConversationState::Removing);

        let replies = bot.handle_message("42", "/cancel").await;
        assert_eq!(replies, vec!["Process has been canceled".to_string()]);
        assert_eq!(bot.state(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_remove_unknown_ticker_replies_with_reason() {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let (_dir, registry) = registry(config);
        let mut bot = SelectionBot::new(registry).unwrap();

        bot.handle_message("42", "/remove_tickers").await;
        let replies = bot.handle_message("42", "msft").await;

        assert_eq!(
            replies,
            vec![
                "Provided stock MSFT does not exist in the selection".to_string(),
                DONE.to_string()
            ]
        );
        assert_eq!(bot.state(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let (_dir, registry) = registry(config);
        let mut bot = SelectionBot::new(registry).unwrap();

        let replies = bot.handle_message("42", "/analyze AAPL").await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("Unknown command"));
    }

    #[test]
    fn test_version_reply() {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let (_dir, registry) = registry(config);
        let mut bot = SelectionBot::new(registry).unwrap();

        let replies = tokio_test::block_on(bot.execute_command(Command::Version));
        assert!(replies[0].contains(crate::VERSION));
    }

    fn bot_over(store: FlakyStore) -> SelectionBot {
        let config = SelectionConfig::builder().chat_id("42").build().unwrap();
        let registry = TickerRegistry::new(
            Arc::new(store),
            DataProviderManager::new(Vec::new()),
            Arc::new(config),
        )
        .unwrap();
        SelectionBot::new(registry).unwrap()
    }

    #[tokio::test]
    async fn test_unreadable_selection_is_not_reported_cleared() {
        let mut bot = bot_over(FlakyStore {
            fail_list: true,
            ..FlakyStore::default()
        });

        let replies = bot.handle_message("42", "/remove_all_stocks").await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("Persistence error"));
    }

    #[tokio::test]
    async fn test_partial_clear_lists_failures_only() {
        let mut bot = bot_over(FlakyStore {
            fail_remove_of: Some("MSFT".to_string()),
            ..FlakyStore::with_rows(&["AAPL", "MSFT"])
        });

        let replies = bot.handle_message("42", "/remove_all_stocks").await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("Persistence error"));
        assert_eq!(bot.registry().list().await.unwrap(), vec!["MSFT"]);
    }

    #[tokio::test]
    async fn test_list_replies_are_single_lines() {
        let mut bot = bot_over(FlakyStore::with_rows(&["AAPL", "KO"]));
        assert_eq!(
            bot.handle_message("42", "/list_tickers").await,
            vec!["AAPL, KO".to_string()]
        );

        let mut bot = bot_over(FlakyStore {
            fail_list: true,
            ..FlakyStore::default()
        });
        let replies = bot.handle_message("42", "/list_tickers").await;
        assert_eq!(replies.len(), 1);
        assert!(!replies.contains(&DONE.to_string()));
    }
}
