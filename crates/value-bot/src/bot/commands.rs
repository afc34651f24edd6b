//! Command parsing for the selection bot

use crate::error::{Result, SelectionError};
use crate::model::split_tickers;

/// Parsed command from an operator message
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the selection menu
    StocksSelection,
    /// Add tickers; empty means "ask for them"
    AddTickers { tickers: Vec<String> },
    /// Remove tickers; empty means "ask for them"
    RemoveTickers { tickers: Vec<String> },
    /// List tickers in the selection
    ListTickers,
    /// Show stored company profiles
    ShowProfiles,
    /// Remove every ticker
    RemoveAllStocks,
    /// Add the tickers listed in the configuration
    ReloadSelectionConfig,
    /// Show help
    Help,
    /// Show version
    Version,
    /// Abort the running conversation
    Cancel,
    /// Stop the console driver
    Exit,
    /// Plain text (not a command)
    Text { text: String },
}

impl Command {
    /// Parse a command from operator input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(SelectionError::Command("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Ok(Command::Text {
                text: input.to_string(),
            });
        };

        let (head, args) = body
            .split_once(char::is_whitespace)
            .map_or((body, ""), |(head, args)| (head, args.trim()));

        // Group chats address commands as /list_tickers@bot_name
        let cmd = head.split('@').next().unwrap_or(head).to_lowercase();
        if cmd.is_empty() {
            return Err(SelectionError::Command("Empty command".to_string()));
        }

        match cmd.as_str() {
            "stocks_selection" | "selection" => Ok(Command::StocksSelection),
            "add_tickers" | "add" => Ok(Command::AddTickers {
                tickers: split_tickers(args),
            }),
            "remove_tickers" | "remove" => Ok(Command::RemoveTickers {
                tickers: split_tickers(args),
            }),
            "list_tickers" | "list" => Ok(Command::ListTickers),
            "show_profiles" | "profiles" => Ok(Command::ShowProfiles),
            "remove_all_stocks" => Ok(Command::RemoveAllStocks),
            "reload_selection_config" | "reload" => Ok(Command::ReloadSelectionConfig),
            "help" | "start" => Ok(Command::Help),
            "version" => Ok(Command::Version),
            "cancel" => Ok(Command::Cancel),
            "exit" | "quit" => Ok(Command::Exit),
            _ => Err(SelectionError::Command(format!("Unknown command: /{cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"*/help:* `This help message`
*/version:* `Show version`
*/stocks_selection:* `Open the selection menu`
*/add_tickers [T1,T2]:* `Add tickers to the selection`
*/remove_tickers [T1,T2]:* `Remove tickers from the selection`
*/list_tickers:* `List all saved tickers in the selection`
*/show_profiles:* `Show company name and category of every ticker`
*/remove_all_stocks:* `Clear the selection`
*/reload_selection_config:* `Add the tickers from the configuration`
*/cancel:* `Abort the current conversation`"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::StocksSelection => "Open the selection menu",
            Command::AddTickers { .. } => "Add tickers to the selection",
            Command::RemoveTickers { .. } => "Remove tickers from the selection",
            Command::ListTickers => "List the selection",
            Command::ShowProfiles => "Show company profiles",
            Command::RemoveAllStocks => "Clear the selection",
            Command::ReloadSelectionConfig => "Reload tickers from configuration",
            Command::Help => "Show help",
            Command::Version => "Show version",
            Command::Cancel => "Abort the current conversation",
            Command::Exit => "Exit the bot",
            Command::Text { .. } => "Plain text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_without_args() {
        let cmd = Command::parse("/add_tickers").unwrap();
        assert_eq!(cmd, Command::AddTickers { tickers: vec![] });
    }

    #[test]
    fn test_parse_add_with_args() {
        let cmd = Command::parse("/add_tickers AAPL, msft").unwrap();
        assert_eq!(
            cmd,
            Command::AddTickers {
                tickers: vec!["AAPL".to_string(), "msft".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_bot_suffix_and_case() {
        assert_eq!(
            Command::parse("/List_Tickers@value_bot").unwrap(),
            Command::ListTickers
        );
    }

    #[test]
    fn test_parse_text() {
        let cmd = Command::parse("  AAPL, TSLA ").unwrap();
        assert_eq!(
            cmd,
            Command::Text {
                text: "AAPL, TSLA".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(matches!(
            Command::parse("/analyze AAPL"),
            Err(SelectionError::Command(msg)) if msg.contains("/analyze")
        ));
    }

    #[test]
    fn test_help_mentions_every_selection_command() {
        let help = Command::help_text();
        for cmd in [
            "/add_tickers",
            "/remove_tickers",
            "/list_tickers",
            "/show_profiles",
            "/remove_all_stocks",
            "/reload_selection_config",
        ] {
            assert!(help.contains(cmd), "help is missing {cmd}");
        }
    }
}
