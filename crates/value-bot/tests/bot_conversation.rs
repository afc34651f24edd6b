//! Operator conversations driven through the command layer

mod common;

use common::{market, registry};
use value_bot::bot::{ConversationState, SelectionBot};
use value_bot::SelectionConfig;

const OPERATOR: &str = "1234";

fn bot(tickers: &[&str]) -> (tempfile::TempDir, SelectionBot) {
    let config = SelectionConfig::builder()
        .tickers(tickers.iter().copied())
        .chat_id(OPERATOR)
        .build()
        .unwrap();
    let (dir, registry) = registry(market(), config);
    (dir, SelectionBot::new(registry).unwrap())
}

#[tokio::test]
async fn add_dialogue_consumes_one_ticker_line() {
    let (_dir, mut bot) = bot(&[]);

    bot.handle_message(OPERATOR, "/stocks_selection").await;
    bot.handle_message(OPERATOR, "/add_tickers").await;
    assert_eq!(bot.state(), ConversationState::Adding);

    let replies = bot.handle_message(OPERATOR, "aapl, BADTICKER,msft").await;
    assert_eq!(
        replies,
        vec![
            "Could not evaluate stock BADTICKER with the data providers".to_string(),
            "AAPL, MSFT added".to_string(),
            "Done!".to_string(),
        ]
    );
    assert_eq!(bot.state(), ConversationState::Idle);

    let replies = bot.handle_message(OPERATOR, "/list_tickers").await;
    assert_eq!(replies, vec!["AAPL, MSFT".to_string()]);
}

#[tokio::test]
async fn inline_tickers_skip_the_dialogue() {
    let (_dir, mut bot) = bot(&[]);

    let replies = bot.handle_message(OPERATOR, "/add_tickers KO").await;
    assert_eq!(replies, vec!["KO added".to_string(), "Done!".to_string()]);

    let replies = bot.handle_message(OPERATOR, "/remove_tickers ko").await;
    assert_eq!(replies, vec!["KO removed".to_string(), "Done!".to_string()]);
    assert_eq!(bot.state(), ConversationState::Idle);
}

#[tokio::test]
async fn reload_show_profiles_and_clear() {
    let (_dir, mut bot) = bot(&["AAPL", "KO"]);

    let replies = bot.handle_message(OPERATOR, "/reload_selection_config").await;
    assert_eq!(replies, vec!["AAPL, KO added".to_string(), "Done!".to_string()]);

    let replies = bot.handle_message(OPERATOR, "/show_profiles").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("*AAPL:* Apple Inc `Technology`"));
    assert!(replies[0].contains("*KO:* The Coca-Cola Company `Beverages`"));

    let replies = bot.handle_message(OPERATOR, "/remove_all_stocks").await;
    assert_eq!(replies, vec!["Stock selection cleared".to_string()]);

    let replies = bot.handle_message(OPERATOR, "/list_tickers").await;
    assert_eq!(replies, vec!["The selection is empty".to_string()]);
}

#[tokio::test]
async fn strangers_get_no_reply_and_change_nothing() {
    let (_dir, mut bot) = bot(&[]);

    assert!(bot.handle_message("999", "/add_tickers AAPL").await.is_empty());
    assert!(bot.registry().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn free_text_outside_dialogue_gets_a_hint() {
    let (_dir, mut bot) = bot(&[]);

    let replies = bot.handle_message(OPERATOR, "AAPL").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("/stocks_selection"));
    assert!(bot.registry().list().await.unwrap().is_empty());
}
