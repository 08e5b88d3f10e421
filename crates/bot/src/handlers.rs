//! Inbound message routing.
//!
//! Every per-request failure is caught here and turned into a user-facing
//! reply; nothing a single bad query does can take the process down.

use std::sync::Arc;

use cinescope_core::PipelineError;
use tracing::{debug, error, warn};

use crate::render;
use crate::state::AppState;
use crate::telegram::Message;

/// What an inbound text resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    /// /start or /help
    Start,
    /// /history
    History,
    /// /stats
    Stats,
    /// Any other slash command; silently ignored.
    OtherCommand,
    /// Free text, treated as a film query.
    Query(String),
}

/// Classify an inbound text. Command mentions like `/start@botname` are
/// treated the same as the bare command.
pub fn classify(text: &str) -> InboundCommand {
    let trimmed = text.trim();

    if trimmed.starts_with('/') {
        let command = trimmed
            .split_whitespace()
            .next()
            .unwrap_or(trimmed)
            .split('@')
            .next()
            .unwrap_or(trimmed);
        return match command {
            "/start" | "/help" => InboundCommand::Start,
            "/history" => InboundCommand::History,
            "/stats" => InboundCommand::Stats,
            _ => InboundCommand::OtherCommand,
        };
    }

    InboundCommand::Query(trimmed.to_string())
}

/// Handle one inbound message end to end.
pub async fn handle_message(state: Arc<AppState>, message: Message) {
    let Some(text) = message.text.as_deref() else {
        return;
    };
    if text.trim().is_empty() {
        return;
    }

    let chat_id = message.chat.id;
    let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);

    let reply = match classify(text) {
        InboundCommand::Start => render::welcome(),
        InboundCommand::History => match state.pipeline().history(user_id) {
            Ok(entries) => render::history_list(&entries),
            Err(e) => {
                error!("History read failed for user {}: {}", user_id, e);
                render::lookup_failed()
            }
        },
        InboundCommand::Stats => match state.pipeline().stats(user_id) {
            Ok(counters) => render::stats_list(&counters),
            Err(e) => {
                error!("Stats read failed for user {}: {}", user_id, e);
                render::lookup_failed()
            }
        },
        InboundCommand::OtherCommand => return,
        InboundCommand::Query(query) => {
            return handle_query(state, chat_id, user_id, &query).await;
        }
    };

    send_text(&state, chat_id, &reply).await;
}

async fn handle_query(state: Arc<AppState>, chat_id: i64, user_id: i64, query: &str) {
    debug!("Lookup from user {}: '{}'", user_id, query);

    match state.pipeline().resolve(user_id, query).await {
        Ok(resolved) => {
            let card = render::film_card(&resolved);
            match resolved.details.poster_url {
                Some(ref poster_url) => {
                    if let Err(e) = state.telegram().send_photo(chat_id, poster_url, &card).await
                    {
                        // Poster URLs can go stale; the card still works as text.
                        warn!("sendPhoto failed for chat {}: {}", chat_id, e);
                        send_text(&state, chat_id, &card).await;
                    }
                }
                None => send_text(&state, chat_id, &card).await,
            }
        }
        Err(PipelineError::NoMatch) => {
            send_text(&state, chat_id, &render::not_found()).await;
        }
        Err(e) => {
            error!("Lookup failed for user {}: {}", user_id, e);
            send_text(&state, chat_id, &render::lookup_failed()).await;
        }
    }
}

async fn send_text(state: &AppState, chat_id: i64, text: &str) {
    if let Err(e) = state.telegram().send_message(chat_id, text).await {
        warn!("sendMessage failed for chat {}: {}", chat_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_start_and_help() {
        assert_eq!(classify("/start"), InboundCommand::Start);
        assert_eq!(classify("/help"), InboundCommand::Start);
        assert_eq!(classify("/start@cinescope_bot"), InboundCommand::Start);
    }

    #[test]
    fn test_classify_projections() {
        assert_eq!(classify("/history"), InboundCommand::History);
        assert_eq!(classify("/stats"), InboundCommand::Stats);
    }

    #[test]
    fn test_classify_unknown_command_is_ignored() {
        assert_eq!(classify("/settings"), InboundCommand::OtherCommand);
    }

    #[test]
    fn test_classify_free_text_is_a_query() {
        assert_eq!(
            classify("  Матрица 1999 "),
            InboundCommand::Query("Матрица 1999".to_string())
        );
    }
}
