//! One-shot conversation commands: `history` and `send`.
//!
//! Both fetch the conversation from the backend and print it, either as a
//! styled table or as the raw JSON message list.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatline_core::chat::stats::ConversationStats;
use chatline_types::message::{ChatMessage, ReplySource};

use crate::client::ChatClient;

/// Longest message preview printed in a table cell.
const PREVIEW_CHARS: usize = 120;

/// Print the conversation currently held by the backend.
pub async fn show_history(client: &ChatClient, json: bool) -> anyhow::Result<()> {
    let messages = client.fetch_messages().await?;
    print_conversation(client, &messages, json)
}

/// Submit one message and print the updated conversation.
pub async fn send_message(client: &ChatClient, content: &str, json: bool) -> anyhow::Result<()> {
    let messages = client.send_message(content).await?;

    if !json {
        if let Some(reply) = messages.last().filter(|m| m.is_assistant()) {
            if reply.reply_source == Some(ReplySource::Fallback) {
                println!();
                println!(
                    "  {} The model call failed; the backend stored a fallback reply.",
                    style("!").yellow().bold(),
                );
            }
        }
    }

    print_conversation(client, &messages, json)
}

fn print_conversation(client: &ChatClient, messages: &[ChatMessage], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages yet on {}. Start with: chatline send \"hello\"",
            style("i").blue().bold(),
            style(client.base_url()).cyan(),
        );
        println!();
        return Ok(());
    }

    let stats = ConversationStats::from_messages(messages);
    println!();
    println!(
        "  Conversation on {} ({} messages: {} user, {} assistant)",
        style(client.base_url()).cyan(),
        style(stats.total).bold(),
        stats.user,
        stats.assistant,
    );
    println!();
    println!("{}", conversation_table(messages));
    println!();

    Ok(())
}

fn conversation_table(messages: &[ChatMessage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Message").fg(Color::White),
        Cell::new("Source").fg(Color::White),
    ]);

    for message in messages {
        let role_color = if message.is_user() {
            Color::Cyan
        } else {
            Color::Green
        };
        let source = match message.reply_source {
            Some(ReplySource::Model) => Cell::new("model").fg(Color::DarkGrey),
            Some(ReplySource::Empty) => Cell::new("empty").fg(Color::Yellow),
            Some(ReplySource::Fallback) => Cell::new("fallback").fg(Color::Red),
            None => Cell::new(""),
        };

        table.add_row(vec![
            Cell::new(message.created_at.format("%H:%M:%S").to_string()).fg(Color::DarkGrey),
            Cell::new(message.role.to_string()).fg(role_color),
            Cell::new(preview(&message.content)),
            source,
        ]);
    }

    table
}

/// Truncate on a char boundary, appending an ellipsis when cut.
fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{cut}...")
}
