//! Full-screen rendering of the chat client state.
//!
//! The screen is rebuilt from `ClientState` on every redraw: header with
//! live counters, the conversation, a typing indicator while a submission
//! is in flight, the recent-activity timeline and the input box.

use console::style;

use chatline_types::message::{ChatMessage, ReplySource};

use super::state::ClientState;

/// Longest timeline preview, in chars.
const TIMELINE_PREVIEW_CHARS: usize = 48;

/// Render the whole screen as lines without trailing newlines.
///
/// Raw mode needs explicit `\r\n` between lines, so callers join these
/// themselves.
pub fn render_lines(state: &ClientState, backend: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let stats = state.stats();

    lines.push(format!(
        "{} {}",
        style("Chatline").cyan().bold(),
        style(format!("({backend})")).dim(),
    ));
    lines.push(format!(
        "{} total  {} user  {} assistant",
        style(stats.total).bold(),
        style(stats.user).cyan(),
        style(stats.assistant).green(),
    ));
    lines.push(String::new());

    if state.messages.is_empty() && !state.loading {
        lines.push(style("No messages yet. Say hello!").dim().to_string());
    }
    for message in &state.messages {
        push_message(&mut lines, message);
    }
    if state.loading {
        lines.push(format!("{} {}", style("assistant:").green().bold(), style("typing...").dim().italic()));
    }

    let timeline = state.timeline();
    if !timeline.is_empty() {
        lines.push(String::new());
        lines.push(style("Recent activity").bold().to_string());
        for message in timeline {
            lines.push(format!(
                "  {} {} {}",
                style(message.created_at.format("%H:%M:%S")).dim(),
                role_label(message),
                one_line_preview(&message.content),
            ));
        }
    }

    lines.push(String::new());
    let mut input_lines = state.input.split('\n');
    let first = input_lines.next().unwrap_or_default();
    lines.push(format!("{} {first}", style(">").cyan().bold()));
    for rest in input_lines {
        lines.push(format!("  {rest}"));
    }

    let hint = if state.loading {
        "Waiting for reply..."
    } else {
        "Enter to send, Shift+Enter for newline, Esc to quit"
    };
    lines.push(style(hint).dim().to_string());

    lines
}

/// Lines for the blocking alert shown after a failed submission.
pub fn render_alert(message: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("{} {message}", style("Error:").red().bold()),
        style("Press any key to continue").dim().to_string(),
    ]
}

fn push_message(lines: &mut Vec<String>, message: &ChatMessage) {
    let mut content = message.content.split('\n');
    let first = content.next().unwrap_or_default();
    let tag = match message.reply_source {
        Some(ReplySource::Fallback) => format!(" {}", style("[fallback]").red()),
        Some(ReplySource::Empty) => format!(" {}", style("[empty]").yellow()),
        _ => String::new(),
    };

    lines.push(format!("{}{tag} {first}", role_label(message)));
    for rest in content {
        lines.push(format!("  {rest}"));
    }
}

fn role_label(message: &ChatMessage) -> String {
    if message.is_user() {
        style("you:").cyan().bold().to_string()
    } else {
        style("assistant:").green().bold().to_string()
    }
}

fn one_line_preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() <= TIMELINE_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(TIMELINE_PREVIEW_CHARS - 3).collect();
    format!("{cut}...")
}
