//! Main chat loop orchestration.
//!
//! Terminal events are read on a dedicated thread and forwarded into a tokio
//! channel, alongside completed submissions, so the loop reacts to whichever
//! arrives first without ever blocking on the network.

use std::io::{Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use chatline_types::message::ChatMessage;

use crate::client::{ChatClient, ClientError};

use super::input::{InputAction, handle_key};
use super::renderer::{render_alert, render_lines};
use super::state::ClientState;

enum LoopEvent {
    Key(KeyEvent),
    Resize,
    Sent(Result<Vec<ChatMessage>, ClientError>),
}

/// Raw mode plus alternate screen, restored on drop.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive chat against `client` until the user quits.
pub async fn run_chat_loop(client: ChatClient) -> anyhow::Result<()> {
    let mut state = ClientState::new();
    state.load_history(client.fetch_messages().await);

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_terminal_reader(tx.clone());

    let _guard = RawModeGuard::enter()?;
    draw(&state, client.base_url())?;

    while let Some(loop_event) = rx.recv().await {
        match loop_event {
            LoopEvent::Key(key) => {
                if state.alert.is_some() {
                    state.dismiss_alert();
                } else {
                    match handle_key(&mut state.input, key) {
                        InputAction::Quit => break,
                        InputAction::Submit => {
                            if let Some(content) = state.begin_submit() {
                                let client = client.clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let result = client.send_message(&content).await;
                                    let _ = tx.send(LoopEvent::Sent(result));
                                });
                            }
                        }
                        InputAction::Edited | InputAction::Ignored => {}
                    }
                }
            }
            LoopEvent::Sent(result) => state.finish_submit(result),
            LoopEvent::Resize => {}
        }
        draw(&state, client.base_url())?;
    }

    debug!("Chat loop finished");
    Ok(())
}

/// Forward crossterm key and resize events until the receiver goes away.
fn spawn_terminal_reader(tx: mpsc::UnboundedSender<LoopEvent>) {
    std::thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => LoopEvent::Key(key),
                Ok(Event::Resize(..)) => LoopEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "Terminal input failed");
                    break;
                }
            };
            if tx.send(forwarded).is_err() {
                break;
            }
        }
    });
}

fn draw(state: &ClientState, backend: &str) -> std::io::Result<()> {
    let mut lines = render_lines(state, backend);
    if let Some(alert) = &state.alert {
        lines.extend(render_alert(alert));
    }

    let mut out = stdout();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(lines.join("\r\n")))?;
    out.flush()
}
