//! Interactive terminal chat client.
//!
//! Entry point: `loop_runner::run_chat_loop`.

pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod state;
