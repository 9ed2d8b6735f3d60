//! CLI command definitions for the `chatline` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the backend;
//! `chat`, `history` and `send` are clients of a running backend.

pub mod chat;
pub mod conversation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::DEFAULT_BACKEND_URL;

/// Minimal chat backend and terminal client.
#[derive(Parser)]
#[command(name = "chatline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log records as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to the TOML config file (defaults to ./chatline.toml).
    #[arg(long, global = true, env = "CHATLINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Interface to bind (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT and the config file).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open the interactive terminal chat.
    Chat {
        /// Backend base URL.
        #[arg(long, env = "CHATLINE_URL", default_value = DEFAULT_BACKEND_URL)]
        url: String,
    },

    /// Print the conversation held by the backend.
    #[command(alias = "ls")]
    History {
        /// Backend base URL.
        #[arg(long, env = "CHATLINE_URL", default_value = DEFAULT_BACKEND_URL)]
        url: String,
    },

    /// Send one message and print the updated conversation.
    Send {
        /// Message text.
        content: String,

        /// Backend base URL.
        #[arg(long, env = "CHATLINE_URL", default_value = DEFAULT_BACKEND_URL)]
        url: String,
    },
}
