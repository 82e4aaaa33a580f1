//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "petland")]
#[command(about = "PetLand account client", long_about = None, version)]
pub struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding config and environment.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an email or login name
    Login {
        login: String,
        #[arg(long, env = "PETLAND_PASSWORD", hide_env_values = true)]
        password: String,
        /// Do not store the session; it ends when this command exits and any
        /// previously remembered session is removed
        #[arg(long)]
        no_remember: bool,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PETLAND_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Ask the server to email a verification code
    RequestCode { email: String },
    /// Submit the verification code received by email
    VerifyCode { email: String, code: String },
    /// Fetch the signed-in user's profile
    Whoami,
    /// Update the chat credentials of the signed-in user
    UpdateChat {
        #[arg(long)]
        chat_id: String,
        #[arg(long)]
        session_id: String,
    },
    /// Show the current session
    Status,
    /// Forget the current session
    SignOut,
}
