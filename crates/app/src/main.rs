//! PetLand account client - command-line entry point
//!
//! Loads configuration, restores any remembered session and runs one
//! account operation against the PetLand API.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use petland_application::{AccountError, AccountErrorKind, AccountService, CredentialStore};
use petland_domain::ClientConfig;
use petland_infrastructure::{
    ConfigLoader, FileCredentialRepository, ReqwestHttpClient, SystemClock, TokioFileSystem,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(account) = e.downcast_ref::<AccountError>() {
                tracing::debug!(error = %account, "account operation failed");
                let kind = account.kind();
                eprintln!("error: {}", kind.user_message());
                if kind == AccountErrorKind::Unknown {
                    eprintln!("cause: {account}");
                }
                if kind.requires_sign_in() {
                    eprintln!("hint: run `petland login` to sign in");
                }
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli).await?;

    let credentials_path = config
        .credentials_path
        .clone()
        .or_else(FileCredentialRepository::<TokioFileSystem>::default_path)
        .ok_or("cannot determine where to store credentials")?;
    let store = open_store(credentials_path).await?;

    let client = ReqwestHttpClient::new(&config)?;
    let service = AccountService::from_config(client, &config, store);

    tracing::debug!(base_url = %config.base_url, "starting PetLand client");

    match cli.command {
        Command::Login {
            login,
            password,
            no_remember,
        } => {
            service.login(&login, &password, !no_remember).await?;
            println!("Signed in.");
            if no_remember {
                println!("Note: the session was not saved and ends with this command.");
            }
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            service
                .register(&first_name, &last_name, &email, &password)
                .await?;
            println!("Account created. Signed in as {email}.");
        }
        Command::RequestCode { email } => {
            service.verify_email(&email).await?;
            println!("A verification code was sent to {email}.");
        }
        Command::VerifyCode { email, code } => {
            service.submit_email_code(&email, &code).await?;
            println!("Email verified.");
        }
        Command::Whoami => {
            let user = service.get_user().await?;
            println!("{} <{}>", user.display_name(), user.email);
            println!("id: {}", user.id);
            if user.has_chat() {
                println!("chat: {}", user.chat_id);
            }
        }
        Command::UpdateChat {
            chat_id,
            session_id,
        } => {
            service
                .update_chat_credentials(&chat_id, &session_id)
                .await?;
            println!("Chat credentials updated.");
        }
        Command::Status => {
            println!("{}", service.session_status().await.display_message());
        }
        Command::SignOut => {
            service.sign_out().await?;
            println!("Signed out.");
        }
    }

    Ok(())
}

async fn load_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load().await?;

    if let Some(base_url) = &cli.base_url {
        config.set_base_url(base_url)?;
    }
    Ok(config)
}

async fn open_store(path: PathBuf) -> Result<CredentialStore, Box<dyn std::error::Error>> {
    let repository = FileCredentialRepository::new(TokioFileSystem::new(), path);
    let store = CredentialStore::new(Arc::new(repository), Arc::new(SystemClock::new()));

    let status = store.restore().await?;
    tracing::debug!(active = status.is_active(), "restored session");
    Ok(store)
}
