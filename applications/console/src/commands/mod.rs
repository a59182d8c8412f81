//! Command handlers.

mod art_types;
mod arts;
mod auth;
mod catalog;

use crate::cli::Commands;
use crate::config::ConsoleConfig;
use anyhow::{bail, Context as _, Result};
use muse_admin::{Confirm, GuardStatus, SessionGuard};
use muse_client::{CredentialFile, MuseClient, Session};
use std::future::Future;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

const RELOGIN_HINT: &str = "Token inválido o expirado. Inicie sesión con `muse login`.";

/// Everything a command needs: configuration, the session and the client.
pub struct Console {
    pub config: ConsoleConfig,
    pub session: Arc<Session>,
    pub client: MuseClient,
}

impl Console {
    /// Restore the stored credential and build the HTTP client.
    pub async fn connect(config: ConsoleConfig) -> Result<Self> {
        let store = CredentialFile::new(&config.session.credential_path);
        let session = Arc::new(Session::with_store(store));
        session
            .restore()
            .await
            .context("Failed to read stored credential")?;

        let client = MuseClient::new(config.client_config(), Arc::clone(&session))?;
        debug!(url = client.url(), "Console ready");

        Ok(Self {
            config,
            session,
            client,
        })
    }

    /// Mount a session guard and wait for its first check.
    pub async fn require_session(&self) -> Result<SessionGuard> {
        let guard = SessionGuard::with_interval(
            Arc::clone(&self.session) as Arc<dyn muse_client::SessionAuthority>,
            self.config.poll_interval(),
        );
        match guard.checked().await {
            GuardStatus::Valid => Ok(guard),
            _ => bail!(RELOGIN_HINT),
        }
    }

    /// Run a protected command, aborting it if the session expires meanwhile.
    pub async fn guarded<F>(&self, command: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        let guard = self.require_session().await?;
        tokio::select! {
            result = command => result,
            status = guard.finished() => match status {
                GuardStatus::Expired => bail!(RELOGIN_HINT),
                _ => bail!("Sesión interrumpida"),
            },
        }
    }
}

/// Dispatch a parsed command.
pub async fn run(console: &Console, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => auth::login(console, email, password).await,
        Commands::Register {
            name,
            lastname,
            email,
            password,
            confirm_password,
        } => {
            auth::register(console, name, lastname, email, password, confirm_password).await
        }
        Commands::Logout => auth::logout(console).await,
        Commands::ArtTypes(command) => console.guarded(art_types::run(console, command)).await,
        Commands::Arts(command) => console.guarded(arts::run(console, command)).await,
    }
}

/// Asks on stdin; only an explicit yes confirms.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [s/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

/// Accepts the `--yes` flag in place of a prompt.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
