//! Host-side terminal sessions.
//!
//! A [`TerminalSession`] is a named interactive shell the server owns:
//! command lines injected with [`TerminalSession::send_text`] are written to
//! the shell's stdin, and everything the shell prints is relayed to the
//! editor through `window/logMessage`. The [`TerminalRegistry`] is the list
//! of currently open sessions; lookup is a plain linear search by name with
//! no caching on top of the registry itself.

use std::process::Stdio;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

/// A named interactive shell session accepting injected input lines.
#[derive(Debug)]
pub struct TerminalSession {
    name: String,
    input: mpsc::UnboundedSender<String>,
}

impl TerminalSession {
    /// Spawn the user's shell (`$SHELL`, falling back to `/bin/sh`) and wire
    /// its output back to the client log.
    pub fn spawn_shell(name: &str, client: Client) -> Result<Self> {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());

        let mut child = Command::new(&shell)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn shell '{}'", shell))?;

        let mut stdin = child.stdin.take().context("shell stdin unavailable")?;
        let stdout = child.stdout.take().context("shell stdout unavailable")?;
        let stderr = child.stderr.take().context("shell stderr unavailable")?;

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        // Input pump: injected command lines become shell input.
        let session_name = name.to_string();
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                if stdin.write_all(line.as_bytes()).await.is_err()
                    || stdin.write_all(b"\n").await.is_err()
                    || stdin.flush().await.is_err()
                {
                    log::warn!("terminal '{}': shell stdin closed", session_name);
                    break;
                }
            }
        });

        relay_output(name, &client, stdout);
        relay_output(name, &client, stderr);

        let session_name = name.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => log::info!("terminal '{}': shell exited with {}", session_name, status),
                Err(e) => log::warn!("terminal '{}': wait failed: {}", session_name, e),
            }
        });

        Ok(Self {
            name: name.to_string(),
            input: tx,
        })
    }

    /// Session backed by a bare channel instead of a shell process, so tests
    /// can observe exactly what would have been typed into the terminal.
    #[cfg(test)]
    pub fn with_input_channel(name: &str) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                name: name.to_string(),
                input: tx,
            },
            rx,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit one command line to the session's input stream.
    pub fn send_text(&self, line: &str) {
        if self.input.send(line.to_string()).is_err() {
            log::warn!("terminal '{}' is gone; dropped command line", self.name);
        }
    }
}

/// Forward shell output lines to the editor's log surface.
fn relay_output(
    name: &str,
    client: &Client,
    stream: impl tokio::io::AsyncRead + Unpin + Send + 'static,
) {
    let name = name.to_string();
    let client = client.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            client
                .log_message(MessageType::LOG, format!("[{}] {}", name, line))
                .await;
        }
    });
}

/// The list of currently open terminal sessions.
#[derive(Debug, Default)]
pub struct TerminalRegistry {
    sessions: Vec<Arc<TerminalSession>>,
}

impl TerminalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear search by exact name; first match wins.
    pub fn find(&self, name: &str) -> Option<Arc<TerminalSession>> {
        self.sessions.iter().find(|s| s.name() == name).cloned()
    }

    /// Explicit lookup-then-create: reuse the first session with this name,
    /// otherwise create one and register it.
    pub fn find_or_create<F>(&mut self, name: &str, create: F) -> Result<Arc<TerminalSession>>
    where
        F: FnOnce() -> Result<TerminalSession>,
    {
        if let Some(session) = self.find(name) {
            return Ok(session);
        }
        let session = Arc::new(create()?);
        self.sessions.push(session.clone());
        Ok(session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_on_empty_registry_is_none() {
        let registry = TerminalRegistry::new();
        assert!(registry.find("NOMA").is_none());
    }

    #[test]
    fn find_or_create_creates_once_then_reuses() {
        let mut registry = TerminalRegistry::new();
        let mut created = 0;

        let first = registry
            .find_or_create("NOMA", || {
                created += 1;
                Ok(TerminalSession::with_input_channel("NOMA").0)
            })
            .unwrap();
        let second = registry
            .find_or_create("NOMA", || {
                created += 1;
                Ok(TerminalSession::with_input_channel("NOMA").0)
            })
            .unwrap();

        assert_eq!(created, 1);
        assert_eq!(registry.session_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn sessions_with_different_names_are_distinct() {
        let mut registry = TerminalRegistry::new();
        let a = registry
            .find_or_create("NOMA", || Ok(TerminalSession::with_input_channel("NOMA").0))
            .unwrap();
        let b = registry
            .find_or_create("other", || {
                Ok(TerminalSession::with_input_channel("other").0)
            })
            .unwrap();

        assert_eq!(registry.session_count(), 2);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn send_text_delivers_the_literal_line() {
        let (session, mut rx) = TerminalSession::with_input_channel("NOMA");
        session.send_text("cargo run -- run \"/tmp/a.noma\"");
        assert_eq!(
            rx.try_recv().unwrap(),
            "cargo run -- run \"/tmp/a.noma\""
        );
    }

    #[test]
    fn create_failure_registers_nothing() {
        let mut registry = TerminalRegistry::new();
        let result = registry.find_or_create("NOMA", || Err(anyhow::anyhow!("spawn failed")));
        assert!(result.is_err());
        assert_eq!(registry.session_count(), 0);
        assert!(registry.find("NOMA").is_none());
    }
}
