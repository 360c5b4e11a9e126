//! The command dispatcher.
//!
//! Both user-invocable operations share one sequence: check that an active
//! NOMA document exists, persist its buffer, find or create the reserved
//! terminal session, bring it to the foreground, and submit the literal
//! toolchain command line. Precondition failures abort before any save or
//! terminal access.
//!
//! The editor-facing surface sits behind [`EditorFrontend`] so the sequence
//! can be exercised without a live LSP client.

use std::path::PathBuf;

use anyhow::Result;

use crate::terminal::{TerminalRegistry, TerminalSession};
use crate::toolchain::ToolchainAction;

/// Language identifier the active document must declare.
pub const LANGUAGE_ID: &str = "noma";

/// Reserved name of the single terminal session this integration owns.
pub const TERMINAL_NAME: &str = "NOMA";

/// User-visible message when no document has focus.
pub const NO_ACTIVE_EDITOR: &str = "No active editor";

/// User-visible message when the focused document is not NOMA source.
pub const NOT_A_NOMA_FILE: &str = "Not a NOMA file";

/// Editor-facing side of the dispatcher: error popups and the terminal
/// foreground announcement.
#[tower_lsp::async_trait]
pub trait EditorFrontend: Send + Sync {
    async fn show_error(&self, message: &str);
    async fn show_terminal(&self, name: &str);
}

/// Snapshot of the focused document taken at dispatch time.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    pub path: PathBuf,
    pub language_id: String,
    pub content: String,
}

/// Run one toolchain action against the active document.
///
/// `spawn_session` is only invoked when no session named [`TERMINAL_NAME`]
/// is open yet.
pub async fn dispatch<F, S>(
    action: ToolchainAction,
    active: Option<ActiveDocument>,
    toolchain: &str,
    terminals: &mut TerminalRegistry,
    frontend: &F,
    spawn_session: S,
) where
    F: EditorFrontend,
    S: FnOnce(&str) -> Result<TerminalSession>,
{
    let Some(doc) = active else {
        frontend.show_error(NO_ACTIVE_EDITOR).await;
        return;
    };

    if doc.language_id != LANGUAGE_ID {
        frontend.show_error(NOT_A_NOMA_FILE).await;
        return;
    }

    // Persist pending edits before the toolchain reads the file. This is
    // the one awaited suspension point; a failure here is not part of the
    // user-visible error surface.
    if let Err(e) = tokio::fs::write(&doc.path, &doc.content).await {
        log::error!("failed to save '{}': {}", doc.path.display(), e);
        return;
    }

    let session = match terminals.find_or_create(TERMINAL_NAME, || spawn_session(TERMINAL_NAME)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("failed to open terminal '{}': {}", TERMINAL_NAME, e);
            return;
        }
    };

    frontend.show_terminal(session.name()).await;
    session.send_text(&action.command_line(toolchain, &doc.path));
}
