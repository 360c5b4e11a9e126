use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::dispatch::{ActiveDocument, EditorFrontend, dispatch};
use crate::lsp::backend::Backend;
use crate::terminal::TerminalSession;
use crate::toolchain::ToolchainAction;

/// Trait for handling `workspace/executeCommand` requests
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>>;
}

#[tower_lsp::async_trait]
impl EditorFrontend for Backend {
    async fn show_error(&self, message: &str) {
        self.client.show_message(MessageType::ERROR, message).await;
    }

    async fn show_terminal(&self, name: &str) {
        // An LSP server cannot focus editor UI; the session's visible
        // surface is the client log.
        self.client
            .log_message(MessageType::INFO, format!("[{}] terminal in foreground", name))
            .await;
    }
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>> {
        let Some(action) = ToolchainAction::from_command_id(&params.command) else {
            return Err(tower_lsp::jsonrpc::Error::invalid_params(format!(
                "unknown command: {}",
                params.command
            )));
        };

        let active = self.snapshot_active_document().await;

        let client = self.client.clone();
        let mut terminals = self.terminals.lock().await;
        dispatch(
            action,
            active,
            &self.config.toolchain,
            &mut terminals,
            self,
            move |name| TerminalSession::spawn_shell(name, client),
        )
        .await;

        Ok(None)
    }
}

impl Backend {
    /// Snapshot the focused document for the dispatcher, if there is one
    /// with a real file path.
    async fn snapshot_active_document(&self) -> Option<ActiveDocument> {
        let uri = self.active_document.lock().await.clone()?;

        let docs = self.documents.lock().await;
        let state = docs.get(&uri)?;

        let path = match uri.to_file_path() {
            Ok(path) => path,
            Err(()) => {
                // Untitled or remote buffer; nothing on disk to run
                log::warn!("active document '{}' has no file path", uri);
                return None;
            }
        };

        Some(ActiveDocument {
            path,
            language_id: state.language_id.clone(),
            content: state.content.clone(),
        })
    }
}
