//! Toolchain actions and their wire-level command lines.
//!
//! The two actions the integration exposes map one-to-one onto the NOMA
//! compiler's `run` and `build` sub-commands. The command-line strings
//! emitted here are the contract with the external toolchain: sub-command
//! name, flag ordering, and argument quoting are fixed.

use std::path::Path;

/// Default invocation prefix for the NOMA toolchain.
pub const DEFAULT_TOOLCHAIN: &str = "cargo run --";

/// A user-invocable toolchain action on the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainAction {
    Run,
    Build,
}

impl ToolchainAction {
    /// Stable command identifier advertised through `executeCommand`.
    pub fn command_id(&self) -> &'static str {
        match self {
            ToolchainAction::Run => "noma.run",
            ToolchainAction::Build => "noma.build",
        }
    }

    /// Resolve an `executeCommand` identifier back to an action.
    pub fn from_command_id(id: &str) -> Option<Self> {
        match id {
            "noma.run" => Some(ToolchainAction::Run),
            "noma.build" => Some(ToolchainAction::Build),
            _ => None,
        }
    }

    /// Sub-command passed to the external toolchain.
    pub fn subcommand(&self) -> &'static str {
        match self {
            ToolchainAction::Run => "run",
            ToolchainAction::Build => "build",
        }
    }

    /// All command identifiers, in the order they are advertised.
    pub fn all_command_ids() -> Vec<String> {
        [ToolchainAction::Run, ToolchainAction::Build]
            .iter()
            .map(|a| a.command_id().to_string())
            .collect()
    }

    /// Build the literal shell line sent to the terminal session, e.g.
    /// `cargo run -- run "/path/to/file.noma"`.
    pub fn command_line(&self, toolchain: &str, path: &Path) -> String {
        format!("{} {} \"{}\"", toolchain, self.subcommand(), path.display())
    }
}
