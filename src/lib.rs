//! NOMA Language Server
//!
//! Editor integration for the NOMA language, delivered over the Language
//! Server Protocol.
//!
//! This library provides:
//! - The run/build command dispatcher
//! - Reusable named terminal sessions
//! - LSP protocol implementation
//! - Configuration management

pub mod config;
pub mod dispatch;
pub mod lsp;
pub mod terminal;
pub mod toolchain;

// Re-exports for clean public API
pub use config::Config;
pub use dispatch::{ActiveDocument, EditorFrontend, dispatch};
pub use terminal::{TerminalRegistry, TerminalSession};
pub use toolchain::ToolchainAction;
