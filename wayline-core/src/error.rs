//! Error types for menu dispatch and leaf-action flows.

use thiserror::Error;

use crate::menu::MenuLabel;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The label does not name any top-level menu.
    #[error("unknown menu label: {0}")]
    UnknownMenu(String),

    /// The label is valid but the installed descriptor has no such menu
    /// (e.g. the application menu on a non-mac platform).
    #[error("menu not present in the installed descriptor: {0}")]
    MenuNotFound(MenuLabel),
}

/// Failure of an opaque flow runner or dialog.
///
/// These never propagate past the leaf action that started the flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("cancelled by user")]
    Cancelled,

    #[error("flow failed: {0}")]
    Failed(String),
}
