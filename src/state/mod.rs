/// State management module
///
/// This module handles all application state, including:
/// - The classification response data model (data.rs)
/// - Loading and validating the selected image (selection.rs)
/// - The shell state machine and its stale-response guard (shell.rs)

pub mod data;
pub mod selection;
pub mod shell;
