//! Internal modules for the tournaments client.
//!
//! This library provides command parsing, configuration, prompts and the two
//! front ends (TUI and line mode) used by the th_client binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod presentation;
pub mod prompt;
pub mod tui_app;
