//! Internal modules for the tournaments mock server.
//!
//! The server keeps tournaments in memory and serves the same REST contract
//! the client talks to, so every client operation has a real counterpart.

pub mod api;
pub mod config;
pub mod logging;
pub mod repository;
pub mod seed;
