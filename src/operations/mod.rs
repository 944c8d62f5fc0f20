//! Business logic layer
//!
//! Operations that are shared by multiple frontends (interactive shell, one-shot CLI)

pub mod tasks;
