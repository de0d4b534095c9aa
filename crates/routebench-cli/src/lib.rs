//! Routebench CLI library.
//!
//! Logging setup, terminal styling and report formatting shared by the
//! `routebench` binary and its tests.

pub mod logging;
pub mod output;
pub mod terminal;
