// Module exports for CLI subcommands.
//
// Each module handles a specific subcommand; main.rs only parses arguments
// and dispatches.

pub mod compare;
pub mod inspect;
