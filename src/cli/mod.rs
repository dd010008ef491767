//! # CLI Module
//!
//! Command-line entry points of Jam Jump. The binary is a thin launcher: it
//! loads the configuration, starts the web server and optionally opens the
//! start page in the default browser. Everything else happens in the browser.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the web server
//!
//! ## Usage Patterns
//!
//! ```bash
//! jamjump serve                          # Listen on SERVER_ADDRESS
//! jamjump serve --addr 127.0.0.1:8080    # Override the listen address
//! jamjump serve --open                   # Open the start page once listening
//! jamjump completions zsh                # Shell completions
//! ```
//!
//! ## Error Handling
//!
//! Configuration and bind failures are fatal: they are reported with the
//! `error!` macro, which terminates the process.

mod serve;

pub use serve::serve;
