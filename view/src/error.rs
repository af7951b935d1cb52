//! Errors raised outside the view's own operations.
//!
//! View operations never fail: API failures degrade to page messages. What
//! remains is setup (configuration, building the HTTP client) and the
//! terminal front-end's own I/O.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Error, Debug)]
pub enum ViewError {
    /// A configuration value could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A shell line could not be understood.
    #[error("Invalid command '{input}': {message}")]
    Command { input: String, message: String },
}

impl ViewError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn command(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            input: input.into(),
            message: message.into(),
        }
    }
}
