// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(reviewdeck::config::error))]
    Config(String),

    #[error("No API token configured")]
    #[diagnostic(
        code(reviewdeck::config::missing_token),
        help("Set REVIEWDECK_API_TOKEN (or HF_TOKEN) before starting the server")
    )]
    MissingToken,

    #[error("Inference request to '{provider}' failed: {message}")]
    #[diagnostic(code(reviewdeck::inference::error))]
    Inference { provider: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(reviewdeck::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
