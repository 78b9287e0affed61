// ============================================================================
// src/error.rs – Error kinds surfaced by hooks and the command driver
// ============================================================================

use thiserror::Error;

/// Exit status for usage and parameter validation failures.
pub const EXIT_USAGE: i32 = 252;
/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 255;

/// Errors a customization hook may raise back into the driver.
#[derive(Debug, Error)]
pub enum HookError {
    /// Raised while binding arguments, before any request is sent.
    #[error("{0}")]
    ParamValidation(String),

    /// Raised after the call succeeded; detail is only ever logged.
    #[error("Unable to decrypt password ciphertext using provided private key file.")]
    Decrypt,
}

/// Internal reasons a password decryption can fail. Never printed at
/// default verbosity; collapsed into [`HookError::Decrypt`].
#[derive(Debug, Error)]
pub enum DecryptFailure {
    #[error("read key file: {0}")]
    ReadKey(#[from] std::io::Error),

    #[error("private key is not a PEM encoded RSA key (pkcs1: {pkcs1}; pkcs8: {pkcs8})")]
    KeyFormat { pkcs1: String, pkcs8: String },

    #[error("ciphertext is not a string")]
    CiphertextType,

    #[error("ciphertext is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("rsa decryption failed: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("plaintext is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("cannot write plaintext into response: {0}")]
    Response(String),
}

/// Failure at the command driver boundary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("the following arguments are required: command")]
    MissingCommand,

    #[error("Invalid choice '{0}', run with --help to list the available commands")]
    UnknownCommand(String),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(e) => e.exit_code(),
            CliError::MissingCommand
            | CliError::UnknownCommand(_)
            | CliError::Hook(HookError::ParamValidation(_)) => EXIT_USAGE,
            CliError::Hook(HookError::Decrypt) | CliError::Other(_) => EXIT_FAILURE,
        }
    }
}
