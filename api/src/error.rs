// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use edudesk_core::{FieldErrors, PayloadError};
use reqwest::StatusCode;

/// Errors talking to the backend.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connection, timeout, TLS.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status. The message is the one the
    /// server supplied, or a generic one when it did not.
    #[error("{message}")]
    Api {
        /// Response status.
        status: StatusCode,
        /// User-facing message.
        message: String,
    },

    /// The token was rejected. The session has been cleared.
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// No token is held.
    #[error("Not logged in, run `edudesk login` first")]
    MissingCredential,

    /// The response body did not have the expected shape.
    #[error("Invalid server response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading or writing the session file failed.
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The HTTP status behind the error, if the server answered.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

/// Errors from a synchronizer mutation.
#[derive(Debug, thiserror::Error)]
pub enum SyncError<F: Ord + fmt::Debug + fmt::Display> {
    /// The draft failed validation; nothing was sent.
    #[error("Please fix the highlighted fields:\n{0}")]
    Invalid(FieldErrors<F>),

    /// The draft validated but a save-time check failed; nothing was sent.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The request or the refresh after it failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Another mutation is still in flight.
    #[error("Another change is still being saved")]
    Busy,
}
