// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the Edudesk backend: bearer-token session, typed CRUD
//! endpoints and the synchronizer keeping an in-memory copy of each
//! collection.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod error;
mod http;
mod session;
mod sync;

pub use crate::client::{ApiClient, Endpoint};
pub use crate::config::ApiConfig;
pub use crate::error::{ApiError, SyncError};
pub use crate::session::{SESSION_FILE, Session};
pub use crate::sync::Synchronizer;
