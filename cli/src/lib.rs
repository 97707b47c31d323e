// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line console for the Edudesk school administration backend.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod arg;
mod cli;
mod cmd_class;
mod cmd_event;
mod cmd_resource;
mod cmd_session;
mod cmd_teacher;
mod config;
mod event_formatter;
mod prompt;
mod resource_formatter;
mod table;
mod teacher_formatter;
mod util;

pub use crate::cli::{Cli, Commands, Context, run};
pub use crate::config::{Config, parse_config};
