// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;

use colored::Colorize;
use edudesk_core::{Identified, RecordId};

/// Looks a record up in a fetched collection.
pub fn find_record<'a, R: Identified>(
    records: &'a [R],
    id: &RecordId,
    noun: &str,
) -> Result<&'a R, Box<dyn Error>> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| format!("No {noun} with id `{id}`").into())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✔".green(), message);
}

/// Overwrites `target` when a new value was given.
pub fn overlay<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Comma-separated list of tags.
pub fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
