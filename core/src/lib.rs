// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Edudesk core: school records, client-side validation, calendar membership
//! and filtering. Everything in this crate is pure and free of I/O.

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
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod calendar;
mod class;
mod config;
mod event;
mod filter;
mod resource;
mod teacher;
mod types;
mod validate;

pub use crate::calendar::{
    DateSpan, DayCell, Dated, GridCell, Month, RangePosition, WEEK_COLUMNS, days_in_month,
    monthly_filter, sort_by_start,
};
pub use crate::class::Class;
pub use crate::config::{APP_NAME, ValidationRules};
pub use crate::event::{
    Audience, Event, EventCategory, EventDraft, EventField, EventFilter, EventPayload,
    EventSearchField, EventStatus,
};
pub use crate::filter::{ALL, ALL_CLASSES, Facet, Filter, Searchable, apply_filters};
pub use crate::resource::{
    LibraryResource, ResourceDraft, ResourceField, ResourceFilter, ResourcePayload,
    ResourceSearchField, ResourceType,
};
pub use crate::teacher::{
    MIN_PASSWORD_LEN, Teacher, TeacherDraft, TeacherField, TeacherFilter, TeacherPayload,
    TeacherSearchField,
};
pub use crate::types::{ParseError, PayloadError, RecordId};
pub use crate::validate::{
    Draft, FieldErrors, Identified, Peers, Validate, is_valid_email, is_valid_phone,
};
