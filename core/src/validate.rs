// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Field validation shared by all record drafts.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ValidationRules;
use crate::types::{PayloadError, RecordId};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@(?i:gmail\.com)$").expect("email pattern must compile"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern must compile"));

/// A record that carries a server-assigned identifier.
pub trait Identified {
    /// The identifier of the record.
    fn id(&self) -> &RecordId;
}

/// Client-side validation of a draft against its peer collection.
pub trait Validate {
    /// Field identity used as the error map key.
    type Field: Copy + Ord + fmt::Debug + fmt::Display;

    /// Records of the same entity type the draft is checked against.
    type Record: Identified;

    /// Checks every field and reports all errors together.
    ///
    /// An empty map means the draft may be submitted.
    fn validate(
        &self,
        peers: &Peers<'_, Self::Record>,
        rules: &ValidationRules,
    ) -> FieldErrors<Self::Field>;
}

/// Form state that can be submitted once it validates.
pub trait Draft: Validate {
    /// The request body written to the API.
    type Payload: serde::Serialize;

    /// Builds the request body, failing on save-time checks that are not
    /// field validators.
    fn to_payload(&self) -> Result<Self::Payload, PayloadError>;
}

/// The existing collection a draft is validated against.
///
/// When editing, the record being edited is excluded from uniqueness checks.
#[derive(Debug)]
pub struct Peers<'a, R> {
    records: &'a [R],
    editing: Option<&'a RecordId>,
}

impl<R> Clone for Peers<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Peers<'_, R> {}

impl<'a, R: Identified> Peers<'a, R> {
    /// Peers for a record that does not exist yet.
    pub const fn creating(records: &'a [R]) -> Self {
        Self {
            records,
            editing: None,
        }
    }

    /// Peers for an update of the record with the given identifier.
    pub const fn editing(records: &'a [R], id: &'a RecordId) -> Self {
        Self {
            records,
            editing: Some(id),
        }
    }

    /// Whether the draft is an edit of an existing record.
    pub const fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// The stored version of the record being edited, if it is among the peers.
    pub fn original(&self) -> Option<&'a R> {
        let id = self.editing?;
        self.records.iter().find(|r| r.id() == id)
    }

    /// All peers except the record being edited.
    pub fn others(&self) -> impl Iterator<Item = &'a R> + 'a {
        let editing = self.editing;
        self.records
            .iter()
            .filter(move |r| editing.is_none_or(|id| r.id() != id))
    }
}

/// Field-scoped validation messages. Absence of a key means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field. The first message for a field wins.
    pub fn add(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Records `message` when the trimmed text is empty.
    pub fn require_text(&mut self, field: F, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Records `message` when the collection is empty.
    pub fn require_any<T>(&mut self, field: F, values: &[T], message: &str) {
        if values.is_empty() {
            self.add(field, message);
        }
    }

    /// The message for a field, if it is invalid.
    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether the field has an error.
    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The invalid fields in ascending order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> btree_map::Iter<'_, F, String> {
        self.errors.iter()
    }
}

impl<'a, F: Ord> IntoIterator for &'a FieldErrors<F> {
    type Item = (&'a F, &'a String);
    type IntoIter = btree_map::Iter<'a, F, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl<F: Ord + fmt::Display> fmt::Display for FieldErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Whether the trimmed address is a `gmail.com` address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Whether the trimmed number is exactly ten decimal digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dummy(RecordId);

    impl Identified for Dummy {
        fn id(&self) -> &RecordId {
            &self.0
        }
    }

    #[test]
    fn accepts_gmail_addresses_only() {
        assert!(is_valid_email("a@gmail.com"));
        assert!(is_valid_email("  first.last+tag@GMAIL.COM "));
        assert!(!is_valid_email("a@yahoo.com"));
        assert!(!is_valid_email("a@gmail.com.evil"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("a b@gmail.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn accepts_ten_digit_phones_only() {
        assert!(is_valid_phone("9998887776"));
        assert!(is_valid_phone(" 0123456789 "));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("99988877761"));
        assert!(!is_valid_phone("999-888-7776"));
        assert!(!is_valid_phone("٠١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn peers_exclude_record_being_edited() {
        let records = vec![Dummy("a".into()), Dummy("b".into()), Dummy("c".into())];
        let id = RecordId::from("b");

        let creating = Peers::creating(&records);
        assert!(!creating.is_edit());
        assert_eq!(creating.others().count(), 3);

        let editing = Peers::editing(&records, &id);
        assert!(editing.is_edit());
        let ids: Vec<_> = editing.others().map(|r| r.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(editing.original().map(|r| r.0.as_str()), Some("b"));
        assert!(creating.original().is_none());
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add(1, "first");
        errors.add(1, "second");
        errors.require_text(2, "   ", "blank");
        errors.require_text(3, " x ", "never");
        errors.require_any::<u8>(4, &[], "empty");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(1), Some("first"));
        assert!(errors.contains(2));
        assert!(!errors.contains(3));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(errors.to_string(), "1: first\n2: blank\n4: empty");
    }
}
