// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer};

use crate::class::Class;
use crate::config::ValidationRules;
use crate::filter::{Facet, Filter, Searchable};
use crate::types::{PayloadError, RecordId};
use crate::validate::{
    Draft, FieldErrors, Identified, Peers, Validate, is_valid_email, is_valid_phone,
};

/// Minimum length of a teacher password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A teacher record as returned by the API. The password is never read back.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Teacher {
    /// The identifier of the record.
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    /// Employment id, unique across teachers.
    #[serde(default)]
    pub user_id: String,

    /// Full name.
    #[serde(default)]
    pub full_name: String,

    /// Gmail address, unique across teachers.
    #[serde(default)]
    pub email: String,

    /// Ten-digit phone number, unique across teachers.
    #[serde(default)]
    pub phone: String,

    /// Postal address.
    #[serde(default)]
    pub address: String,

    /// Label of the class this teacher is class teacher of.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub class_teacher: Option<String>,

    /// Profile image URL.
    #[serde(default, alias = "profileImage", deserialize_with = "empty_as_none")]
    pub profile_image: Option<String>,
}

impl Identified for Teacher {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.trim().is_empty()))
}

/// Fields of a teacher form, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TeacherField {
    /// `user_id`
    UserId,
    /// `full_name`
    FullName,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `address`
    Address,
    /// `class_teacher`
    ClassTeacher,
    /// `profile_image`
    ProfileImage,
    /// `password`
    Password,
}

/// Form state for creating or editing a teacher.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeacherDraft {
    /// Employment id.
    pub user_id: String,

    /// Full name.
    pub full_name: String,

    /// Gmail address.
    pub email: String,

    /// Ten-digit phone number.
    pub phone: String,

    /// Postal address.
    pub address: String,

    /// Class label, `None` when not a class teacher.
    pub class_teacher: Option<String>,

    /// Profile image URL returned by the media host.
    pub profile_image: Option<String>,

    /// New password. Blank on edit keeps the current one.
    pub password: String,
}

impl From<&Teacher> for TeacherDraft {
    fn from(teacher: &Teacher) -> Self {
        Self {
            user_id: teacher.user_id.clone(),
            full_name: teacher.full_name.clone(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone(),
            address: teacher.address.clone(),
            class_teacher: teacher.class_teacher.clone(),
            profile_image: teacher.profile_image.clone(),
            password: String::new(),
        }
    }
}

impl TeacherDraft {
    /// Checks the class-teacher assignment against the known classes.
    pub fn class_error(&self, classes: &[Class]) -> Option<String> {
        let label = self.class_teacher.as_deref()?;
        if classes.iter().any(|c| c.label() == label) {
            None
        } else {
            Some(format!("Unknown class `{label}`"))
        }
    }
}

impl Validate for TeacherDraft {
    type Field = TeacherField;
    type Record = Teacher;

    fn validate(&self, peers: &Peers<'_, Teacher>, _rules: &ValidationRules) -> FieldErrors<TeacherField> {
        let mut errors = FieldErrors::new();

        let user_id = self.user_id.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();

        errors.require_text(TeacherField::UserId, user_id, "Employee ID is required");
        errors.require_text(TeacherField::FullName, &self.full_name, "Full name is required");
        errors.require_text(TeacherField::Email, email, "Email is required");
        errors.require_text(TeacherField::Phone, phone, "Phone number is required");
        errors.require_text(TeacherField::Address, &self.address, "Address is required");

        if !email.is_empty() && !is_valid_email(email) {
            errors.add(TeacherField::Email, "Enter a valid Gmail address (example@gmail.com)");
        }
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.add(TeacherField::Phone, "Phone number must be exactly 10 digits");
        }

        // an edit may keep its current values even when a peer already shares them
        let original = peers.original();
        let check_user_id = !user_id.is_empty()
            && original.is_none_or(|t| !t.user_id.trim().eq_ignore_ascii_case(user_id));
        let check_email =
            !email.is_empty() && original.is_none_or(|t| !t.email.trim().eq_ignore_ascii_case(email));
        let check_phone = !phone.is_empty() && original.is_none_or(|t| t.phone.trim() != phone);

        for other in peers.others() {
            if check_user_id && other.user_id.trim().eq_ignore_ascii_case(user_id) {
                errors.add(TeacherField::UserId, "Employee ID already exists");
            }
            if check_email && other.email.trim().eq_ignore_ascii_case(email) {
                errors.add(TeacherField::Email, "Email already exists");
            }
            if check_phone && other.phone.trim() == phone {
                errors.add(TeacherField::Phone, "Phone number already exists");
            }
        }

        if self.password.trim().is_empty() {
            if !peers.is_edit() {
                errors.add(TeacherField::Password, "Password is required");
            }
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                TeacherField::Password,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }

        errors
    }
}

/// Request body for creating or updating a teacher.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TeacherPayload {
    /// See [`Teacher::user_id`].
    pub user_id: String,
    /// See [`Teacher::full_name`].
    pub full_name: String,
    /// See [`Teacher::email`].
    pub email: String,
    /// See [`Teacher::phone`].
    pub phone: String,
    /// See [`Teacher::address`].
    pub address: String,
    /// Class label, or empty when not a class teacher.
    pub class_teacher: String,
    /// See [`Teacher::profile_image`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Omitted to keep the current password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Draft for TeacherDraft {
    type Payload = TeacherPayload;

    fn to_payload(&self) -> Result<TeacherPayload, PayloadError> {
        Ok(TeacherPayload {
            user_id: self.user_id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            class_teacher: self.class_teacher.clone().unwrap_or_default(),
            profile_image: self.profile_image.clone(),
            password: (!self.password.trim().is_empty()).then(|| self.password.clone()),
        })
    }
}

/// Fields covered by teacher search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum TeacherSearchField {
    /// [`Teacher::full_name`]
    FullName,
    /// [`Teacher::user_id`]
    UserId,
    /// [`Teacher::email`]
    Email,
    /// [`Teacher::phone`]
    Phone,
}

impl Searchable for Teacher {
    type SearchField = TeacherSearchField;

    fn search_text(&self, field: TeacherSearchField) -> Option<&str> {
        match field {
            TeacherSearchField::FullName => Some(&self.full_name),
            TeacherSearchField::UserId => Some(&self.user_id),
            TeacherSearchField::Email => Some(&self.email),
            TeacherSearchField::Phone => Some(&self.phone),
        }
    }
}

/// Search and facets for the teacher list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeacherFilter {
    /// Free-text query.
    pub search: String,

    /// Class the teacher must be class teacher of.
    pub class: Facet<String>,
}

impl Filter<Teacher> for TeacherFilter {
    fn matches(&self, teacher: &Teacher) -> bool {
        let class = match &teacher.class_teacher {
            Some(label) => self.class.admits(label),
            None => self.class.is_all(),
        };
        class && teacher.matches_search(&self.search)
    }
}
