// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::RecordId;
use crate::validate::Identified;

/// A class section, read-only from this application.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Class {
    /// The identifier of the class.
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    /// Class name, e.g. `10`.
    pub class_name: String,

    /// Section, e.g. `A`.
    #[serde(default)]
    pub section: String,
}

impl Class {
    /// Display label `{class_name}-{section}`, the value stored on teachers
    /// and resources.
    pub fn label(&self) -> String {
        format!("{}-{}", self.class_name, self.section)
    }

    /// Labels of all classes, in input order.
    pub fn labels(classes: &[Class]) -> Vec<String> {
        classes.iter().map(Class::label).collect()
    }
}

impl Identified for Class {
    fn id(&self) -> &RecordId {
        &self.id
    }
}
