// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::ValidationRules;
use crate::filter::{Facet, Filter, Searchable};
use crate::types::{PayloadError, RecordId};
use crate::validate::{Draft, FieldErrors, Identified, Peers, Validate};

/// A library resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LibraryResource {
    /// The identifier of the resource.
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    /// Title of the resource.
    #[serde(default)]
    pub title: String,

    /// Subject, free text.
    #[serde(default)]
    pub subject: String,

    /// Topic within the subject.
    #[serde(default)]
    pub topic: Option<String>,

    /// Class labels the resource applies to.
    #[serde(default)]
    pub classes: Vec<String>,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Kind of resource.
    #[serde(rename = "type")]
    pub kind: ResourceType,

    /// The link itself, or the name of an uploaded file.
    #[serde(default)]
    pub url: String,
}

impl Identified for LibraryResource {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Kind of a library resource.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ResourceType {
    /// PDF document.
    Pdf,

    /// Image file.
    Image,

    /// Video file.
    Video,

    /// External link.
    Link,
}

/// Fields of a resource form, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceField {
    /// `title`
    Title,
    /// `subject`
    Subject,
    /// `topic`
    Topic,
    /// `classes`
    Classes,
    /// `description`
    Description,
    /// `type`
    #[strum(serialize = "type")]
    Kind,
    /// `url`
    Url,
}

/// Form state for creating or editing a library resource.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceDraft {
    /// Title of the resource.
    pub title: String,

    /// Subject, free text.
    pub subject: String,

    /// Topic, blank when unset.
    pub topic: String,

    /// Selected class labels.
    pub classes: Vec<String>,

    /// Free-text description.
    pub description: String,

    /// Selected kind, `None` until chosen.
    pub kind: Option<ResourceType>,

    /// Link or uploaded file name.
    pub url: String,
}

impl From<&LibraryResource> for ResourceDraft {
    fn from(resource: &LibraryResource) -> Self {
        Self {
            title: resource.title.clone(),
            subject: resource.subject.clone(),
            topic: resource.topic.clone().unwrap_or_default(),
            classes: resource.classes.clone(),
            description: resource.description.clone(),
            kind: Some(resource.kind),
            url: resource.url.clone(),
        }
    }
}

impl Validate for ResourceDraft {
    type Field = ResourceField;
    type Record = LibraryResource;

    fn validate(
        &self,
        _peers: &Peers<'_, LibraryResource>,
        _rules: &ValidationRules,
    ) -> FieldErrors<ResourceField> {
        let mut errors = FieldErrors::new();
        errors.require_text(ResourceField::Title, &self.title, "Title is required");
        errors.require_text(ResourceField::Subject, &self.subject, "Subject is required");
        if self.kind.is_none() {
            errors.add(ResourceField::Kind, "Select a resource type");
        }
        errors
    }
}

/// Request body for creating or updating a library resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResourcePayload {
    /// See [`LibraryResource::title`].
    pub title: String,
    /// See [`LibraryResource::subject`].
    pub subject: String,
    /// See [`LibraryResource::topic`]. Sent empty to clear it.
    pub topic: String,
    /// See [`LibraryResource::classes`].
    pub classes: Vec<String>,
    /// See [`LibraryResource::description`].
    pub description: String,
    /// See [`LibraryResource::kind`].
    #[serde(rename = "type")]
    pub kind: ResourceType,
    /// See [`LibraryResource::url`].
    pub url: String,
}

impl Draft for ResourceDraft {
    type Payload = ResourcePayload;

    fn to_payload(&self) -> Result<ResourcePayload, PayloadError> {
        let kind = self
            .kind
            .ok_or(PayloadError::Missing("Select a resource type"))?;
        let url = self.url.trim();
        if url.is_empty() {
            return Err(PayloadError::Missing("Provide a link or upload a file"));
        }

        Ok(ResourcePayload {
            title: self.title.trim().to_string(),
            subject: self.subject.trim().to_string(),
            topic: self.topic.trim().to_string(),
            classes: self.classes.clone(),
            description: self.description.trim().to_string(),
            kind,
            url: url.to_string(),
        })
    }
}

/// Fields covered by resource search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum ResourceSearchField {
    /// [`LibraryResource::title`]
    Title,
    /// [`LibraryResource::subject`]
    Subject,
    /// [`LibraryResource::topic`]
    Topic,
    /// [`LibraryResource::description`]
    Description,
    /// [`LibraryResource::id`]
    Id,
}

impl Searchable for LibraryResource {
    type SearchField = ResourceSearchField;

    fn search_text(&self, field: ResourceSearchField) -> Option<&str> {
        match field {
            ResourceSearchField::Title => Some(&self.title),
            ResourceSearchField::Subject => Some(&self.subject),
            ResourceSearchField::Topic => self.topic.as_deref(),
            ResourceSearchField::Description => Some(&self.description),
            ResourceSearchField::Id => Some(self.id.as_str()),
        }
    }
}

/// Search and facets for the library list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Free-text query.
    pub search: String,

    /// Required subject.
    pub subject: Facet<String>,

    /// Class label the resource must apply to.
    pub class: Facet<String>,

    /// Required kind.
    pub kind: Facet<ResourceType>,
}

impl Filter<LibraryResource> for ResourceFilter {
    fn matches(&self, resource: &LibraryResource) -> bool {
        resource.matches_search(&self.search)
            && self.subject.admits(&resource.subject)
            && self.class.admits_any(&resource.classes)
            && self.kind.admits(&resource.kind)
    }
}
