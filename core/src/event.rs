// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;

use crate::calendar::Dated;
use crate::config::ValidationRules;
use crate::filter::{Facet, Filter, Searchable};
use crate::types::{PayloadError, RecordId, wire_date};
use crate::validate::{Draft, FieldErrors, Identified, Peers, Validate};

/// A school event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// The identifier of the event.
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,

    /// The title shown in lists.
    #[serde(default)]
    pub title: String,

    /// The name of the event.
    #[serde(default)]
    pub event_name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Category tags, in the order they were selected.
    #[serde(default)]
    pub event_type: Vec<EventCategory>,

    /// First day of the event.
    #[serde(with = "wire_date")]
    pub start_date: NaiveDate,

    /// Last day of the event, `None` for a single-day event.
    #[serde(with = "wire_date::option", default)]
    pub end_date: Option<NaiveDate>,

    /// Lifecycle status.
    #[serde(default)]
    pub status: EventStatus,

    /// Who the event is for. The API reads it back as `targetGroups`.
    #[serde(rename = "targetGroups", alias = "targetAudience", default)]
    pub target_audience: Vec<Audience>,
}

impl Identified for Event {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for Event {
    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// Event category tag.
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
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[strum(ascii_case_insensitive)]
pub enum EventCategory {
    /// Lessons, exams, academic activities.
    Academic,

    /// Sports day, matches.
    Sport,

    /// Cultural programmes.
    Cultural,

    /// Staff or parent meetings.
    Meeting,

    /// Anything else.
    Other,
}

/// Lifecycle status of an event.
#[derive(
    Debug,
    Default,
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
pub enum EventStatus {
    /// Not started yet.
    #[default]
    Upcoming,

    /// In progress.
    Ongoing,

    /// Finished.
    Completed,

    /// Called off.
    Cancelled,
}

/// Target audience tag of an event.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
pub enum Audience {
    /// Everyone.
    All,

    /// All teachers.
    AllTeachers,

    /// All students.
    AllStudents,

    /// All parents.
    AllParents,
}

/// Fields of an event form, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum EventField {
    /// `title`
    Title,
    /// `eventName`
    EventName,
    /// `description`
    Description,
    /// `eventType`
    EventType,
    /// `startDate`
    StartDate,
    /// `endDate`
    EndDate,
    /// `status`
    Status,
    /// `targetAudience`
    TargetAudience,
}

/// Form state for creating or editing an event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The title shown in lists.
    pub title: String,

    /// The name of the event.
    pub event_name: String,

    /// Free-text description.
    pub description: String,

    /// Selected category tags.
    pub event_type: Vec<EventCategory>,

    /// First day, required.
    pub start_date: Option<NaiveDate>,

    /// Last day, optional.
    pub end_date: Option<NaiveDate>,

    /// Lifecycle status.
    pub status: EventStatus,

    /// Selected audience tags.
    pub target_audience: Vec<Audience>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            event_name: event.event_name.clone(),
            description: event.description.clone(),
            event_type: event.event_type.clone(),
            start_date: Some(event.start_date),
            end_date: event.end_date,
            status: event.status,
            target_audience: event.target_audience.clone(),
        }
    }
}

impl Validate for EventDraft {
    type Field = EventField;
    type Record = Event;

    fn validate(&self, _peers: &Peers<'_, Event>, rules: &ValidationRules) -> FieldErrors<EventField> {
        let mut errors = FieldErrors::new();
        errors.require_text(EventField::Title, &self.title, "Title is required");
        errors.require_text(EventField::EventName, &self.event_name, "Event name is required");
        errors.require_text(EventField::Description, &self.description, "Description is required");
        errors.require_any(EventField::EventType, &self.event_type, "Select at least one event type");
        errors.require_any(
            EventField::TargetAudience,
            &self.target_audience,
            "Select at least one target audience",
        );

        match (self.start_date, self.end_date) {
            (None, _) => errors.add(EventField::StartDate, "Start date is required"),
            (Some(start), Some(end)) if rules.end_after_start && end < start => {
                errors.add(EventField::EndDate, "End date cannot be before start date");
            }
            _ => {}
        }

        errors
    }
}

/// Request body for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// See [`Event::title`].
    pub title: String,
    /// See [`Event::event_name`].
    pub event_name: String,
    /// See [`Event::description`].
    pub description: String,
    /// See [`Event::event_type`].
    pub event_type: Vec<EventCategory>,
    /// See [`Event::start_date`].
    #[serde(with = "wire_date")]
    pub start_date: NaiveDate,
    /// See [`Event::end_date`].
    #[serde(with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
    /// See [`Event::status`].
    pub status: EventStatus,
    /// See [`Event::target_audience`].
    pub target_audience: Vec<Audience>,
}

impl Draft for EventDraft {
    type Payload = EventPayload;

    fn to_payload(&self) -> Result<EventPayload, PayloadError> {
        let start_date = self
            .start_date
            .ok_or(PayloadError::Missing("Start date is required"))?;

        Ok(EventPayload {
            title: self.title.trim().to_string(),
            event_name: self.event_name.trim().to_string(),
            description: self.description.trim().to_string(),
            event_type: self.event_type.clone(),
            start_date,
            end_date: self.end_date,
            status: self.status,
            target_audience: self.target_audience.clone(),
        })
    }
}

/// Fields covered by event search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum EventSearchField {
    /// [`Event::title`]
    Title,
    /// [`Event::event_name`]
    EventName,
    /// [`Event::description`]
    Description,
}

impl Searchable for Event {
    type SearchField = EventSearchField;

    fn search_text(&self, field: EventSearchField) -> Option<&str> {
        match field {
            EventSearchField::Title => Some(&self.title),
            EventSearchField::EventName => Some(&self.event_name),
            EventSearchField::Description => Some(&self.description),
        }
    }
}

/// Search and facets for the event list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventFilter {
    /// Free-text query.
    pub search: String,

    /// Required category tag.
    pub category: Facet<EventCategory>,

    /// Required status.
    pub status: Facet<EventStatus>,

    /// Required audience tag.
    pub audience: Facet<Audience>,
}

impl Filter<Event> for EventFilter {
    fn matches(&self, event: &Event) -> bool {
        event.matches_search(&self.search)
            && self.category.admits_any(&event.event_type)
            && self.status.admits(&event.status)
            && self.audience.admits_any(&event.target_audience)
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::apply_filters;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Sports Day".to_string(),
            event_name: "Annual Sports Day".to_string(),
            description: "Track and field".to_string(),
            event_type: vec![EventCategory::Sport],
            start_date: Some(date(2025, 2, 10)),
            end_date: Some(date(2025, 2, 11)),
            status: EventStatus::Upcoming,
            target_audience: vec![Audience::AllStudents, Audience::AllParents],
        }
    }

    fn validate(draft: &EventDraft, rules: &ValidationRules) -> FieldErrors<EventField> {
        draft.validate(&Peers::creating(&[]), rules)
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate(&draft(), &ValidationRules::default()).is_empty());
    }

    #[test]
    fn missing_tags_report_exactly_those_fields() {
        let draft = EventDraft {
            event_type: vec![],
            target_audience: vec![],
            ..draft()
        };
        let errors = validate(&draft, &ValidationRules::default());
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![EventField::EventType, EventField::TargetAudience]
        );
    }

    #[test]
    fn reports_all_blank_fields_together() {
        let errors = validate(&EventDraft::default(), &ValidationRules::default());
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(EventField::Title));
        assert!(errors.contains(EventField::StartDate));
        assert!(!errors.contains(EventField::EndDate));
        assert!(!errors.contains(EventField::Status));

        let blank = EventDraft {
            title: "   ".to_string(),
            ..draft()
        };
        let errors = validate(&blank, &ValidationRules::default());
        assert_eq!(errors.get(EventField::Title), Some("Title is required"));
    }

    #[test]
    fn end_before_start_only_checked_when_enabled() {
        let inverted = EventDraft {
            end_date: Some(date(2025, 2, 1)),
            ..draft()
        };
        assert!(validate(&inverted, &ValidationRules::default()).is_empty());

        let strict = ValidationRules {
            end_after_start: true,
        };
        let errors = validate(&inverted, &strict);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![EventField::EndDate]);

        let same_day = EventDraft {
            end_date: Some(date(2025, 2, 10)),
            ..draft()
        };
        assert!(validate(&same_day, &strict).is_empty());
    }

    #[test]
    fn field_names_match_the_wire() {
        assert_eq!(EventField::EventType.to_string(), "eventType");
        assert_eq!(EventField::TargetAudience.to_string(), "targetAudience");
        assert_eq!(EventField::StartDate.to_string(), "startDate");
    }

    #[test]
    fn reads_target_groups_and_writes_target_audience() {
        let json = r#"{
            "_id": "e1",
            "title": "PTM",
            "eventName": "Parent Teacher Meeting",
            "description": "Term 1",
            "eventType": ["Meeting"],
            "startDate": "2025-03-01T00:00:00.000Z",
            "endDate": null,
            "status": "ongoing",
            "targetGroups": ["all_parents", "all_teachers"]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_str(), "e1");
        assert_eq!(event.status, EventStatus::Ongoing);
        assert_eq!(event.end_date, None);
        assert_eq!(
            event.target_audience,
            vec![Audience::AllParents, Audience::AllTeachers]
        );

        let payload = EventDraft::from(&event).to_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["targetAudience"], serde_json::json!(["all_parents", "all_teachers"]));
        assert_eq!(value["eventType"], serde_json::json!(["Meeting"]));
        assert_eq!(value["startDate"], "2025-03-01");
        assert!(value["endDate"].is_null());
        assert!(value.get("targetGroups").is_none());
    }

    #[test]
    fn accepts_target_audience_on_read_too() {
        let json = r#"{"id":"e2","startDate":"2025-03-01","targetAudience":["all"]}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.target_audience, vec![Audience::All]);
        assert_eq!(event.status, EventStatus::Upcoming);
    }

    #[test]
    fn payload_requires_start_date() {
        let draft = EventDraft {
            start_date: None,
            ..draft()
        };
        assert_eq!(
            draft.to_payload(),
            Err(PayloadError::Missing("Start date is required"))
        );
    }

    #[test]
    fn filters_by_search_and_facets() {
        let mk = |id: &str, title: &str, cat: EventCategory, status: EventStatus| Event {
            id: id.into(),
            title: title.to_string(),
            event_name: String::new(),
            description: String::new(),
            event_type: vec![cat],
            start_date: date(2025, 1, 1),
            end_date: None,
            status,
            target_audience: vec![Audience::All],
        };
        let events = vec![
            mk("1", "Science Fair", EventCategory::Academic, EventStatus::Upcoming),
            mk("2", "Football", EventCategory::Sport, EventStatus::Upcoming),
            mk("3", "Science Quiz", EventCategory::Academic, EventStatus::Cancelled),
        ];

        let filter = EventFilter {
            search: "science".to_string(),
            status: Facet::Only(EventStatus::Upcoming),
            ..Default::default()
        };
        let ids: Vec<_> = apply_filters(&events, &filter).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        let filter = EventFilter {
            category: Facet::Only(EventCategory::Academic),
            ..Default::default()
        };
        assert_eq!(apply_filters(&events, &filter).len(), 2);
        assert_eq!(apply_filters(&events, &EventFilter::default()).len(), 3);
    }
}
