// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Typed CRUD calls against the backend collections.

use std::sync::Arc;

use edudesk_core::{Class, Event, Identified, LibraryResource, RecordId, Teacher};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::session::Session;

/// A record type backed by a REST collection.
pub trait Endpoint: DeserializeOwned + Identified + Clone + Send + Sync + 'static {
    /// Collection path, used for list and create.
    const COLLECTION: &'static str;

    /// Human readable name of one record.
    const NOUN: &'static str;

    /// Path of a single record, used for update and delete.
    fn item_path(id: &RecordId) -> String {
        format!("{}/{id}", Self::COLLECTION.trim_end_matches('/'))
    }
}

impl Endpoint for Event {
    const COLLECTION: &'static str = "/api/events/";
    const NOUN: &'static str = "event";
}

impl Endpoint for LibraryResource {
    const COLLECTION: &'static str = "/api/resources";
    const NOUN: &'static str = "resource";
}

impl Endpoint for Teacher {
    const COLLECTION: &'static str = "/api/teachers/";
    const NOUN: &'static str = "teacher";
}

impl Endpoint for Class {
    const COLLECTION: &'static str = "/api/classes/";
    const NOUN: &'static str = "class";
}

/// List responses come either bare or wrapped in `data`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListBody<R> {
    Bare(Vec<R>),
    Wrapped { data: Vec<R> },
}

impl<R> ListBody<R> {
    fn into_records(self) -> Vec<R> {
        match self {
            ListBody::Bare(records) | ListBody::Wrapped { data: records } => records,
        }
    }
}

/// Client for the backend REST API.
///
/// # Example
///
/// ```ignore
/// use edudesk_api::{ApiClient, ApiConfig, Session};
/// use edudesk_core::Event;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ApiConfig::default(), Session::with_token("token"))?;
/// let events = client.list::<Event>().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Arc<HttpClient>,
    session: Session,
}

impl ApiClient {
    /// Creates a new client bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self, ApiError> {
        let http = HttpClient::new(config, session.clone())?;
        Ok(Self {
            http: Arc::new(http),
            session,
        })
    }

    /// The session authenticating this client.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Fetches the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list.
    #[tracing::instrument(skip(self), fields(path = R::COLLECTION))]
    pub async fn list<R: Endpoint>(&self) -> Result<Vec<R>, ApiError> {
        let req = self.http.build_request(Method::GET, R::COLLECTION)?;
        let text = self.http.execute(req).await?.text().await?;
        let records = serde_json::from_str::<ListBody<R>>(&text)?.into_records();
        tracing::debug!(count = records.len(), "collection fetched");
        Ok(records)
    }

    /// Fetches the class list, the allowed values of class labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_classes(&self) -> Result<Vec<Class>, ApiError> {
        self.list::<Class>().await
    }

    /// Creates a record. The response body is ignored; callers re-fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, payload), fields(path = R::COLLECTION))]
    pub async fn create<R: Endpoint>(&self, payload: &impl Serialize) -> Result<(), ApiError> {
        let req = self.http.build_request(Method::POST, R::COLLECTION)?;
        self.http.execute(req.json(payload)).await?;
        Ok(())
    }

    /// Replaces the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, payload), fields(path = R::COLLECTION))]
    pub async fn update<R: Endpoint>(
        &self,
        id: &RecordId,
        payload: &impl Serialize,
    ) -> Result<(), ApiError> {
        let req = self.http.build_request(Method::PUT, &R::item_path(id))?;
        self.http.execute(req.json(payload)).await?;
        Ok(())
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), fields(path = R::COLLECTION))]
    pub async fn delete<R: Endpoint>(&self, id: &RecordId) -> Result<(), ApiError> {
        let req = self.http.build_request(Method::DELETE, &R::item_path(id))?;
        self.http.execute(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_drop_trailing_slash() {
        let id = RecordId::from("abc");
        assert_eq!(Event::item_path(&id), "/api/events/abc");
        assert_eq!(LibraryResource::item_path(&id), "/api/resources/abc");
        assert_eq!(Teacher::item_path(&id), "/api/teachers/abc");
    }

    #[test]
    fn accepts_bare_and_wrapped_lists() {
        let bare: ListBody<Class> =
            serde_json::from_str(r#"[{"_id":"c1","class_name":"10","section":"A"}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 1);

        let wrapped: ListBody<Class> =
            serde_json::from_str(r#"{"data":[{"_id":"c1","class_name":"10","section":"A"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_records().len(), 1);

        assert!(serde_json::from_str::<ListBody<Class>>(r#"{"items":[]}"#).is_err());
    }
}
