// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Keeps an in-memory copy of one collection in step with the server.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use edudesk_core::{Draft, FieldErrors, Peers, RecordId, ValidationRules};

use crate::client::{ApiClient, Endpoint};
use crate::error::{ApiError, SyncError};

/// Synchronizer for the collection behind draft type `D`.
///
/// Drafts are validated against the current snapshot before any request.
/// After every successful mutation the whole collection is fetched again and
/// the snapshot replaced; on any failure the snapshot is left as it was.
/// Only one mutation may be in flight at a time.
pub struct Synchronizer<D: Draft>
where
    D::Record: Endpoint,
{
    client: ApiClient,
    rules: ValidationRules,
    records: RwLock<Arc<Vec<D::Record>>>,
    busy: AtomicBool,
}

impl<D: Draft> fmt::Debug for Synchronizer<D>
where
    D::Record: Endpoint,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("collection", &<D::Record as Endpoint>::COLLECTION)
            .field("records", &self.records().len())
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<D: Draft> Synchronizer<D>
where
    D::Record: Endpoint,
{
    /// Creates a synchronizer with an empty snapshot.
    pub fn new(client: ApiClient, rules: ValidationRules) -> Self {
        Self {
            client,
            rules,
            records: RwLock::new(Arc::new(Vec::new())),
            busy: AtomicBool::new(false),
        }
    }

    /// The current snapshot.
    pub fn records(&self) -> Arc<Vec<D::Record>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates `draft` against the snapshot. Pass `editing` for an update.
    pub fn validate(&self, draft: &D, editing: Option<&RecordId>) -> FieldErrors<D::Field> {
        let records = self.records();
        let peers = match editing {
            Some(id) => Peers::editing(records.as_slice(), id),
            None => Peers::creating(records.as_slice()),
        };
        draft.validate(&peers, &self.rules)
    }

    /// Fetches the collection and replaces the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the snapshot is kept.
    pub async fn list(&self) -> Result<Arc<Vec<D::Record>>, ApiError> {
        let records = Arc::new(self.client.list::<D::Record>().await?);
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&records);
        Ok(records)
    }

    /// Validates and creates a record, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Invalid`] without any request when the draft does
    /// not validate, or the failure of the request or the refresh.
    pub async fn create(&self, draft: &D) -> Result<Arc<Vec<D::Record>>, SyncError<D::Field>> {
        let _in_flight = self.begin()?;
        let payload = self.prepare(draft, None)?;

        tracing::debug!(noun = <D::Record as Endpoint>::NOUN, "creating record");
        self.client.create::<D::Record>(&payload).await?;
        Ok(self.list().await?)
    }

    /// Validates and updates the record with `id`, then refreshes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(
        &self,
        id: &RecordId,
        draft: &D,
    ) -> Result<Arc<Vec<D::Record>>, SyncError<D::Field>> {
        let _in_flight = self.begin()?;
        let payload = self.prepare(draft, Some(id))?;

        tracing::debug!(noun = <D::Record as Endpoint>::NOUN, %id, "updating record");
        self.client.update::<D::Record>(id, &payload).await?;
        Ok(self.list().await?)
    }

    /// Deletes the record with `id` once `confirm` agrees, then refreshes.
    ///
    /// Returns `false` when the confirmation was declined; no request is made
    /// in that case.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request or the refresh.
    pub async fn delete(
        &self,
        id: &RecordId,
        confirm: impl FnOnce(&RecordId) -> bool,
    ) -> Result<bool, SyncError<D::Field>> {
        let _in_flight = self.begin()?;
        if !confirm(id) {
            tracing::info!(%id, "deletion declined");
            return Ok(false);
        }

        tracing::debug!(noun = <D::Record as Endpoint>::NOUN, %id, "deleting record");
        self.client.delete::<D::Record>(id).await?;
        self.list().await?;
        Ok(true)
    }

    fn prepare(
        &self,
        draft: &D,
        editing: Option<&RecordId>,
    ) -> Result<D::Payload, SyncError<D::Field>> {
        let errors = self.validate(draft, editing);
        if !errors.is_empty() {
            return Err(SyncError::Invalid(errors));
        }
        Ok(draft.to_payload()?)
    }

    fn begin(&self) -> Result<InFlight<'_>, SyncError<D::Field>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| SyncError::Busy)?;
        Ok(InFlight(&self.busy))
    }
}

/// Clears the in-flight flag when the mutation finishes, whichever way.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
