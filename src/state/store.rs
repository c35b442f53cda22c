//! The top-level state container.
//!
//! The [`Store`] exclusively owns the data requests, the download history, the
//! cart and the bookmarks. Every mutation goes through one of its methods; no
//! other type holds these collections.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{
        Config, DataRequest, Dataset, DatasetId, DownloadStats, DownloadedDataset,
        RequestDetails, RequestForm, RequestId, RequestStats, RequestStatus, TrackingNumber,
        TransitionError, ValidationError,
    },
    state::seed::seed_requests,
};

/// Errors returned by [`Store`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Form input failed validation. Nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested status change is not allowed from the current status.
    #[error("request {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The request.
        id: RequestId,
        /// Its status at the time.
        from: RequestStatus,
        /// The status that was requested.
        to: RequestStatus,
    },

    /// No request has this id.
    #[error("request {0} not found")]
    RequestNotFound(RequestId),

    /// No dataset with this id is in the collection being modified.
    #[error("dataset {0} not found")]
    DatasetNotFound(DatasetId),
}

/// In-memory portal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    /// Most recent first.
    requests: Vec<DataRequest>,
    /// Most recent first.
    downloads: Vec<DownloadedDataset>,
    /// In insertion order.
    cart: Vec<Dataset>,
    /// In insertion order.
    bookmarks: Vec<Dataset>,
}

impl Store {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the sample requests the portal starts with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            requests: seed_requests(),
            ..Self::default()
        }
    }

    /// All data requests, most recent first.
    #[must_use]
    pub fn requests(&self) -> &[DataRequest] {
        &self.requests
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&DataRequest> {
        self.requests.iter().find(|request| request.id() == id)
    }

    /// Looks up a request by tracking number.
    ///
    /// Tracking numbers are not guaranteed unique; the most recent match
    /// wins.
    #[must_use]
    pub fn find_by_tracking_number(&self, tracking: TrackingNumber) -> Option<&DataRequest> {
        self.requests
            .iter()
            .find(|request| request.tracking_number() == tracking)
    }

    /// Records a new data request from already-validated details.
    ///
    /// The request gets id `len + 1`, a tracking number derived from `now`
    /// and that count, and a single `submitted` timeline entry. It is placed
    /// first in the collection.
    #[instrument(level = "debug", skip(self, details), fields(title = %details.title))]
    pub fn submit_request(&mut self, details: RequestDetails, now: DateTime<Utc>) -> &DataRequest {
        let existing = self.requests.len();
        let id = existing + 1;
        let tracking = TrackingNumber::generate(now.date_naive(), existing);

        self.requests
            .insert(0, DataRequest::new(id, details, tracking, now));
        tracing::info!(id, %tracking, "request submitted");

        &self.requests[0]
    }

    /// Validates `form` and records the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with every failing field. The store is
    /// not modified.
    pub fn submit_form(
        &mut self,
        form: &RequestForm,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<&DataRequest, Error> {
        let details = form.validate(config)?;
        Ok(self.submit_request(details, now))
    }

    /// Moves a request to a new status and records it on the timeline.
    ///
    /// When `description` is `None`, the status's default description is
    /// used. `rejection_reason` is kept only for [`RequestStatus::Rejected`].
    ///
    /// # Errors
    ///
    /// - [`Error::RequestNotFound`] if no request has this id
    /// - [`Error::InvalidTransition`] if the move breaks the lifecycle order;
    ///   the request is left unchanged
    #[instrument(level = "debug", skip(self, description, rejection_reason))]
    pub fn advance_status(
        &mut self,
        id: RequestId,
        to: RequestStatus,
        description: Option<String>,
        rejection_reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&DataRequest, Error> {
        let request = self
            .requests
            .iter_mut()
            .find(|request| request.id() == id)
            .ok_or(Error::RequestNotFound(id))?;

        let description = description.unwrap_or_else(|| to.default_description().to_string());
        request
            .advance(to, description, rejection_reason, now)
            .map_err(|TransitionError { from, to }| {
                tracing::warn!(id, %from, %to, "rejected status change");
                Error::InvalidTransition { id, from, to }
            })?;

        tracing::info!(id, status = %to, "request status changed");
        Ok(request)
    }

    /// Request counts by lifecycle stage.
    #[must_use]
    pub fn request_stats(&self) -> RequestStats {
        RequestStats::compute(&self.requests)
    }

    /// Datasets currently in the cart.
    #[must_use]
    pub fn cart(&self) -> &[Dataset] {
        &self.cart
    }

    /// Whether the dataset is in the cart.
    #[must_use]
    pub fn in_cart(&self, id: DatasetId) -> bool {
        self.cart.iter().any(|dataset| dataset.id == id)
    }

    /// Adds a dataset to the cart.
    ///
    /// Returns `true` if it was added, or `false` if it was already present.
    #[instrument(level = "debug", skip(self, dataset), fields(id = dataset.id))]
    pub fn add_to_cart(&mut self, dataset: Dataset) -> bool {
        if self.in_cart(dataset.id) {
            return false;
        }
        self.cart.push(dataset);
        true
    }

    /// Removes a dataset from the cart and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the dataset is not in the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_from_cart(&mut self, id: DatasetId) -> Result<Dataset, Error> {
        let index = self
            .cart
            .iter()
            .position(|dataset| dataset.id == id)
            .ok_or(Error::DatasetNotFound(id))?;
        Ok(self.cart.remove(index))
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        tracing::debug!(count = self.cart.len(), "clearing cart");
        self.cart.clear();
    }

    /// Downloads everything in the cart.
    ///
    /// Every cart item becomes a [`DownloadedDataset`] stamped with the same
    /// `now`. They are placed, in cart order, ahead of earlier downloads, and
    /// the cart is emptied. Returns the new records.
    #[instrument(level = "debug", skip(self))]
    pub fn download_all(&mut self, now: DateTime<Utc>) -> &[DownloadedDataset] {
        let count = self.cart.len();
        let mut downloaded: Vec<_> = self
            .cart
            .drain(..)
            .map(|dataset| DownloadedDataset::new(dataset, now))
            .collect();
        downloaded.append(&mut self.downloads);
        self.downloads = downloaded;

        tracing::info!(count, "downloaded cart");
        &self.downloads[..count]
    }

    /// Download history, most recent first.
    #[must_use]
    pub fn downloads(&self) -> &[DownloadedDataset] {
        &self.downloads
    }

    /// Download history summary relative to `now`.
    #[must_use]
    pub fn download_stats(&self, now: DateTime<Utc>) -> DownloadStats {
        DownloadStats::compute(&self.downloads, now)
    }

    /// Bookmarked datasets.
    #[must_use]
    pub fn bookmarks(&self) -> &[Dataset] {
        &self.bookmarks
    }

    /// Whether the dataset is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, id: DatasetId) -> bool {
        self.bookmarks.iter().any(|dataset| dataset.id == id)
    }

    /// Bookmarks a dataset.
    ///
    /// Returns `true` if it was added, or `false` if it was already
    /// bookmarked.
    #[instrument(level = "debug", skip(self, dataset), fields(id = dataset.id))]
    pub fn bookmark(&mut self, dataset: Dataset) -> bool {
        if self.is_bookmarked(dataset.id) {
            return false;
        }
        self.bookmarks.push(dataset);
        true
    }

    /// Removes a bookmark and returns the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the dataset is not bookmarked.
    #[instrument(level = "debug", skip(self))]
    pub fn unbookmark(&mut self, id: DatasetId) -> Result<Dataset, Error> {
        let index = self
            .bookmarks
            .iter()
            .position(|dataset| dataset.id == id)
            .ok_or(Error::DatasetNotFound(id))?;
        Ok(self.bookmarks.remove(index))
    }
}
