//! Domain models for the data portal.
//!
//! This module contains the core domain types: data requests and their
//! status lifecycle, tracking numbers, catalog datasets, derived statistics,
//! chat intents and configuration.

pub mod chat;
pub use chat::Intent;

mod config;
pub use config::{Config, DurationError, MAX_DURATION_MS};

/// Catalog datasets and download records.
pub mod dataset;
pub use dataset::{Category, Dataset, DatasetId, DownloadedDataset};

/// Data requests, their timeline and the intake forms.
pub mod request;
pub use request::{
    DataRequest, DatasetRequestForm, Field, FieldError, RequestDetails, RequestForm, RequestId,
    TimelineEntry, TransitionError, ValidationError,
};

mod stats;
pub use stats::{DownloadStats, RequestStats};

/// Request status lifecycle and display configuration.
pub mod status;
pub use status::{ProgressStep, RequestStatus, StatusConfig};

/// Human-readable tracking numbers.
pub mod tracking;
pub use tracking::{Error as TrackingNumberError, TrackingNumber};
