//! Open Data Portal
//!
//! In-memory state for a data portal: a dataset catalog, a download cart,
//! bookmarks, and data requests tracked through a review lifecycle.

pub mod domain;
pub use domain::{
    Category, Config, DataRequest, Dataset, DownloadedDataset, RequestStatus, TrackingNumber,
};

/// In-memory state: the store, catalog, timers and the interactive session.
pub mod state;
pub use state::{Catalog, Session, Store};
