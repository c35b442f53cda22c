//! Read-only aggregates over the request and download collections.
//!
//! These are recomputed on every call rather than cached, so they can never
//! go stale.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::domain::{DataRequest, DownloadedDataset, RequestStatus};

/// Counts of data requests by lifecycle stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    /// Number of requests.
    pub total: usize,
    /// Requests that are submitted, under review or processing.
    pub in_progress: usize,
    /// Completed requests.
    pub completed: usize,
    /// Rejected requests.
    pub rejected: usize,
}

impl RequestStats {
    /// Tallies the given requests.
    #[must_use]
    pub fn compute<'a>(requests: impl IntoIterator<Item = &'a DataRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut stats, request| {
                stats.total += 1;
                match request.status() {
                    RequestStatus::Submitted
                    | RequestStatus::UnderReview
                    | RequestStatus::Processing => stats.in_progress += 1,
                    RequestStatus::Completed => stats.completed += 1,
                    RequestStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}

/// Summary of the user's download history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadStats {
    /// Number of downloaded datasets.
    pub total: usize,
    /// Downloads in the same calendar month and year as `now` (UTC).
    pub this_month: usize,
    /// Number of distinct dataset categories downloaded.
    pub distinct_categories: usize,
}

impl DownloadStats {
    /// Summarizes `downloads` relative to `now`.
    #[must_use]
    pub fn compute<'a>(
        downloads: impl IntoIterator<Item = &'a DownloadedDataset>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut categories = HashSet::new();
        let mut stats = Self::default();

        for download in downloads {
            stats.total += 1;
            let at = download.downloaded_at;
            if at.year() == now.year() && at.month() == now.month() {
                stats.this_month += 1;
            }
            categories.insert(download.dataset.category);
        }

        stats.distinct_categories = categories.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::domain::{Category, Dataset, RequestDetails, RequestId, TrackingNumber};

    fn request(id: RequestId, path: &[RequestStatus]) -> DataRequest {
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).unwrap();
        let details = RequestDetails {
            title: format!("Request {id}"),
            description: String::new(),
            category: "General".to_string(),
            purpose: "Lainnya".to_string(),
            organization: "Org".to_string(),
            email: "a@b.c".to_string(),
        };
        let mut request = DataRequest::new(
            id,
            details,
            TrackingNumber::generate(now.date_naive(), 0),
            now,
        );
        for status in path {
            request
                .advance(*status, String::new(), None, now)
                .unwrap();
        }
        request
    }

    fn mixed_requests() -> Vec<DataRequest> {
        use RequestStatus::{Completed, Processing, Rejected, UnderReview};
        vec![
            request(1, &[]),
            request(2, &[UnderReview]),
            request(3, &[UnderReview, Processing]),
            request(4, &[UnderReview, Processing, Completed]),
            request(5, &[UnderReview, Processing, Completed]),
            request(6, &[Rejected]),
        ]
    }

    #[test]
    fn counts_by_stage() {
        let stats = RequestStats::compute(&mixed_requests());
        assert_eq!(
            stats,
            RequestStats {
                total: 6,
                in_progress: 3,
                completed: 2,
                rejected: 1,
            }
        );
    }

    #[test]
    fn in_progress_is_the_remainder() {
        let requests = mixed_requests();
        for len in 0..=requests.len() {
            let stats = RequestStats::compute(&requests[..len]);
            assert_eq!(
                stats.in_progress,
                stats.total - stats.completed - stats.rejected
            );
        }
    }

    fn download(category: Category, at: DateTime<Utc>) -> DownloadedDataset {
        DownloadedDataset::new(
            Dataset {
                id: 1,
                title: String::new(),
                description: String::new(),
                organization: String::new(),
                category,
                format: vec!["CSV".to_string()],
                updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                downloads: 0,
                views: 0,
            },
            at,
        )
    }

    #[test]
    fn download_stats_by_month_and_category() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let downloads = vec![
            download(Category::Health, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            download(Category::Health, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap()),
            download(Category::Tourism, Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap()),
            download(Category::Economy, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()),
        ];

        let stats = DownloadStats::compute(&downloads, now);
        assert_eq!(
            stats,
            DownloadStats {
                total: 4,
                this_month: 2,
                distinct_categories: 3,
            }
        );
    }

    #[test]
    fn empty_collections_are_all_zero() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(RequestStats::compute(&[]), RequestStats::default());
        assert_eq!(DownloadStats::compute(&[], now), DownloadStats::default());
    }
}
