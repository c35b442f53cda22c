use chrono::{DateTime, TimeZone, Utc};
use nonempty::NonEmpty;

use crate::domain::{
    DataRequest, RequestDetails, RequestStatus, TimelineEntry, TrackingNumber,
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("this should never fail")
}

fn entry(status: RequestStatus, timestamp: DateTime<Utc>) -> TimelineEntry {
    TimelineEntry {
        status,
        timestamp,
        description: status.default_description().to_string(),
    }
}

fn tracking(s: &str) -> TrackingNumber {
    s.parse().expect("this should never fail")
}

/// The requests present when a session starts, in display order.
pub(crate) fn seed_requests() -> Vec<DataRequest> {
    vec![
        DataRequest {
            id: 1,
            details: RequestDetails {
                title: "Data Penduduk per Kecamatan".to_string(),
                description:
                    "Membutuhkan data jumlah penduduk per kecamatan untuk penelitian demografi"
                        .to_string(),
                category: "Social Services".to_string(),
                purpose: "Penelitian Akademik".to_string(),
                organization: "Universitas Indonesia".to_string(),
                email: "researcher@ui.ac.id".to_string(),
            },
            status: RequestStatus::Completed,
            request_date: at(2024, 11, 15, 0, 0),
            updated_date: at(2024, 11, 20, 0, 0),
            rejection_reason: None,
            tracking_number: tracking("DREQ20241115001"),
            timeline: NonEmpty {
                head: entry(RequestStatus::Submitted, at(2024, 11, 15, 9, 0)),
                tail: vec![
                    entry(RequestStatus::UnderReview, at(2024, 11, 15, 14, 30)),
                    entry(RequestStatus::Processing, at(2024, 11, 17, 10, 15)),
                    entry(RequestStatus::Completed, at(2024, 11, 20, 11, 20)),
                ],
            },
        },
        DataRequest {
            id: 2,
            details: RequestDetails {
                title: "Data Kualitas Udara Real-time".to_string(),
                description: "Data sensor kualitas udara untuk analisis pola polusi".to_string(),
                category: "Environment".to_string(),
                purpose: "Riset Lingkungan".to_string(),
                organization: "Green Earth Foundation".to_string(),
                email: "research@greenearth.org".to_string(),
            },
            status: RequestStatus::Processing,
            request_date: at(2024, 11, 22, 0, 0),
            updated_date: at(2024, 11, 25, 0, 0),
            rejection_reason: None,
            tracking_number: tracking("DREQ20241122002"),
            timeline: NonEmpty {
                head: entry(RequestStatus::Submitted, at(2024, 11, 22, 10, 30)),
                tail: vec![
                    entry(RequestStatus::UnderReview, at(2024, 11, 23, 9, 15)),
                    entry(RequestStatus::Processing, at(2024, 11, 25, 14, 20)),
                ],
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_satisfy_timeline_invariants() {
        for request in seed_requests() {
            assert_eq!(request.timeline().first().status, RequestStatus::Submitted);
            assert_eq!(request.timeline().last().status, request.status());
            assert!(
                request
                    .timeline()
                    .iter()
                    .zip(request.timeline().iter().skip(1))
                    .all(|(a, b)| a.timestamp <= b.timestamp)
            );
        }
    }

    #[test]
    fn seeds_survive_serialization() {
        for request in seed_requests() {
            let json = serde_json::to_string(&request).unwrap();
            let back: DataRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(back, request);
        }
    }
}
