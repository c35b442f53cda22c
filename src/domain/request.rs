use std::{fmt, sync::LazyLock};

use chrono::{DateTime, Utc};
use nonempty::NonEmpty;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{Config, RequestStatus, TrackingNumber};

/// Identifier of a data request.
pub type RequestId = usize;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("this must never fail"));

/// One step in the history of a data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// The status the request entered.
    pub status: RequestStatus,
    /// When it entered that status.
    pub timestamp: DateTime<Utc>,
    /// Human-readable note shown to the requester.
    pub description: String,
}

/// A request for a dataset that is not yet published.
///
/// The timeline is append-only. Its first entry is always
/// [`RequestStatus::Submitted`] and its last entry always carries the
/// request's current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct DataRequest {
    pub(crate) id: RequestId,
    pub(crate) details: RequestDetails,
    pub(crate) status: RequestStatus,
    pub(crate) request_date: DateTime<Utc>,
    pub(crate) updated_date: DateTime<Utc>,
    pub(crate) rejection_reason: Option<String>,
    pub(crate) tracking_number: TrackingNumber,
    pub(crate) timeline: NonEmpty<TimelineEntry>,
}

/// The requester-supplied part of a data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    /// What data is wanted.
    pub title: String,
    /// Why, and in what shape.
    pub description: String,
    /// Free-text category (defaults to `General`).
    pub category: String,
    /// Intended use (defaults to `Lainnya`).
    pub purpose: String,
    /// The requester's organization or occupation.
    pub organization: String,
    /// Contact address.
    pub email: String,
}

/// A status change was attempted that the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a request from {from} to {to}")]
pub struct TransitionError {
    /// The request's status at the time.
    pub from: RequestStatus,
    /// The status that was requested.
    pub to: RequestStatus,
}

impl DataRequest {
    /// Creates a freshly submitted request with a single timeline entry.
    pub(crate) fn new(
        id: RequestId,
        details: RequestDetails,
        tracking_number: TrackingNumber,
        now: DateTime<Utc>,
    ) -> Self {
        let status = RequestStatus::Submitted;
        Self {
            id,
            details,
            status,
            request_date: now,
            updated_date: now,
            rejection_reason: None,
            tracking_number,
            timeline: NonEmpty::new(TimelineEntry {
                status,
                timestamp: now,
                description: status.default_description().to_string(),
            }),
        }
    }

    /// Moves the request to `to`, appending a timeline entry.
    ///
    /// `rejection_reason` is recorded only when `to` is
    /// [`RequestStatus::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if `to` is not reachable from the current
    /// status. The request is left untouched.
    pub(crate) fn advance(
        &mut self,
        to: RequestStatus,
        description: String,
        rejection_reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(to) {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }

        // The history never runs backwards.
        let now = now.max(self.updated_date).max(self.timeline.last().timestamp);

        self.status = to;
        self.updated_date = now;
        if to == RequestStatus::Rejected {
            self.rejection_reason = rejection_reason;
        }
        self.timeline.push(TimelineEntry {
            status: to,
            timestamp: now,
            description,
        });
        Ok(())
    }

    /// The request's identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// The requester-supplied details.
    #[must_use]
    pub const fn details(&self) -> &RequestDetails {
        &self.details
    }

    /// What data is wanted.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// The current status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// When the request was submitted.
    #[must_use]
    pub const fn request_date(&self) -> DateTime<Utc> {
        self.request_date
    }

    /// When the status last changed.
    #[must_use]
    pub const fn updated_date(&self) -> DateTime<Utc> {
        self.updated_date
    }

    /// Why the request was rejected, if it was and a reason was given.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// The human-readable tracking number.
    #[must_use]
    pub const fn tracking_number(&self) -> TrackingNumber {
        self.tracking_number
    }

    /// The status history, oldest first. Never empty.
    #[must_use]
    pub const fn timeline(&self) -> &NonEmpty<TimelineEntry> {
        &self.timeline
    }
}

/// Errors found when a serialized request breaks the lifecycle invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// The timeline has no entries.
    #[error("request {0} has an empty timeline")]
    EmptyTimeline(RequestId),
    /// The first timeline entry is not `submitted`.
    #[error("request {id} timeline starts with {status} instead of submitted")]
    FirstNotSubmitted {
        /// Request id.
        id: RequestId,
        /// Status of the first entry.
        status: RequestStatus,
    },
    /// The last timeline entry disagrees with the request status.
    #[error("request {id} is {status} but its timeline ends with {last}")]
    StatusMismatch {
        /// Request id.
        id: RequestId,
        /// The request's status.
        status: RequestStatus,
        /// Status of the last entry.
        last: RequestStatus,
    },
    /// A rejection reason is set on a request that is not rejected.
    #[error("request {0} has a rejection reason but is not rejected")]
    UnexpectedRejectionReason(RequestId),
    /// Two consecutive timeline entries are not an allowed status change.
    #[error("request {id} timeline moves from {from} to {to}")]
    IllegalStep {
        /// Request id.
        id: RequestId,
        /// Status of the earlier entry.
        from: RequestStatus,
        /// Status of the later entry.
        to: RequestStatus,
    },
    /// A timeline entry is older than the one before it.
    #[error("request {id} timeline goes back in time at {status}")]
    TimestampOrder {
        /// Request id.
        id: RequestId,
        /// Status of the out-of-order entry.
        status: RequestStatus,
    },
    /// The request was last updated before it was submitted.
    #[error("request {0} was updated before it was requested")]
    UpdatedBeforeRequested(RequestId),
}

/// Serialized forms of a data request.
///
/// Field names follow the web front end (`trackingNumber`, `requestDate`).
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Versions {
    V1(WireV1),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireV1 {
    id: RequestId,
    title: String,
    description: String,
    category: String,
    purpose: String,
    organization: String,
    email: String,
    status: RequestStatus,
    request_date: DateTime<Utc>,
    updated_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
    tracking_number: TrackingNumber,
    timeline: Vec<TimelineEntry>,
}

impl TryFrom<Versions> for DataRequest {
    type Error = InvariantError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1(wire) => {
                let timeline = NonEmpty::from_vec(wire.timeline)
                    .ok_or(InvariantError::EmptyTimeline(wire.id))?;

                let first = timeline.first().status;
                if first != RequestStatus::Submitted {
                    return Err(InvariantError::FirstNotSubmitted {
                        id: wire.id,
                        status: first,
                    });
                }
                let last = timeline.last().status;
                if last != wire.status {
                    return Err(InvariantError::StatusMismatch {
                        id: wire.id,
                        status: wire.status,
                        last,
                    });
                }
                if wire.rejection_reason.is_some() && wire.status != RequestStatus::Rejected {
                    return Err(InvariantError::UnexpectedRejectionReason(wire.id));
                }
                for (prev, next) in timeline.iter().zip(timeline.iter().skip(1)) {
                    if !prev.status.can_transition_to(next.status) {
                        return Err(InvariantError::IllegalStep {
                            id: wire.id,
                            from: prev.status,
                            to: next.status,
                        });
                    }
                    if next.timestamp < prev.timestamp {
                        return Err(InvariantError::TimestampOrder {
                            id: wire.id,
                            status: next.status,
                        });
                    }
                }
                if wire.updated_date < wire.request_date {
                    return Err(InvariantError::UpdatedBeforeRequested(wire.id));
                }

                Ok(Self {
                    id: wire.id,
                    details: RequestDetails {
                        title: wire.title,
                        description: wire.description,
                        category: wire.category,
                        purpose: wire.purpose,
                        organization: wire.organization,
                        email: wire.email,
                    },
                    status: wire.status,
                    request_date: wire.request_date,
                    updated_date: wire.updated_date,
                    rejection_reason: wire.rejection_reason,
                    tracking_number: wire.tracking_number,
                    timeline,
                })
            }
        }
    }
}

impl From<DataRequest> for Versions {
    fn from(request: DataRequest) -> Self {
        let RequestDetails {
            title,
            description,
            category,
            purpose,
            organization,
            email,
        } = request.details;

        Self::V1(WireV1 {
            id: request.id,
            title,
            description,
            category,
            purpose,
            organization,
            email,
            status: request.status,
            request_date: request.request_date,
            updated_date: request.updated_date,
            rejection_reason: request.rejection_reason,
            tracking_number: request.tracking_number,
            timeline: request.timeline.into(),
        })
    }
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Requested data title.
    Title,
    /// Description of the need.
    Description,
    /// Organization or occupation.
    Organization,
    /// Contact email.
    Email,
    /// Requester name.
    Name,
    /// Requester phone number.
    Phone,
    /// Requester occupation.
    Occupation,
    /// Intended use.
    Purpose,
    /// Whether the requester has already contacted the publishing agency.
    HasContactedAgency,
    /// Whether the requester agrees to be contacted.
    AgreedToContact,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Organization => "organization",
            Self::Email => "email",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Occupation => "occupation",
            Self::Purpose => "purpose",
            Self::HasContactedAgency => "has_contacted_agency",
            Self::AgreedToContact => "agreed_to_contact",
        };
        f.write_str(name)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// Indonesian message to show next to the field.
    pub message: &'static str,
}

/// One or more form fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// The individual field failures, in form order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid form: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Collects field errors while a form is checked.
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    fn required(&mut self, field: Field, value: &str, message: &'static str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    fn email(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.fail(Field::Email, "Email diperlukan");
        } else if !EMAIL.is_match(value) {
            self.fail(Field::Email, "Format email tidak valid");
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

fn chosen(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// The standard request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    /// What data is wanted.
    pub title: String,
    /// Why, and in what shape.
    pub description: String,
    /// Optional category; the configured default applies when unset.
    pub category: Option<String>,
    /// Optional purpose; the configured default applies when unset.
    pub purpose: Option<String>,
    /// Requester organization.
    pub organization: String,
    /// Contact email.
    pub email: String,
}

impl RequestForm {
    /// Checks the form and produces trimmed request details.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once: empty title, description,
    /// organization or email, or a malformed email.
    pub fn validate(&self, config: &Config) -> Result<RequestDetails, ValidationError> {
        let mut checker = Checker::default();
        checker.required(Field::Title, &self.title, "Judul data diperlukan");
        checker.required(Field::Description, &self.description, "Deskripsi diperlukan");
        checker.required(
            Field::Organization,
            &self.organization,
            "Nama organisasi diperlukan",
        );
        checker.email(&self.email);
        checker.finish()?;

        Ok(RequestDetails {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: chosen(self.category.as_ref())
                .unwrap_or_else(|| config.default_category())
                .to_string(),
            purpose: chosen(self.purpose.as_ref())
                .unwrap_or_else(|| config.default_purpose())
                .to_string(),
            organization: self.organization.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

/// The "request a dataset" intake form.
///
/// Collects more about the requester than [`RequestForm`]; only the fields
/// the tracking workflow needs survive conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetRequestForm {
    /// Requester name.
    pub name: String,
    /// Requester phone number.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Occupation, once chosen.
    pub occupation: Option<String>,
    /// Title of the wanted dataset.
    pub dataset_title: String,
    /// Whether the requester already contacted the publishing agency.
    pub has_contacted_agency: Option<bool>,
    /// Description of the need.
    pub description: String,
    /// Intended use, once chosen.
    pub purpose: Option<String>,
    /// Whether the requester agrees to be contacted by the team.
    pub agreed_to_contact: Option<bool>,
}

impl DatasetRequestForm {
    /// Checks the form and maps it onto request details.
    ///
    /// The category becomes the configured default and the occupation stands
    /// in for the organization.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self, config: &Config) -> Result<RequestDetails, ValidationError> {
        let mut checker = Checker::default();
        checker.required(Field::Name, &self.name, "Nama diperlukan");
        checker.required(Field::Phone, &self.phone, "Nomor telepon diperlukan");
        checker.email(&self.email);
        if chosen(self.occupation.as_ref()).is_none() {
            checker.fail(Field::Occupation, "Silakan pilih pekerjaan Anda");
        }
        checker.required(
            Field::Title,
            &self.dataset_title,
            "Judul dataset diperlukan",
        );
        if self.has_contacted_agency.is_none() {
            checker.fail(
                Field::HasContactedAgency,
                "Silakan jawab apakah Anda sudah mengakses OPD terkait",
            );
        }
        checker.required(Field::Description, &self.description, "Deskripsi diperlukan");
        if chosen(self.purpose.as_ref()).is_none() {
            checker.fail(Field::Purpose, "Silakan pilih tujuan penggunaan dataset");
        }
        if self.agreed_to_contact.is_none() {
            checker.fail(
                Field::AgreedToContact,
                "Silakan jawab apakah Anda bersedia dihubungi oleh tim kami",
            );
        }
        checker.finish()?;

        let occupation = chosen(self.occupation.as_ref()).unwrap_or_default();
        let purpose = chosen(self.purpose.as_ref()).unwrap_or_else(|| config.default_purpose());

        Ok(RequestDetails {
            title: self.dataset_title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: config.default_category().to_string(),
            purpose: purpose.to_string(),
            organization: occupation.to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(1_732_000_000 + i64::from(hour) * 3600, 0).unwrap()
    }

    fn details() -> RequestDetails {
        RequestDetails {
            title: "Data Kualitas Air Sungai".to_string(),
            description: "Untuk penelitian".to_string(),
            category: "General".to_string(),
            purpose: "Lainnya".to_string(),
            organization: "ITB".to_string(),
            email: "peneliti@itb.ac.id".to_string(),
        }
    }

    fn submitted() -> DataRequest {
        let tracking = TrackingNumber::generate(at(0).date_naive(), 0);
        DataRequest::new(1, details(), tracking, at(0))
    }

    #[test]
    fn new_request_has_single_submitted_entry() {
        let request = submitted();
        assert_eq!(request.status(), RequestStatus::Submitted);
        assert_eq!(request.timeline().tail.len(), 0);
        assert_eq!(request.timeline().head.status, request.status());
        assert_eq!(
            request.timeline().head.description,
            "Permintaan data telah diterima dan sedang menunggu review"
        );
        assert_eq!(request.request_date(), request.updated_date());
    }

    #[test]
    fn advance_appends_and_updates() {
        let mut request = submitted();
        request
            .advance(
                RequestStatus::UnderReview,
                "Sedang direview".to_string(),
                None,
                at(2),
            )
            .unwrap();

        assert_eq!(request.status(), RequestStatus::UnderReview);
        assert_eq!(request.updated_date(), at(2));
        assert_eq!(request.request_date(), at(0));
        assert_eq!(request.timeline().last().status, RequestStatus::UnderReview);
        assert_eq!(request.timeline().last().description, "Sedang direview");
    }

    #[test]
    fn rejection_stores_reason() {
        let mut request = submitted();
        request
            .advance(
                RequestStatus::Rejected,
                "Ditolak".to_string(),
                Some("Data bersifat rahasia".to_string()),
                at(1),
            )
            .unwrap();
        assert_eq!(request.rejection_reason(), Some("Data bersifat rahasia"));
    }

    #[test]
    fn reason_is_ignored_for_other_statuses() {
        let mut request = submitted();
        request
            .advance(
                RequestStatus::UnderReview,
                String::new(),
                Some("ignored".to_string()),
                at(1),
            )
            .unwrap();
        assert_eq!(request.rejection_reason(), None);
    }

    #[test]
    fn invalid_transition_leaves_request_untouched() {
        let mut request = submitted();
        let before = request.clone();
        let err = request
            .advance(RequestStatus::Completed, String::new(), None, at(1))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError {
                from: RequestStatus::Submitted,
                to: RequestStatus::Completed
            }
        );
        assert_eq!(request, before);
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let mut request = submitted();
        for (hour, status) in [
            (1, RequestStatus::UnderReview),
            (2, RequestStatus::Processing),
            (3, RequestStatus::Rejected),
        ] {
            request
                .advance(
                    status,
                    status.default_description().to_string(),
                    Some("Di luar kewenangan".to_string()),
                    at(hour),
                )
                .unwrap();
        }

        let json = serde_json::to_string(&request).unwrap();
        let back: DataRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);

        let statuses: Vec<_> = back.timeline().iter().map(|entry| entry.status).collect();
        assert_eq!(
            statuses,
            [
                RequestStatus::Submitted,
                RequestStatus::UnderReview,
                RequestStatus::Processing,
                RequestStatus::Rejected
            ]
        );
    }

    #[test]
    fn serializes_with_front_end_field_names() {
        let value = serde_json::to_value(submitted()).unwrap();
        assert_eq!(value["trackingNumber"], "DREQ20241119001");
        assert_eq!(value["status"], "submitted");
        assert!(value.get("requestDate").is_some());
        assert!(value.get("rejectionReason").is_none());
    }

    fn wire(mutate: impl FnOnce(&mut serde_json::Value)) -> Result<DataRequest, serde_json::Error> {
        let mut value = serde_json::to_value(submitted()).unwrap();
        mutate(&mut value);
        serde_json::from_value(value)
    }

    #[test]
    fn deserialize_rejects_empty_timeline() {
        assert!(wire(|v| v["timeline"] = serde_json::json!([])).is_err());
    }

    #[test]
    fn deserialize_rejects_status_mismatch() {
        assert!(wire(|v| v["status"] = serde_json::json!("processing")).is_err());
    }

    #[test]
    fn deserialize_rejects_stray_rejection_reason() {
        assert!(wire(|v| v["rejectionReason"] = serde_json::json!("nope")).is_err());
    }

    fn timeline_entry(status: &str, timestamp: &str) -> serde_json::Value {
        serde_json::json!({
            "status": status,
            "timestamp": timestamp,
            "description": "",
        })
    }

    #[test]
    fn deserialize_rejects_steps_out_of_a_terminal_status() {
        let err = wire(|v| {
            v["status"] = serde_json::json!("under_review");
            v["timeline"] = serde_json::json!([
                timeline_entry("submitted", "2024-11-19T01:00:00Z"),
                timeline_entry("completed", "2024-11-19T02:00:00Z"),
                timeline_entry("under_review", "2024-11-19T03:00:00Z"),
            ]);
        })
        .unwrap_err();
        assert!(err.to_string().contains("moves from submitted to completed"));
    }

    #[test]
    fn deserialize_rejects_timestamps_running_backwards() {
        let err = wire(|v| {
            v["status"] = serde_json::json!("processing");
            v["timeline"] = serde_json::json!([
                timeline_entry("submitted", "2024-11-20T00:00:00Z"),
                timeline_entry("under_review", "2024-11-10T00:00:00Z"),
                timeline_entry("processing", "2024-11-01T00:00:00Z"),
            ]);
        })
        .unwrap_err();
        assert!(err.to_string().contains("goes back in time at under_review"));
    }

    #[test]
    fn deserialize_rejects_update_before_request() {
        let err = wire(|v| v["updatedDate"] = serde_json::json!("2000-01-01T00:00:00Z")).unwrap_err();
        assert!(err.to_string().contains("updated before it was requested"));
    }

    #[test]
    fn advance_never_records_an_earlier_time() {
        let mut request = submitted();
        let earlier = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        request
            .advance(RequestStatus::UnderReview, String::new(), None, earlier)
            .unwrap();

        assert_eq!(request.updated_date(), request.request_date());
        assert_eq!(request.timeline().last().timestamp, request.request_date());

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(serde_json::from_str::<DataRequest>(&json).unwrap(), request);
    }

    fn valid_form() -> RequestForm {
        RequestForm {
            title: "  Data Kualitas Air Sungai ".to_string(),
            description: "Untuk penelitian".to_string(),
            category: None,
            purpose: Some(String::new()),
            organization: "ITB".to_string(),
            email: "peneliti@itb.ac.id".to_string(),
        }
    }

    #[test]
    fn form_applies_defaults_and_trims() {
        let details = valid_form().validate(&Config::default()).unwrap();
        assert_eq!(details.title, "Data Kualitas Air Sungai");
        assert_eq!(details.category, "General");
        assert_eq!(details.purpose, "Lainnya");
    }

    #[test]
    fn form_keeps_chosen_category_and_purpose() {
        let form = RequestForm {
            category: Some("Environment".to_string()),
            purpose: Some("Penelitian Akademik".to_string()),
            ..valid_form()
        };
        let details = form.validate(&Config::default()).unwrap();
        assert_eq!(details.category, "Environment");
        assert_eq!(details.purpose, "Penelitian Akademik");
    }

    #[test]
    fn form_reports_every_missing_field() {
        let err = RequestForm::default()
            .validate(&Config::default())
            .unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                Field::Title,
                Field::Description,
                Field::Organization,
                Field::Email
            ]
        );
        assert_eq!(err.message_for(Field::Email), Some("Email diperlukan"));
    }

    #[test_case("peneliti@itb.ac.id", true; "plain address")]
    #[test_case("a.b@sub.example.org", true; "subdomain")]
    #[test_case("peneliti@itb", false; "no dot in domain")]
    #[test_case("peneliti itb@itb.ac.id", false; "whitespace")]
    #[test_case("@itb.ac.id", false; "no local part")]
    #[test_case("a@@b.c", false; "double at")]
    fn email_format(email: &str, valid: bool) {
        let form = RequestForm {
            email: email.to_string(),
            ..valid_form()
        };
        let result = form.validate(&Config::default());
        if valid {
            assert!(result.is_ok());
        } else {
            assert_eq!(
                result.unwrap_err().message_for(Field::Email),
                Some("Format email tidak valid")
            );
        }
    }

    fn valid_dataset_form() -> DatasetRequestForm {
        DatasetRequestForm {
            name: "Siti".to_string(),
            phone: "08123456789".to_string(),
            email: "siti@example.com".to_string(),
            occupation: Some("Peneliti".to_string()),
            dataset_title: "Data Curah Hujan".to_string(),
            has_contacted_agency: Some(false),
            description: "Curah hujan harian 2020-2024".to_string(),
            purpose: Some("Penelitian Akademik".to_string()),
            agreed_to_contact: Some(true),
        }
    }

    #[test]
    fn dataset_form_maps_onto_request() {
        let details = valid_dataset_form().validate(&Config::default()).unwrap();
        assert_eq!(details.title, "Data Curah Hujan");
        assert_eq!(details.category, "General");
        assert_eq!(details.organization, "Peneliti");
        assert_eq!(details.purpose, "Penelitian Akademik");
    }

    #[test]
    fn dataset_form_requires_answers() {
        let form = DatasetRequestForm {
            occupation: None,
            purpose: Some("  ".to_string()),
            has_contacted_agency: None,
            agreed_to_contact: None,
            ..valid_dataset_form()
        };
        let err = form.validate(&Config::default()).unwrap_err();
        assert_eq!(
            err.message_for(Field::Occupation),
            Some("Silakan pilih pekerjaan Anda")
        );
        assert!(err.message_for(Field::Purpose).is_some());
        assert!(err.message_for(Field::HasContactedAgency).is_some());
        assert!(err.message_for(Field::AgreedToContact).is_some());
        assert_eq!(err.errors().len(), 4);
    }
}
