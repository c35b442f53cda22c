use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The lifecycle state of a data request.
///
/// Requests move forward one step at a time along
/// `Submitted → UnderReview → Processing → Completed`, and can be rejected
/// from any state that is not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// The request has been received and is waiting for review.
    Submitted,
    /// The data team is reviewing the request.
    UnderReview,
    /// The data is being prepared.
    Processing,
    /// The dataset is ready. Terminal.
    Completed,
    /// The request was turned down. Terminal.
    Rejected,
}

impl RequestStatus {
    /// All statuses, in lifecycle order with `Rejected` last.
    pub const ALL: [Self; 5] = [
        Self::Submitted,
        Self::UnderReview,
        Self::Processing,
        Self::Completed,
        Self::Rejected,
    ];

    /// Whether no further transitions are permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Whether the request is still being worked on.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        !self.is_terminal()
    }

    /// The next status along the happy path, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Submitted => Some(Self::UnderReview),
            Self::UnderReview => Some(Self::Processing),
            Self::Processing => Some(Self::Completed),
            Self::Completed | Self::Rejected => None,
        }
    }

    /// Whether a request in this status may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == Self::Rejected || self.successor() == Some(next)
    }

    /// The wire name of the status (e.g. `under_review`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Display configuration for this status.
    #[must_use]
    pub const fn config(self) -> StatusConfig {
        match self {
            Self::Submitted => StatusConfig {
                label: "Diterima",
                icon: StatusIcon::FileText,
                tone: Tone::Neutral,
            },
            Self::UnderReview => StatusConfig {
                label: "Direview",
                icon: StatusIcon::Clock,
                tone: Tone::Caution,
            },
            Self::Processing => StatusConfig {
                label: "Diproses",
                icon: StatusIcon::Clock,
                tone: Tone::Info,
            },
            Self::Completed => StatusConfig {
                label: "Selesai",
                icon: StatusIcon::CheckCircle,
                tone: Tone::Success,
            },
            Self::Rejected => StatusConfig {
                label: "Ditolak",
                icon: StatusIcon::XCircle,
                tone: Tone::Danger,
            },
        }
    }

    /// The timeline description recorded when a request enters this status
    /// and the caller supplies none.
    #[must_use]
    pub const fn default_description(self) -> &'static str {
        match self {
            Self::Submitted => "Permintaan data telah diterima dan sedang menunggu review",
            Self::UnderReview => "Tim kami sedang melakukan review terhadap permintaan Anda",
            Self::Processing => "Data sedang diproses dan disiapkan",
            Self::Completed => "Dataset telah berhasil diproses dan siap diunduh",
            Self::Rejected => "Permintaan data tidak dapat dipenuhi",
        }
    }

    /// Position on the progress track, or `None` for rejected requests.
    #[must_use]
    pub const fn progress_step(self) -> Option<ProgressStep> {
        match self {
            Self::Submitted => Some(ProgressStep::Received),
            Self::UnderReview => Some(ProgressStep::Review),
            Self::Processing => Some(ProgressStep::Process),
            Self::Completed => Some(ProgressStep::Done),
            Self::Rejected => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known status name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "unknown status '{0}': expected one of submitted, under_review, processing, completed, rejected"
)]
pub struct StatusParseError(String);

impl FromStr for RequestStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Label, icon and colour tone for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusConfig {
    /// Short Indonesian label.
    pub label: &'static str,
    /// Icon shown alongside the label.
    pub icon: StatusIcon,
    /// Colour family for the badge.
    pub tone: Tone,
}

/// Icons used by status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    /// A document.
    FileText,
    /// A clock face.
    Clock,
    /// A ticked circle.
    CheckCircle,
    /// A crossed circle.
    XCircle,
}

impl StatusIcon {
    /// A single-glyph rendering for text front ends.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::FileText => "📄",
            Self::Clock => "⏳",
            Self::CheckCircle => "✅",
            Self::XCircle => "❌",
        }
    }
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Grey.
    Neutral,
    /// Yellow.
    Caution,
    /// Blue.
    Info,
    /// Green.
    Success,
    /// Red.
    Danger,
}

/// A step on the four-step progress track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStep {
    /// Request received.
    Received,
    /// Under review.
    Review,
    /// Being processed.
    Process,
    /// Finished.
    Done,
}

impl ProgressStep {
    /// All steps in track order.
    pub const ALL: [Self; 4] = [Self::Received, Self::Review, Self::Process, Self::Done];

    /// Zero-based position on the track.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Received => 0,
            Self::Review => 1,
            Self::Process => 2,
            Self::Done => 3,
        }
    }

    /// Short Indonesian label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "Diterima",
            Self::Review => "Review",
            Self::Process => "Proses",
            Self::Done => "Selesai",
        }
    }

    /// How far along the track this step is, from `0.0` to `1.0`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let last = (Self::ALL.len() - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let index = self.index() as f64;
        index / last
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(RequestStatus::Submitted, RequestStatus::UnderReview; "submitted to review")]
    #[test_case(RequestStatus::UnderReview, RequestStatus::Processing; "review to processing")]
    #[test_case(RequestStatus::Processing, RequestStatus::Completed; "processing to completed")]
    #[test_case(RequestStatus::Submitted, RequestStatus::Rejected; "reject on submission")]
    #[test_case(RequestStatus::UnderReview, RequestStatus::Rejected; "reject during review")]
    #[test_case(RequestStatus::Processing, RequestStatus::Rejected; "reject while processing")]
    fn allowed_transitions(from: RequestStatus, to: RequestStatus) {
        assert!(from.can_transition_to(to));
    }

    #[test_case(RequestStatus::Completed, RequestStatus::UnderReview; "completed is terminal")]
    #[test_case(RequestStatus::Completed, RequestStatus::Rejected; "completed cannot be rejected")]
    #[test_case(RequestStatus::Rejected, RequestStatus::Processing; "rejected is terminal")]
    #[test_case(RequestStatus::Rejected, RequestStatus::Rejected; "rejected twice")]
    #[test_case(RequestStatus::Submitted, RequestStatus::Processing; "skipping review")]
    #[test_case(RequestStatus::Processing, RequestStatus::UnderReview; "moving backwards")]
    #[test_case(RequestStatus::Processing, RequestStatus::Processing; "staying put")]
    #[test_case(RequestStatus::UnderReview, RequestStatus::Submitted; "back to submitted")]
    fn forbidden_transitions(from: RequestStatus, to: RequestStatus) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn nothing_leaves_a_terminal_status() {
        for terminal in [RequestStatus::Completed, RequestStatus::Rejected] {
            for next in RequestStatus::ALL {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }

    #[test]
    fn labels_match_dashboard() {
        let labels: Vec<_> = RequestStatus::ALL
            .into_iter()
            .map(|status| status.config().label)
            .collect();
        assert_eq!(
            labels,
            ["Diterima", "Direview", "Diproses", "Selesai", "Ditolak"]
        );
    }

    #[test]
    fn rejected_has_no_progress_step() {
        assert_eq!(RequestStatus::Rejected.progress_step(), None);
        assert_eq!(
            RequestStatus::Processing.progress_step(),
            Some(ProgressStep::Process)
        );
    }

    #[test]
    fn progress_fraction_spans_the_track() {
        assert!((ProgressStep::Received.fraction() - 0.0).abs() < f64::EPSILON);
        assert!((ProgressStep::Done.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_wire_names_leniently() {
        assert_eq!(
            "under_review".parse::<RequestStatus>(),
            Ok(RequestStatus::UnderReview)
        );
        assert_eq!(
            "Under-Review".parse::<RequestStatus>(),
            Ok(RequestStatus::UnderReview)
        );
        assert!("archived".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&RequestStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }
}
