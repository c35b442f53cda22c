use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a dataset in the catalog.
pub type DatasetId = u32;

/// Thematic category of a catalog dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Public health.
    Health,
    /// Schools and education.
    Education,
    /// Public transport and roads.
    Transportation,
    /// Economic indicators.
    Economy,
    /// Environmental monitoring.
    Environment,
    /// Social assistance programmes.
    #[serde(rename = "Social Services")]
    SocialServices,
    /// Public works.
    Infrastructure,
    /// Tourism and culture.
    Tourism,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Health,
        Self::Education,
        Self::Transportation,
        Self::Economy,
        Self::Environment,
        Self::SocialServices,
        Self::Infrastructure,
        Self::Tourism,
    ];

    /// English name, as used in the catalog data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Transportation => "Transportation",
            Self::Economy => "Economy",
            Self::Environment => "Environment",
            Self::SocialServices => "Social Services",
            Self::Infrastructure => "Infrastructure",
            Self::Tourism => "Tourism",
        }
    }

    /// Short identifier used by category filters.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Education => "education",
            Self::Transportation => "transportation",
            Self::Economy => "economy",
            Self::Environment => "environment",
            Self::SocialServices => "social",
            Self::Infrastructure => "infrastructure",
            Self::Tourism => "tourism",
        }
    }

    /// Indonesian label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Health => "Kesehatan",
            Self::Education => "Pendidikan",
            Self::Transportation => "Transportasi",
            Self::Economy => "Ekonomi",
            Self::Environment => "Lingkungan",
            Self::SocialServices => "Layanan Sosial",
            Self::Infrastructure => "Infrastruktur",
            Self::Tourism => "Pariwisata",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct CategoryParseError(String);

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the English name, the slug or the Indonesian label, ignoring
    /// case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                [category.name(), category.slug(), category.label()]
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// A published dataset. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Catalog identifier.
    pub id: DatasetId,
    /// Title.
    pub title: String,
    /// Longer description of the contents.
    pub description: String,
    /// Publishing agency.
    pub organization: String,
    /// Thematic category.
    pub category: Category,
    /// Available file formats (e.g. `CSV`, `JSON`, `API`).
    pub format: Vec<String>,
    /// Date of the last update.
    pub updated: NaiveDate,
    /// Number of downloads.
    pub downloads: u64,
    /// Number of views.
    pub views: u64,
}

impl Dataset {
    /// Whether the title, description or organization contains `query`,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.title, &self.description, &self.organization]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// A dataset as it was when the user downloaded it.
///
/// Created by checking out the cart, never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedDataset {
    /// The dataset itself.
    #[serde(flatten)]
    pub dataset: Dataset,
    /// When the download happened.
    pub downloaded_at: DateTime<Utc>,
    /// The formats delivered.
    pub downloaded_formats: Vec<String>,
}

impl DownloadedDataset {
    /// Records a download of `dataset` at `at`, capturing its current formats.
    #[must_use]
    pub fn new(dataset: Dataset, at: DateTime<Utc>) -> Self {
        let downloaded_formats = dataset.format.clone();
        Self {
            dataset,
            downloaded_at: at,
            downloaded_formats,
        }
    }
}
