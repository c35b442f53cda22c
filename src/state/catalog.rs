//! The static dataset catalog and its query interface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Dataset, DatasetId};

/// How to order query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Most downloaded first.
    Popular,
}

/// Filters and ordering for a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Only datasets in this category; `None` means all categories.
    pub category: Option<Category>,
    /// Case-insensitive text matched against title, description and
    /// organization. Blank means no filter.
    pub search: Option<String>,
    /// Result order.
    pub sort: SortOrder,
}

impl Query {
    fn accepts(&self, dataset: &Dataset) -> bool {
        let category_ok = self.category.is_none_or(|c| dataset.category == c);
        let search_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .is_none_or(|s| dataset.matches(s));
        category_ok && search_ok
    }
}

/// A read-only collection of published datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    datasets: Vec<Dataset>,
}

impl Catalog {
    /// Creates a catalog from the given datasets.
    #[must_use]
    pub const fn new(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    /// The catalog shipped with the portal.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_datasets())
    }

    /// Looks up a dataset by id.
    #[must_use]
    pub fn get(&self, id: DatasetId) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.id == id)
    }

    /// Every dataset, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Datasets matching `query`, in the requested order.
    ///
    /// Ties keep catalog order.
    #[must_use]
    pub fn query(&self, query: &Query) -> Vec<&Dataset> {
        let mut results: Vec<&Dataset> = self
            .datasets
            .iter()
            .filter(|dataset| query.accepts(dataset))
            .collect();

        match query.sort {
            SortOrder::Recent => results.sort_by(|a, b| b.updated.cmp(&a.updated)),
            SortOrder::Popular => results.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
        }

        results
    }

    /// Number of datasets in each category, in category order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .datasets
                    .iter()
                    .filter(|dataset| dataset.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn dataset(
    id: DatasetId,
    title: &str,
    description: &str,
    organization: &str,
    category: Category,
    formats: &[&str],
    updated: (i32, u32, u32),
    downloads: u64,
    views: u64,
) -> Dataset {
    Dataset {
        id,
        title: title.to_string(),
        description: description.to_string(),
        organization: organization.to_string(),
        category,
        format: formats.iter().map(ToString::to_string).collect(),
        updated: NaiveDate::from_ymd_opt(updated.0, updated.1, updated.2)
            .expect("this should never fail"),
        downloads,
        views,
    }
}

#[allow(clippy::too_many_lines)]
fn seed_datasets() -> Vec<Dataset> {
    [
        dataset(
            1,
            "Data Fasilitas Kesehatan Jawa Barat",
            "Daftar lengkap fasilitas kesehatan publik termasuk rumah sakit, puskesmas, dan \
             klinik dengan data lokasi, kapasitas tempat tidur, dan tenaga medis di seluruh Jawa \
             Barat.",
            "Dinas Kesehatan Provinsi Jawa Barat",
            Category::Health,
            &["CSV", "JSON", "API"],
            (2024, 11, 20),
            1234,
            5678,
        ),
        dataset(
            2,
            "Statistik Pendidikan Sekolah 2024",
            "Data statistik pendidikan tahunan meliputi tingkat partisipasi sekolah, kelulusan, \
             dan nilai ujian nasional di seluruh sekolah negeri dan swasta Jawa Barat.",
            "Dinas Pendidikan Provinsi Jawa Barat",
            Category::Education,
            &["XLSX", "CSV"],
            (2024, 11, 15),
            892,
            3421,
        ),
        dataset(
            3,
            "Rute dan Jadwal Transportasi Publik",
            "Data real-time dan jadwal rute transportasi umum termasuk bus, kereta api, dan \
             angkutan kota dengan informasi titik pemberhentian dan waktu operasional.",
            "Dinas Perhubungan Provinsi Jawa Barat",
            Category::Transportation,
            &["JSON", "GTFS", "API"],
            (2024, 11, 25),
            2341,
            8765,
        ),
        dataset(
            4,
            "Indikator Ekonomi Regional Jawa Barat",
            "Data ekonomi triwulanan meliputi PDRB, tingkat pengangguran, registrasi usaha, \
             inflasi, dan statistik perdagangan regional Jawa Barat.",
            "Badan Pusat Statistik Jawa Barat",
            Category::Economy,
            &["CSV", "XLSX", "PDF"],
            (2024, 11, 10),
            567,
            2345,
        ),
        dataset(
            5,
            "Data Pemantauan Kualitas Udara",
            "Pengukuran kualitas udara per jam dari stasiun pemantau meliputi PM2.5, PM10, CO2, \
             SO2, dan polutan lainnya di berbagai titik di Jawa Barat.",
            "Dinas Lingkungan Hidup Provinsi Jawa Barat",
            Category::Environment,
            &["CSV", "JSON", "API"],
            (2024, 11, 27),
            1876,
            6543,
        ),
        dataset(
            6,
            "Registrasi Program Bantuan Sosial",
            "Direktori program bantuan sosial, kriteria penerima, jumlah penerima manfaat, dan \
             distribusi bantuan per kabupaten/kota di Jawa Barat.",
            "Dinas Sosial Provinsi Jawa Barat",
            Category::SocialServices,
            &["CSV", "PDF"],
            (2024, 11, 18),
            432,
            1987,
        ),
        dataset(
            7,
            "Proyek Pembangunan Infrastruktur",
            "Daftar proyek infrastruktur yang sedang berjalan dan selesai meliputi jalan, \
             jembatan, dan fasilitas publik dengan anggaran dan timeline pelaksanaan.",
            "Dinas Pekerjaan Umum dan Penataan Ruang",
            Category::Infrastructure,
            &["XLSX", "JSON"],
            (2024, 11, 22),
            765,
            3210,
        ),
        dataset(
            8,
            "Destinasi Wisata dan Statistik Pengunjung",
            "Database destinasi pariwisata, jumlah kunjungan wisatawan tahunan, pendapatan \
             sektor pariwisata, dan fasilitas wisata per lokasi di Jawa Barat.",
            "Dinas Pariwisata dan Kebudayaan Jawa Barat",
            Category::Tourism,
            &["CSV", "JSON", "API"],
            (2024, 11, 12),
            1123,
            4567,
        ),
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(results: &[&Dataset]) -> Vec<DatasetId> {
        results.iter().map(|dataset| dataset.id).collect()
    }

    #[test]
    fn seeded_catalog_has_one_dataset_per_category() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.all().len(), 8);
        assert!(
            catalog
                .category_counts()
                .iter()
                .all(|(_, count)| *count == 1)
        );
    }

    #[test]
    fn recent_sorts_by_update_date() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query::default());
        assert_eq!(ids(&results), [5, 3, 7, 1, 6, 2, 8, 4]);
    }

    #[test]
    fn popular_sorts_by_downloads() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query {
            sort: SortOrder::Popular,
            ..Query::default()
        });
        assert_eq!(ids(&results), [3, 5, 1, 8, 2, 7, 4, 6]);
    }

    #[test]
    fn filters_by_category() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query {
            category: Some(Category::SocialServices),
            ..Query::default()
        });
        assert_eq!(ids(&results), [6]);
    }

    #[test]
    fn search_spans_text_fields() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query {
            search: Some("BADAN PUSAT".to_string()),
            ..Query::default()
        });
        assert_eq!(ids(&results), [4]);

        let results = catalog.query(&Query {
            search: Some("jawa barat".to_string()),
            sort: SortOrder::Popular,
            ..Query::default()
        });
        assert_eq!(results.len(), 7);
        assert!(!ids(&results).contains(&7));
    }

    #[test]
    fn blank_search_matches_everything() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query {
            search: Some("   ".to_string()),
            ..Query::default()
        });
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn filters_combine() {
        let catalog = Catalog::seeded();
        let results = catalog.query(&Query {
            category: Some(Category::Health),
            search: Some("udara".to_string()),
            sort: SortOrder::Recent,
        });
        assert!(results.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.get(3).map(|d| d.title.as_str()),
            Some("Rute dan Jadwal Transportasi Publik")
        );
        assert!(catalog.get(99).is_none());
    }
}
