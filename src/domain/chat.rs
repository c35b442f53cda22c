//! Rule-based replies for the chat assistant.
//!
//! Messages are matched against keyword rules in a fixed order; the first rule
//! with a keyword contained in the lowercased message wins.

use serde::Serialize;

/// Greeting shown when a conversation opens.
pub const WELCOME: &str = "Halo! Saya asisten Open Data Portal Anda. Bagaimana saya bisa membantu \
                           Anda hari ini?\n\nKetik 'request data' jika Anda ingin mengajukan \
                           permintaan data baru.";

/// Message posted after the user opens the request form from a reply.
pub const FORM_OPENED: &str = "Form permohonan dataset telah dibuka. Silakan isi semua informasi \
                               yang diperlukan dan kirimkan permohonan Anda.";

/// What the user appears to be asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Wants to request a dataset.
    Request,
    /// Says hello.
    Greeting,
    /// Asks for help.
    Help,
    /// Asks about available datasets.
    Datasets,
    /// Asks how to download.
    Download,
    /// Asks about API access.
    Api,
    /// Anything else.
    Fallback,
}

/// Rules in priority order.
const RULES: [(Intent, &[&str]); 6] = [
    (
        Intent::Request,
        &["request", "permintaan", "minta data", "ajukan", "permohonan"],
    ),
    (Intent::Greeting, &["hello", "hi", "halo", "hey"]),
    (Intent::Help, &["help", "bantuan"]),
    (Intent::Datasets, &["dataset", "data"]),
    (Intent::Download, &["download", "unduh"]),
    (Intent::Api, &["api", "integration", "integrasi"]),
];

impl Intent {
    /// Classifies a user message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| message.contains(keyword)))
            .map_or(Self::Fallback, |(intent, _)| *intent)
    }

    /// The canned reply for this intent.
    #[must_use]
    pub const fn reply(self) -> &'static str {
        match self {
            Self::Request => {
                "Tentu! Untuk mengajukan permohonan dataset baru, silakan isi form permohonan \
                 resmi kami dengan mengklik tombol di bawah ini.\n\nForm ini akan membantu kami \
                 memahami kebutuhan data Anda dengan lebih baik dan memprosesnya lebih cepat."
            }
            Self::Greeting => {
                "Halo! Saya asisten Open Data Portal. Saya bisa membantu Anda:\n\n• Mencari \
                 dataset\n• Request data baru\n• Informasi tentang portal\n\nApa yang bisa saya \
                 bantu?"
            }
            Self::Help => {
                "Saya dapat membantu Anda dengan:\n• Mencari dataset spesifik\n• Memahami format \
                 data\n• Informasi organisasi\n• Request data yang belum tersedia\n• Navigasi \
                 portal\n\nApa yang ingin Anda ketahui?"
            }
            Self::Datasets => {
                "Kami memiliki lebih dari 1,247 dataset tersedia dalam berbagai kategori termasuk \
                 Kesehatan, Pendidikan, Transportasi, Ekonomi, Lingkungan, dan lainnya. Anda \
                 dapat menelusuri menggunakan filter di atas atau beritahu saya apa yang Anda \
                 cari!"
            }
            Self::Download => {
                "Untuk mengunduh dataset:\n1. Klik kartu dataset\n2. Pilih format yang diinginkan \
                 (CSV, JSON, dll.)\n3. Klik tombol download\n\nSebagian besar dataset tersedia \
                 dalam berbagai format untuk kemudahan Anda."
            }
            Self::Api => {
                "Banyak dataset kami menawarkan akses API untuk integrasi data real-time. Cari \
                 dataset dengan label format 'API'. Dokumentasi API tersedia di halaman detail \
                 setiap dataset."
            }
            Self::Fallback => {
                "Terima kasih atas pertanyaan Anda! Untuk pertanyaan spesifik, silakan hubungi \
                 tim support kami atau lihat bagian FAQ. Ada yang bisa saya bantu lagi mengenai \
                 dataset kami?"
            }
        }
    }

    /// Whether the reply should offer to open the request form.
    #[must_use]
    pub const fn offers_request_form(self) -> bool {
        matches!(self, Self::Request)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Saya mau request data", Intent::Request; "request keyword")]
    #[test_case("Bagaimana cara AJUKAN permohonan?", Intent::Request; "uppercase")]
    #[test_case("halo", Intent::Greeting; "greeting")]
    #[test_case("butuh bantuan", Intent::Help; "help")]
    #[test_case("ada dataset kesehatan?", Intent::Datasets; "datasets")]
    #[test_case("cara unduh?", Intent::Download; "download")]
    #[test_case("apakah ada API?", Intent::Api; "api")]
    #[test_case("terima kasih", Intent::Fallback; "no keyword")]
    fn classifies(message: &str, expected: Intent) {
        assert_eq!(Intent::classify(message), expected);
    }

    #[test]
    fn earlier_rules_win() {
        // "download data" contains "data", and the dataset rule comes first
        assert_eq!(Intent::classify("download data"), Intent::Datasets);
        // "permintaan data" matches both request and dataset rules
        assert_eq!(Intent::classify("permintaan data"), Intent::Request);
    }

    #[test]
    fn only_request_offers_form() {
        assert!(Intent::Request.offers_request_form());
        assert!(!Intent::Help.offers_request_form());
        assert!(!Intent::Fallback.offers_request_form());
    }
}
