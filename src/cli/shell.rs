use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Select};
use portal::{
    Category, Config, RequestStatus, Session, TrackingNumber,
    domain::{DatasetId, DatasetRequestForm, RequestForm, RequestId},
    state::{Clock, Query, SortOrder, SystemClock, chatbot::Sender},
};
use tracing::instrument;

use super::{
    catalog, requests, stats,
    terminal::{self, Colorize},
    track,
};

const PURPOSES: [&str; 7] = [
    "Penelitian Akademik",
    "Riset Komersial",
    "Analisis Bisnis",
    "Pengembangan Aplikasi",
    "Jurnalisme",
    "Kebijakan Publik",
    "Lainnya",
];

const OCCUPATIONS: [&str; 9] = [
    "Mahasiswa/Pelajar",
    "Peneliti",
    "Akademisi",
    "Jurnalis",
    "Pegawai Negeri Sipil",
    "Pegawai Swasta",
    "Wirausaha",
    "LSM/Organisasi Non-Profit",
    "Lainnya",
];

const DATASET_PURPOSES: [&str; 8] = [
    "Penelitian Akademik",
    "Analisis Bisnis",
    "Tugas Akhir/Skripsi",
    "Jurnalisme/Media",
    "Pengembangan Aplikasi",
    "Kebijakan Publik",
    "Transparansi & Akuntabilitas",
    "Lainnya",
];

#[derive(Debug, Parser)]
#[command(about = "Start an interactive portal session")]
pub struct Shell {}

impl Shell {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let mut session = Session::new(config);
        let mut shown_until: Option<DateTime<Utc>> = None;

        if let Some(welcome) = session.chatbot().messages().first() {
            println!("{}\n", welcome.text.info());
        }
        println!("{}", "Ketik 'help' untuk daftar perintah, 'exit' untuk keluar.".dim());

        loop {
            let line = Input::<String>::new()
                .with_prompt("portal")
                .allow_empty(true)
                .interact_text()?;
            let args = split_args(&line);
            if args.is_empty() {
                continue;
            }

            let action = match Line::try_parse_from(args) {
                Ok(line) => line.action,
                Err(e) => {
                    e.print()?;
                    continue;
                }
            };
            if matches!(action, Action::Exit) {
                break;
            }

            if let Err(e) = action.run(&mut session) {
                eprintln!("{}", e.to_string().danger());
            }

            session.tick();
            let dismiss_at = session.snackbar().dismiss_at();
            if dismiss_at != shown_until {
                if let Some(message) = session.snackbar().message() {
                    println!("{}", format!("» {message}").success());
                }
                shown_until = dismiss_at;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Browse the catalog
    Catalog {
        /// Only datasets in this category
        #[arg(long)]
        category: Option<Category>,
        /// Text to search for
        #[arg(long)]
        search: Option<String>,
        /// Most downloaded first
        #[arg(long)]
        popular: bool,
    },
    /// Add a dataset to the cart
    Add { id: DatasetId },
    /// Remove a dataset from the cart
    Remove { id: DatasetId },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Download everything in the cart
    Download,
    /// Show the download history
    Downloads,
    /// Bookmark a dataset
    Bookmark { id: DatasetId },
    /// Remove a bookmark
    Unbookmark { id: DatasetId },
    /// List bookmarks
    Bookmarks,
    /// Add a bookmarked dataset to the cart
    BookmarkToCart { id: DatasetId },
    /// Fill in the data request form
    Request,
    /// Fill in the dataset request form
    RequestDataset,
    /// List data requests
    Requests,
    /// Move a request to a new status
    Advance {
        /// Request id
        id: RequestId,
        /// Target status (submitted, under_review, processing, completed,
        /// rejected)
        status: RequestStatus,
        /// Timeline note; defaults to the status description
        #[arg(long)]
        description: Option<String>,
        /// Rejection reason
        #[arg(long)]
        reason: Option<String>,
    },
    /// Show a request by tracking number
    Track { tracking_number: TrackingNumber },
    /// Show request and download statistics
    Stats,
    /// Talk to the assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Leave the shell
    Exit,
}

impl Action {
    fn run(self, session: &mut Session) -> anyhow::Result<()> {
        match self {
            Self::Catalog {
                category,
                search,
                popular,
            } => {
                let query = Query {
                    category,
                    search,
                    sort: if popular {
                        SortOrder::Popular
                    } else {
                        SortOrder::Recent
                    },
                };
                catalog::print_table(&session.catalog().query(&query));
            }
            Self::Add { id } => {
                if !session.add_to_cart(id)? {
                    println!("{}", "Dataset sudah ada di keranjang".dim());
                }
            }
            Self::Remove { id } => {
                let dataset = session.remove_from_cart(id)?;
                println!("Dihapus dari keranjang: {}", dataset.title);
            }
            Self::Cart => print_datasets(session.store().cart(), "Keranjang kosong."),
            Self::Clear => session.clear_cart(),
            Self::Download => {
                let downloaded = session.download_all();
                if downloaded.is_empty() {
                    println!("{}", "Keranjang kosong.".dim());
                } else {
                    println!(
                        "{} dataset berhasil diunduh",
                        downloaded.len().to_string().success()
                    );
                    for download in downloaded {
                        println!(
                            "  {} ({})",
                            download.dataset.title,
                            download.downloaded_formats.join(", ")
                        );
                    }
                }
            }
            Self::Downloads => {
                let downloads = session.store().downloads();
                if downloads.is_empty() {
                    println!("{}", "Belum ada unduhan.".dim());
                }
                for download in downloads {
                    println!(
                        "{:>2}  {}  {}",
                        download.dataset.id,
                        terminal::truncate(&download.dataset.title, 42),
                        terminal::long_datetime(download.downloaded_at).dim()
                    );
                }
            }
            Self::Bookmark { id } => {
                if !session.bookmark(id)? {
                    println!("{}", "Dataset sudah tersimpan".dim());
                }
            }
            Self::Unbookmark { id } => {
                session.remove_bookmark(id)?;
            }
            Self::Bookmarks => print_datasets(session.store().bookmarks(), "Belum ada simpanan."),
            Self::BookmarkToCart { id } => {
                session.bookmark_to_cart(id)?;
            }
            Self::Request => {
                let form = prompt_request_form()?;
                let request = session.submit_request(&form)?;
                println!(
                    "Permintaan terkirim. Nomor pelacakan: {}",
                    request.tracking_number().to_string().success()
                );
            }
            Self::RequestDataset => {
                let form = prompt_dataset_request_form()?;
                let request = session.submit_dataset_request(&form)?;
                println!(
                    "Permohonan dataset berhasil dikirim! Nomor pelacakan: {}",
                    request.tracking_number().to_string().success()
                );
            }
            Self::Requests => requests::print_table(session.store().requests()),
            Self::Advance {
                id,
                status,
                description,
                reason,
            } => {
                let request = session.advance_status(id, status, description, reason)?;
                println!(
                    "{}  {}",
                    request.tracking_number(),
                    terminal::badge(request.status().config())
                );
            }
            Self::Track { tracking_number } => {
                let request = session
                    .store()
                    .find_by_tracking_number(tracking_number)
                    .with_context(|| {
                        format!("Permintaan dengan nomor {tracking_number} tidak ditemukan")
                    })?;
                track::print_detail(request);
            }
            Self::Stats => {
                stats::print_requests(session.request_stats());
                println!();
                stats::print_downloads(session.download_stats());
            }
            Self::Chat { message } => chat(session, &message.join(" "))?,
            Self::Exit => {}
        }
        Ok(())
    }
}

fn print_datasets(datasets: &[portal::Dataset], empty: &str) {
    if datasets.is_empty() {
        println!("{}", empty.dim());
        return;
    }
    for dataset in datasets {
        println!(
            "{:>2}  {}",
            dataset.id,
            terminal::truncate(&dataset.title, 60)
        );
    }
}

fn chat(session: &mut Session, message: &str) -> anyhow::Result<()> {
    let before = session.chatbot().messages().len();
    if session.send_chat(message).is_none() {
        return Ok(());
    }

    if let Some(due) = session.chatbot().next_reply_at() {
        let wait = (due - SystemClock.now()).to_std().unwrap_or(Duration::ZERO);
        std::thread::sleep(wait);
    }
    session.tick();

    let mut offers_form = false;
    for reply in &session.chatbot().messages()[before..] {
        if reply.sender == Sender::Bot {
            println!("{}", reply.text.info());
            offers_form |= reply.offers_request_form;
        }
    }

    if offers_form
        && Confirm::new()
            .with_prompt("Buka form permohonan dataset?")
            .default(true)
            .interact()?
    {
        session.open_request_form();
        if let Some(opened) = session.chatbot().messages().last() {
            println!("{}", opened.text.info());
        }
        let form = prompt_dataset_request_form()?;
        let request = session.submit_dataset_request(&form)?;
        println!(
            "Nomor pelacakan: {}",
            request.tracking_number().to_string().success()
        );
    }
    Ok(())
}

fn ask(prompt: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn choose(prompt: &str, options: &[&str]) -> anyhow::Result<String> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()?;
    Ok(options[index].to_string())
}

fn yes_no(prompt: &str) -> anyhow::Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).interact()?)
}

fn prompt_request_form() -> anyhow::Result<RequestForm> {
    let title = ask("Judul data")?;
    let description = ask("Deskripsi kebutuhan")?;

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    let category = choose("Kategori", &categories)?;
    let purpose = choose("Tujuan penggunaan", &PURPOSES)?;

    Ok(RequestForm {
        title,
        description,
        category: Some(category),
        purpose: Some(purpose),
        organization: ask("Organisasi")?,
        email: ask("Email")?,
    })
}

fn prompt_dataset_request_form() -> anyhow::Result<DatasetRequestForm> {
    Ok(DatasetRequestForm {
        name: ask("Nama")?,
        phone: ask("Nomor telepon")?,
        email: ask("Email")?,
        occupation: Some(choose("Pekerjaan", &OCCUPATIONS)?),
        dataset_title: ask("Judul dataset")?,
        has_contacted_agency: Some(yes_no("Sudah menghubungi OPD terkait?")?),
        description: ask("Deskripsi kebutuhan")?,
        purpose: Some(choose("Tujuan penggunaan", &DATASET_PURPOSES)?),
        agreed_to_contact: Some(yes_no("Bersedia dihubungi oleh tim kami?")?),
    })
}

/// Splits a command line on whitespace, keeping double-quoted runs together.
fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    args.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("add 3", &["add", "3"]; "plain")]
    #[test_case("  cart  ", &["cart"]; "surrounding whitespace")]
    #[test_case(r#"advance 1 rejected --reason "Data rahasia""#, &["advance", "1", "rejected", "--reason", "Data rahasia"]; "quoted")]
    #[test_case(r#"chat """#, &["chat", ""]; "empty quotes")]
    #[test_case("", &[]; "empty")]
    fn splits(line: &str, expected: &[&str]) {
        assert_eq!(split_args(line), expected);
    }

    #[test]
    fn parses_shell_lines() {
        let line = Line::try_parse_from(split_args("advance 2 completed")).unwrap();
        assert!(matches!(
            line.action,
            Action::Advance {
                id: 2,
                status: RequestStatus::Completed,
                ..
            }
        ));

        let line = Line::try_parse_from(split_args("catalog --category kesehatan")).unwrap();
        assert!(matches!(
            line.action,
            Action::Catalog {
                category: Some(Category::Health),
                ..
            }
        ));

        let line = Line::try_parse_from(split_args("bookmark-to-cart 4")).unwrap();
        assert!(matches!(line.action, Action::BookmarkToCart { id: 4 }));
    }
}
