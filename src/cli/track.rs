use clap::Parser;
use portal::{
    DataRequest, RequestStatus, Store, TrackingNumber,
    domain::{ProgressStep, status::StatusIcon},
};
use tracing::instrument;

use super::terminal::{self, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the progress of a data request")]
pub struct Track {
    /// Tracking number, for example DREQ20241122002
    tracking_number: TrackingNumber,

    /// Print the request as JSON
    #[arg(long)]
    json: bool,
}

impl Track {
    #[instrument(level = "debug", skip(self), fields(tracking = %self.tracking_number))]
    pub fn run(self) -> anyhow::Result<()> {
        let store = Store::seeded();
        let Some(request) = store.find_by_tracking_number(self.tracking_number) else {
            anyhow::bail!(
                "Permintaan dengan nomor {} tidak ditemukan",
                self.tracking_number
            );
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(request)?);
        } else {
            print_detail(request);
        }
        Ok(())
    }
}

pub fn print_detail(request: &DataRequest) {
    let details = request.details();

    println!("# {}", request.tracking_number());
    println!("{}\n", details.title);
    println!("{}", terminal::badge(request.status().config()));
    println!();

    println!("{}", "Detail".dim());
    println!("  Kategori:   {}", details.category);
    println!("  Tujuan:     {}", details.purpose);
    println!("  Organisasi: {}", details.organization);
    println!("  Email:      {}", details.email);
    println!(
        "  Diajukan:   {}",
        terminal::long_date(request.request_date().date_naive())
    );
    println!(
        "  Diperbarui: {}",
        terminal::long_date(request.updated_date().date_naive())
    );
    if !details.description.is_empty() {
        println!("\n  {}", details.description);
    }
    println!();

    print_progress(request.status());
    if let Some(reason) = request.rejection_reason() {
        println!("Alasan penolakan: {}", reason.danger());
        println!();
    }

    println!("{}", "Riwayat".dim());
    for entry in request.timeline().iter().rev() {
        let config = entry.status.config();
        println!(
            "  {} {}  {}",
            config.icon.glyph(),
            config.label,
            terminal::long_datetime(entry.timestamp).dim()
        );
        println!("     {}", entry.description);
    }
}

fn print_progress(status: RequestStatus) {
    let Some(current) = status.progress_step() else {
        return;
    };

    let track: Vec<String> = ProgressStep::ALL
        .into_iter()
        .map(|step| {
            if step <= current {
                format!("{} {}", StatusIcon::CheckCircle.glyph(), step.label()).success()
            } else {
                format!("○ {}", step.label()).dim()
            }
        })
        .collect();

    println!("{}", "Progres".dim());
    println!("  {}", track.join(" ─ "));
    println!("  {:.0}%", current.fraction() * 100.0);
    println!();
}
