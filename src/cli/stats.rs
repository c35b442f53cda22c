use clap::Parser;
use portal::{
    Store,
    domain::{DownloadStats, RequestStats},
};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Show request statistics")]
pub struct Stats {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Stats {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let stats = Store::seeded().request_stats();
        match self.output {
            OutputFormat::Table => print_requests(stats),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        }
        Ok(())
    }
}

pub fn print_requests(stats: RequestStats) {
    println!("Permintaan data");
    println!("{}", "───────────────".dim());
    if terminal::is_narrow() {
        println!(
            "total={} proses={} selesai={} ditolak={}",
            stats.total, stats.in_progress, stats.completed, stats.rejected
        );
        return;
    }
    println!("  {:<14}{}", "Total:", stats.total);
    println!("  {:<14}{}", "Dalam Proses:", stats.in_progress.to_string().info());
    println!("  {:<14}{}", "Selesai:", stats.completed.to_string().success());
    println!("  {:<14}{}", "Ditolak:", stats.rejected.to_string().danger());
}

pub fn print_downloads(stats: DownloadStats) {
    println!("Unduhan");
    println!("{}", "───────".dim());
    println!("  {:<14}{}", "Total:", stats.total);
    println!("  {:<14}{}", "Bulan Ini:", stats.this_month);
    println!("  {:<14}{}", "Kategori:", stats.distinct_categories);
}
