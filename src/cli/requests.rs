use clap::Parser;
use portal::{DataRequest, Store};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "List data requests")]
pub struct Requests {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Requests {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let store = Store::seeded();
        match self.output {
            OutputFormat::Table => print_table(store.requests()),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(store.requests())?);
            }
        }
        Ok(())
    }
}

pub fn print_table(requests: &[DataRequest]) {
    if requests.is_empty() {
        println!("{}", "Belum ada permintaan data.".dim());
        return;
    }

    let narrow = terminal::is_narrow();
    for request in requests {
        let badge = terminal::badge(request.status().config());
        if narrow {
            println!("{:>2}  {}  {badge}", request.id(), request.tracking_number());
            println!("    {}", terminal::truncate(request.title(), 44));
            continue;
        }
        println!(
            "{:>2}  {}  {:<40} {badge}",
            request.id(),
            request.tracking_number(),
            terminal::truncate(request.title(), 40),
        );
        println!(
            "    {}",
            format!(
                "{} · diajukan {} · diperbarui {}",
                request.details().organization,
                terminal::long_date(request.request_date().date_naive()),
                terminal::long_date(request.updated_date().date_naive()),
            )
            .dim()
        );
    }
}
