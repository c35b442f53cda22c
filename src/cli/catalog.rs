use clap::{Parser, ValueEnum};
use portal::{
    Category, Dataset,
    state::{self, Query, SortOrder},
};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Browse the dataset catalog")]
pub struct Catalog {
    /// Only datasets in this category (name, slug or Indonesian label)
    #[arg(long)]
    category: Option<Category>,

    /// Case-insensitive text to find in title, description or organization
    #[arg(long)]
    search: Option<String>,

    /// Result order
    #[arg(long, value_enum, default_value_t)]
    sort: Sort,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum Sort {
    /// Most recently updated first
    #[default]
    Recent,
    /// Most downloaded first
    Popular,
}

impl From<Sort> for SortOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Recent => Self::Recent,
            Sort::Popular => Self::Popular,
        }
    }
}

impl Catalog {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let catalog = state::Catalog::seeded();
        let query = Query {
            category: self.category,
            search: self.search,
            sort: self.sort.into(),
        };
        let results = catalog.query(&query);
        tracing::debug!(count = results.len(), "catalog query");

        match self.output {
            OutputFormat::Table => print_table(&results),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        }
        Ok(())
    }
}

pub fn print_table(datasets: &[&Dataset]) {
    if datasets.is_empty() {
        println!("{}", "Tidak ada dataset yang cocok.".dim());
        return;
    }

    if terminal::is_narrow() {
        for dataset in datasets {
            println!("{:>2}  {}", dataset.id, terminal::truncate(&dataset.title, 50));
        }
        return;
    }

    println!(
        "{:>2}  {:<42} {:<14} {:<16} {:>9}",
        "ID", "Judul", "Kategori", "Format", "Unduhan"
    );
    println!("{}", "─".repeat(87).dim());
    for dataset in datasets {
        println!(
            "{:>2}  {:<42} {:<14} {:<16} {:>9}",
            dataset.id,
            terminal::truncate(&dataset.title, 42),
            dataset.category.label(),
            dataset.format.join(", "),
            dataset.downloads,
        );
        println!(
            "    {}",
            format!(
                "{} · diperbarui {}",
                dataset.organization,
                terminal::long_date(dataset.updated)
            )
            .dim()
        );
    }
}
