use clap::Parser;
use portal::domain::Intent;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Ask the portal assistant a question")]
pub struct Chat {
    /// The message to send
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,
}

impl Chat {
    pub fn run(self) -> anyhow::Result<()> {
        let message = self.message.join(" ");
        let intent = Intent::classify(&message);
        tracing::debug!(?intent, "classified message");

        println!("{}", intent.reply());
        if intent.offers_request_form() {
            println!();
            println!(
                "{}",
                "Jalankan 'portal shell' lalu 'request' untuk mengisi form permohonan.".dim()
            );
        }
        Ok(())
    }
}
