//! The `radiograph diagnose` command for one image on disk.

use clap::Args;
use radiograph_core::{Config, Outcome, Radiograph};
use std::path::PathBuf;
use std::time::Duration;

use crate::report::Report;

/// Arguments for the `diagnose` command.
#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// JPEG or PNG image to analyze
    #[arg(required = true)]
    pub image: PathBuf,

    /// Model identifier (overrides gemini.model)
    #[arg(long)]
    pub model: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the diagnose command.
pub async fn execute(args: DiagnoseArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(model) = args.model {
        config.gemini.model = model;
    }
    config.validate()?;

    let radiograph = Radiograph::new(config)?;

    let spinner = create_spinner();
    let result = radiograph.diagnose_file(&args.image).await;
    spinner.finish_and_clear();

    let outcome = result.map_err(|e| anyhow::anyhow!(e.user_notice()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Report::from(&outcome))?);
    } else if let Outcome::Diagnosed(diagnosis) = &outcome {
        eprintln!("{}", outcome.user_message());
        println!("{}", diagnosis.text);
    }

    match outcome {
        Outcome::Diagnosed(_) => Ok(()),
        failed => anyhow::bail!("{}", failed.user_message()),
    }
}

fn create_spinner() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Analyzing image. Please wait...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
