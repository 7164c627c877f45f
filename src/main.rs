//! Personaforge CLI — builds a persona profile from a Reddit profile URL.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use personaforge::config::AppConfig;
use personaforge::credentials::Credentials;
use personaforge::fetch::reddit::RedditClient;
use personaforge::generate::huggingface::HuggingFaceModel;
use personaforge::identity::extract_username;
use personaforge::logging;
use personaforge::pipeline::{Pipeline, PipelineError, PipelineSettings};

/// Build a textual persona profile of a Reddit user from their recent
/// posts and comments.
#[derive(Debug, Parser)]
#[command(name = "personaforge", version, about)]
struct Cli {
    /// Reddit profile URL (e.g. https://www.reddit.com/user/spez/).
    /// Prompted for interactively when omitted.
    url: Option<String>,

    /// Path to the configuration file (defaults to ./personaforge.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load_with(cli.config.as_deref()).context("failed to load configuration")?;

    let profile_url = match cli.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    // Reject a bad reference before credentials or the network are touched.
    if extract_username(&profile_url).is_none() {
        eprintln!("Invalid Reddit URL.");
        return Ok(ExitCode::FAILURE);
    }

    let credentials = Credentials::load();

    let source = Arc::new(RedditClient::new(
        credentials.reddit().context("reddit credentials")?,
    ));
    let model = Arc::new(HuggingFaceModel::new(
        config.generation.model.clone(),
        credentials.hf_token().context("generation credentials")?,
    ));

    let pipeline = Pipeline::new(
        source,
        model,
        PipelineSettings {
            fetch_limit: config.fetch.limit,
            max_tokens: config.generation.max_tokens,
            temperature: config.generation.temperature,
            output_dir: config.output.dir.clone(),
        },
    );

    match pipeline.run(&profile_url).await {
        Ok(report) => {
            println!("Persona saved to {}", report.output_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::InvalidReference) => {
            eprintln!("Invalid Reddit URL.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Ask for the profile URL on stdin, one line.
fn prompt_for_url() -> Result<String> {
    print!("Enter Reddit profile URL: ");
    std::io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read profile URL from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
