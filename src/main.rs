// Entrypoint for the CLI application.
// - Loads credentials first so a misconfigured run stops before any
//   draft is read or request sent.
// - Maps each failure kind to an exit status.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wp_draft_push::api::WpClient;
use wp_draft_push::config::{load_env_file, Credentials};
use wp_draft_push::drafts::DEFAULT_DRAFTS_DIR;
use wp_draft_push::push::{self, PushPaths};
use wp_draft_push::push_log::DEFAULT_LOG_PATH;

#[derive(Parser, Debug)]
#[command(name = "wp-draft-push", version, about = "Push local JSON drafts to WordPress as draft posts")]
struct Cli {
    /// Folder holding the draft JSON files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DRAFTS_DIR)]
    drafts_dir: PathBuf,

    /// Append-only log of pushed drafts
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Dotenv file read before the environment
    #[arg(long, value_name = "PATH", default_value = ".env")]
    env_file: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wp_draft_push=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = load_env_file(&cli.env_file) {
        eprintln!("ERROR: {:#}", e);
        return ExitCode::from(2);
    }
    let creds = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::from(2);
        }
    };

    let client = match WpClient::new(&creds) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let paths = PushPaths {
        drafts_dir: cli.drafts_dir,
        log_file: cli.log_file,
    };
    let mut stdout = std::io::stdout().lock();
    match push::run(&client, &paths, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", anyhow::Error::new(e));
            ExitCode::FAILURE
        }
    }
}
