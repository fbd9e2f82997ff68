use model_downloader::{Downloader, ErrorKind, HttpFetcher, Manifest, Result};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DIR_PATH: &str = "src-tauri/resources/models";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        // Download failures have already been reported on stdout.
        if !matches!(e.kind(), ErrorKind::Download(..)) {
            eprintln!("Error: {}", e);
            for cause in e.iter().skip(1) {
                eprintln!("caused by: {}", cause);
            }
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let manifest = Manifest::builtin()?;
    let downloader = Downloader::new(DIR_PATH, HttpFetcher::new(CONNECT_TIMEOUT)?);

    downloader.run(&manifest)?;
    Ok(())
}
