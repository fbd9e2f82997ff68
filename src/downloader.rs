use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::manifest::Manifest;

use bytes::Bytes;
use reqwest::{Client, Response};
use std::{
    fs,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// Creates `path` and any missing parents. Returns `true` when the directory
/// did not exist before the call.
pub fn ensure_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)
        .chain_err(|| ErrorKind::DirectoryCreation(path.display().to_string()))?;
    Ok(true)
}

/// Retrieves one url into one file, blocking until the transfer is over.
pub trait Fetch {
    /// Writes the full body of `url` to `dest`, replacing any existing file,
    /// and returns the number of bytes written.
    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Plain HTTP(S) GET through reqwest, driven on a private current-thread runtime.
pub struct HttpFetcher {
    client: Client,
    rt: Runtime,
}

impl HttpFetcher {
    pub fn new(connect_timeout: Duration) -> Result<HttpFetcher> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;
        HttpFetcher::with_client(client)
    }

    pub fn with_client(client: Client) -> Result<HttpFetcher> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(HttpFetcher { client, rt })
    }

    async fn download_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        debug!(%url, %status, "response received");
        if !status.is_success() {
            return Err(ErrorKind::HttpStatus(status.as_u16()).into());
        }

        let expected = response.content_length();
        let mut file = File::create(dest)?;
        let result = HttpFetcher::write_body(&mut response, &mut file, expected).await;
        drop(file);

        if result.is_err() {
            // A partial model file is worse than none.
            if let Err(e) = fs::remove_file(dest) {
                warn!(path = %dest.display(), "couldn't remove partial file: {}", e);
            }
        }
        result
    }

    async fn write_body(response: &mut Response, file: &mut File, expected: Option<u64>) -> Result<u64> {
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            let chunk: Bytes = chunk;
            file.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        file.flush()?;

        if let Some(expected) = expected {
            if written != expected {
                return Err(ErrorKind::Truncated(expected, written).into());
            }
        }
        Ok(written)
    }
}

impl Fetch for HttpFetcher {
    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        self.rt.block_on(self.download_file(url, dest))
    }
}

/// Downloads every entry of a manifest, in order, into one directory.
/// The first failure stops the run.
pub struct Downloader<F> {
    directory_path: PathBuf,
    fetcher: F,
}

impl<F: Fetch> Downloader<F> {
    pub fn new(directory_path: impl Into<PathBuf>, fetcher: F) -> Downloader<F> {
        Downloader {
            directory_path: directory_path.into(),
            fetcher,
        }
    }

    /// Runs the manifest, printing progress to stdout.
    pub fn run(&self, manifest: &Manifest) -> Result<Vec<PathBuf>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(manifest, &mut out)
    }

    /// Same as [`Downloader::run`], printing progress to `out`.
    ///
    /// On success returns the written paths in manifest order. On the first
    /// failed transfer, prints the url and reason and returns a
    /// [`ErrorKind::Download`] error; files written before it stay on disk.
    pub fn run_to<W: Write>(&self, manifest: &Manifest, out: &mut W) -> Result<Vec<PathBuf>> {
        if ensure_directory(&self.directory_path)? {
            writeln!(out, "Created directory: {}", self.directory_path.display())?;
        }

        writeln!(
            out,
            "Starting download of {} models into {}...",
            manifest.len(),
            self.directory_path.display()
        )?;

        let mut downloaded = Vec::with_capacity(manifest.len());

        for model in manifest.models() {
            let dest_path = self.directory_path.join(&model.filename);
            writeln!(out, "Downloading {}...", model.filename)?;
            out.flush()?;

            let started = Instant::now();
            match self.fetcher.fetch_to_file(&model.url, &dest_path) {
                Ok(bytes) => {
                    info!(
                        file = %model.filename,
                        bytes,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "download finished"
                    );
                    writeln!(out, "Done.")?;
                    downloaded.push(dest_path);
                }
                Err(e) => {
                    let reason = e.to_string();
                    let err = Error::with_chain(e, ErrorKind::Download(model.url.clone(), reason));
                    writeln!(out, "{}", err)?;
                    out.flush()?;
                    return Err(err);
                }
            }
        }

        writeln!(out, "All downloads complete!")?;
        Ok(downloaded)
    }
}
