#![recursion_limit = "1024"]

pub mod downloader;
pub mod errors;
pub mod manifest;

pub use downloader::{ensure_directory, Downloader, Fetch, HttpFetcher};
pub use errors::{Error, ErrorKind, Result};
pub use manifest::{Manifest, ModelSpec};
