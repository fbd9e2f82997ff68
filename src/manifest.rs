use crate::errors::{ErrorKind, Result};
use std::collections::HashSet;

const BUILTIN_LIST: &str = include_str!("../models.txt");

/// A single remote file and the name it is saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub url: String,
    pub filename: String,
}

impl ModelSpec {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> ModelSpec {
        ModelSpec {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// Ordered list of files to download. Entries are fetched in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    models: Vec<ModelSpec>,
}

impl Manifest {
    pub fn new(models: Vec<ModelSpec>) -> Result<Manifest> {
        let mut seen = HashSet::new();
        for model in &models {
            validate_filename(&model.filename)?;
            if !seen.insert(model.filename.as_str()) {
                return Err(ErrorKind::DuplicateFilename(model.filename.clone()).into());
            }
        }
        Ok(Manifest { models })
    }

    /// The models shipped with the application, read from `models.txt`.
    pub fn builtin() -> Result<Manifest> {
        Manifest::parse(BUILTIN_LIST)
    }

    /// Parses `<url> <filename>` lines. The url may be quoted; blank lines
    /// and `#` comments are skipped.
    pub fn parse(contents: &str) -> Result<Manifest> {
        let mut models = Vec::new();

        for (idx, row) in contents.lines().enumerate() {
            let row = row.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = row.split_whitespace().collect();
            let (url, filename) = match fields.as_slice() {
                [url, filename] => (url.trim_matches('"'), *filename),
                _ => {
                    return Err(ErrorKind::InvalidManifest(
                        idx + 1,
                        format!("expected `<url> <filename>`, found {} fields", fields.len()),
                    )
                    .into())
                }
            };
            if url.is_empty() {
                return Err(ErrorKind::InvalidManifest(idx + 1, "empty url".to_string()).into());
            }

            models.push(ModelSpec::new(url, filename));
        }

        Manifest::new(models)
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// Every file must land directly inside the target directory.
fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(|c: char| c == '/' || c == '\\')
    {
        return Err(ErrorKind::InvalidFilename(filename.to_string()).into());
    }
    Ok(())
}
