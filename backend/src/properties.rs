//! Loading of the bundled properties resource.
//!
//! The resource is a deployment-time-generated, line-oriented
//! `key=value` file describing build provenance. It is only ever read.

use std::path::{Path, PathBuf};

use thiserror::Error;

use gitinfo_types::{GitProperties, PropertiesBag};

/// Failure to read the properties resource.
#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("failed to read properties resource {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse line-oriented `key=value` properties text.
///
/// Blank lines and lines starting with `#` or `!` are skipped. The first
/// `=` or `:` separates key from value; both sides are trimmed. A line
/// without a separator is a key with an empty value. Later duplicates
/// overwrite earlier ones.
pub fn parse(text: &str) -> PropertiesBag {
    let mut bag = PropertiesBag::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        match line.find(['=', ':']) {
            Some(sep) => {
                let key = line[..sep].trim_end().to_string();
                let value = line[sep + 1..].trim_start().to_string();
                bag.0.insert(key, value);
            }
            None => {
                bag.0.insert(line.to_string(), String::new());
            }
        }
    }
    bag
}

/// Read and parse the properties file at `path`.
pub fn load(path: &Path) -> Result<PropertiesBag, PropertiesError> {
    let text = std::fs::read_to_string(path).map_err(|source| PropertiesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text))
}

/// Probe for the properties resource at process startup.
///
/// Absence is a normal outcome and yields `None`; a missing or unreadable
/// file only becomes an error when a detail request later asks for its
/// full contents.
pub fn probe(path: &Path) -> Option<GitProperties> {
    match load(path) {
        Ok(bag) => Some(GitProperties::from_bag(&bag)),
        Err(err) => {
            tracing::debug!("Properties resource not loaded: {err}");
            None
        }
    }
}
