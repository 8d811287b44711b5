//! Entry load and validation errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, classifying, and validating entries.
///
/// `Malformed`, `Unopenable`, and `InvalidSlug` are per-entry: the
/// offending entry is skipped with a warning and the batch continues.
/// `Duplicate` is raised at validation time and fails the whole build.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Header section missing, unparsable, or not a mapping; or a body
    /// part with an unrecognized shape.
    #[error("malformed entry: {0}")]
    Malformed(String),

    /// Filesystem read failure for a discovered entry path.
    #[error("unopenable entry path: {0}")]
    Unopenable(PathBuf, #[source] std::io::Error),

    /// A custom slug that is not already in canonical form.
    #[error("invalid custom slug: {0:?}")]
    InvalidSlug(String),

    /// Two or more published entries resolved to the same root slug.
    #[error("duplicate entry ids detected: {}", .0.join(", "))]
    Duplicate(Vec<String>),
}
