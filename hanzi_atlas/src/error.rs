//! Errors raised while loading reference data.

use std::path::PathBuf;

use thiserror::Error;

use crate::entities::{DialectId, RootId, VocabularyId};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read reference data from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate root id {0}")]
    DuplicateRootId(RootId),

    #[error("duplicate vocabulary id {0}")]
    DuplicateVocabularyId(VocabularyId),

    #[error("duplicate dialect example id {0}")]
    DuplicateDialectId(DialectId),

    #[error("{kind} {id} has invalid {field} {value}, expected a positive value")]
    InvalidLevel {
        kind: &'static str,
        id: i64,
        field: &'static str,
        value: u8,
    },
}
