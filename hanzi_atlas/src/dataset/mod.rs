//! The reference dataset - the read-only table of roots, words and dialect readings.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::entities::{CharacterRoot, DialectExample, Language, RootId, Vocabulary};
use crate::error::DatasetError;

/// The bundled reference data.
const BUILTIN_DATA: &str = include_str!("../../data/reference.toml");

/// On-disk layout of a reference data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub roots: Vec<CharacterRoot>,
    #[serde(default)]
    pub vocabulary: Vec<Vocabulary>,
    #[serde(default)]
    pub dialects: Vec<DialectExample>,
}

/// Immutable reference data, loaded once and shared by reference afterwards.
///
/// Dataset order is preserved: lookups that return several entries return
/// them in the order they were declared.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    roots: Vec<CharacterRoot>,
    vocabulary: Vec<Vocabulary>,
    dialects: Vec<DialectExample>,

    /// Index: root id -> position in `roots`.
    root_index: HashMap<RootId, usize>,

    /// Index: root character -> root id. First declaration wins.
    character_index: HashMap<char, RootId>,
}

impl ReferenceDataset {
    /// Load the dataset bundled with the crate.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_toml_str(BUILTIN_DATA)
    }

    /// Parse a dataset from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = toml::from_str(source)?;
        Self::from_parts(file.roots, file.vocabulary, file.dialects)
    }

    /// Read and parse a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Build a dataset from already constructed entries.
    ///
    /// Duplicate ids and zero difficulty/tier values are rejected. Entries
    /// pointing at a root that does not exist are kept but never returned
    /// by root lookups.
    pub fn from_parts(
        roots: Vec<CharacterRoot>,
        vocabulary: Vec<Vocabulary>,
        dialects: Vec<DialectExample>,
    ) -> Result<Self, DatasetError> {
        let mut root_index = HashMap::with_capacity(roots.len());
        let mut character_index = HashMap::with_capacity(roots.len());

        for (position, root) in roots.iter().enumerate() {
            if root_index.insert(root.id, position).is_some() {
                return Err(DatasetError::DuplicateRootId(root.id));
            }
            check_positive("root", root.id.0, "difficulty", root.difficulty)?;
            check_positive("root", root.id.0, "tier", root.tier)?;

            if let Some(existing) = character_index.get(&root.character) {
                warn!(
                    character = %root.character,
                    kept = %existing,
                    ignored = %root.id,
                    "root character declared twice, keeping the first"
                );
            } else {
                character_index.insert(root.character, root.id);
            }
        }

        let mut seen = HashSet::with_capacity(vocabulary.len());
        for word in &vocabulary {
            if !seen.insert(word.id) {
                return Err(DatasetError::DuplicateVocabularyId(word.id));
            }
            check_positive("vocabulary", word.id.0, "difficulty", word.difficulty)?;
            if !root_index.contains_key(&word.root_id) {
                warn!(
                    vocabulary = %word.id,
                    root = %word.root_id,
                    "vocabulary references unknown root"
                );
            }
            if !word.language.is_supported() {
                debug!(
                    vocabulary = %word.id,
                    language = %word.language,
                    "unsupported language tag"
                );
            }
        }

        let mut seen = HashSet::with_capacity(dialects.len());
        for example in &dialects {
            if !seen.insert(example.id) {
                return Err(DatasetError::DuplicateDialectId(example.id));
            }
            if !root_index.contains_key(&example.root_id) {
                warn!(
                    dialect = %example.id,
                    root = %example.root_id,
                    "dialect example references unknown root"
                );
            }
        }

        debug!(
            roots = roots.len(),
            vocabulary = vocabulary.len(),
            dialects = dialects.len(),
            "reference dataset loaded"
        );

        Ok(Self {
            roots,
            vocabulary,
            dialects,
            root_index,
            character_index,
        })
    }

    /// All roots in dataset order.
    pub fn roots(&self) -> &[CharacterRoot] {
        &self.roots
    }

    /// All vocabulary in dataset order.
    pub fn vocabulary(&self) -> &[Vocabulary] {
        &self.vocabulary
    }

    /// All dialect examples in dataset order.
    pub fn dialects(&self) -> &[DialectExample] {
        &self.dialects
    }

    /// Get a root by ID.
    pub fn root(&self, id: RootId) -> Option<&CharacterRoot> {
        self.root_index.get(&id).map(|&position| &self.roots[position])
    }

    /// Get the root written with `character`, if it is a known root.
    pub fn root_by_character(&self, character: char) -> Option<&CharacterRoot> {
        self.character_index
            .get(&character)
            .and_then(|id| self.root(*id))
    }

    /// All words borrowing the given root.
    pub fn vocabulary_for_root(&self, root_id: RootId) -> Vec<&Vocabulary> {
        self.vocabulary
            .iter()
            .filter(|word| word.belongs_to(root_id))
            .collect()
    }

    /// Words borrowing the given root in one language.
    pub fn vocabulary_for_root_in(
        &self,
        root_id: RootId,
        language: &Language,
    ) -> Vec<&Vocabulary> {
        self.vocabulary
            .iter()
            .filter(|word| word.belongs_to(root_id) && &word.language == language)
            .collect()
    }

    /// All words of one language.
    pub fn vocabulary_in(&self, language: &Language) -> Vec<&Vocabulary> {
        self.vocabulary
            .iter()
            .filter(|word| &word.language == language)
            .collect()
    }

    /// Dialect examples for a root, in dataset order.
    pub fn dialects_for_root(&self, root_id: RootId) -> Vec<&DialectExample> {
        self.dialects
            .iter()
            .filter(|example| example.root_id == root_id)
            .collect()
    }

    /// The first dialect example declared for a root.
    pub fn first_dialect_for_root(&self, root_id: RootId) -> Option<&DialectExample> {
        self.dialects.iter().find(|example| example.root_id == root_id)
    }
}

fn check_positive(
    kind: &'static str,
    id: i64,
    field: &'static str,
    value: u8,
) -> Result<(), DatasetError> {
    if value == 0 {
        return Err(DatasetError::InvalidLevel {
            kind,
            id,
            field,
            value,
        });
    }
    Ok(())
}
