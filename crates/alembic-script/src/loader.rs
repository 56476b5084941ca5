//! RON script loader

use crate::error::{Error, Result};
use crate::schema::{ReactionDef, ReactionDefs};
use alembic_core::{ReactionDefinition, ReactionId};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loaded reaction definitions, keyed by id
#[derive(Debug, Default)]
pub struct Reactions {
    definitions: BTreeMap<ReactionId, ReactionDefinition>,
}

impl Reactions {
    /// Get a reaction definition
    pub fn get(&self, id: &ReactionId) -> Option<&ReactionDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &ReactionDefinition> {
        self.definitions.values()
    }
}

impl IntoIterator for Reactions {
    type Item = ReactionDefinition;
    type IntoIter = std::collections::btree_map::IntoValues<ReactionId, ReactionDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.into_values()
    }
}

/// Loader for RON reaction scripts
///
/// A file holds either a list, `(reactions: [...])`, or a single reaction.
/// Files are read as a list first and fall back to a single reaction when
/// there is no `reactions` field.
/// Every definition is validated as it is loaded; ids must be unique across
/// everything one loader sees.
pub struct Loader {
    reactions: Reactions,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            reactions: Reactions::default(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading reaction script");

        match ron::from_str::<ReactionDefs>(&content) {
            Ok(file) => self.insert_all(&file.reactions),
            Err(e) if lacks_reaction_list(&e) => self.load_single_str(&content),
            Err(e) => Err(e.into()),
        }
    }

    /// Load a list of reactions from a RON string
    ///
    /// Nothing is inserted unless every definition builds and every id is new.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: ReactionDefs = ron::from_str(content)?;
        self.insert_all(&file.reactions)
    }

    /// Load one reaction from a RON string
    pub fn load_single_str(&mut self, content: &str) -> Result<()> {
        let def: ReactionDef = ron::from_str(content)?;
        self.insert(def.build()?)
    }

    /// Load all RON files from a directory, recursing into subdirectories
    ///
    /// Entries are visited in name order so duplicate errors are reproducible.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> Reactions {
        self.reactions
    }

    /// Get the current definitions (for inspection during loading)
    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    fn insert_all(&mut self, defs: &[ReactionDef]) -> Result<()> {
        let built = defs
            .iter()
            .map(ReactionDef::build)
            .collect::<Result<Vec<_>>>()?;

        {
            let mut seen = HashSet::new();
            for definition in &built {
                let id = definition.id();
                if self.reactions.definitions.contains_key(id) || !seen.insert(id) {
                    return Err(Error::DuplicateDefinition(id.to_string()));
                }
            }
        }

        for definition in built {
            self.insert(definition)?;
        }
        Ok(())
    }

    fn insert(&mut self, definition: ReactionDefinition) -> Result<()> {
        let id = definition.id().clone();
        if self.reactions.definitions.contains_key(&id) {
            return Err(Error::DuplicateDefinition(id.to_string()));
        }
        debug!(
            reaction = %id,
            preconditions = definition.preconditions().len(),
            modifiers = definition.modifiers().len(),
            "reaction loaded"
        );
        self.reactions.definitions.insert(id, definition);
        Ok(())
    }
}

/// A single-reaction file parsed as a list fails only on the missing field
fn lacks_reaction_list(err: &ron::error::SpannedError) -> bool {
    matches!(
        err.code,
        ron::error::Error::MissingStructField {
            field: "reactions",
            ..
        }
    )
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
