//! Gap classification
//!
//! Every claim falls into exactly one gap class: the first declared class
//! listing it (after alias resolution), or the registry's default class.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::TallyError;

fn default_class() -> String {
    "reduced".to_string()
}

/// One gap class and the claims assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapClass {
    /// Class name, e.g. `closed` or `import`
    pub name: String,

    /// What the class means
    #[serde(default)]
    pub description: String,

    /// Canonical claim ids in the class
    #[serde(default)]
    pub claims: Vec<String>,
}

impl GapClass {
    /// Create a class
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            claims: claims.into_iter().map(Into::into).collect(),
        }
    }
}

/// Audit note for a single claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapNote {
    /// Canonical claim id
    pub claim: String,

    /// What the claim is anchored on
    #[serde(default)]
    pub anchor: String,

    /// What is still missing
    #[serde(default)]
    pub gap: String,

    /// What would close the gap
    #[serde(default)]
    pub to_close: String,
}

/// Configured mapping from claim ids to gap classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRegistry {
    /// Class for claims listed nowhere
    #[serde(default = "default_class")]
    pub default_class: String,

    /// Default class description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_description: String,

    /// Declared classes, in precedence and report order
    #[serde(default)]
    pub classes: Vec<GapClass>,

    /// Alternate spellings mapped to canonical claim ids
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Per-claim audit notes
    #[serde(default)]
    pub notes: Vec<GapNote>,
}

impl Default for GapRegistry {
    fn default() -> Self {
        Self {
            default_class: default_class(),
            default_description: String::new(),
            classes: Vec::new(),
            aliases: BTreeMap::new(),
            notes: Vec::new(),
        }
    }
}

impl GapRegistry {
    /// Add a class after the existing ones
    pub fn with_class(mut self, class: GapClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Add an alias
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Add an audit note
    pub fn with_note(mut self, note: GapNote) -> Self {
        self.notes.push(note);
        self
    }

    /// Canonical form of a claim id
    pub fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Gap class of a claim
    pub fn classify(&self, id: &str) -> &str {
        let canonical = self.canonical(id);
        self.classes
            .iter()
            .find(|class| class.claims.iter().any(|claim| claim == canonical))
            .map(|class| class.name.as_str())
            .unwrap_or(self.default_class.as_str())
    }

    /// Class names in report order, default class included
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.iter().map(|class| class.name.as_str()).collect();
        if !names.contains(&self.default_class.as_str()) {
            names.push(self.default_class.as_str());
        }
        names
    }

    /// Description of a class
    pub fn describe(&self, class: &str) -> Option<&str> {
        self.classes
            .iter()
            .find(|declared| declared.name == class)
            .map(|declared| declared.description.as_str())
            .or_else(|| {
                (class == self.default_class && !self.default_description.is_empty())
                    .then_some(self.default_description.as_str())
            })
    }

    /// Audit note for a claim
    pub fn note(&self, id: &str) -> Option<&GapNote> {
        let canonical = self.canonical(id);
        self.notes.iter().find(|note| note.claim == canonical)
    }

    /// Validate the registry
    pub fn validate(&self) -> Result<(), TallyError> {
        if self.default_class.trim().is_empty() {
            return Err(TallyError::Config(
                "default gap class must not be empty".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for class in &self.classes {
            if class.name.trim().is_empty() {
                return Err(TallyError::Config("gap class name must not be empty".to_string()));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(TallyError::DuplicateGapClass(class.name.clone()));
            }
        }
        Ok(())
    }
}
