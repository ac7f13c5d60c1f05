//! File-backed stages

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vouch_domain::{ClaimRecord, ClaimSource};

use crate::error::IntakeError;
use crate::parser::parse_stage;

/// A stage read from a JSON file
///
/// # Examples
///
/// ```
/// use vouch_intake::FileStage;
///
/// let stage = FileStage::new("bank", "stages/bank.json").optional();
/// assert!(stage.optional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStage {
    /// Stage name used in logs and diagnostics
    pub name: String,

    /// Path to the stage document
    pub path: PathBuf,

    /// Whether a failure drops the stage instead of aborting
    #[serde(default)]
    pub optional: bool,
}

impl FileStage {
    /// Create a required stage
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            optional: false,
        }
    }

    /// Create a required stage named after its file stem
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }

    /// Mark the stage optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Resolve a relative path against a base directory
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        self
    }
}

impl ClaimSource for FileStage {
    type Error = IntakeError;

    fn name(&self) -> &str {
        &self.name
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn produce(&self) -> Result<Vec<ClaimRecord>, IntakeError> {
        debug!(stage = %self.name, path = %self.path.display(), "Reading stage");
        let json = std::fs::read_to_string(&self.path).map_err(|source| IntakeError::Read {
            stage: self.name.clone(),
            path: self.path.clone(),
            source,
        })?;
        parse_stage(&self.name, &json)
    }
}
