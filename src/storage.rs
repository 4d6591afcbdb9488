use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// @module: Artifact storage keyed by run identifier

/// Identifier shared by every artifact of one pipeline run.
///
/// A single timestamp key ties the script, audio, animation source and video
/// of a run together, so artifacts are reconciled by identifier rather than by
/// time-proximity heuristics. Millisecond precision keeps back-to-back runs
/// from colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Create an identifier from the current local time
    pub fn now() -> Self {
        Self(Local::now().format("%Y%m%d_%H%M%S_%3f").to_string())
    }

    /// Wrap an existing identifier, e.g. one received from a caller
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of artifact a run produces, one directory per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Narration script text
    Script,
    /// Synthesized narration audio
    Audio,
    /// Generated animation source code
    AnimationSource,
    /// Rendered video
    Video,
}

impl ArtifactKind {
    // @returns: Directory name for this kind
    fn dir_name(self) -> &'static str {
        match self {
            Self::Script => "scripts",
            Self::Audio => "audio",
            Self::AnimationSource => "code",
            Self::Video => "videos",
        }
    }

    // @returns: File extension for this kind
    fn extension(self) -> &'static str {
        match self {
            Self::Script => "txt",
            Self::Audio => "mp3",
            Self::AnimationSource => "py",
            Self::Video => "mp4",
        }
    }
}

/// Durable storage for run artifacts.
///
/// Directories are append-only by convention: every run writes new files under
/// its own RunId and no filename is ever reused, so no cross-run locking is
/// needed.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root`, creating the per-kind directories
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let store = Self {
            root: root.as_ref().to_path_buf(),
        };
        store.ensure_directories()?;
        Ok(store)
    }

    // @creates: Per-kind directories if missing
    fn ensure_directories(&self) -> Result<()> {
        for kind in [
            ArtifactKind::Script,
            ArtifactKind::Audio,
            ArtifactKind::AnimationSource,
            ArtifactKind::Video,
        ] {
            let dir = self.root.join(kind.dir_name());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create artifact directory {:?}", dir))?;
        }
        Ok(())
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an artifact of `kind` for `run_id` lives at
    pub fn path_for(&self, kind: ArtifactKind, run_id: &RunId) -> PathBuf {
        self.root
            .join(kind.dir_name())
            .join(format!("{}.{}", run_id, kind.extension()))
    }

    /// Persist artifact bytes, returning the written path
    pub fn save(&self, kind: ArtifactKind, run_id: &RunId, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(kind, run_id);
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write artifact {:?}", path))?;
        Ok(path)
    }

    /// Persist a text artifact, returning the written path
    pub fn save_text(&self, kind: ArtifactKind, run_id: &RunId, text: &str) -> Result<PathBuf> {
        self.save(kind, run_id, text.as_bytes())
    }

    /// Read an artifact back as bytes
    pub fn read(&self, kind: ArtifactKind, run_id: &RunId) -> Result<Vec<u8>> {
        let path = self.path_for(kind, run_id);
        if !path.is_file() {
            return Err(anyhow!("No {:?} artifact for run {}", kind, run_id));
        }
        fs::read(&path).with_context(|| format!("Failed to read artifact {:?}", path))
    }

    /// Read a text artifact back as a string
    pub fn read_text(&self, kind: ArtifactKind, run_id: &RunId) -> Result<String> {
        let bytes = self.read(kind, run_id)?;
        String::from_utf8(bytes).map_err(|e| anyhow!("Artifact is not valid UTF-8: {}", e))
    }

    /// Whether an artifact exists for the run
    pub fn exists(&self, kind: ArtifactKind, run_id: &RunId) -> bool {
        self.path_for(kind, run_id).is_file()
    }
}
