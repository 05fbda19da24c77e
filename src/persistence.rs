use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::drawing::Drawing;
use crate::error::{PersistenceError, PersistenceResult};
use crate::util::time;

const AUTOSAVE_PREFIX: &str = "autosave_";

/// Represents a snapshot of the canvas session that can be serialized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The drawing on the canvas
    pub drawing: Drawing,
    /// Timestamp of when the snapshot was taken
    pub timestamp: u64,
    /// Version of the application when the snapshot was taken
    pub version: String,
}

impl SessionSnapshot {
    /// Create a new snapshot of the given drawing
    pub fn new(drawing: &Drawing) -> Self {
        Self {
            drawing: drawing.clone(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Turn the snapshot back into a drawing, re-checking every stroke
    pub fn restore(self) -> PersistenceResult<Drawing> {
        if self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        self.drawing
            .validate()
            .map_err(|e| PersistenceError::InvalidState(e.to_string()))?;
        if self.drawing.width() == 0 || self.drawing.height() == 0 {
            return Err(PersistenceError::InvalidState(
                "canvas size must be positive".to_owned(),
            ));
        }
        Ok(self.drawing)
    }
}

/// Keeps the canvas session on disk so it survives a restart
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Directory where snapshot files are stored
    state_dir: PathBuf,
    /// Maximum number of auto-save files to keep
    max_autosaves: usize,
    /// Interval between auto-saves in seconds
    autosave_interval: u64,
    /// Last auto-save timestamp
    last_autosave: u64,
    /// Autosaves written by this store, keeps names unique within one second
    autosave_count: u32,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            max_autosaves: 5,
            autosave_interval: 300, // 5 minutes
            last_autosave: 0,
            autosave_count: 0,
        }
    }

    pub fn with_max_autosaves(mut self, max_autosaves: usize) -> Self {
        self.max_autosaves = max_autosaves;
        self
    }

    pub fn with_autosave_interval(mut self, seconds: u64) -> Self {
        self.autosave_interval = seconds;
        self
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.state_dir.join(format!("{name}.json"))
    }

    /// Save a snapshot of the drawing under `name`
    pub fn save_snapshot(&self, drawing: &Drawing, name: &str) -> PersistenceResult<()> {
        let snapshot = SessionSnapshot::new(drawing);

        // Create state directory if it doesn't exist
        fs::create_dir_all(&self.state_dir)?;

        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(self.snapshot_path(name), json)?;

        Ok(())
    }

    /// Load a snapshot by name
    pub fn load_snapshot(&self, name: &str) -> PersistenceResult<SessionSnapshot> {
        let json = fs::read_to_string(self.snapshot_path(name))
            .map_err(|e| PersistenceError::ReadError(e.to_string()))?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Load and validate the drawing stored under `name`
    pub fn restore(&self, name: &str) -> PersistenceResult<Drawing> {
        self.load_snapshot(name)?.restore()
    }

    /// Check if we should auto-save based on the interval
    pub fn should_autosave(&self) -> bool {
        let now = time::timestamp_secs();
        now.saturating_sub(self.last_autosave) >= self.autosave_interval
    }

    /// Perform auto-save if needed. Returns true if a snapshot was written.
    pub fn try_autosave(&mut self, drawing: &Drawing) -> PersistenceResult<bool> {
        if !self.should_autosave() {
            return Ok(false);
        }
        let now = time::timestamp_secs();

        // Save with timestamp
        let name = format!("{AUTOSAVE_PREFIX}{now}_{:04}", self.autosave_count);
        self.save_snapshot(drawing, &name)?;
        self.last_autosave = now;
        self.autosave_count += 1;
        log::info!("Autosaved drawing with {} strokes", drawing.len());

        self.cleanup_old_autosaves()?;
        Ok(true)
    }

    /// Auto-save files, oldest first
    fn autosaves(&self) -> PersistenceResult<Vec<(SystemTime, PathBuf)>> {
        if !self.state_dir.exists() {
            return Ok(Vec::new());
        }

        let mut autosaves: Vec<_> = fs::read_dir(&self.state_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(AUTOSAVE_PREFIX)
            })
            .map(|entry| {
                let modified = entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, entry.path())
            })
            .collect();

        // Sort by modification time, then name for snapshots written in the same instant
        autosaves.sort();
        Ok(autosaves)
    }

    /// Clean up old auto-save files
    fn cleanup_old_autosaves(&self) -> PersistenceResult<()> {
        let autosaves = self.autosaves()?;
        let excess = autosaves.len().saturating_sub(self.max_autosaves);

        // Remove oldest files if we have too many
        for (_, path) in autosaves.into_iter().take(excess) {
            fs::remove_file(&path)?;
            log::debug!("Removed old autosave {}", path.display());
        }

        Ok(())
    }

    /// Find the name of the most recent auto-save, if any
    pub fn find_latest_autosave(&self) -> PersistenceResult<Option<String>> {
        Ok(self.autosaves()?.pop().and_then(|(_, path)| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        }))
    }
}
