use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::drawing::Drawing;
use crate::error::{PersistenceError, PersistenceResult};
use crate::save::{ImageFormat, SaveRequest};
use crate::stroke::StrokeBuilder;

/// User preferences that outlive a canvas session.
///
/// We derive Deserialize/Serialize so settings can be stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct Settings {
    pub brush_color: Color32,
    pub stroke_width: f32,
    pub background_color: Color32,
    /// Show a preview of the brush size next to the width slider
    pub show_brush_size: bool,
    pub is_first_run: bool,

    // Remembered by the save flow
    pub last_save_folder: Option<PathBuf>,
    pub last_save_format: ImageFormat,
    pub last_save_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brush_color: Color32::BLACK,
            stroke_width: 5.0,
            background_color: Color32::WHITE,
            show_brush_size: false,
            is_first_run: true,
            last_save_folder: None,
            last_save_format: ImageFormat::Png,
            last_save_filename: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if the file doesn't exist yet
    pub fn load(path: &Path) -> PersistenceResult<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .map_err(|e| PersistenceError::ReadError(e.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Empty canvas painted in the configured background color
    pub fn new_drawing(&self, width: u32, height: u32) -> Drawing {
        Drawing::with_background(width, height, self.background_color)
    }

    /// Start a new gesture with the current brush.
    ///
    /// Erasing uses the background color so the in-progress preview already
    /// looks like the final overlay.
    pub fn stroke_builder(&self, erase: bool) -> StrokeBuilder {
        let color = if erase {
            self.background_color
        } else {
            self.brush_color
        };
        StrokeBuilder::new(color, self.stroke_width).erasing(erase)
    }

    /// Remember where the last save went so the next save dialog starts there
    pub fn remember_save(&mut self, request: &SaveRequest) {
        self.last_save_folder = Some(request.folder.clone());
        self.last_save_format = request.format;
        self.last_save_filename = request.filename.trim().to_owned();
    }
}
