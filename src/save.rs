//! Saving a drawing to a file and opening it again.
//!
//! The actual writing goes through a [`FileSink`], and raster formats go
//! through a [`RasterEncoder`] supplied by the platform. Only SVG is produced
//! by this crate itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drawing::Drawing;
use crate::error::{OpenError, SaveError};
use crate::settings::Settings;
use crate::svg;
use crate::util::time;

/// Folder created under the storage root when no folder was picked yet
pub const APP_FOLDER: &str = "Simple Draw";

/// Quality handed to the encoder for JPG output
pub const JPEG_QUALITY: u8 = 70;

/// Characters that may not appear in a file name
const ILLEGAL_FILENAME_CHARS: &[char] = &[
    '/', '\n', '\r', '\t', '\0', '`', '?', '*', '\\', '<', '>', '|', '"', ':',
];

/// Output format offered by the save flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }

    /// Guess the format from a file extension, case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Vector output keeps the strokes, raster output only keeps pixels
    pub fn is_vector(self) -> bool {
        matches!(self, ImageFormat::Svg)
    }
}

/// Folder used when the user has not picked one yet
pub fn default_folder(storage_root: &Path) -> PathBuf {
    storage_root.join(APP_FOLDER)
}

/// File name suggested for a new save, e.g. `image_1760781600`
pub fn default_filename() -> String {
    format!("image_{}", time::timestamp_secs())
}

/// Returns true if `name` can be used as a file name on every storage backend
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains(ILLEGAL_FILENAME_CHARS)
}

/// Where and how a drawing should be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub folder: PathBuf,
    /// File name without extension
    pub filename: String,
    pub format: ImageFormat,
}

impl SaveRequest {
    pub fn new(folder: impl Into<PathBuf>, filename: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            format,
        }
    }

    /// Pre-fill a request with what was used for the previous save
    pub fn from_settings(settings: &Settings, storage_root: &Path) -> Self {
        let folder = settings
            .last_save_folder
            .clone()
            .unwrap_or_else(|| default_folder(storage_root));
        let filename = if settings.last_save_filename.is_empty() {
            default_filename()
        } else {
            settings.last_save_filename.clone()
        };
        Self::new(folder, filename, settings.last_save_format)
    }

    /// Validate the file name and resolve the full target path
    pub fn target_path(&self) -> Result<PathBuf, SaveError> {
        let filename = self.filename.trim();
        if filename.is_empty() {
            return Err(SaveError::EmptyFilename);
        }

        let full_name = format!("{}.{}", filename, self.format.extension());
        if !is_valid_filename(&full_name) {
            return Err(SaveError::InvalidFilename(full_name));
        }
        Ok(self.folder.join(full_name))
    }
}

/// Destination for encoded bytes, e.g. direct file access or a
/// platform document handle
pub trait FileSink {
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// Writes straight to the local file system, creating the folder if needed
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl FileSink for FsSink {
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }
}

/// Platform image codec used for PNG and JPG output
pub trait RasterEncoder {
    fn encode(&self, drawing: &Drawing, format: ImageFormat, quality: u8) -> Result<Vec<u8>, String>;
}

/// Encode `drawing` in the requested format and hand it to `sink`.
///
/// Returns the path that was written.
pub fn save_drawing(
    drawing: &Drawing,
    request: &SaveRequest,
    sink: &mut dyn FileSink,
    raster: Option<&dyn RasterEncoder>,
) -> Result<PathBuf, SaveError> {
    let path = request.target_path()?;

    let bytes = match request.format {
        ImageFormat::Svg => svg::serialize(drawing),
        format => {
            let encoder = raster.ok_or(SaveError::UnsupportedFormat(format))?;
            let quality = if format == ImageFormat::Jpg { JPEG_QUALITY } else { 100 };
            encoder
                .encode(drawing, format, quality)
                .map_err(SaveError::Encode)?
        }
    };

    sink.write_file(&path, &bytes)?;
    log::info!("Saved drawing to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Read and parse a previously exported SVG file
pub fn open_drawing(path: &Path) -> Result<Drawing, OpenError> {
    let bytes = fs::read(path)?;
    let drawing = svg::parse(&bytes)?;
    log::info!("Opened {} with {} strokes", path.display(), drawing.len());
    Ok(drawing)
}
