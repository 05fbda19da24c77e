use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use egui::{Color32, Pos2};
use simple_draw::error::{OpenError, SaveError};
use simple_draw::persistence::SessionStore;
use simple_draw::save::{self, default_folder, is_valid_filename};
use simple_draw::{
    Drawing, FileSink, FsSink, ImageFormat, RasterEncoder, SaveRequest, Settings, Stroke,
};

fn sample_drawing() -> Drawing {
    let mut drawing = Drawing::new(200, 100);
    drawing
        .append_stroke(Stroke::line(
            vec![Pos2::new(1.0, 2.0), Pos2::new(3.0, 4.0)],
            Color32::RED,
            5.0,
        ))
        .unwrap();
    drawing
}

/// Keeps written files in memory
#[derive(Default)]
struct MemorySink {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl FileSink for MemorySink {
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

/// Records what it was asked to encode
#[derive(Default)]
struct FakeEncoder {
    calls: RefCell<Vec<(ImageFormat, u8)>>,
}

impl RasterEncoder for FakeEncoder {
    fn encode(&self, _drawing: &Drawing, format: ImageFormat, quality: u8) -> Result<Vec<u8>, String> {
        self.calls.borrow_mut().push((format, quality));
        Ok(vec![1, 2, 3])
    }
}

#[test]
fn test_filename_validation() {
    let request = SaveRequest::new("/tmp", "   ", ImageFormat::Png);
    assert!(matches!(request.target_path(), Err(SaveError::EmptyFilename)));

    let request = SaveRequest::new("/tmp", "what?", ImageFormat::Png);
    assert!(matches!(request.target_path(), Err(SaveError::InvalidFilename(_))));

    let request = SaveRequest::new("/tmp/art", "sketch", ImageFormat::Jpg);
    assert_eq!(request.target_path().unwrap(), PathBuf::from("/tmp/art/sketch.jpg"));

    assert!(is_valid_filename("image_1.png"));
    assert!(!is_valid_filename("a/b.png"));
    assert!(!is_valid_filename(""));
}

#[test]
fn test_format_extensions() {
    assert_eq!(ImageFormat::Svg.extension(), "svg");
    assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpg));
    assert_eq!(ImageFormat::from_path(Path::new("x/y.png")), Some(ImageFormat::Png));
    assert_eq!(ImageFormat::from_extension("gif"), None);
    assert!(ImageFormat::Svg.is_vector());
    assert!(!ImageFormat::Png.is_vector());
}

#[test]
fn test_svg_save_goes_through_sink() {
    let drawing = sample_drawing();
    let mut sink = MemorySink::default();
    let request = SaveRequest::new("/sdcard/Simple Draw", "doodle", ImageFormat::Svg);

    let path = save::save_drawing(&drawing, &request, &mut sink, None).unwrap();

    assert_eq!(path, PathBuf::from("/sdcard/Simple Draw/doodle.svg"));
    let bytes = &sink.files[&path];
    assert_eq!(simple_draw::svg::parse(bytes).unwrap(), drawing);
}

#[test]
fn test_raster_save_is_delegated() {
    let drawing = sample_drawing();
    let mut sink = MemorySink::default();
    let encoder = FakeEncoder::default();

    let request = SaveRequest::new("/pics", "photo", ImageFormat::Jpg);
    let path = save::save_drawing(&drawing, &request, &mut sink, Some(&encoder)).unwrap();

    assert_eq!(sink.files[&path], vec![1, 2, 3]);
    assert_eq!(
        encoder.calls.borrow().as_slice(),
        &[(ImageFormat::Jpg, save::JPEG_QUALITY)]
    );
}

#[test]
fn test_raster_save_without_encoder_fails() {
    let mut sink = MemorySink::default();
    let request = SaveRequest::new("/pics", "photo", ImageFormat::Png);

    let result = save::save_drawing(&sample_drawing(), &request, &mut sink, None);

    assert!(matches!(result, Err(SaveError::UnsupportedFormat(ImageFormat::Png))));
    assert!(sink.files.is_empty());
}

#[test]
fn test_save_and_open_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let drawing = sample_drawing();
    let request = SaveRequest::new(dir.path().join("nested"), "drawing", ImageFormat::Svg);

    let path = save::save_drawing(&drawing, &request, &mut FsSink, None).unwrap();
    assert!(path.exists());

    let opened = save::open_drawing(&path).unwrap();
    assert_eq!(opened, drawing);
}

#[test]
fn test_open_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.svg");
    assert!(matches!(save::open_drawing(&missing), Err(OpenError::Io(_))));

    let broken = dir.path().join("broken.svg");
    std::fs::write(&broken, "<svg width=\"10\">").unwrap();
    assert!(matches!(save::open_drawing(&broken), Err(OpenError::Malformed(_))));
}

#[test]
fn test_settings_defaults_and_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("settings.json");

    let mut settings = Settings::load(&path).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.brush_color, Color32::BLACK);
    assert_eq!(settings.stroke_width, 5.0);
    assert_eq!(settings.background_color, Color32::WHITE);

    settings.brush_color = Color32::BLUE;
    settings.show_brush_size = true;
    settings.remember_save(&SaveRequest::new("/art", " sunset ", ImageFormat::Svg));
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.last_save_filename, "sunset");

    let request = SaveRequest::from_settings(&loaded, Path::new("/storage"));
    assert_eq!(request.folder, PathBuf::from("/art"));
    assert_eq!(request.format, ImageFormat::Svg);
    assert_eq!(request.filename, "sunset");
}

#[test]
fn test_settings_missing_fields_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "stroke_width": 12.0 }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.stroke_width, 12.0);
    assert_eq!(settings.brush_color, Color32::BLACK);
}

#[test]
fn test_default_save_request() {
    let request = SaveRequest::from_settings(&Settings::default(), Path::new("/storage"));
    assert_eq!(request.folder, default_folder(Path::new("/storage")));
    assert_eq!(request.folder, PathBuf::from("/storage/Simple Draw"));
    assert!(request.filename.starts_with("image_"));
    assert_eq!(request.format, ImageFormat::Png);
}

#[test]
fn test_settings_stroke_builder() {
    let settings = Settings {
        brush_color: Color32::RED,
        stroke_width: 8.0,
        ..Settings::default()
    };

    let mut brush = settings.stroke_builder(false);
    brush.add_point(Pos2::new(1.0, 1.0));
    let stroke = brush.finish().unwrap();
    assert_eq!(stroke.color(), Color32::RED);
    assert_eq!(stroke.width(), 8.0);

    let mut eraser = settings.stroke_builder(true);
    eraser.add_point(Pos2::new(1.0, 1.0));
    let stroke = eraser.finish().unwrap();
    assert!(stroke.is_erase());
    assert_eq!(stroke.color(), Color32::WHITE);
}

#[test]
fn test_settings_background_reaches_new_drawing() {
    let settings = Settings {
        background_color: Color32::from_rgb(20, 30, 40),
        ..Settings::default()
    };

    let drawing = settings.new_drawing(300, 200);
    assert_eq!(drawing.size(), [300, 200]);
    assert_eq!(drawing.background(), Color32::from_rgb(20, 30, 40));
    assert!(drawing.is_empty());

    // Erase overlays are exported in the same color
    let svg = simple_draw::svg::to_string(&drawing);
    assert!(svg.contains("background-color:#141e28ff"));
}

#[test]
fn test_session_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let drawing = sample_drawing();

    store.save_snapshot(&drawing, "last_session").unwrap();

    assert_eq!(store.restore("last_session").unwrap(), drawing);
    assert!(store.load_snapshot("nope").is_err());
}

#[test]
fn test_autosave_keeps_latest() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new(dir.path())
        .with_autosave_interval(0)
        .with_max_autosaves(2);
    assert_eq!(store.find_latest_autosave().unwrap(), None);

    let mut drawing = Drawing::new(50, 50);
    for i in 0..3 {
        drawing
            .append_stroke(Stroke::line(vec![Pos2::new(i as f32, 0.0)], Color32::BLACK, 1.0))
            .unwrap();
        assert!(store.try_autosave(&drawing).unwrap());
    }

    let autosaves = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(autosaves, 2);

    let latest = store.find_latest_autosave().unwrap().unwrap();
    assert_eq!(store.restore(&latest).unwrap().len(), 3);
}

#[test]
fn test_autosave_respects_interval() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new(dir.path()).with_autosave_interval(3600);

    assert!(store.try_autosave(&sample_drawing()).unwrap());
    assert!(!store.try_autosave(&sample_drawing()).unwrap());
}

#[test]
fn test_restore_rejects_tampered_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let mut drawing = Drawing::new(10, 10);
    drawing
        .append_stroke(Stroke::line(vec![Pos2::new(1.0, 1.0)], Color32::BLACK, 1.0))
        .unwrap();
    store.save_snapshot(&drawing, "snap").unwrap();

    // Corrupt the stroke width on disk
    let path = dir.path().join("snap.json");
    let json = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, json.replace("\"width\": 1.0", "\"width\": -1.0")).unwrap();

    assert!(store.restore("snap").is_err());
}
