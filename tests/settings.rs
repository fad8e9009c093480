use std::fs;

use tempfile::tempdir;
use vector_canvas::draw::Color;
use vector_canvas::settings::CanvasSettings;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = CanvasSettings::load(dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, CanvasSettings::default());
}

#[test]
fn saved_settings_load_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = CanvasSettings {
        width: 64,
        height: 32,
        background: "#202020".into(),
        default_fill_color: Some("#00ff0080".into()),
        anti_aliasing: true,
        show_handles: true,
        log_file: Some(dir.path().join("canvas.log")),
        ..CanvasSettings::default()
    };
    settings.save(&path).unwrap();

    let loaded = CanvasSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.render_settings().background, Color::rgb(0x20, 0x20, 0x20));
    assert!(loaded.render_settings().show_handles);
    assert_eq!(loaded.shape_style().fill, Some(Color::rgba(0, 255, 0, 0x80)));
}

#[test]
fn broken_json_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ width: ").unwrap();

    let err = CanvasSettings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("settings.json"));
}
