use super::*;

#[test]
fn empty_object_is_all_defaults() {
    let cfg = PhotoFrameConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, PhotoFrameConfig::default());
    assert_eq!(cfg.frame, Frame::square(400));
    assert_eq!(cfg.export_file_name, "framed_image.png");
    assert_eq!(cfg.overlay.as_deref(), Some(Path::new("logo.png")));
    cfg.validate().unwrap();
}

#[test]
fn fields_override_defaults() {
    let json = r#"{
        "frame": { "width": 256, "height": 256 },
        "overlay": null,
        "export_file_name": "out.PNG",
        "zoom": { "max": 5.0 },
        "sampling": "nearest",
        "background": [255, 255, 255, 255],
        "logging": { "level": "debug" }
    }"#;
    let cfg = PhotoFrameConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.frame, Frame::square(256));
    assert!(cfg.overlay.is_none());
    assert_eq!(cfg.zoom.max, 5.0);
    assert_eq!(cfg.zoom.min, 0.1);
    assert_eq!(cfg.sampling, Sampling::Nearest);
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.logging.json);

    let c = cfg.compositor().unwrap();
    assert_eq!(c.frame(), Frame::square(256));
    assert_eq!(c.sampling(), Sampling::Nearest);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PhotoFrameConfig::from_reader(r#"{ "fram": {} }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, FrameError::Serde(_)));
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = PhotoFrameConfig::default();
    cfg.export_file_name = "framed.jpg".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = PhotoFrameConfig::default();
    cfg.export_file_name = "../framed.png".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = PhotoFrameConfig::default();
    cfg.frame = Frame::square(0);
    assert!(cfg.validate().is_err());

    let mut cfg = PhotoFrameConfig::default();
    cfg.zoom.min = 2.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn relative_overlay_resolves_against_config_dir() {
    let dir = std::path::PathBuf::from("target").join("config_settings_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("photoframe.json");
    std::fs::write(&path, r#"{ "overlay": "art/logo.png" }"#).unwrap();

    let cfg = PhotoFrameConfig::from_path(&path).unwrap();
    assert_eq!(cfg.overlay, Some(dir.join("art/logo.png")));

    let mut abs = PhotoFrameConfig::default();
    let absolute = std::env::temp_dir().join("logo.png");
    abs.overlay = Some(absolute.clone());
    abs.resolve_paths(&dir);
    assert_eq!(abs.overlay, Some(absolute));
}

#[test]
fn missing_config_file_is_a_validation_error() {
    let err = PhotoFrameConfig::from_path("target/nope/photoframe.json").unwrap_err();
    assert!(matches!(err, FrameError::Validation(_)));
}
