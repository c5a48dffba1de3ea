use super::*;

#[test]
fn defaults_match_landscape_job() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.canvas, Canvas::HD);
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.zoom_ratio, 0.06);
    assert_eq!(cfg.fade_secs, 0.2);
    assert_eq!(cfg.music_gain, 0.18);
    assert!(cfg.music_enabled);
    cfg.validate().unwrap();
}

#[test]
fn validation_catches_bad_values() {
    let bad = [
        RenderConfig {
            canvas: Canvas {
                width: 0,
                height: 10,
            },
            ..RenderConfig::default()
        },
        RenderConfig {
            canvas: Canvas {
                width: 11,
                height: 10,
            },
            ..RenderConfig::default()
        },
        RenderConfig {
            fps: 0,
            ..RenderConfig::default()
        },
        RenderConfig {
            zoom_ratio: -0.1,
            ..RenderConfig::default()
        },
        RenderConfig {
            zoom_ratio: f64::NAN,
            ..RenderConfig::default()
        },
        RenderConfig {
            fade_secs: -1.0,
            ..RenderConfig::default()
        },
        RenderConfig {
            music_gain: f32::INFINITY,
            ..RenderConfig::default()
        },
        RenderConfig {
            sample_rate: 0,
            ..RenderConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(SlidecastError::InvalidInput(_))),
            "expected rejection for {cfg:?}"
        );
    }
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: RenderConfig =
        serde_json::from_str(r#"{ "zoom_ratio": 0.08, "canvas": { "width": 1280, "height": 720 } }"#)
            .unwrap();
    assert_eq!(cfg.zoom_ratio, 0.08);
    assert_eq!(cfg.canvas.width, 1280);
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.fade_secs, 0.2);
}

#[test]
fn config_file_roundtrip() {
    let dir = std::path::PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    let cfg = RenderConfig {
        fps: 24,
        music_enabled: false,
        ..RenderConfig::default()
    };
    std::fs::write(&path, serde_json::to_vec_pretty(&cfg).unwrap()).unwrap();
    assert_eq!(RenderConfig::from_json_file(&path).unwrap(), cfg);

    assert!(RenderConfig::from_json_file(&dir.join("missing.json")).is_err());
}

#[test]
fn category_tags_are_case_insensitive_with_default_fallback() {
    assert_eq!(ContentCategory::from_tag("Tech"), ContentCategory::Tech);
    assert_eq!(ContentCategory::from_tag(" AI "), ContentCategory::Ai);
    assert_eq!(ContentCategory::from_tag("gardening"), ContentCategory::Default);
    assert_eq!(ContentCategory::from_tag(""), ContentCategory::Default);
    for c in ContentCategory::ALL {
        assert_eq!(ContentCategory::from_tag(c.as_str()), c);
    }
}
