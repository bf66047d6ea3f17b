mod common;

use common::*;
use defectscan::output::{DetectionReport, prepare_output_dir, save_views};
use tempfile::TempDir;

#[test]
fn prepare_output_dir_creates_missing_directory() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let out = temp.path().join("runs").join("first");

    prepare_output_dir(&out)?;
    assert!(out.is_dir());
    // Still empty, so preparing again is fine
    prepare_output_dir(&out)?;
    Ok(())
}

#[test]
fn prepare_output_dir_rejects_non_empty_directory() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    std::fs::write(temp.path().join("old.png"), b"x")?;

    let err = prepare_output_dir(temp.path()).unwrap_err();
    assert!(err.to_string().contains("not empty"), "{err}");
    Ok(())
}

#[test]
fn save_views_writes_three_pngs() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let original = dark_square_on_sheet();
    let detection = detect_defects(&original, &DetectionMode::Otsu);

    let paths = save_views(temp.path(), "scratches_a", &original, &detection)?;
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "scratches_a_original.png",
            "scratches_a_boxes.png",
            "scratches_a_mask.png"
        ]
    );

    let boxes = image::open(&paths[1])?.to_rgb8();
    assert_eq!(boxes, detection.annotated);
    let mask = image::open(&paths[2])?.to_luma8();
    assert_eq!(mask, detection.mask);
    Ok(())
}

#[test]
fn report_serializes_mode_and_counts() -> anyhow::Result<()> {
    let original = dark_square_on_sheet();
    let mode = DetectionMode::Otsu;
    let detection = detect_defects(&original, &mode);

    let report = DetectionReport::new("scratches/a.png", mode, &detection);
    let json: serde_json::Value = serde_json::to_value(&report)?;

    assert_eq!(json["image"], "scratches/a.png");
    assert_eq!(json["mode"], "otsu");
    assert_eq!(json["width"], 100);
    assert_eq!(json["region_count"], 1);
    assert_eq!(json["drawn_count"], 1);
    assert_eq!(json["regions"][0]["min_x"], 40);
    assert_eq!(json["regions"][0]["area"], 361.0);
    Ok(())
}

#[test]
fn report_flattens_mode_parameters() -> anyhow::Result<()> {
    let original = dark_square_on_sheet();
    let mode = DetectionMode::Adaptive {
        block_size: 11,
        c_value: 2.0,
    };
    let detection = detect_defects(&original, &mode);

    let json = serde_json::to_value(DetectionReport::new("a.png", mode, &detection))?;
    assert_eq!(json["mode"], "adaptive");
    assert_eq!(json["block_size"], 11);
    assert_eq!(json["c_value"], 2.0);
    Ok(())
}
