mod common;

use common::*;
use defectscan::session::{
    ANNOTATED_CAPTION, BLOCK_SIZE_RANGE, MASK_CAPTION, ORIGINAL_CAPTION,
};

fn open_session(layout: &[(&str, &[&str])]) -> (tempfile::TempDir, Session) {
    let dir = create_test_dataset(layout);
    let session = Session::open(Dataset::new(dir.path())).expect("Failed to open session");
    (dir, session)
}

#[test]
fn open_preselects_first_category_and_image() {
    let (_dir, session) = open_session(&[
        ("scratches", &["b.png", "a.png"]),
        ("crazing", &["z.png", "y.bmp"]),
    ]);

    assert_eq!(session.categories(), ["crazing", "scratches"]);
    assert_eq!(session.category().map(String::as_str), Some("crazing"));
    assert_eq!(session.images(), ["y.bmp", "z.png"]);
    assert_eq!(session.image().map(String::as_str), Some("y.bmp"));
}

#[test]
fn default_parameters() {
    let (_dir, session) = open_session(&[("scratches", &["a.png"])]);

    assert_eq!(session.mode(), ModeKind::Canny);
    assert_eq!(session.canny_low(), 30);
    assert_eq!(session.canny_high(), 150);
    assert_eq!(session.block_size(), 11);
    assert_eq!(session.c_value(), 2);
    assert_eq!(
        session.detection_mode(),
        DetectionMode::Canny {
            low_threshold: 30.0,
            high_threshold: 150.0
        }
    );
}

#[test]
fn selecting_category_relists_images() -> anyhow::Result<()> {
    let (_dir, mut session) = open_session(&[
        ("inclusion", &["i1.png"]),
        ("scratches", &["s2.png", "s1.png", "readme.txt"]),
    ]);

    session.select_category("scratches")?;
    assert_eq!(session.images(), ["s1.png", "s2.png"]);
    assert_eq!(session.image().map(String::as_str), Some("s1.png"));

    session.select_image("s2.png")?;
    assert_eq!(session.image().map(String::as_str), Some("s2.png"));
    Ok(())
}

#[test]
fn unknown_selection_is_rejected() {
    let (_dir, mut session) = open_session(&[("scratches", &["a.png"])]);

    assert!(session.select_category("rust").is_err());
    assert!(session.select_image("missing.png").is_err());
    // Selection is unchanged
    assert_eq!(session.category().map(String::as_str), Some("scratches"));
    assert_eq!(session.image().map(String::as_str), Some("a.png"));
}

#[test]
fn empty_category_renders_nothing() -> anyhow::Result<()> {
    let (_dir, mut session) = open_session(&[("empty", &[]), ("scratches", &["a.png"])]);

    assert_eq!(session.category().map(String::as_str), Some("empty"));
    assert!(session.images().is_empty());
    assert!(session.image().is_none());
    assert!(session.render()?.is_none());

    session.select_category("scratches")?;
    assert!(session.render()?.is_some());
    Ok(())
}

#[test]
fn empty_dataset_has_no_selection() -> anyhow::Result<()> {
    let (_dir, session) = open_session(&[]);

    assert!(session.categories().is_empty());
    assert!(session.category().is_none());
    assert!(session.render()?.is_none());
    Ok(())
}

#[test]
fn setters_clamp_to_slider_ranges() {
    let (_dir, mut session) = open_session(&[("scratches", &["a.png"])]);

    session.set_block_size(99);
    assert_eq!(session.block_size(), *BLOCK_SIZE_RANGE.end());
    session.set_block_size(1);
    assert_eq!(session.block_size(), 3);
    session.set_c_value(50);
    assert_eq!(session.c_value(), 10);
    session.set_canny_low(255);
    assert_eq!(session.canny_low(), 255);
}

#[test]
fn switching_modes_keeps_parameters() {
    let (_dir, mut session) = open_session(&[("scratches", &["a.png"])]);

    session.set_canny_low(80);
    session.set_block_size(21);
    session.select_mode(ModeKind::Adaptive);
    assert_eq!(
        session.detection_mode(),
        DetectionMode::Adaptive {
            block_size: 21,
            c_value: 2.0
        }
    );

    session.select_mode(ModeKind::Canny);
    assert_eq!(session.canny_low(), 80);
    assert_eq!(
        session.detection_mode(),
        DetectionMode::Canny {
            low_threshold: 80.0,
            high_threshold: 150.0
        }
    );
}

#[test]
fn render_runs_detector_on_selected_image() -> anyhow::Result<()> {
    let (_dir, mut session) = open_session(&[("scratches", &["a.png", "b.png"])]);
    session.select_image("b.png")?;
    session.select_mode(ModeKind::Otsu);

    let frame = session.render()?.expect("an image is selected");
    assert_eq!(frame.original.dimensions(), (100, 100));
    assert_eq!(frame.detection.region_count(), 1);
    assert_eq!(frame.detection.drawn_count(), 1);
    assert_eq!(frame.detection.annotated.dimensions(), (100, 100));
    Ok(())
}

#[test]
fn render_reports_undecodable_image() -> anyhow::Result<()> {
    let (dir, mut session) = open_session(&[("scratches", &["a.png"])]);
    std::fs::write(dir.path().join("scratches").join("a.png"), b"garbage")?;
    session.select_image("a.png")?;

    assert!(session.render().is_err());
    Ok(())
}

#[test]
fn pane_captions() {
    assert_eq!(ORIGINAL_CAPTION, "Original");
    assert_eq!(ANNOTATED_CAPTION, "With Bounding Boxes");
    assert_eq!(MASK_CAPTION, "Raw Edge/Threshold Output");
}
