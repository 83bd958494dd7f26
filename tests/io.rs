//! Validates PNG import and result-map export against real files

use image::{GrayImage, Luma};
use seedpath::forest::COST_INFINITY;
use seedpath::io::image::{export_cost_map, export_label_map, export_path_overlay, load_intensity};
use seedpath::spatial::GridPoint;

#[test]
fn loaded_intensity_is_normalized_row_major() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.png");

    let mut img = GrayImage::new(3, 2);
    img.put_pixel(0, 0, Luma([0]));
    img.put_pixel(1, 0, Luma([51]));
    img.put_pixel(2, 0, Luma([102]));
    img.put_pixel(0, 1, Luma([153]));
    img.put_pixel(1, 1, Luma([204]));
    img.put_pixel(2, 1, Luma([255]));
    img.save(&path).unwrap();

    let field = load_intensity(&path).unwrap();
    assert_eq!(field.dim(), (2, 3));
    assert!((field[[0, 0]] - 0.0).abs() < 1e-6);
    assert!((field[[0, 2]] - 0.4).abs() < 1e-6);
    assert!((field[[1, 2]] - 1.0).abs() < 1e-6);
}

#[test]
fn cost_export_rescales_and_blacks_out_unreached_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cost.png");

    let costs = [0.0f32, 2.0, 4.0, COST_INFINITY];
    export_cost_map(&costs, 2, 2, &path).unwrap();

    let img = image::open(&path).unwrap().into_luma8();
    assert_eq!(img.get_pixel(0, 0).0, [0]);
    assert_eq!(img.get_pixel(1, 0).0, [127]);
    assert_eq!(img.get_pixel(0, 1).0, [255]);
    // The sentinel renders black, not white
    assert_eq!(img.get_pixel(1, 1).0, [0]);
}

#[test]
fn label_export_spreads_labels_over_gray_levels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.png");

    let labels = [0.0f32, 1.0, 2.0, 2.0];
    export_label_map(&labels, 2, 2, &path).unwrap();

    let img = image::open(&path).unwrap().into_luma8();
    assert_eq!(img.get_pixel(0, 0).0, [0]);
    assert_eq!(img.get_pixel(1, 0).0, [127]);
    assert_eq!(img.get_pixel(0, 1).0, [255]);
    assert_eq!(img.get_pixel(1, 1).0, [255]);
}

#[test]
fn path_overlay_marks_exactly_the_polyline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("path.png");

    let polyline = [
        GridPoint::new(0, 0),
        GridPoint::new(1, 1),
        GridPoint::new(2, 2),
    ];
    export_path_overlay(&polyline, 4, 4, &path).unwrap();

    let img = image::open(&path).unwrap().into_luma8();
    let mut lit = 0usize;
    for y in 0..4 {
        for x in 0..4 {
            if img.get_pixel(x, y).0 == [255] {
                lit += 1;
                assert_eq!(x, y, "only diagonal pixels should be lit");
            }
        }
    }
    assert_eq!(lit, 3);
}

#[test]
fn export_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("cost.png");

    export_cost_map(&[0.0, 1.0], 2, 1, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_input_reports_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.png");

    let result = load_intensity(&path);
    assert!(result.is_err());
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("does-not-exist.png"));
}
