use std::path::PathBuf;

use approx::assert_relative_eq;
use nalgebra::Point3;
use wire3d_core::{auto_scale, load_shape, Camera, LoadError, TransformedShape};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn triangle_loads_with_flat_depth() {
    let shape = load_shape(fixture("triangle.csv")).unwrap();
    assert_eq!(shape.point_count(), 3);
    assert_eq!(shape.edge_count(), 2);
    assert_eq!(shape.min_z(), 0.0);
    assert_eq!(shape.max_z(), 0.0);
}

#[test]
fn junk_lines_do_not_cost_valid_records() {
    let shape = load_shape(fixture("noisy.csv")).unwrap();
    assert_eq!(shape.point_count(), 3);
    assert_eq!(shape.edge_count(), 3);
    assert_eq!(shape.min_z(), -1.0);
    assert_eq!(shape.max_z(), 1.0);
    let colors: Vec<u8> = shape.edges().iter().map(|e| e.color).collect();
    assert_eq!(colors, vec![2, 1, 7]);
}

#[test]
fn empty_shape_survives_the_pipeline() {
    let shape = load_shape(fixture("empty.csv")).unwrap();
    assert!(shape.is_empty());

    let centroid = shape.centroid();
    assert_eq!(centroid, Point3::origin());

    let camera = Camera::default();
    let scale = auto_scale(shape.points(), &camera, 80, 24, 0.7);
    assert!(scale.is_finite() && scale > 0.0);

    let transformed = TransformedShape::rotated(&shape, &centroid, 1.0);
    assert!(transformed.points.is_empty());
}

#[test]
fn rotation_keeps_centroid() {
    let shape = load_shape(fixture("noisy.csv")).unwrap();
    let centroid = shape.centroid();
    let transformed = TransformedShape::rotated(&shape, &centroid, 0.9);

    let n = transformed.points.len() as f32;
    let mean = transformed
        .points
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords)
        / n;
    assert_relative_eq!(Point3::from(mean), centroid, epsilon = 1e-5);
}

#[test]
fn missing_file_is_an_open_error() {
    let err = load_shape(fixture("missing.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
    assert!(err.to_string().contains("missing.csv"));
}
