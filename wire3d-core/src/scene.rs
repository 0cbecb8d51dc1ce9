/// Shape description parser
///
/// The format is line oriented:
///
/// ```text
/// # comment
/// POINTS
/// x,y,z
/// EDGES
/// start,end[,color]
/// ```
///
/// Malformed records are skipped and records beyond the shape's capacity are
/// dropped. Neither stops the load.
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    character::complete::{char, i64 as signed, space0, u64 as unsigned},
    combinator::{all_consuming, opt, verify},
    number::complete::float,
    sequence::{delimited, preceded},
    IResult,
};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::geometry::{Edge, Shape};

/// Extension a shape file must carry.
pub const SHAPE_EXTENSION: &str = "csv";

/// Which kind of record the parser expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Points,
    Edges,
}

/// Records that did not make it into the shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines that failed to parse in the active section.
    pub malformed: usize,
    /// Valid records dropped because the shape was full.
    pub truncated: usize,
}

/// Read and parse a shape file.
pub fn load_shape(path: impl AsRef<Path>) -> Result<Shape, LoadError> {
    let path = path.as_ref();

    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(SHAPE_EXTENSION));
    if !has_extension {
        return Err(LoadError::Extension {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let shape = parse_shape(&text);
    debug!(
        path = %path.display(),
        points = shape.point_count(),
        edges = shape.edge_count(),
        min_z = shape.min_z(),
        max_z = shape.max_z(),
        "loaded shape"
    );
    Ok(shape)
}

/// Parse shape text into a shape with the default capacity.
pub fn parse_shape(input: &str) -> Shape {
    let mut shape = Shape::new();
    let report = parse_into(&mut shape, input);

    if report.malformed > 0 {
        warn!(count = report.malformed, "skipped malformed records");
    }
    if report.truncated > 0 {
        warn!(
            count = report.truncated,
            points = shape.point_count(),
            edges = shape.edge_count(),
            "shape capacity reached, extra records dropped"
        );
    }
    shape
}

/// Append every record in `input` to `shape`.
pub fn parse_into(shape: &mut Shape, input: &str) -> LoadReport {
    let mut report = LoadReport::default();
    // Bare point lists predate the section markers
    let mut section = Section::Points;

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.eq_ignore_ascii_case("POINTS") {
            section = Section::Points;
            continue;
        }
        if line.eq_ignore_ascii_case("EDGES") {
            section = Section::Edges;
            continue;
        }

        let pushed = match section {
            Section::Points => match all_consuming(point_record)(line) {
                Ok((_, point)) => shape.push_point(point),
                Err(_) => {
                    debug!(line = index + 1, text = line, "malformed point record");
                    report.malformed += 1;
                    continue;
                }
            },
            Section::Edges => match all_consuming(edge_record)(line) {
                Ok((_, edge)) => shape.push_edge(edge),
                Err(_) => {
                    debug!(line = index + 1, text = line, "malformed edge record");
                    report.malformed += 1;
                    continue;
                }
            },
        };

        if pushed.is_err() {
            report.truncated += 1;
        }
    }

    report
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn finite_float(input: &str) -> IResult<&str, f32> {
    verify(float, |value: &f32| value.is_finite())(input)
}

fn point_record(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, x) = finite_float(input)?;
    let (input, _) = separator(input)?;
    let (input, y) = finite_float(input)?;
    let (input, _) = separator(input)?;
    let (input, z) = finite_float(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn edge_record(input: &str) -> IResult<&str, Edge> {
    let (input, start) = unsigned(input)?;
    let (input, _) = separator(input)?;
    let (input, end) = unsigned(input)?;
    let (input, color) = opt(preceded(separator, signed))(input)?;

    let (start, end) = (start as usize, end as usize);
    let edge = match color {
        Some(color) => Edge::new(start, end, color),
        None => Edge::plain(start, end),
    };
    Ok((input, edge))
}
