use imageproc::geometry::approximate_polygon_dp;
use tracing::debug;

use crate::config::PolygonOptions;
use crate::contour::Contour;
use crate::primitive::{ClosedPath, CoordinateFormat, Point, closed_path_data};
use crate::progress::{Milestones, NoProgress, ProgressObserver, Stage};

/// Stroke width of simplified polygon outlines.
pub const POLYGON_STROKE_WIDTH: f32 = 0.5;

/// A contour after decimation and close-point merging. Never empty when
/// produced from a non-empty contour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedPolygon {
    pub points: Vec<Point>,
}

impl SimplifiedPolygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The closed path description, with coordinates printed to one decimal.
    pub fn data(&self) -> String {
        closed_path_data(&self.points, CoordinateFormat::OneDecimal)
    }

    pub fn to_path(&self) -> ClosedPath {
        ClosedPath::new(
            self.points.clone(),
            CoordinateFormat::OneDecimal,
            POLYGON_STROKE_WIDTH,
        )
    }
}

/// Douglas-Peucker reduction of a closed curve.
///
/// Falls back to the input when the reduction leaves fewer than three points
/// or when `epsilon <= 0`.
pub fn decimate(points: &[Point], epsilon: f64) -> Vec<Point> {
    if epsilon <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let mut reduced = approximate_polygon_dp(points, epsilon, true);
    // closed curves never repeat their first point
    if reduced.len() > 1 && reduced.first() == reduced.last() {
        reduced.pop();
    }

    if reduced.len() < 3 {
        points.to_vec()
    } else {
        reduced
    }
}

fn distance(a: &Point, b: &Point) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    dx.hypot(dy)
}

/// Keep a point only if it is farther than `threshold` from the last kept point.
///
/// Single pass and order dependent: each point is compared with the most
/// recently kept point only. The first point is always kept.
pub fn merge_close_points(points: &[Point], threshold: f64) -> Vec<Point> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut merged = vec![*first];
    let mut last = *first;
    for point in rest {
        if distance(&last, point) > threshold {
            merged.push(*point);
            last = *point;
        }
    }
    merged
}

/// Decimate then merge a single contour.
pub fn simplify_contour(contour: &Contour, options: &PolygonOptions) -> SimplifiedPolygon {
    let decimated = decimate(&contour.points, options.epsilon);
    let points = merge_close_points(&decimated, options.merge_threshold);
    SimplifiedPolygon { points }
}

/// Whether a contour is eligible for simplification.
pub fn is_simplifiable(contour: &Contour, options: &PolygonOptions) -> bool {
    contour.is_top_level() && contour.len() >= options.min_points
}

/// Simplify every eligible contour and keep the polygons that still have at
/// least three points.
pub fn simplify_contours(contours: &[Contour], options: &PolygonOptions) -> Vec<ClosedPath> {
    simplify_contours_with_progress(contours, options, &mut NoProgress)
}

/// [`simplify_contours`] with contour-count checkpoints.
pub fn simplify_contours_with_progress(
    contours: &[Contour],
    options: &PolygonOptions,
    progress: &mut dyn ProgressObserver,
) -> Vec<ClosedPath> {
    let milestones = Milestones::new(Stage::Simplifying, contours.len());
    let mut paths = Vec::new();
    let mut points_before = 0;
    let mut points_after = 0;

    for (i, contour) in contours.iter().enumerate() {
        if is_simplifiable(contour, options) {
            let polygon = simplify_contour(contour, options);
            if polygon.len() >= 3 {
                points_before += contour.len();
                points_after += polygon.len();
                paths.push(polygon.to_path());
            }
        }
        milestones.reach(i + 1, progress);
    }

    debug!(
        polygons = paths.len(),
        points_before, points_after, "simplified contours"
    );
    paths
}
