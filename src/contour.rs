use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use tracing::debug;

use crate::mask::Mask;
use crate::primitive::{ClosedPath, CoordinateFormat, Point};
use crate::progress::{Milestones, NoProgress, ProgressObserver, Stage};

/// Stroke width of raw contour outlines.
pub const CONTOUR_STROKE_WIDTH: f32 = 1.0;

/// Contours with fewer points are not emitted as raw outlines.
pub const MIN_CONTOUR_POINTS: usize = 3;

/// A traced closed boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Boundary points in tracing order; the last point connects back to the first.
    pub points: Vec<Point>,
    /// Index of the enclosing outer boundary for holes, `None` for outer boundaries.
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Point>, parent: Option<usize>) -> Self {
        Self { points, parent }
    }

    /// Outer boundaries are the only contours that become filled shapes.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trace the boundaries of the foreground of `mask`.
pub fn trace_contours(mask: &Mask) -> Vec<Contour> {
    trace_gray_contours(&mask.to_gray_image())
}

/// Trace the boundaries of every nonzero region of a grayscale raster.
///
/// Uses Suzuki-Abe border following, then drops the interior points of
/// straight horizontal, vertical and diagonal runs. The hierarchy is
/// flattened to two levels: every outer boundary is top-level, even one that
/// sits inside a hole, and every hole points at the outer boundary around it.
pub fn trace_gray_contours(gray: &GrayImage) -> Vec<Contour> {
    let contours: Vec<Contour> = find_contours::<i32>(gray)
        .into_iter()
        .map(|contour| {
            let parent = match contour.border_type {
                BorderType::Outer => None,
                BorderType::Hole => contour.parent,
            };
            Contour::new(compress_chain(&contour.points), parent)
        })
        .collect();

    debug!(
        contours = contours.len(),
        top_level = contours.iter().filter(|c| c.is_top_level()).count(),
        "traced contours"
    );
    contours
}

fn step(from: &Point, to: &Point) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// Remove points whose incoming and outgoing directions are identical.
///
/// The sequence is treated as closed, so the first and last points are
/// checked against their wrap-around neighbours.
pub fn compress_chain(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let kept: Vec<Point> = points
        .iter()
        .enumerate()
        .filter(|&(i, point)| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            step(prev, point) != step(point, next)
        })
        .map(|(_, point)| *point)
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}

/// Turn every top-level contour with at least three points into a closed outline.
///
/// Points are used as traced, without smoothing or decimation. Holes are
/// dropped; the document fills paths with the even-odd rule.
pub fn build_contour_paths(contours: &[Contour]) -> Vec<ClosedPath> {
    build_contour_paths_with_progress(contours, &mut NoProgress)
}

/// [`build_contour_paths`] with contour-count checkpoints.
pub fn build_contour_paths_with_progress(
    contours: &[Contour],
    progress: &mut dyn ProgressObserver,
) -> Vec<ClosedPath> {
    let milestones = Milestones::new(Stage::Building, contours.len());
    let mut paths = Vec::new();
    for (i, contour) in contours.iter().enumerate() {
        if contour.is_top_level() && contour.len() >= MIN_CONTOUR_POINTS {
            paths.push(ClosedPath::new(
                contour.points.clone(),
                CoordinateFormat::Integer,
                CONTOUR_STROKE_WIDTH,
            ));
        }
        milestones.reach(i + 1, progress);
    }
    paths
}
