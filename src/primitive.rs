/// A pixel-space point as produced by the contour tracer.
pub type Point = imageproc::point::Point<i32>;

/// An axis-aligned block of foreground pixels, `width >= 1` and `height >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rectangle {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x..self.x + self.width).contains(&x) && (self.y..self.y + self.height).contains(&y)
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Iterate over the covered pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// How path coordinates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// `12,4`
    Integer,
    /// `12.0,4.0`
    OneDecimal,
}

impl CoordinateFormat {
    fn format_point(self, point: &Point) -> String {
        match self {
            CoordinateFormat::Integer => format!("{},{}", point.x, point.y),
            CoordinateFormat::OneDecimal => {
                format!("{:.1},{:.1}", f64::from(point.x), f64::from(point.y))
            }
        }
    }
}

/// A closed straight-line outline together with its stroke styling.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPath {
    pub points: Vec<Point>,
    pub format: CoordinateFormat,
    pub stroke_width: f32,
}

impl ClosedPath {
    pub fn new(points: Vec<Point>, format: CoordinateFormat, stroke_width: f32) -> Self {
        Self {
            points,
            format,
            stroke_width,
        }
    }

    /// The `d` attribute of the path.
    pub fn data(&self) -> String {
        closed_path_data(&self.points, self.format)
    }
}

/// A single shape handed to the document writer.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorPrimitive {
    Rectangle(Rectangle),
    Path(ClosedPath),
}

impl VectorPrimitive {
    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            VectorPrimitive::Rectangle(rect) => Some(rect),
            VectorPrimitive::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&ClosedPath> {
        match self {
            VectorPrimitive::Path(path) => Some(path),
            VectorPrimitive::Rectangle(_) => None,
        }
    }
}

/// Serialize points as `M p0 L p1 ... L pn Z`.
///
/// Always starts with a move and ends with a close command. One point gives
/// a degenerate `M p Z`; an empty slice gives `M 0,0 Z`.
pub fn closed_path_data(points: &[Point], format: CoordinateFormat) -> String {
    let Some((first, rest)) = points.split_first() else {
        return "M 0,0 Z".to_string();
    };

    let mut data = String::with_capacity(points.len() * 12);
    data.push_str("M ");
    data.push_str(&format.format_point(first));
    for point in rest {
        data.push_str(" L ");
        data.push_str(&format.format_point(point));
    }
    data.push_str(" Z");
    data
}
