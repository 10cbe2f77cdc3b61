use std::path::Path;

use svg::{Document, Node};
use svg::node::element::{Path as SvgPath, Rectangle as SvgRectangle};
use tracing::debug;

use crate::PixvecResult;
use crate::primitive::{ClosedPath, Rectangle, VectorPrimitive};

const FILL: &str = "black";

/// Accumulates vector primitives and serializes them as an SVG document.
///
/// The view box is the pixel space of the mask; the rendered size is the
/// view box scaled by `resolution` percent.
#[derive(Debug)]
pub struct SvgWriter {
    view_width: u32,
    view_height: u32,
    resolution: u32,
    document: Document,
    count: usize,
}

impl SvgWriter {
    pub fn new(view_width: u32, view_height: u32, resolution: u32) -> Self {
        let (width, height) = output_size(view_width, view_height, resolution);
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, view_width, view_height));
        Self {
            view_width,
            view_height,
            resolution,
            document,
            count: 0,
        }
    }

    /// Rendered `(width, height)` of the document.
    pub fn output_size(&self) -> (u32, u32) {
        output_size(self.view_width, self.view_height, self.resolution)
    }

    /// Number of primitives added so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn add(&mut self, primitive: &VectorPrimitive) {
        match primitive {
            VectorPrimitive::Rectangle(rect) => self.document.append(rect_element(rect)),
            VectorPrimitive::Path(path) => self.document.append(path_element(path)),
        }
        self.count += 1;
    }

    pub fn extend<'a>(&mut self, primitives: impl IntoIterator<Item = &'a VectorPrimitive>) {
        for primitive in primitives {
            self.add(primitive);
        }
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> PixvecResult<()> {
        let path = path.as_ref();
        svg::save(path, &self.document)?;
        debug!(path = %path.display(), primitives = self.count, "saved svg");
        Ok(())
    }
}

/// Scale the view box by a resolution percentage, rounding down.
pub fn output_size(view_width: u32, view_height: u32, resolution: u32) -> (u32, u32) {
    let scale = |dim: u32| (u64::from(dim) * u64::from(resolution) / 100) as u32;
    (scale(view_width), scale(view_height))
}

fn rect_element(rect: &Rectangle) -> SvgRectangle {
    SvgRectangle::new()
        .set("x", rect.x as u32)
        .set("y", rect.y as u32)
        .set("width", rect.width as u32)
        .set("height", rect.height as u32)
        .set("fill", FILL)
        .set("stroke", "none")
}

fn path_element(path: &ClosedPath) -> SvgPath {
    SvgPath::new()
        .set("d", path.data())
        .set("stroke", FILL)
        .set("fill", FILL)
        .set("stroke-width", path.stroke_width)
        .set("fill-rule", "evenodd")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{CoordinateFormat, Point};

    fn triangle(format: CoordinateFormat, stroke_width: f32) -> VectorPrimitive {
        let points = vec![Point::new(0, 0), Point::new(4, 0), Point::new(4, 3)];
        VectorPrimitive::Path(ClosedPath::new(points, format, stroke_width))
    }

    mod output_size {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn full_resolution_is_identity() {
                assert_eq!(output_size(28, 13, 100), (28, 13));
            }

            #[test]
            fn five_hundred_percent_is_five_times() {
                assert_eq!(output_size(28, 13, 500), (140, 65));
            }
        }
    }

    mod svg_writer {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn empty_document_has_view_box_and_size() {
                let writer = SvgWriter::new(20, 10, 300);
                let svg = writer.to_svg_string();
                assert!(writer.is_empty());
                assert!(svg.contains(r#"viewBox="0 0 20 10""#), "{svg}");
                assert!(svg.contains(r#"width="60""#), "{svg}");
                assert!(svg.contains(r#"height="30""#), "{svg}");
                assert!(!svg.contains("<rect"));
                assert!(!svg.contains("<path"));
            }

            #[test]
            fn rectangles_are_filled_without_stroke() {
                let mut writer = SvgWriter::new(10, 10, 100);
                writer.add(&VectorPrimitive::Rectangle(Rectangle::new(2, 3, 4, 1)));
                let svg = writer.to_svg_string();
                assert_eq!(writer.len(), 1);
                assert!(svg.contains("<rect"));
                assert!(svg.contains(r#"x="2""#));
                assert!(svg.contains(r#"y="3""#));
                assert!(svg.contains(r#"width="4""#));
                assert!(svg.contains(r#"height="1""#));
                assert!(svg.contains(r#"stroke="none""#));
            }

            #[test]
            fn contour_paths_use_even_odd_fill() {
                let mut writer = SvgWriter::new(10, 10, 100);
                writer.add(&triangle(CoordinateFormat::Integer, 1.0));
                let svg = writer.to_svg_string();
                assert!(svg.contains(r#"d="M 0,0 L 4,0 L 4,3 Z""#), "{svg}");
                assert!(svg.contains(r#"fill-rule="evenodd""#));
                assert!(svg.contains(r#"stroke="black""#));
                assert!(svg.contains(r#"stroke-width="1""#), "{svg}");
            }

            #[test]
            fn polygon_paths_keep_decimal_coordinates() {
                let mut writer = SvgWriter::new(10, 10, 100);
                writer.add(&triangle(CoordinateFormat::OneDecimal, 0.5));
                let svg = writer.to_svg_string();
                assert!(svg.contains(r#"d="M 0.0,0.0 L 4.0,0.0 L 4.0,3.0 Z""#), "{svg}");
                assert!(svg.contains(r#"stroke-width="0.5""#), "{svg}");
            }

            #[test]
            fn primitives_keep_insertion_order() {
                let mut writer = SvgWriter::new(10, 10, 100);
                writer.extend(&[
                    VectorPrimitive::Rectangle(Rectangle::new(0, 0, 1, 1)),
                    triangle(CoordinateFormat::Integer, 1.0),
                    VectorPrimitive::Rectangle(Rectangle::new(5, 5, 1, 1)),
                ]);
                let svg = writer.to_svg_string();
                let first_rect = svg.find("<rect").unwrap();
                let path = svg.find("<path").unwrap();
                let last_rect = svg.rfind("<rect").unwrap();
                assert!(first_rect < path && path < last_rect);
                assert_eq!(writer.len(), 3);
            }

            #[test]
            fn save_writes_the_document() {
                let dir = tempfile::tempdir().unwrap();
                let target = dir.path().join("out.svg");
                let mut writer = SvgWriter::new(4, 4, 200);
                writer.add(&VectorPrimitive::Rectangle(Rectangle::new(0, 0, 4, 4)));
                writer.save(&target).unwrap();
                let written = std::fs::read_to_string(&target).unwrap();
                assert!(written.contains("<svg"));
                assert!(written.contains(r#"width="8""#));
            }
        }
    }
}
