use ndarray::Array2;
use tracing::debug;

use crate::mask::Mask;
use crate::primitive::Rectangle;
use crate::progress::{Milestones, NoProgress, ProgressObserver, Stage};

/// Partition the foreground of `mask` into non-overlapping rectangles.
///
/// See [`tile_with_progress`].
pub fn tile(mask: &Mask) -> Vec<Rectangle> {
    tile_with_progress(mask, &mut NoProgress)
}

/// Greedy row-major tiling of the foreground pixels.
///
/// Each unvisited foreground pixel starts a rectangle that is first grown
/// rightwards as far as possible, then downwards one full row at a time.
/// The union of the returned rectangles is exactly the foreground and no two
/// of them overlap. The count is not minimal.
///
/// The observer is called at row milestones.
pub fn tile_with_progress(mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<Rectangle> {
    let cells = mask.cells();
    let (width, height) = mask.dimensions();
    let mut visited = Array2::from_elem((height, width), false);
    let mut rectangles = Vec::new();
    let milestones = Milestones::new(Stage::Scanning, height);

    let free = |visited: &Array2<bool>, x: usize, y: usize| cells[[y, x]] && !visited[[y, x]];

    for y in 0..height {
        for x in 0..width {
            if !free(&visited, x, y) {
                continue;
            }

            let rect_width = (x..width)
                .take_while(|&test_x| free(&visited, test_x, y))
                .count();

            let mut rect_height = 1;
            while y + rect_height < height
                && (x..x + rect_width).all(|test_x| free(&visited, test_x, y + rect_height))
            {
                rect_height += 1;
            }

            let rect = Rectangle::new(x, y, rect_width, rect_height);
            for (px, py) in rect.pixels() {
                visited[[py, px]] = true;
            }
            rectangles.push(rect);
        }
        milestones.reach(y + 1, progress);
    }

    debug_assert_eq!(&visited, cells);
    debug!(
        rectangles = rectangles.len(),
        foreground = mask.foreground_count(),
        "tiled mask"
    );
    rectangles
}
