use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold as ip_threshold};
use imageproc::filter::separable_filter_equal;
use ndarray::Array2;

use crate::config::RasterSettings;
use crate::{PixvecError, PixvecResult};

/// A binary foreground/background grid. `true` marks a foreground pixel.
///
/// Cells are stored row-major as `[[y, x]]`. A mask is never mutated after it
/// has been built; strategies only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Create an all-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        Self {
            cells: Array2::from_shape_fn((height, width), |(y, x)| f(x, y)),
        }
    }

    /// Build a mask from text rows where `#` marks foreground and any other character background.
    ///
    /// Rows shorter than the longest row are padded with background.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_fn(width, rows.len(), |x, y| {
            grid[y].get(x).copied().unwrap_or(false)
        })
    }

    /// Treat every nonzero pixel of a grayscale image as foreground.
    pub fn from_gray_nonzero(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        Self::from_fn(w as usize, h as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0] != 0
        })
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// `(width, height)` of the grid.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Whether the pixel at `(x, y)` is foreground. Out-of-range coordinates are background.
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.cells.get([y, x]).copied().unwrap_or(false)
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }

    pub(crate) fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    /// Render the mask as a grayscale image: foreground 255, background 0.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let on = self.cells[[y as usize, x as usize]];
            Luma([if on { 255 } else { 0 }])
        })
    }
}

/// A single transformation step applied to the grayscale raster before tracing.
#[derive(Debug, Clone, Copy)]
pub enum RasterOperation {
    Invert,
    Resize { width: u32, height: u32 },
    Threshold { value: u8 },
    Blur { kernel_size: usize },
}

impl RasterOperation {
    pub fn apply(&self, input: &GrayImage) -> GrayImage {
        match self {
            RasterOperation::Invert => invert(input),
            RasterOperation::Resize { width, height } => resize(input, *width, *height),
            RasterOperation::Threshold { value } => threshold_mask(input, *value),
            RasterOperation::Blur { kernel_size } => gaussian_blur(input, *kernel_size),
        }
    }
}

/// Run a list of operations against the provided source image, returning the transformed raster.
pub fn apply_operations(source: &GrayImage, operations: &[RasterOperation]) -> GrayImage {
    let mut current = source.clone();
    for op in operations {
        current = op.apply(&current);
    }
    current
}

/// Produce the preprocessing sequence for a raster of the given size.
///
/// Order: invert, resize, threshold. The last step always runs, so the output
/// of the sequence is a hard 0/255 raster.
pub fn operations_from_settings(
    settings: &RasterSettings,
    width: u32,
    height: u32,
) -> Vec<RasterOperation> {
    let mut operations = Vec::new();
    if settings.negative {
        operations.push(RasterOperation::Invert);
    }
    if let Some((width, height)) = settings.scaled_dimensions(width, height) {
        operations.push(RasterOperation::Resize { width, height });
    }
    operations.push(RasterOperation::Threshold {
        value: settings.threshold,
    });
    operations
}

/// Decode a raster file into a single-channel grayscale image.
pub fn decode_grayscale(path: &Path) -> PixvecResult<GrayImage> {
    let image = image::open(path).map_err(|source| PixvecError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_luma8())
}

/// Invert every pixel of a grayscale image.
pub fn invert(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    imageops::invert(&mut out);
    out
}

/// Resample the raster with the high-quality Lanczos filter.
pub fn resize(gray: &GrayImage, width: u32, height: u32) -> GrayImage {
    imageops::resize(gray, width, height, FilterType::Lanczos3)
}

/// Threshold the grayscale image: values above `thr` become 255, the rest 0.
pub fn threshold_mask(gray: &GrayImage, thr: u8) -> GrayImage {
    ip_threshold(gray, thr, ThresholdType::Binary)
}

/// Normalized binomial weights of an odd-sized smoothing kernel.
///
/// Size 3 gives `[0.25, 0.5, 0.25]`, size 5 `[1, 4, 6, 4, 1] / 16`.
pub fn gaussian_kernel(kernel_size: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..kernel_size.max(1) {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(1.0);
        next.extend(row.windows(2).map(|pair| pair[0] + pair[1]));
        next.push(1.0);
        row = next;
    }
    let sum: f32 = row.iter().sum();
    row.iter().map(|w| w / sum).collect()
}

/// Gaussian smoothing of a grayscale raster with a `kernel_size` x `kernel_size` kernel.
///
/// The kernel reaches `kernel_size / 2` pixels out, so a hard mask grows by
/// exactly that many pixels of nonzero values.
pub fn gaussian_blur(gray: &GrayImage, kernel_size: usize) -> GrayImage {
    if kernel_size <= 1 {
        return gray.clone();
    }
    separable_filter_equal(gray, &gaussian_kernel(kernel_size))
}

/// Split a raster into foreground (strictly above `threshold`) and background.
pub fn binarize(gray: &GrayImage, threshold: u8) -> Mask {
    Mask::from_gray_nonzero(&threshold_mask(gray, threshold))
}

/// Run the full preprocessing chain of `settings` over a decoded raster.
pub fn prepare_mask(gray: &GrayImage, settings: &RasterSettings) -> Mask {
    let (w, h) = gray.dimensions();
    let operations = operations_from_settings(settings, w, h);
    Mask::from_gray_nonzero(&apply_operations(gray, &operations))
}

/// Smooth the mask edges. The result is a soft raster; callers trace it with
/// "nonzero is foreground".
pub fn blur_mask(mask: &Mask, kernel_size: usize) -> GrayImage {
    RasterOperation::Blur { kernel_size }.apply(&mask.to_gray_image())
}
