use pixvec::document::output_size;
use pixvec::{PixvecResult, Strategy};

use crate::cli::{GlobalOptions, RasterArgs};

use super::progress::BarProgress;
use super::utils::{build_pixvec, derive_svg_path};

/// The main function to run one of the conversion commands.
pub fn run(global: &GlobalOptions, args: &RasterArgs, strategy: Strategy) -> PixvecResult<()> {
    let pixvec = build_pixvec(args);
    let handle = pixvec.for_image(&args.input)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| derive_svg_path(&args.input));

    let resolution = pixvec.settings().resolution;
    let (width, height) = handle.mask().dimensions();
    let (svg_width, svg_height) = output_size(width as u32, height as u32, resolution);
    println!(
        "SVG resolution: {}x{} ({}%) - {}",
        svg_width,
        svg_height,
        resolution,
        strategy.label()
    );

    let mut progress = BarProgress::new(global.quiet);
    let drawing = handle.vectorize_with_progress(&strategy, &mut progress)?;
    progress.finish();

    drawing.save(&output_path)?;
    println!("Created {} {}", drawing.len(), strategy.primitive_name());
    println!("SVG saved to {}", output_path.display());

    Ok(())
}
