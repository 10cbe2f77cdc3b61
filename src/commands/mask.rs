use pixvec::PixvecResult;

use crate::cli::MaskCommand;

use super::utils::{build_pixvec, derive_variant_path};

/// The main function to run the mask command.
pub fn run(cmd: MaskCommand) -> PixvecResult<()> {
    let args = &cmd.raster;
    let handle = build_pixvec(args).for_image(&args.input)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&args.input, "mask", "png"));

    handle.save(&output_path)?;
    println!(
        "Mask PNG saved to {} ({} foreground pixels)",
        output_path.display(),
        handle.mask().foreground_count()
    );

    Ok(())
}
