mod convert;
mod mask;
mod progress;
mod utils;

use crate::cli::{Cli, Commands, GlobalOptions};
use pixvec::{PixvecResult, Strategy};

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> PixvecResult<()> {
    let Cli { global, command } = cli;
    dispatch(&global, command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(global: &GlobalOptions, command: Commands) -> PixvecResult<()> {
    match command {
        Commands::Rects(cmd) => convert::run(global, &cmd.raster, Strategy::Rectangles),
        Commands::Contours(cmd) => convert::run(global, &cmd.raster, Strategy::Contours),
        Commands::Smart(cmd) => {
            let strategy = Strategy::Polygons((&cmd.polygon).into());
            convert::run(global, &cmd.raster, strategy)
        }
        Commands::Mask(cmd) => mask::run(cmd),
    }
}
