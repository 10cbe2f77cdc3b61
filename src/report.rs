use pixvec::PixvecError;

pub fn report_error(err: &PixvecError) {
    match err {
        PixvecError::Decode { path, source } => {
            eprintln!("Cannot load file {}", path.display());
            eprintln!("  {source}");
            eprintln!();
            eprintln!("Check that the path exists and points to a PNG, JPEG, BMP or GIF image.");
        }
        PixvecError::InvalidSetting { .. } => {
            eprintln!("{err}");
            eprintln!("Run with --help to see the accepted ranges.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
