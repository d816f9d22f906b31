//! List command

use anyhow::Result;
use pfx_ops::FilterKind;

fn describe(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Invert => "255 minus each channel",
        FilterKind::Brightness => "adds 20 to each channel",
        FilterKind::Grayscale => "0.36R + 0.53G + 0.11B on all channels",
        FilterKind::Sepia => "intensity toned +80/+20/-40",
        FilterKind::Blur => "3x3 box average",
        FilterKind::Sobel => "3x3 Sobel gradient",
        FilterKind::Sharpness => "3x3 sharpen, center 5",
        FilterKind::Gaussian => "Gaussian, radius 3 sigma 2 by default",
    }
}

pub fn run() -> Result<()> {
    for kind in FilterKind::ALL {
        let tag = if kind.is_convolution() { "matrix" } else { "pixel" };
        println!("{:<12} {:<7} {}", kind, tag, describe(kind));
    }
    Ok(())
}
