//! CLI command implementations

pub mod apply;
pub mod kernel;
pub mod list;

use crate::FilterArgs;
use anyhow::{Context, Result, bail};
use pfx_core::PixelBuffer;
use pfx_ops::kernel::{GAUSSIAN_RADIUS, GAUSSIAN_SIGMA};
use pfx_ops::{Filter, FilterKind, Kernel};
use std::path::Path;
use tracing::warn;

/// Largest `--radius` accepted on the command line (a 2049x2049 kernel).
pub const MAX_RADIUS: usize = 1024;

/// Load a raw interleaved RGB8 buffer
pub fn load_raw(path: &Path, width: u32, height: u32) -> Result<PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    PixelBuffer::from_rgb8(width, height, &bytes)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save a buffer as raw interleaved RGB8
pub fn save_raw(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    std::fs::write(path, buffer.to_rgb8())
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse "a,b,c;d,e,f;g,h,i" into a kernel. Each `;`-separated row is one
/// vertical offset, top to bottom.
pub fn parse_kernel(text: &str) -> Result<Kernel> {
    let mut rows: Vec<Vec<f32>> = Vec::new();
    for (i, row) in text.split(';').enumerate() {
        let weights = row
            .split(',')
            .map(|w| {
                w.trim()
                    .parse::<f32>()
                    .with_context(|| format!("Bad weight '{}' in kernel row {}", w.trim(), i))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(weights);
    }

    let width = rows.first().map_or(0, Vec::len);
    if let Some(i) = rows.iter().position(|r| r.len() != width) {
        bail!("Kernel row {} has {} weights, expected {}", i, rows[i].len(), width);
    }
    let height = rows.len();
    Ok(Kernel::new(rows.concat(), width, height)?)
}

/// Build the filter selected on the command line
pub fn build_filter(args: &FilterArgs) -> Result<Filter> {
    if let Some(text) = &args.kernel {
        return parse_kernel(text).map(Filter::matrix);
    }

    match args.filter {
        FilterKind::Gaussian => {
            let radius = args.radius.unwrap_or(GAUSSIAN_RADIUS);
            if radius > MAX_RADIUS {
                bail!("--radius {} exceeds the limit of {}", radius, MAX_RADIUS);
            }
            Ok(Filter::gaussian_with(radius, args.sigma.unwrap_or(GAUSSIAN_SIGMA))?)
        }
        kind => {
            if args.radius.is_some() || args.sigma.is_some() {
                warn!(filter = %kind, "--radius/--sigma only apply to gaussian, ignoring");
            }
            Ok(kind.build())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfx_core::Color;

    fn filter_args(filter: FilterKind) -> FilterArgs {
        FilterArgs {
            filter,
            radius: None,
            sigma: None,
            kernel: None,
        }
    }

    #[test]
    fn test_parse_kernel_identity() {
        let k = parse_kernel("0,0,0; 0,1,0; 0,0,0").unwrap();
        assert_eq!(k.width(), 3);
        assert_eq!(k.weight(0, 0), 1.0);
        assert_eq!(k.sum(), 1.0);
    }

    #[test]
    fn test_parse_kernel_rows_are_vertical() {
        let k = parse_kernel("1,2,3;4,5,6;7,8,9").unwrap();
        assert_eq!(k.weight(0, -1), 2.0);
        assert_eq!(k.weight(-1, 0), 4.0);
    }

    #[test]
    fn test_parse_kernel_errors() {
        assert!(parse_kernel("1,2;3,4").is_err());
        assert!(parse_kernel("1,2,3;4,5").is_err());
        assert!(parse_kernel("1,x,3").is_err());
        assert!(parse_kernel("").is_err());
    }

    #[test]
    fn test_build_filter_gaussian_params() {
        let mut args = filter_args(FilterKind::Gaussian);
        args.radius = Some(1);
        args.sigma = Some(1.0);
        let f = build_filter(&args).unwrap();
        assert_eq!(f.kernel().map(Kernel::width), Some(3));

        args.sigma = Some(0.0);
        assert!(build_filter(&args).is_err());

        args.sigma = Some(-1.0);
        assert!(build_filter(&args).is_err());
    }

    #[test]
    fn test_build_filter_radius_limit() {
        let mut args = filter_args(FilterKind::Gaussian);
        args.radius = Some(300);
        let f = build_filter(&args).unwrap();
        assert_eq!(f.kernel().map(Kernel::width), Some(601));

        args.radius = Some(MAX_RADIUS + 1);
        assert!(build_filter(&args).is_err());
    }

    #[test]
    fn test_build_filter_kernel_overrides() {
        let mut args = filter_args(FilterKind::Invert);
        args.kernel = Some("1".into());
        assert_eq!(build_filter(&args).unwrap(), Filter::matrix(Kernel::new(vec![1.0], 1, 1).unwrap()));
    }

    #[test]
    fn test_raw_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buf.rgb");
        let mut buf = PixelBuffer::new(3, 2);
        buf.set_pixel(2, 1, Color::new(1, 2, 3));

        save_raw(&path, &buf).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 18);
        assert_eq!(load_raw(&path, 3, 2).unwrap(), buf);
        assert!(load_raw(&path, 4, 2).is_err());
    }
}
