//! Pinned reference outputs.
//!
//! Every filter accumulates in `f32` and truncates toward zero, so results
//! can sit one level below the mathematically rounded value. These tests
//! fix the exact bytes produced for a small gradient so that changes to
//! summation order or rounding show up as failures.

use pfx_core::{Color, PixelBuffer};
use pfx_ops::{Filter, Kernel};

/// 4x3 test pattern. Channels vary independently along x and y.
fn gradient() -> PixelBuffer {
    let mut buf = PixelBuffer::new(4, 3);
    for y in 0..3u32 {
        for x in 0..4u32 {
            buf.set_pixel(
                x,
                y,
                Color::new(
                    ((x * 60 + y * 10) % 256) as u8,
                    ((y * 90 + x * 5) % 256) as u8,
                    ((x * y * 40 + 30) % 256) as u8,
                ),
            );
        }
    }
    buf
}

/// Applies `filter` and samples the given coordinates.
fn sample(filter: &Filter, points: &[(u32, u32)]) -> Vec<Color> {
    let out = filter.apply(&gradient(), |_| {}, || false).unwrap();
    points.iter().map(|&(x, y)| out.pixel(x, y)).collect()
}

const POINTS: [(u32, u32); 4] = [(0, 0), (1, 1), (3, 2), (2, 0)];

#[test]
fn test_gradient_pattern() {
    let src = gradient();
    assert_eq!(src.pixel(3, 2), Color::new(200, 195, 14));
    assert_eq!(src.pixel(1, 1), Color::new(70, 95, 70));
}

#[test]
fn test_blur_parity() {
    assert_eq!(
        sample(&Filter::blur(), &POINTS),
        vec![
            Color::new(23, 31, 34),
            Color::new(70, 95, 70),
            Color::new(176, 163, 94),
            Color::new(123, 40, 56),
        ]
    );
}

#[test]
fn test_blur_uniform_truncates() {
    // Nine products of 255 * (1/9) sum to slightly under 255.
    let src = PixelBuffer::filled(3, 3, Color::WHITE);
    let out = Filter::blur().apply(&src, |_| {}, || false).unwrap();
    assert!(out.as_slice().iter().all(|&c| c == Color::gray(254)));

    let src = PixelBuffer::filled(3, 3, Color::gray(100));
    let out = Filter::blur().apply(&src, |_| {}, || false).unwrap();
    assert!(out.as_slice().iter().all(|&c| c == Color::gray(100)));
}

#[test]
fn test_gaussian_parity() {
    assert_eq!(
        sample(&Filter::gaussian(), &POINTS),
        vec![
            Color::new(36, 46, 39),
            Color::new(78, 95, 63),
            Color::new(163, 148, 73),
            Color::new(116, 53, 54),
        ]
    );
}

#[test]
fn test_sobel_parity() {
    assert_eq!(
        sample(&Filter::sobel(), &POINTS),
        vec![
            Color::new(40, 255, 40),
            Color::new(80, 255, 255),
            Color::new(40, 255, 0),
            Color::new(40, 255, 255),
        ]
    );
}

#[test]
fn test_sharpness_parity() {
    assert_eq!(
        sample(&Filter::sharpness(), &POINTS),
        vec![
            Color::new(0, 0, 30),
            Color::new(70, 95, 70),
            Color::new(255, 255, 0),
            Color::new(110, 0, 0),
        ]
    );
}

#[test]
fn test_grayscale_parity() {
    let got = sample(&Filter::grayscale(), &POINTS);
    let levels: Vec<u8> = got.iter().map(|c| c.r).collect();
    assert_eq!(levels, vec![3, 83, 176, 51]);
}

#[test]
fn test_sepia_parity() {
    assert_eq!(
        sample(&Filter::sepia(), &POINTS),
        vec![
            Color::new(83, 23, 0),
            Color::new(163, 103, 43),
            Color::new(255, 196, 136),
            Color::new(131, 71, 11),
        ]
    );
}

#[test]
fn test_sepia_extremes() {
    let white = PixelBuffer::filled(1, 1, Color::WHITE);
    let black = PixelBuffer::filled(1, 1, Color::BLACK);
    let sepia = Filter::sepia();
    assert_eq!(sepia.compute_pixel(&white, 0, 0), Color::new(255, 255, 215));
    assert_eq!(sepia.compute_pixel(&black, 0, 0), Color::new(80, 20, 0));
}

#[test]
fn test_identity_kernel_is_exact() {
    let identity = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 3, 3).unwrap();
    let src = gradient();
    let out = Filter::matrix(identity).apply(&src, |_| {}, || false).unwrap();
    assert_eq!(out, src);
}
