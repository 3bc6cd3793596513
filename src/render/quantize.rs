//! Two-color quantization: median-cut palette selection followed by
//! Floyd-Steinberg error diffusion.

use crate::raster::{Raster, Rgb};

use super::color::LUMA_WEIGHTS;

/// A two-entry palette ordered dark-first by perceptual luma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette2 {
    pub dark: Rgb,
    pub light: Rgb,
}

fn luma(p: Rgb) -> f32 {
    p.r as f32 * LUMA_WEIGHTS[0] + p.g as f32 * LUMA_WEIGHTS[1] + p.b as f32 * LUMA_WEIGHTS[2]
}

/// Pick two representative colors with a single median-cut split.
///
/// The pixel population is split along its widest channel at the median
/// and each half is averaged. A uniform raster yields two identical
/// entries; an empty raster falls back to black/white.
pub fn two_color_palette(raster: &Raster) -> Palette2 {
    let mut pixels: Vec<Rgb> = raster
        .data()
        .chunks_exact(3)
        .map(|t| Rgb::new(t[0], t[1], t[2]))
        .collect();
    if pixels.is_empty() {
        return Palette2 {
            dark: Rgb::new(0, 0, 0),
            light: Rgb::new(255, 255, 255),
        };
    }

    let channel = widest_channel(&pixels);
    pixels.sort_unstable_by_key(|p| channel_value(*p, channel));
    let (low, high) = pixels.split_at(pixels.len() / 2);

    let a = average(if low.is_empty() { high } else { low });
    let b = average(high);
    if luma(a) <= luma(b) {
        Palette2 { dark: a, light: b }
    } else {
        Palette2 { dark: b, light: a }
    }
}

fn channel_value(p: Rgb, channel: usize) -> u8 {
    match channel {
        0 => p.r,
        1 => p.g,
        _ => p.b,
    }
}

fn widest_channel(pixels: &[Rgb]) -> usize {
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for p in pixels {
        for (channel, value) in [p.r, p.g, p.b].into_iter().enumerate() {
            min[channel] = min[channel].min(value);
            max[channel] = max[channel].max(value);
        }
    }
    let mut widest = 0;
    for channel in 1..3 {
        if max[channel] - min[channel] > max[widest] - min[widest] {
            widest = channel;
        }
    }
    widest
}

fn average(pixels: &[Rgb]) -> Rgb {
    let mut sum = [0u64; 3];
    for p in pixels {
        sum[0] += p.r as u64;
        sum[1] += p.g as u64;
        sum[2] += p.b as u64;
    }
    let n = pixels.len().max(1) as u64;
    Rgb::new(
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    )
}

/// Assign every pixel to one of the two palette entries with
/// Floyd-Steinberg dithering.
///
/// The quantization error is diffused per channel to unvisited neighbors
/// with the classic weights:
///
/// ```text
///        [*] 7/16
/// 3/16  5/16  1/16
/// ```
///
/// Returns one flag per pixel, row-major; `true` means the pixel was
/// assigned to the dark entry. Ties go to the dark entry, which keeps
/// the output deterministic for flat inputs.
pub fn dither(raster: &Raster, palette: &Palette2) -> Vec<bool> {
    let w = raster.width() as usize;
    let h = raster.height() as usize;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut work: Vec<[f32; 3]> = raster
        .data()
        .chunks_exact(3)
        .map(|t| [t[0] as f32, t[1] as f32, t[2] as f32])
        .collect();
    let mut assigned = vec![false; w * h];

    let dark = [
        palette.dark.r as f32,
        palette.dark.g as f32,
        palette.dark.b as f32,
    ];
    let light = [
        palette.light.r as f32,
        palette.light.g as f32,
        palette.light.b as f32,
    ];

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = work[idx].map(|v| v.clamp(0.0, 255.0));

            let to_dark = squared_distance(old, dark);
            let to_light = squared_distance(old, light);
            let is_dark = to_dark <= to_light;
            assigned[idx] = is_dark;

            let target = if is_dark { dark } else { light };
            let error = [old[0] - target[0], old[1] - target[1], old[2] - target[2]];

            if x + 1 < w {
                diffuse(&mut work[idx + 1], error, 7.0 / 16.0);
            }
            if y + 1 < h {
                if x > 0 {
                    diffuse(&mut work[idx + w - 1], error, 3.0 / 16.0);
                }
                diffuse(&mut work[idx + w], error, 5.0 / 16.0);
                if x + 1 < w {
                    diffuse(&mut work[idx + w + 1], error, 1.0 / 16.0);
                }
            }
        }
    }

    assigned
}

fn squared_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

fn diffuse(pixel: &mut [f32; 3], error: [f32; 3], weight: f32) {
    pixel[0] += error[0] * weight;
    pixel[1] += error[1] * weight;
    pixel[2] += error[2] * weight;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_palette_orders_dark_first() {
        let raster = Raster::new(
            vec![255, 255, 255, 0, 0, 0, 250, 250, 250, 5, 5, 5],
            4,
            1,
        );
        let palette = two_color_palette(&raster);
        assert_eq!(palette.dark, Rgb::new(2, 2, 2));
        assert_eq!(palette.light, Rgb::new(252, 252, 252));
    }

    #[test]
    fn test_palette_uniform_raster() {
        let raster = Raster::filled(4, 4, Rgb::new(128, 128, 128));
        let palette = two_color_palette(&raster);
        assert_eq!(palette.dark, palette.light);
        assert_eq!(palette.dark, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_palette_empty_raster_fallback() {
        let raster = Raster::new(Vec::new(), 0, 0);
        let palette = two_color_palette(&raster);
        assert_eq!(palette.dark, BLACK);
        assert_eq!(palette.light, WHITE);
    }

    #[test]
    fn test_palette_splits_widest_channel() {
        // Red varies the most; green/blue are nearly flat
        let raster = Raster::new(vec![10, 100, 100, 240, 104, 102], 2, 1);
        let palette = two_color_palette(&raster);
        assert_eq!(palette.dark.r, 10);
        assert_eq!(palette.light.r, 240);
    }

    #[test]
    fn test_dither_exact_palette_colors_no_error() {
        let raster = Raster::new(
            vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0],
            2,
            2,
        );
        let palette = Palette2 {
            dark: BLACK,
            light: WHITE,
        };
        assert_eq!(dither(&raster, &palette), vec![true, false, false, true]);
    }

    #[test]
    fn test_dither_uniform_ties_go_dark() {
        let raster = Raster::filled(2, 2, Rgb::new(128, 128, 128));
        let palette = two_color_palette(&raster);
        assert_eq!(dither(&raster, &palette), vec![true; 4]);
    }

    #[test]
    fn test_dither_diffuses_error() {
        // One mid-gray pixel next to blacks: the gray snaps to black and
        // pushes its error rightward, flipping the neighbor to white.
        let raster = Raster::new(vec![120, 120, 120, 80, 80, 80], 2, 1);
        let palette = Palette2 {
            dark: BLACK,
            light: WHITE,
        };
        let flags = dither(&raster, &palette);
        assert!(flags[0]);
        // 80 + 120 * 7/16 = 132.5, closer to white
        assert!(!flags[1]);
    }

    #[test]
    fn test_dither_empty() {
        let raster = Raster::new(Vec::new(), 0, 0);
        let palette = two_color_palette(&raster);
        assert!(dither(&raster, &palette).is_empty());
    }
}
