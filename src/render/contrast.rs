//! Autocontrast stretch blended against the original raster.

use crate::raster::Raster;

/// Fraction of pixels clipped from each end of a channel histogram before
/// the remaining range is stretched to [0, 255].
pub const AUTOCONTRAST_CUTOFF: f32 = 0.02;

/// Apply an autocontrast stretch and blend it with the original.
///
/// `strength` is the blend factor: 0 returns the original pixel values
/// unchanged, 1 returns the fully stretched raster. Out-of-range values
/// are clamped rather than rejected. The input raster is never mutated.
pub fn apply(raster: &Raster, strength: f32) -> Raster {
    let strength = strength.clamp(0.0, 1.0);
    if raster.is_empty() || strength == 0.0 {
        return raster.clone();
    }
    let stretched = autocontrast(raster, AUTOCONTRAST_CUTOFF);
    if strength == 1.0 {
        return stretched;
    }
    blend(raster, &stretched, strength)
}

/// Per-channel linear contrast stretch.
///
/// For each channel, `cutoff` of the pixel population is clipped from both
/// histogram extremes and the surviving [lo, hi] range is remapped to
/// [0, 255]. A flat channel (hi <= lo) is left unchanged.
fn autocontrast(raster: &Raster, cutoff: f32) -> Raster {
    let total = (raster.width() * raster.height()) as u64;
    let clip = (total as f32 * cutoff) as u64;

    let mut luts = [[0u8; 256]; 3];
    for channel in 0..3 {
        let mut histogram = [0u64; 256];
        for triple in raster.data().chunks_exact(3) {
            histogram[triple[channel] as usize] += 1;
        }

        let lo = clip_bound(histogram.iter().copied(), clip);
        let hi = 255 - clip_bound(histogram.iter().rev().copied(), clip);

        for (value, slot) in luts[channel].iter_mut().enumerate() {
            *slot = if hi > lo {
                ((value as i32 - lo as i32) * 255 / (hi - lo) as i32).clamp(0, 255) as u8
            } else {
                value as u8
            };
        }
    }

    let data = raster
        .data()
        .iter()
        .enumerate()
        .map(|(i, &v)| luts[i % 3][v as usize])
        .collect();
    Raster::new(data, raster.width(), raster.height())
}

/// Walk a histogram from one end, discarding `clip` pixels, and return the
/// offset of the first bin where population survives.
fn clip_bound(bins: impl Iterator<Item = u64>, clip: u64) -> usize {
    let mut remaining = clip as i64;
    for (offset, count) in bins.enumerate() {
        if remaining < count as i64 {
            return offset;
        }
        remaining -= count as i64;
    }
    255
}

/// Pixel-wise linear interpolation between two same-sized rasters.
fn blend(original: &Raster, stretched: &Raster, strength: f32) -> Raster {
    let data = original
        .data()
        .iter()
        .zip(stretched.data())
        .map(|(&o, &s)| {
            let mixed = o as f32 + (s as f32 - o as f32) * strength;
            mixed.round().clamp(0.0, 255.0) as u8
        })
        .collect();
    Raster::new(data, original.width(), original.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    fn gray_pair(low: u8, high: u8) -> Raster {
        Raster::new(vec![low, low, low, high, high, high], 2, 1)
    }

    #[test]
    fn test_strength_zero_is_identity() {
        let raster = gray_pair(60, 200);
        assert_eq!(apply(&raster, 0.0), raster);
    }

    #[test]
    fn test_full_strength_stretches_to_extremes() {
        let raster = gray_pair(60, 200);
        let out = apply(&raster, 1.0);
        assert_eq!(out.pixel(0, 0), Rgb::new(0, 0, 0));
        assert_eq!(out.pixel(1, 0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_strength_is_clamped() {
        let raster = gray_pair(60, 200);
        assert_eq!(apply(&raster, -3.0), raster);
        assert_eq!(apply(&raster, 9.0), apply(&raster, 1.0));
    }

    #[test]
    fn test_half_strength_blends() {
        let raster = gray_pair(60, 200);
        let out = apply(&raster, 0.5);
        // 60 stretches to 0, blend midpoint is 30
        assert_eq!(out.pixel(0, 0), Rgb::new(30, 30, 30));
        // 200 stretches to 255, blend midpoint rounds to 228
        assert_eq!(out.pixel(1, 0), Rgb::new(228, 228, 228));
    }

    #[test]
    fn test_flat_channel_unchanged() {
        let raster = Raster::filled(3, 3, Rgb::new(90, 90, 90));
        assert_eq!(apply(&raster, 1.0), raster);
    }

    #[test]
    fn test_channels_stretch_independently() {
        // Red spans 50..150, green and blue are flat
        let raster = Raster::new(vec![50, 10, 10, 150, 10, 10], 2, 1);
        let out = apply(&raster, 1.0);
        assert_eq!(out.pixel(0, 0), Rgb::new(0, 10, 10));
        assert_eq!(out.pixel(1, 0), Rgb::new(255, 10, 10));
    }

    #[test]
    fn test_cutoff_discards_outliers() {
        // 100 pixels: one black outlier, the rest span 100..=198.
        // 2% clip discards the outlier so 100 maps to 0.
        let mut data = vec![0u8, 0, 0];
        for i in 0..99u32 {
            let v = (100 + i) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
        let raster = Raster::new(data, 100, 1);
        let out = apply(&raster, 1.0);
        assert_eq!(out.pixel(1, 0), Rgb::new(0, 0, 0));
        assert_eq!(out.pixel(99, 0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_empty_raster_passthrough() {
        let raster = Raster::new(Vec::new(), 0, 0);
        assert!(apply(&raster, 0.7).is_empty());
    }
}
