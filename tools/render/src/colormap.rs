//! Band colours sampled from the viridis gradient.

use image::Rgb;

/// `n` colours evenly spaced along viridis, dark to bright.
pub fn viridis_palette(n: usize) -> Vec<Rgb<u8>> {
    let gradient = colorgrad::preset::viridis();
    sample_palette(&gradient, n)
}

pub fn sample_palette(gradient: &dyn colorgrad::Gradient, n: usize) -> Vec<Rgb<u8>> {
    (0..n)
        .map(|k| {
            let t = if n <= 1 { 0.5 } else { k as f32 / (n - 1) as f32 };
            let [r, g, b, _] = gradient.at(t).to_rgba8();
            Rgb([r, g, b])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(c: Rgb<u8>) -> f32 {
        0.2126 * c[0] as f32 + 0.7152 * c[1] as f32 + 0.0722 * c[2] as f32
    }

    #[test]
    fn palette_has_requested_length() {
        assert_eq!(viridis_palette(7).len(), 7);
        assert_eq!(viridis_palette(1).len(), 1);
        assert!(viridis_palette(0).is_empty());
    }

    #[test]
    fn viridis_brightens_monotonically() {
        let p = viridis_palette(6);
        for w in p.windows(2) {
            assert!(luminance(w[1]) > luminance(w[0]), "{:?} -> {:?}", w[0], w[1]);
        }
    }
}
