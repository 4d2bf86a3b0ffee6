/// Linear RGB color used for GPU output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Decode a `0xRRGGBB` sRGB color into linear space.
    pub fn from_srgb_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_decode_in_order() {
        let c = Rgb::from_srgb_hex(0xFF0000);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn linear_conversion_darkens_midtones() {
        let mid = srgb_to_linear(0.5);
        assert!(mid > 0.2 && mid < 0.25);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }
}
