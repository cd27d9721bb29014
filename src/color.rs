//! Color types, hex parsing and distance metrics.

use crate::error::PixelateError;
use std::fmt;
use std::str::FromStr;

/// RGB color in 8-bit per channel format (sRGB gamma-encoded)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_array(arr: [u8; 3]) -> Self {
        Self { r: arr[0], g: arr[1], b: arr[2] }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Read the RGB part of an RGBA pixel slice.
    #[inline(always)]
    pub fn from_rgba_slice(px: &[u8]) -> Self {
        Self { r: px[0], g: px[1], b: px[2] }
    }

    pub fn to_oklab(self) -> Oklab {
        Oklab::from_rgb(self)
    }

    pub fn to_linear(self) -> LinearRgb {
        LinearRgb::from_srgb(self)
    }

    /// Integer squared Euclidean distance in RGB space.
    /// Orders exactly like the real distance, without the sqrt.
    #[inline(always)]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (any case).
    pub fn from_hex(s: &str) -> Result<Self, PixelateError> {
        let invalid = |reason: &str| PixelateError::InvalidPalette {
            entry: s.to_string(),
            reason: reason.to_string(),
        };

        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("invalid hex digit"));
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|e| invalid(&e.to_string()));

        match hex.len() {
            6 => Ok(Rgb::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            n => Err(invalid(&format!("expected 3 or 6 hex digits, got {}", n))),
        }
    }
}

impl FromStr for Rgb {
    type Err = PixelateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(arr: [u8; 3]) -> Self {
        Rgb::from_array(arr)
    }
}

#[cfg(feature = "native")]
impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb::from_array(p.0)
    }
}

#[cfg(feature = "native")]
impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb(c.to_array())
    }
}

// =============================================================================
// Distance metric
// =============================================================================

/// How palette matching measures the distance between two colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Plain Euclidean distance over the R, G, B channels.
    #[default]
    Rgb,
    /// Euclidean distance in Oklab, a perceptual space.
    Oklab,
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" | "euclidean" => Ok(DistanceMetric::Rgb),
            "oklab" | "perceptual" => Ok(DistanceMetric::Oklab),
            other => Err(format!("unknown distance metric: {}", other)),
        }
    }
}

// =============================================================================
// Oklab
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Oklab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Oklab {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::from_linear_rgb(rgb.to_linear())
    }

    pub fn from_linear_rgb(lin: LinearRgb) -> Self {
        let l = 0.4122214708 * lin.r + 0.5363325363 * lin.g + 0.0514459929 * lin.b;
        let m = 0.2119034982 * lin.r + 0.6806995451 * lin.g + 0.1073969566 * lin.b;
        let s = 0.0883024619 * lin.r + 0.2817188376 * lin.g + 0.6299787005 * lin.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    #[inline(always)]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

// =============================================================================
// Linear RGB
// =============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    pub fn from_srgb(rgb: Rgb) -> Self {
        Self {
            r: srgb_to_linear(rgb.r as f32 / 255.0),
            g: srgb_to_linear(rgb.g as f32 / 255.0),
            b: srgb_to_linear(rgb.b as f32 / 255.0),
        }
    }
}

#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v > 0.04045 { ((v + 0.055) / 1.055).powf(2.4) } else { v / 12.92 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("FF8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("#f80".parse::<Rgb>().unwrap(), Rgb::new(255, 136, 0));
        assert_eq!(" #000000 ".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#12345", "#1234567", "#gg0000", "red", "#ff00é"] {
            assert!(
                matches!(bad.parse::<Rgb>(), Err(PixelateError::InvalidPalette { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_display() {
        let c = Rgb::new(1, 171, 255);
        assert_eq!(c.to_hex(), "#01abff");
        assert_eq!(c.to_string(), "#01abff");
        assert_eq!(c.to_hex().parse::<Rgb>().unwrap(), c);
    }

    #[test]
    fn test_rgb_distance() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.distance_squared(Rgb::BLACK), 255 * 255);
        assert!((red.distance(Rgb::WHITE) - 360.624).abs() < 1e-3);
        assert_eq!(red.distance_squared(red), 0);
    }

    #[test]
    fn test_oklab_extremes() {
        let black = Rgb::BLACK.to_oklab();
        let white = Rgb::WHITE.to_oklab();
        assert!(black.l.abs() < 1e-3);
        assert!((white.l - 1.0).abs() < 1e-3);
        assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("rgb".parse::<DistanceMetric>(), Ok(DistanceMetric::Rgb));
        assert_eq!("OKLAB".parse::<DistanceMetric>(), Ok(DistanceMetric::Oklab));
        assert!("lab".parse::<DistanceMetric>().is_err());
    }
}
