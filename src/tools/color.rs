//! Color Picker: hex, RGB and HSL conversions plus palette generation

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(input.to_string());
        let hex = input.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d == 0.0 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: h * 60.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Relative luminance, for picking readable text on a swatch
    pub fn is_light(&self) -> bool {
        let y = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        y > 150.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let channel = |mut t: f64| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round() as u8
        };

        Rgb::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    fn rotate(&self, degrees: f64) -> Hsl {
        Hsl::new(self.h + degrees, self.s, self.l)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.0}, {:.0}%, {:.0}%)", self.h, self.s, self.l)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Harmony {
    Complementary,
    Analogous,
    Triadic,
    Tints,
    Shades,
}

impl Harmony {
    pub const ALL: [Harmony; 5] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::Tints,
        Self::Shades,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complementary => "Complementary",
            Self::Analogous => "Analogous",
            Self::Triadic => "Triadic",
            Self::Tints => "Tints",
            Self::Shades => "Shades",
        }
    }
}

/// Palette built around a base color; the base is always first
pub fn palette(base: Rgb, harmony: Harmony) -> Vec<Rgb> {
    let hsl = base.to_hsl();
    let mut colors = vec![base];

    match harmony {
        Harmony::Complementary => colors.push(hsl.rotate(180.0).to_rgb()),
        Harmony::Analogous => {
            colors.push(hsl.rotate(-30.0).to_rgb());
            colors.push(hsl.rotate(30.0).to_rgb());
        }
        Harmony::Triadic => {
            colors.push(hsl.rotate(120.0).to_rgb());
            colors.push(hsl.rotate(240.0).to_rgb());
        }
        Harmony::Tints => {
            for step in 1..=4 {
                let l = hsl.l + (100.0 - hsl.l) * step as f64 / 5.0;
                colors.push(Hsl::new(hsl.h, hsl.s, l).to_rgb());
            }
        }
        Harmony::Shades => {
            for step in 1..=4 {
                let l = hsl.l * (1.0 - step as f64 / 5.0);
                colors.push(Hsl::new(hsl.h, hsl.s, l).to_rgb());
            }
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#0077B6").unwrap(), Rgb::new(0, 0x77, 0xb6));
        assert_eq!(Rgb::from_hex("fff").unwrap(), Rgb::new(255, 255, 255));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert_eq!(Rgb::new(255, 94, 171).to_hex(), "#ff5eab");
    }

    #[test]
    fn test_primary_hsl() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));
        let blue = Rgb::new(0, 0, 255).to_hsl();
        assert_eq!(blue.h, 240.0);
        let grey = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(grey.s, 0.0);
    }

    #[test]
    fn test_hsl_round_trip() {
        for hex in ["#00b4d8", "#03045e", "#ffecb3", "#ff79c6", "#1a2436", "#808080"] {
            let rgb = Rgb::from_hex(hex).unwrap();
            assert_eq!(rgb.to_hsl().to_rgb(), rgb, "{}", hex);
        }
    }

    #[test]
    fn test_complementary_of_red_is_cyan() {
        let colors = palette(Rgb::new(255, 0, 0), Harmony::Complementary);
        assert_eq!(colors, vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 255)]);
    }

    #[test]
    fn test_tints_get_lighter_and_shades_darker() {
        let base = Rgb::from_hex("#0077b6").unwrap();
        let tints = palette(base, Harmony::Tints);
        let shades = palette(base, Harmony::Shades);
        assert_eq!(tints.len(), 5);
        assert!(tints.windows(2).all(|w| w[1].to_hsl().l >= w[0].to_hsl().l));
        assert!(shades.windows(2).all(|w| w[1].to_hsl().l <= w[0].to_hsl().l));
    }
}
