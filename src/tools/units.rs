//! Unit Converter
//!
//! Each unit converts to and from its category's base unit with an affine
//! map `base = (x - offset) * scale`. Only temperature uses a non-zero
//! offset.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Volume,
    Area,
    Speed,
    Time,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub id: &'static str,
    pub label: &'static str,
    scale: f64,
    offset: f64,
}

const fn linear(id: &'static str, label: &'static str, scale: f64) -> Unit {
    Unit {
        id,
        label,
        scale,
        offset: 0.0,
    }
}

impl Unit {
    pub fn to_base(&self, value: f64) -> f64 {
        (value - self.offset) * self.scale
    }

    pub fn from_base(&self, value: f64) -> f64 {
        value / self.scale + self.offset
    }
}

const LENGTH: &[Unit] = &[
    linear("mm", "Millimeter", 0.001),
    linear("cm", "Centimeter", 0.01),
    linear("m", "Meter", 1.0),
    linear("km", "Kilometer", 1000.0),
    linear("in", "Inch", 0.0254),
    linear("ft", "Foot", 0.3048),
    linear("yd", "Yard", 0.9144),
    linear("mi", "Mile", 1609.344),
];

const MASS: &[Unit] = &[
    linear("mg", "Milligram", 1e-6),
    linear("g", "Gram", 0.001),
    linear("kg", "Kilogram", 1.0),
    linear("t", "Tonne", 1000.0),
    linear("oz", "Ounce", 0.028_349_523_125),
    linear("lb", "Pound", 0.453_592_37),
];

const TEMPERATURE: &[Unit] = &[
    Unit {
        id: "c",
        label: "Celsius",
        scale: 1.0,
        offset: 0.0,
    },
    Unit {
        id: "f",
        label: "Fahrenheit",
        scale: 5.0 / 9.0,
        offset: 32.0,
    },
    Unit {
        id: "k",
        label: "Kelvin",
        scale: 1.0,
        offset: 273.15,
    },
];

const VOLUME: &[Unit] = &[
    linear("ml", "Milliliter", 0.001),
    linear("l", "Liter", 1.0),
    linear("m3", "Cubic meter", 1000.0),
    linear("tsp", "Teaspoon", 0.004_928_921_593_75),
    linear("tbsp", "Tablespoon", 0.014_786_764_781_25),
    linear("cup", "Cup", 0.236_588_236_5),
    linear("gal", "Gallon", 3.785_411_784),
];

const AREA: &[Unit] = &[
    linear("cm2", "Square centimeter", 1e-4),
    linear("m2", "Square meter", 1.0),
    linear("ha", "Hectare", 10_000.0),
    linear("km2", "Square kilometer", 1e6),
    linear("ft2", "Square foot", 0.092_903_04),
    linear("acre", "Acre", 4_046.856_422_4),
];

const SPEED: &[Unit] = &[
    linear("mps", "Meter/second", 1.0),
    linear("kmh", "Kilometer/hour", 1.0 / 3.6),
    linear("mph", "Mile/hour", 0.447_04),
    linear("knot", "Knot", 1852.0 / 3600.0),
];

const TIME: &[Unit] = &[
    linear("ms", "Millisecond", 0.001),
    linear("s", "Second", 1.0),
    linear("min", "Minute", 60.0),
    linear("h", "Hour", 3600.0),
    linear("day", "Day", 86_400.0),
    linear("week", "Week", 604_800.0),
];

const DATA: &[Unit] = &[
    linear("bit", "Bit", 0.125),
    linear("b", "Byte", 1.0),
    linear("kb", "Kilobyte", 1024.0),
    linear("mb", "Megabyte", 1_048_576.0),
    linear("gb", "Gigabyte", 1_073_741_824.0),
    linear("tb", "Terabyte", 1_099_511_627_776.0),
];

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Length,
        Self::Mass,
        Self::Temperature,
        Self::Volume,
        Self::Area,
        Self::Speed,
        Self::Time,
        Self::Data,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Temperature => "temperature",
            Self::Volume => "volume",
            Self::Area => "area",
            Self::Speed => "speed",
            Self::Time => "time",
            Self::Data => "data",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn units(&self) -> &'static [Unit] {
        match self {
            Self::Length => LENGTH,
            Self::Mass => MASS,
            Self::Temperature => TEMPERATURE,
            Self::Volume => VOLUME,
            Self::Area => AREA,
            Self::Speed => SPEED,
            Self::Time => TIME,
            Self::Data => DATA,
        }
    }

    pub fn unit(&self, id: &str) -> Option<&'static Unit> {
        self.units().iter().find(|u| u.id.eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Unknown unit '{unit}' for {category}")]
    UnknownUnit { category: Category, unit: String },
}

/// Convert between two units of the same category
pub fn convert(category: Category, value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let lookup = |id: &str| {
        category.unit(id).ok_or_else(|| ConvertError::UnknownUnit {
            category,
            unit: id.to_string(),
        })
    };
    let from = lookup(from)?;
    let to = lookup(to)?;
    Ok(to.from_base(from.to_base(value)))
}

/// Trim float noise for display, e.g. `212.00000000000003` → `212`
pub fn format_value(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    let text = format!("{:.6}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_boiling_point() {
        let f = convert(Category::Temperature, 100.0, "c", "f").unwrap();
        assert!(close(f, 212.0));
        let c = convert(Category::Temperature, f, "f", "c").unwrap();
        assert!(close(c, 100.0));
        let k = convert(Category::Temperature, 0.0, "c", "k").unwrap();
        assert!(close(k, 273.15));
    }

    #[test]
    fn test_round_trip_every_pair() {
        for category in Category::ALL {
            for from in category.units() {
                for to in category.units() {
                    let there = convert(category, 37.5, from.id, to.id).unwrap();
                    let back = convert(category, there, to.id, from.id).unwrap();
                    assert!(close(back, 37.5), "{} {} -> {}", category, from.id, to.id);
                }
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert!(close(convert(Category::Length, 1.0, "mi", "km").unwrap(), 1.609344));
        assert!(close(convert(Category::Data, 1.0, "mb", "kb").unwrap(), 1024.0));
        assert!(close(convert(Category::Time, 2.0, "h", "min").unwrap(), 120.0));
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Category::Mass, 1.0, "kg", "stone").unwrap_err();
        assert_eq!(err.to_string(), "Unknown unit 'stone' for mass");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(212.00000000000003), "212");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(-0.0000001), "0");
    }
}
