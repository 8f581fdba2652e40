//! Page sizes and physical lengths.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};

/// Points per millimeter (1 inch = 72 points = 25.4mm).
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// A length in points.
///
/// Configuration files may write a bare number (points) or a string with a
/// `pt`, `mm`, `cm` or `in` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(pub f32);

impl Length {
    pub fn pt(value: f32) -> Self {
        Self(value)
    }

    pub fn mm(value: f32) -> Self {
        Self(mm_to_pt(value))
    }

    pub fn as_pt(self) -> f32 {
        self.0
    }

    /// Parse a length value with optional unit (e.g., "10pt", "5mm", "12")
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let (number, scale) = if let Some(val) = input.strip_suffix("pt") {
            (val, 1.0)
        } else if let Some(val) = input.strip_suffix("mm") {
            (val, POINTS_PER_MM)
        } else if let Some(val) = input.strip_suffix("cm") {
            (val, POINTS_PER_MM * 10.0)
        } else if let Some(val) = input.strip_suffix("in") {
            (val, 72.0)
        } else {
            (input, 1.0)
        };

        number
            .trim()
            .parse::<f32>()
            .map(|v| Length(v * scale))
            .map_err(|e| format!("Invalid length '{}': {}", input, e))
    }
}

impl Serialize for Length {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f32(self.0)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LengthDef {
            Num(f32),
            Str(String),
        }

        match LengthDef::deserialize(deserializer)? {
            LengthDef::Num(v) => Ok(Length(v)),
            LengthDef::Str(s) => Length::parse(&s).map_err(de::Error::custom),
        }
    }
}

/// Physical page size. Always portrait; `Custom` carries explicit points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: Length, height: Length },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom {
                width: width.as_pt(),
                height: height.as_pt(),
            }),
        }
    }
}
