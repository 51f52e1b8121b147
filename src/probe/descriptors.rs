//! Primitive value types shared by probes and contacts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Geometric shape of a single electrode contact.
///
/// Which [`ContactShapeParams`] fields are meaningful depends on the shape:
/// `Circle` reads `radius`, `Square` reads `width`, `Rect` reads `width` and
/// `height`. That pairing is a caller contract, not a checked constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactShape {
    Circle,
    Rect,
    Square,
}

impl ContactShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactShape::Circle => "circle",
            ContactShape::Rect => "rect",
            ContactShape::Square => "square",
        }
    }
}

impl Default for ContactShape {
    fn default() -> Self {
        ContactShape::Circle
    }
}

impl Display for ContactShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape parameters for one contact.
///
/// Three independent optional scalars; unset fields are omitted from the
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactShapeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ContactShapeParams {
    /// Parameters for a circular contact
    pub fn circle(radius: f64) -> Self {
        ContactShapeParams {
            radius: Some(radius),
            width: None,
            height: None,
        }
    }

    /// Parameters for a square contact
    pub fn square(width: f64) -> Self {
        ContactShapeParams {
            radius: None,
            width: Some(width),
            height: None,
        }
    }

    /// Parameters for a rectangular contact
    pub fn rect(width: f64, height: f64) -> Self {
        ContactShapeParams {
            radius: None,
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Length unit of all coordinates in a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiUnits {
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "um")]
    Micrometers,
}

impl SiUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiUnits::Millimeters => "mm",
            SiUnits::Micrometers => "um",
        }
    }
}

impl Default for SiUnits {
    fn default() -> Self {
        SiUnits::Micrometers
    }
}

impl Display for SiUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dimensionality of a probe's coordinate space.
///
/// Serialized as the literal string `"2"` / `"3"`; documents in the wild
/// also carry the bare integers 2 / 3, which are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    pub fn as_u8(&self) -> u8 {
        match self {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }
}

impl Default for Dimensionality {
    fn default() -> Self {
        Dimensionality::Two
    }
}

impl Display for Dimensionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Dimensionality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Dimensionality::Two => serializer.serialize_str("2"),
            Dimensionality::Three => serializer.serialize_str("3"),
        }
    }
}

impl<'de> Deserialize<'de> for Dimensionality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::String(s) if s == "2" => Ok(Dimensionality::Two),
            serde_json::Value::String(s) if s == "3" => Ok(Dimensionality::Three),
            serde_json::Value::Number(n) if n.as_u64() == Some(2) => Ok(Dimensionality::Two),
            serde_json::Value::Number(n) if n.as_u64() == Some(3) => Ok(Dimensionality::Three),
            other => Err(serde::de::Error::custom(format!(
                "Invalid ndim value: {} (expected 2 or 3)",
                other
            ))),
        }
    }
}

/// Position of a point in a probe's plane.
///
/// Serialized as the pair `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPosition {
    pub x: f64,
    pub y: f64,
}

impl PlanarPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for PlanarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Serialize for PlanarPosition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlanarPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(PlanarPosition { x, y })
    }
}

/// Local coordinate axes of one contact within the probe plane.
///
/// Serialized as a 2×2 matrix `[[x1, y1], [x2, y2]]`, one row per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAxes {
    pub primary: PlanarPosition,
    pub secondary: PlanarPosition,
}

impl PlaneAxes {
    pub fn new(primary: PlanarPosition, secondary: PlanarPosition) -> Self {
        Self { primary, secondary }
    }

    /// The canonical axis pair `[[1, 0], [0, 1]]`
    pub fn canonical() -> Self {
        PlaneAxes {
            primary: PlanarPosition::new(1.0, 0.0),
            secondary: PlanarPosition::new(0.0, 1.0),
        }
    }
}

impl Serialize for PlaneAxes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [
            [self.primary.x, self.primary.y],
            [self.secondary.x, self.secondary.y],
        ]
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlaneAxes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [[x1, y1], [x2, y2]] = <[[f64; 2]; 2]>::deserialize(deserializer)?;
        Ok(PlaneAxes {
            primary: PlanarPosition::new(x1, y1),
            secondary: PlanarPosition::new(x2, y2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wire_form() {
        let position = PlanarPosition::new(1.5, -3.0);
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, "[1.5,-3.0]");

        let restored: PlanarPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, position);
    }

    #[test]
    fn test_plane_axes_wire_form() {
        let axes = PlaneAxes::canonical();
        let json = serde_json::to_string(&axes).unwrap();
        assert_eq!(json, "[[1.0,0.0],[0.0,1.0]]");

        let restored: PlaneAxes = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, axes);
    }

    #[test]
    fn test_ndim_accepts_string_and_integer() {
        let from_string: Dimensionality = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(from_string, Dimensionality::Three);

        let from_integer: Dimensionality = serde_json::from_str("2").unwrap();
        assert_eq!(from_integer, Dimensionality::Two);

        assert!(serde_json::from_str::<Dimensionality>("\"4\"").is_err());
    }

    #[test]
    fn test_ndim_serializes_as_string() {
        let json = serde_json::to_string(&Dimensionality::Two).unwrap();
        assert_eq!(json, "\"2\"");
    }

    #[test]
    fn test_shape_wire_names() {
        assert_eq!(serde_json::to_string(&ContactShape::Circle).unwrap(), "\"circle\"");
        assert_eq!(serde_json::to_string(&ContactShape::Rect).unwrap(), "\"rect\"");
        assert_eq!(serde_json::to_string(&ContactShape::Square).unwrap(), "\"square\"");

        let shape: ContactShape = serde_json::from_str("\"square\"").unwrap();
        assert_eq!(shape, ContactShape::Square);
    }

    #[test]
    fn test_shape_params_omit_unset_fields() {
        let params = ContactShapeParams::circle(0.3);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, "{\"radius\":0.3}");

        let rect = ContactShapeParams::rect(10.0, 20.0);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, "{\"width\":10.0,\"height\":20.0}");
    }

    #[test]
    fn test_si_units_wire_names() {
        assert_eq!(serde_json::to_string(&SiUnits::Millimeters).unwrap(), "\"mm\"");
        let units: SiUnits = serde_json::from_str("\"um\"").unwrap();
        assert_eq!(units, SiUnits::Micrometers);
    }
}
