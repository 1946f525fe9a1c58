//! Room model
//!
//! A room is a named, typed rectangle. Its area is always derived from its
//! dimensions and is never settable on its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest dimension (ft) considered reasonable by [`validate_room`]
pub const MIN_REASONABLE_FT: f64 = 4.0;

/// Largest dimension (ft) considered reasonable by [`validate_room`]
pub const MAX_REASONABLE_FT: f64 = 50.0;

/// Surrogate identifier assigned when a room is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u64);

impl RoomId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

/// Room category
///
/// Unknown category names map to [`RoomType::Other`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    Living,
    Dining,
    Garage,
    Office,
    Laundry,
    #[default]
    Other,
}

impl RoomType {
    /// Display grouping order used by floorplan summaries
    pub const DISPLAY_ORDER: [RoomType; 9] = [
        RoomType::Living,
        RoomType::Kitchen,
        RoomType::Dining,
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Office,
        RoomType::Garage,
        RoomType::Laundry,
        RoomType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bedroom => "bedroom",
            Self::Bathroom => "bathroom",
            Self::Kitchen => "kitchen",
            Self::Living => "living",
            Self::Dining => "dining",
            Self::Garage => "garage",
            Self::Office => "office",
            Self::Laundry => "laundry",
            Self::Other => "other",
        }
    }

    /// Parse a category name, case-insensitively, falling back to `Other`
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bedroom" => Self::Bedroom,
            "bathroom" => Self::Bathroom,
            "kitchen" => Self::Kitchen,
            "living" => Self::Living,
            "dining" => Self::Dining,
            "garage" => Self::Garage,
            "office" => Self::Office,
            "laundry" => Self::Laundry,
            _ => Self::Other,
        }
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A room in a floorplan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    id: RoomId,
    name: String,
    #[serde(rename = "type")]
    kind: RoomType,
    length: f64,
    width: f64,
    area: f64,
}

impl Room {
    /// Create a room; area is computed from the dimensions
    pub(crate) fn new(id: RoomId, name: impl Into<String>, kind: RoomType, length: f64, width: f64) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            length,
            width,
            area: length * width,
        }
    }

    /// Copy of this room with new dimensions and a recomputed area
    pub(crate) fn resized(&self, length: f64, width: f64) -> Self {
        Self::new(self.id, self.name.clone(), self.kind, length, width)
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RoomType {
        self.kind
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn area(&self) -> f64 {
        self.area
    }
}

/// Reasons a room description looks unreasonable for construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomValidationError {
    #[error("Room name must not be empty")]
    EmptyName,

    #[error("Room dimensions must be positive, got {length} x {width}")]
    NonPositive { length: f64, width: f64 },

    #[error(
        "Dimension {value} ft is outside the reasonable range {}-{} ft",
        MIN_REASONABLE_FT,
        MAX_REASONABLE_FT
    )]
    OutOfRange { value: f64 },
}

/// Advisory check for a room description
///
/// The floorplan store never enforces this; callers decide what to do with
/// the result.
pub fn validate_room(name: &str, length: f64, width: f64) -> Result<(), RoomValidationError> {
    if name.trim().is_empty() {
        return Err(RoomValidationError::EmptyName);
    }

    if length <= 0.0 || width <= 0.0 {
        return Err(RoomValidationError::NonPositive { length, width });
    }

    for value in [length, width] {
        if !(MIN_REASONABLE_FT..=MAX_REASONABLE_FT).contains(&value) {
            return Err(RoomValidationError::OutOfRange { value });
        }
    }

    Ok(())
}
