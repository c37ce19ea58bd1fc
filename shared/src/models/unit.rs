//! Measurement units
//!
//! Every unit belongs to exactly one physical category and is defined as an
//! exact multiple of that category's base unit (gram, milliliter, piece).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical category of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    Mass,
    Volume,
    Count,
}

/// Measurement unit for stock and ingredient quantities
///
/// Serialized as the snake_case name; deserialization also accepts symbols
/// (`"kg"`, `"ml"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Unit {
    Milligram,
    Gram,
    Kilogram,
    Milliliter,
    Centiliter,
    Liter,
    Piece,
    Dozen,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Milligram,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Milliliter,
        Unit::Centiliter,
        Unit::Liter,
        Unit::Piece,
        Unit::Dozen,
    ];

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Milligram | Unit::Gram | Unit::Kilogram => UnitCategory::Mass,
            Unit::Milliliter | Unit::Centiliter | Unit::Liter => UnitCategory::Volume,
            Unit::Piece | Unit::Dozen => UnitCategory::Count,
        }
    }

    /// Multiple of the category base unit (g, ml, piece)
    pub fn factor(&self) -> Decimal {
        match self {
            // 0.001
            Unit::Milligram => Decimal::new(1, 3),
            Unit::Gram => Decimal::ONE,
            Unit::Kilogram => Decimal::from(1000),
            Unit::Milliliter => Decimal::ONE,
            Unit::Centiliter => Decimal::TEN,
            Unit::Liter => Decimal::from(1000),
            Unit::Piece => Decimal::ONE,
            Unit::Dozen => Decimal::from(12),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Centiliter => "cl",
            Unit::Liter => "l",
            Unit::Piece => "pc",
            Unit::Dozen => "doz",
        }
    }

    pub fn is_compatible_with(&self, other: Unit) -> bool {
        self.category() == other.category()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown unit name or symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "mg" | "milligram" => Unit::Milligram,
            "g" | "gram" => Unit::Gram,
            "kg" | "kilogram" => Unit::Kilogram,
            "ml" | "milliliter" => Unit::Milliliter,
            "cl" | "centiliter" => Unit::Centiliter,
            "l" | "liter" => Unit::Liter,
            "pc" | "piece" => Unit::Piece,
            "doz" | "dozen" => Unit::Dozen,
            _ => return Err(UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnknownUnit;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
