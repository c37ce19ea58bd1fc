//! Unified error codes for the menu costing workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Menu errors
//! - 6xxx: Product / inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Quantity is zero, negative or otherwise unusable
    InvalidQuantity = 9,

    // ==================== 4xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 4001,
    /// Menu has no ingredients
    MenuEmpty = 4002,
    /// Menu cannot be prepared with current stock
    MenuNotPreparable = 4003,
    /// Menu sale price is not positive
    MenuInvalidPrice = 4004,
    /// Menu service date lies in the past
    MenuServiceDateInPast = 4005,
    /// Menu is archived
    MenuArchived = 4006,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid unit cost
    ProductInvalidCost = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,
    /// Units belong to different physical categories
    IncompatibleUnits = 6101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage / collaborator error
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidQuantity => "Quantity must be positive",

            // Menu
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuEmpty => "Menu has no ingredients",
            ErrorCode::MenuNotPreparable => "Menu cannot be prepared with current stock",
            ErrorCode::MenuInvalidPrice => "Menu sale price must be positive",
            ErrorCode::MenuServiceDateInPast => "Menu service date must be today or later",
            ErrorCode::MenuArchived => "Menu is archived",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidCost => "Product has invalid unit cost",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::IncompatibleUnits => "Units belong to different categories",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidQuantity),

            // Menu
            4001 => Ok(ErrorCode::MenuNotFound),
            4002 => Ok(ErrorCode::MenuEmpty),
            4003 => Ok(ErrorCode::MenuNotPreparable),
            4004 => Ok(ErrorCode::MenuInvalidPrice),
            4005 => Ok(ErrorCode::MenuServiceDateInPast),
            4006 => Ok(ErrorCode::MenuArchived),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidCost),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6101 => Ok(ErrorCode::IncompatibleUnits),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
