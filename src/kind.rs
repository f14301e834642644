// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The closed set of element kinds and the two supported dimensionalities.
//!
//! Every kind has a one-byte wire identifier and a fixed element width. The
//! identifiers are part of the on-disk format; never renumber them. Zero is
//! reserved so that a zeroed header never parses as a valid kind.
//!
//! | Kind      | Id | Width | Rust storage |
//! |-----------|----|-------|--------------|
//! | `int8`    | 1  | 1     | `i8`         |
//! | `int16`   | 2  | 2     | `i16`        |
//! | `int32`   | 3  | 4     | `i32`        |
//! | `int64`   | 4  | 8     | `i64`        |
//! | `uint8`   | 5  | 1     | `u8`         |
//! | `uint16`  | 6  | 2     | `u16`        |
//! | `uint32`  | 7  | 4     | `u32`        |
//! | `uint64`  | 8  | 8     | `u64`        |
//! | `float32` | 9  | 4     | `f32`        |
//! | `float64` | 10 | 8     | `f64`        |
//! | `bool`    | 11 | 1     | `bool`       |
//! | `text`    | 12 | cell  | `TextCells`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseTagError;

/// Scalar data type of a container's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    /// Fixed-width UTF-8 text cells. The cell width belongs to the value, not the kind.
    Text,
}

impl ElementKind {
    /// Every kind, in wire-id order.
    pub const ALL: [ElementKind; 12] = [
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Int64,
        ElementKind::UInt8,
        ElementKind::UInt16,
        ElementKind::UInt32,
        ElementKind::UInt64,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::Bool,
        ElementKind::Text,
    ];

    /// Every kind that can be converted to and from the others.
    pub const NUMERIC: [ElementKind; 11] = [
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Int64,
        ElementKind::UInt8,
        ElementKind::UInt16,
        ElementKind::UInt32,
        ElementKind::UInt64,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::Bool,
    ];

    /// Wire identifier written as the first header byte.
    pub const fn id(self) -> u8 {
        match self {
            ElementKind::Int8 => 1,
            ElementKind::Int16 => 2,
            ElementKind::Int32 => 3,
            ElementKind::Int64 => 4,
            ElementKind::UInt8 => 5,
            ElementKind::UInt16 => 6,
            ElementKind::UInt32 => 7,
            ElementKind::UInt64 => 8,
            ElementKind::Float32 => 9,
            ElementKind::Float64 => 10,
            ElementKind::Bool => 11,
            ElementKind::Text => 12,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            1 => ElementKind::Int8,
            2 => ElementKind::Int16,
            3 => ElementKind::Int32,
            4 => ElementKind::Int64,
            5 => ElementKind::UInt8,
            6 => ElementKind::UInt16,
            7 => ElementKind::UInt32,
            8 => ElementKind::UInt64,
            9 => ElementKind::Float32,
            10 => ElementKind::Float64,
            11 => ElementKind::Bool,
            12 => ElementKind::Text,
            _ => return None,
        })
    }

    /// Bytes per element, or `None` for text (width is per value).
    pub const fn width(self) -> Option<usize> {
        match self {
            ElementKind::Int8 | ElementKind::UInt8 | ElementKind::Bool => Some(1),
            ElementKind::Int16 | ElementKind::UInt16 => Some(2),
            ElementKind::Int32 | ElementKind::UInt32 | ElementKind::Float32 => Some(4),
            ElementKind::Int64 | ElementKind::UInt64 | ElementKind::Float64 => Some(8),
            ElementKind::Text => None,
        }
    }

    /// Canonical lowercase name, as used by numeric libraries (`"float32"`).
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "int8",
            ElementKind::Int16 => "int16",
            ElementKind::Int32 => "int32",
            ElementKind::Int64 => "int64",
            ElementKind::UInt8 => "uint8",
            ElementKind::UInt16 => "uint16",
            ElementKind::UInt32 => "uint32",
            ElementKind::UInt64 => "uint64",
            ElementKind::Float32 => "float32",
            ElementKind::Float64 => "float64",
            ElementKind::Bool => "bool",
            ElementKind::Text => "text",
        }
    }

    /// Look a kind up by name. Accepts `str` and `string` as aliases for text.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "str" | "string" => Some(ElementKind::Text),
            other => Self::ALL.iter().copied().find(|k| k.name() == other),
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ElementKind::Int8
                | ElementKind::Int16
                | ElementKind::Int32
                | ElementKind::Int64
                | ElementKind::UInt8
                | ElementKind::UInt16
                | ElementKind::UInt32
                | ElementKind::UInt64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ElementKind::Float32 | ElementKind::Float64)
    }

    /// Whether values of `self` can be converted into `target`.
    ///
    /// Text only converts to itself; every other pair is total.
    pub const fn converts_to(self, target: ElementKind) -> bool {
        match (self, target) {
            (ElementKind::Text, ElementKind::Text) => true,
            (ElementKind::Text, _) | (_, ElementKind::Text) => false,
            _ => true,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseTagError::UnknownKind(s.to_string()))
    }
}

// ============================================================================
// DIMENSIONALITY
// ============================================================================

/// Flat sequence (one axis) or grid (two axes). Nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    Flat,
    Grid,
}

impl Dimensionality {
    /// Number of axes: 1 for `Flat`, 2 for `Grid`.
    pub const fn arity(self) -> usize {
        match self {
            Dimensionality::Flat => 1,
            Dimensionality::Grid => 2,
        }
    }

    pub const fn from_arity(ndim: usize) -> Option<Self> {
        match ndim {
            1 => Some(Dimensionality::Flat),
            2 => Some(Dimensionality::Grid),
            _ => None,
        }
    }

    /// Wire byte; equal to the arity.
    pub const fn id(self) -> u8 {
        self.arity() as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        Self::from_arity(id as usize)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Dimensionality::Flat => "flat",
            Dimensionality::Grid => "grid",
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimensionality {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "array" | "1" => Ok(Dimensionality::Flat),
            "grid" | "matrix" | "2" => Ok(Dimensionality::Grid),
            _ => Err(ParseTagError::UnknownDimensionality(s.to_string())),
        }
    }
}
