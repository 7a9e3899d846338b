//! Primitive kinds and the numeric conversions between them
//!
//! Widening conversions never lose range; narrowing conversions may truncate
//! or lose precision and are flagged so the emission backend can render an
//! explicit cast.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Builtin scalar kinds known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    Char,
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
    Decimal,
}

/// Direction of a numeric conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericConversion {
    Widening,
    Narrowing,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt8,
        PrimitiveKind::UInt16,
        PrimitiveKind::UInt32,
        PrimitiveKind::UInt64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Decimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::UInt8 => "uint8",
            PrimitiveKind::UInt16 => "uint16",
            PrimitiveKind::UInt32 => "uint32",
            PrimitiveKind::UInt64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Decimal => "decimal",
        }
    }

    pub fn is_integral(&self) -> bool {
        self.integral_range().is_some()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_floating() || *self == PrimitiveKind::Decimal
    }

    /// Inclusive value range of integral kinds (char counts as an unsigned 16-bit code unit)
    fn integral_range(&self) -> Option<(i128, i128)> {
        let range = match self {
            PrimitiveKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
            PrimitiveKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
            PrimitiveKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
            PrimitiveKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
            PrimitiveKind::UInt8 => (0, u8::MAX as i128),
            PrimitiveKind::UInt16 => (0, u16::MAX as i128),
            PrimitiveKind::UInt32 => (0, u32::MAX as i128),
            PrimitiveKind::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Conversion from `self` to `target`, if one exists
    ///
    /// `bool` converts to nothing but itself. Integral → integral is widening
    /// when the target range covers the source range. Integral → floating or
    /// decimal is widening. Everything leaving floating point or decimal for a
    /// smaller domain narrows.
    pub fn conversion_to(&self, target: PrimitiveKind) -> Option<NumericConversion> {
        use NumericConversion::*;
        use PrimitiveKind::*;

        if *self == target {
            return Some(Widening);
        }

        match (*self, target) {
            (Bool, _) | (_, Bool) => None,

            (Char, t) if t.is_integral() => {
                Some(if covers(t, UInt16) { Widening } else { Narrowing })
            }
            (Char, _) => Some(Widening),
            (s, Char) if s.is_integral() => Some(Narrowing),
            (_, Char) => Some(Narrowing),

            (s, t) if s.is_integral() && t.is_integral() => {
                Some(if covers(t, s) { Widening } else { Narrowing })
            }
            (s, _) if s.is_integral() => Some(Widening),

            (Float32, Float64) => Some(Widening),
            _ => Some(Narrowing),
        }
    }
}

/// Whether the integral range of `outer` contains that of `inner`
fn covers(outer: PrimitiveKind, inner: PrimitiveKind) -> bool {
    match (outer.integral_range(), inner.integral_range()) {
        (Some((omin, omax)), Some((imin, imax))) => omin <= imin && imax <= omax,
        _ => false,
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
