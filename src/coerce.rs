//! Conversion of raw source strings into typed leaf values.
//!
//! Signed integers are decimal. Unsigned integers auto-detect their base from
//! a `0x`/`0o`/`0b` prefix. Booleans accept the usual literal spellings
//! (`1`, `t`, `TRUE`, `false`, ...). Narrow types reject out-of-range values
//! instead of truncating them.

use crate::schema::Kind;

/// A leaf type the walker can assign from a raw string.
pub trait Value: Sized {
    const KIND: Kind;

    /// Parse `raw`, returning a human-readable reason on failure.
    fn coerce(raw: &str) -> Result<Self, String>;
}

impl Value for String {
    const KIND: Kind = Kind::String;

    fn coerce(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl Value for bool {
    const KIND: Kind = Kind::Bool;

    fn coerce(raw: &str) -> Result<Self, String> {
        parse_bool(raw)
    }
}

macro_rules! impl_int {
    ($($t:ty),*) => {$(
        impl Value for $t {
            const KIND: Kind = Kind::Int;

            fn coerce(raw: &str) -> Result<Self, String> {
                let wide = parse_int(raw)?;
                <$t>::try_from(wide).map_err(|_| format!("out of range for {}", stringify!($t)))
            }
        }
    )*};
}

macro_rules! impl_uint {
    ($($t:ty),*) => {$(
        impl Value for $t {
            const KIND: Kind = Kind::Uint;

            fn coerce(raw: &str) -> Result<Self, String> {
                let wide = parse_uint(raw)?;
                <$t>::try_from(wide).map_err(|_| format!("out of range for {}", stringify!($t)))
            }
        }
    )*};
}

impl_int!(i8, i16, i32, i64, isize);
impl_uint!(u8, u16, u32, u64, usize);

impl Value for f32 {
    const KIND: Kind = Kind::Float;

    fn coerce(raw: &str) -> Result<Self, String> {
        raw.parse::<f32>().map_err(|e| e.to_string())
    }
}

impl Value for f64 {
    const KIND: Kind = Kind::Float;

    fn coerce(raw: &str) -> Result<Self, String> {
        parse_float(raw)
    }
}

pub fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>().map_err(|e| e.to_string())
}

/// Parse an unsigned integer, picking the radix from a two-character prefix.
pub fn parse_uint(raw: &str) -> Result<u64, String> {
    let (digits, radix) = if let Some(rest) = raw.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = raw.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = raw.strip_prefix("0b") {
        (rest, 2)
    } else {
        (raw, 10)
    };
    // `from_str_radix` tolerates a leading sign.
    if digits.starts_with('+') {
        return Err("invalid digit found in string".into());
    }
    u64::from_str_radix(digits, radix).map_err(|e| e.to_string())
}

pub fn parse_float(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>().map_err(|e| e.to_string())
}

pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err("not a boolean literal".into()),
    }
}

/// Coerce `raw` by kind into a TOML value, for rendering defaults.
///
/// Unsigned values beyond TOML's `i64` range are rendered as strings, which
/// the file source coerces back like any other raw value.
pub fn to_toml(kind: Kind, raw: &str) -> Result<toml::Value, String> {
    Ok(match kind {
        Kind::String => toml::Value::String(raw.to_string()),
        Kind::Int => toml::Value::Integer(parse_int(raw)?),
        Kind::Uint => {
            let n = parse_uint(raw)?;
            match i64::try_from(n) {
                Ok(n) => toml::Value::Integer(n),
                Err(_) => toml::Value::String(n.to_string()),
            }
        }
        Kind::Float => toml::Value::Float(parse_float(raw)?),
        Kind::Bool => toml::Value::Boolean(parse_bool(raw)?),
    })
}
