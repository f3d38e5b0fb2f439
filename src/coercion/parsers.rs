//! Type parsers.
//!
//! One pure parser per `FieldType`. A parser takes the (possibly absent)
//! field value and returns the coerced value, or `None` when the value
//! cannot be coerced to the type.

use lazy_static::lazy_static;
use regex::Regex;

use crate::record::Value;
use crate::validation::schema::FieldType;

/// A type parser.
pub type Parser = fn(Option<Value>) -> Option<Value>;

lazy_static! {
    /// Loose suffix match: `"t"`, `"yes"`, `"1"` are true, and so is
    /// anything ending in them.
    static ref TRUTHY_PATTERN: Regex = Regex::new(r"(?i)^true$|t$|yes$|y$|1$").unwrap();
}

/// Parser for a field type.
pub fn parser_for(field_type: FieldType) -> Parser {
    match field_type {
        FieldType::Array => parse_array,
        FieldType::Boolean => parse_boolean,
        FieldType::Function => parse_function,
        FieldType::Integer => parse_integer,
        FieldType::Number => parse_number,
        FieldType::Object => parse_object,
        FieldType::String => parse_string,
        FieldType::Any => parse_any,
    }
}

pub fn parse_array(value: Option<Value>) -> Option<Value> {
    value.filter(|v| v.as_array().is_some())
}

pub fn parse_boolean(value: Option<Value>) -> Option<Value> {
    let value = value.filter(|v| !v.is_null())?;
    let truthy = match &value {
        Value::Bool(b) => *b,
        other => TRUTHY_PATTERN.is_match(&other.to_string()),
    };
    Some(Value::Bool(truthy))
}

pub fn parse_function(value: Option<Value>) -> Option<Value> {
    value.filter(|v| v.as_callable().is_some())
}

/// Strict parse, then truncation toward zero: `"5.2"` is 5, `"5.2a"` is
/// rejected.
pub fn parse_integer(value: Option<Value>) -> Option<Value> {
    if let Some(Value::Number(n)) = &value {
        if n.is_i64() || n.is_u64() {
            return value;
        }
    }
    let truncated = strict_float(value.as_ref()?)?.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(Value::from(truncated as i64))
}

/// Strict float parse: `"1.2a"` is rejected, not read as 1.2.
pub fn parse_number(value: Option<Value>) -> Option<Value> {
    if let Some(Value::Number(_)) = &value {
        return value;
    }
    let parsed = strict_float(value.as_ref()?)?;
    serde_json::Number::from_f64(parsed).map(Value::Number)
}

/// Any non-primitive value, arrays included.
pub fn parse_object(value: Option<Value>) -> Option<Value> {
    value.filter(|v| v.as_object().is_some() || v.as_array().is_some())
}

pub fn parse_string(value: Option<Value>) -> Option<Value> {
    match value? {
        Value::Null => None,
        s @ Value::String(_) => Some(s),
        other => Some(Value::String(other.to_string())),
    }
}

pub fn parse_any(value: Option<Value>) -> Option<Value> {
    value
}

/// Parse a number or a numeric string in full. Surrounding whitespace is
/// ignored; trailing garbage, empty strings and non-finite results are not.
fn strict_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}
