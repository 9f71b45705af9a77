//! Schema validation for product request bodies.
//!
//! Each function checks a decoded JSON body field by field and either returns
//! a typed payload or every field error it found, keyed by wire field name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{ProductCreate, ProductPatch};

pub const NAME_FIELD: &str = "nombre";
pub const PRICE_FIELD: &str = "precio";
pub const STOCK_FIELD: &str = "stock";
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const NAME_MAX_LENGTH: usize = 250;
pub const PRICE_MAX_DIGITS: u32 = 6;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const INVALID_NUMBER: &str = "A valid number is required.";
const INVALID_INTEGER: &str = "A valid integer is required.";

/// Field-level validation failures, rendered on the wire as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A failure that concerns the body as a whole rather than one field.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a create body: every field is required.
pub fn validate_create(body: &Value) -> Result<ProductCreate, ValidationErrors> {
    let fields = as_object(body)?;
    let mut errors = ValidationErrors::new();

    let name = required(fields, NAME_FIELD, parse_name, &mut errors);
    let price = required(fields, PRICE_FIELD, parse_price, &mut errors);
    let stock = required(fields, STOCK_FIELD, parse_stock, &mut errors);

    match (name, price, stock) {
        (Some(name), Some(price), Some(stock)) if errors.is_empty() => Ok(ProductCreate { name, price, stock }),
        _ => Err(errors),
    }
}

/// Validates an update body.
///
/// A full update (`partial == false`) has the same requirements as create.
/// A partial update only checks the fields that are present.
pub fn validate_update(body: &Value, partial: bool) -> Result<ProductPatch, ValidationErrors> {
    if !partial {
        let full = validate_create(body)?;
        return Ok(ProductPatch {
            name: Some(full.name),
            price: Some(full.price),
            stock: Some(full.stock),
        });
    }

    let fields = as_object(body)?;
    let mut errors = ValidationErrors::new();

    let patch = ProductPatch {
        name: optional(fields, NAME_FIELD, parse_name, &mut errors),
        price: optional(fields, PRICE_FIELD, parse_price, &mut errors),
        stock: optional(fields, STOCK_FIELD, parse_stock, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    let kind = match body {
        Value::Object(fields) => return Ok(fields),
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    };
    Err(ValidationErrors::non_field(format!(
        "Invalid data. Expected a JSON object, but got {kind}."
    )))
}

fn required<T>(
    fields: &Map<String, Value>,
    field: &str,
    parse: fn(&Value) -> Result<T, String>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    if !fields.contains_key(field) {
        errors.add(field, REQUIRED);
        return None;
    }
    optional(fields, field, parse, errors)
}

fn optional<T>(
    fields: &Map<String, Value>,
    field: &str,
    parse: fn(&Value) -> Result<T, String>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match fields.get(field)? {
        Value::Null => {
            errors.add(field, NOT_NULL);
            None
        }
        value => parse(value).map_err(|message| errors.add(field, message)).ok(),
    }
}

/// Accepts strings and numbers; surrounding whitespace is trimmed.
pub fn parse_name(value: &Value) -> Result<String, String> {
    let raw = match value {
        Value::String(s) => s.as_str().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return Err(NOT_A_STRING.to_string()),
    };
    let name = raw.trim();
    if name.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(format!("Ensure this field has no more than {NAME_MAX_LENGTH} characters."));
    }
    Ok(name.to_string())
}

/// Accepts decimal strings and numbers, checks precision, and quantizes to two places.
pub fn parse_price(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(INVALID_NUMBER.to_string()),
    };
    if text.is_empty() || text.contains('_') {
        return Err(INVALID_NUMBER.to_string());
    }
    let mut price = match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(price) => price,
        // Well-formed but beyond `Decimal`'s range: still a precision error.
        Err(_) => {
            let (total, decimals) = literal_precision(&text).ok_or_else(|| INVALID_NUMBER.to_string())?;
            check_digits(total, decimals)?;
            return Err(INVALID_NUMBER.to_string());
        }
    };

    check_precision(&price)?;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

fn check_precision(value: &Decimal) -> Result<(), String> {
    let decimals = value.scale();
    let digits = value.mantissa().unsigned_abs().to_string().len() as u32;
    check_digits(u64::from(digits.max(decimals)), u64::from(decimals))
}

/// `(total digits, decimal places)` of a decimal literal such as `1e300` or
/// `-0.5E-40`, or `None` when the text is not a number.
fn literal_precision(text: &str) -> Option<(u64, u64)> {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let (coefficient, exponent) = match unsigned.split_once(&['e', 'E'][..]) {
        Some((coefficient, exponent)) => (coefficient, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = coefficient.split_once('.').unwrap_or((coefficient, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let significant = whole.chars().chain(fraction.chars()).skip_while(|&c| c == '0').count();
    let digits = significant.max(1) as u64;
    let exponent = exponent.saturating_sub(fraction.len() as i64);
    if exponent >= 0 {
        Some((digits.saturating_add(exponent.unsigned_abs()), 0))
    } else {
        let places = exponent.unsigned_abs();
        Some((digits.max(places), places))
    }
}

fn check_digits(total: u64, decimals: u64) -> Result<(), String> {
    let whole = total - decimals;

    if total > u64::from(PRICE_MAX_DIGITS) {
        return Err(format!("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."));
    }
    if decimals > u64::from(PRICE_DECIMAL_PLACES) {
        return Err(format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."));
    }
    let max_whole = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    if whole > u64::from(max_whole) {
        return Err(format!("Ensure that there are no more than {max_whole} digits before the decimal point."));
    }
    Ok(())
}

/// Accepts integers, integral numbers (`10.0`) and integer strings (`"10"`, `"10.0"`).
pub fn parse_stock(value: &Value) -> Result<i32, String> {
    let integer: i128 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i128::from(i)
            } else if let Some(u) = n.as_u64() {
                i128::from(u)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e30 => f as i128,
                    _ => return Err(INVALID_INTEGER.to_string()),
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            let digits = match trimmed.split_once('.') {
                Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
                Some(_) => return Err(INVALID_INTEGER.to_string()),
                None => trimmed,
            };
            digits.parse::<i128>().map_err(|_| INVALID_INTEGER.to_string())?
        }
        _ => return Err(INVALID_INTEGER.to_string()),
    };

    if integer > i128::from(i32::MAX) {
        return Err(format!("Ensure this value is less than or equal to {}.", i32::MAX));
    }
    if integer < i128::from(i32::MIN) {
        return Err(format!("Ensure this value is greater than or equal to {}.", i32::MIN));
    }
    Ok(integer as i32)
}
