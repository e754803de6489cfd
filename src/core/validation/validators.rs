//! Reusable field coercions
//!
//! Each coercion turns an optional raw string into a typed value or a
//! human-readable message. Surrounding whitespace is ignored.

/// Coercion: text field; a missing field reads as the empty string
pub fn text() -> impl Fn(Option<&str>) -> Result<String, String> + Send + Sync + Clone {
    |value: Option<&str>| Ok(value.map(str::trim).unwrap_or_default().to_string())
}

/// Coercion: number field
///
/// A missing or blank field reads as `0`. Anything that does not parse to a
/// finite number fails with `message`.
pub fn number(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<f64, String> + Send + Sync + Clone {
    move |value: Option<&str>| {
        let raw = value.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Ok(0.0);
        }
        match raw.parse::<f64>() {
            Ok(num) if num.is_finite() => Ok(num),
            _ => Err(message.to_string()),
        }
    }
}

/// Coercion: value must parse as one of an enum's members
pub fn one_of<T>(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<T, String> + Send + Sync + Clone
where
    T: std::str::FromStr,
{
    move |value: Option<&str>| {
        value
            .map(str::trim)
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| message.to_string())
    }
}
