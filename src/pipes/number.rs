use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

use super::{Pipe, PipeError, shape_name};
use crate::value::Value;

/// Adds up the elements of an array under loose numeric coercion.
///
/// Numeric strings count at face value, anything non-numeric contributes
/// zero, and a non-array input sums to zero outright. Accumulation happens
/// in decimal arithmetic so fractional cents do not drift; a whole result
/// comes back as an integer.
pub struct Sum;

impl Sum {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Sum {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for Sum {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        let Value::Array(items) = value else {
            return Ok(Value::Integer(0));
        };
        let mut total = Decimal::ZERO;
        for item in items {
            total += Decimal::from_f64(item.as_number()).unwrap_or(Decimal::ZERO);
        }
        Ok(decimal_to_value(total))
    }
}

fn decimal_to_value(amount: Decimal) -> Value {
    if amount.fract().is_zero() {
        if let Some(n) = amount.to_i64() {
            return Value::Integer(n);
        }
    }
    Value::Float(amount.to_f64().unwrap_or(0.0))
}

// `minIntegerDigits.minFractionDigits-maxFractionDigits`, e.g. `1.0-2`.
static DIGITS_INFO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)-(\d+)$").expect("digits info pattern"));

struct DigitsInfo {
    min_int: usize,
    min_frac: u32,
    max_frac: u32,
}

impl DigitsInfo {
    fn parse(
        pipe: &'static str,
        info: Option<&str>,
        default: DigitsInfo,
    ) -> Result<DigitsInfo, PipeError> {
        let Some(info) = info else {
            return Ok(default);
        };
        let invalid = |detail: String| PipeError::InvalidArgument { pipe, detail };
        let caps = DIGITS_INFO
            .captures(info)
            .ok_or_else(|| invalid(format!("digits info `{info}`")))?;
        let min_int = caps[1]
            .parse()
            .map_err(|_| invalid(format!("integer digits in `{info}`")))?;
        let min_frac: u32 = caps[2]
            .parse()
            .map_err(|_| invalid(format!("fraction digits in `{info}`")))?;
        let max_frac: u32 = caps[3]
            .parse()
            .map_err(|_| invalid(format!("fraction digits in `{info}`")))?;
        if min_frac > max_frac {
            return Err(invalid(format!(
                "minimum fraction digits exceed maximum in `{info}`"
            )));
        }
        Ok(DigitsInfo {
            min_int,
            min_frac,
            max_frac,
        })
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(n) => Decimal::from_i64(*n),
        Value::Float(n) => Decimal::from_f64(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn format_decimal(value: Decimal, digits: &DigitsInfo) -> String {
    let rounded = value.round_dp(digits.max_frac);
    let text = rounded.abs().normalize().to_string();
    let (int_digits, frac_digits) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
        None => (text, String::new()),
    };

    let padded_int = format!("{:0>width$}", int_digits, width = digits.min_int.max(1));
    let mut frac_digits = frac_digits;
    while (frac_digits.len() as u32) < digits.min_frac {
        frac_digits.push('0');
    }

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(&padded_int));
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(&frac_digits);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Decimal formatting driven by a digits info argument:
/// `1234.5 | number:"1.0-2"` renders `"1,234.5"`.
///
/// Accepts integers, floats and numeric strings; the default digits info
/// is `1.0-3`.
pub struct NumberFormat;

impl NumberFormat {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for NumberFormat {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError> {
        let amount = as_decimal(value).ok_or(PipeError::Unsupported {
            pipe: "number",
            got: shape_name(value),
        })?;
        let digits = DigitsInfo::parse(
            "number",
            args.first().map(String::as_str),
            DigitsInfo {
                min_int: 1,
                min_frac: 0,
                max_frac: 3,
            },
        )?;
        Ok(Value::String(format_decimal(amount, &digits)))
    }
}

/// Scales by one hundred and appends a percent sign: `0.259 | percent`
/// renders `"26%"`.
pub struct Percent;

impl Percent {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for Percent {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError> {
        let amount = as_decimal(value).ok_or(PipeError::Unsupported {
            pipe: "percent",
            got: shape_name(value),
        })? * Decimal::ONE_HUNDRED;
        let digits = DigitsInfo::parse(
            "percent",
            args.first().map(String::as_str),
            DigitsInfo {
                min_int: 1,
                min_frac: 0,
                max_frac: 0,
            },
        )?;
        Ok(Value::String(format!(
            "{}%",
            format_decimal(amount, &digits)
        )))
    }
}

/// Prefixes a currency symbol and formats with two fraction digits:
/// `19.9 | currency:"EUR"` renders `"€19.90"`.
///
/// Codes without a known symbol fall back to the code itself as a prefix.
pub struct Currency;

impl Currency {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for Currency {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError> {
        let amount = as_decimal(value).ok_or(PipeError::Unsupported {
            pipe: "currency",
            got: shape_name(value),
        })?;
        let code = args.first().map(String::as_str).unwrap_or("USD");
        let digits = DigitsInfo {
            min_int: 1,
            min_frac: 2,
            max_frac: 2,
        };
        Ok(Value::String(format!(
            "{}{}",
            currency_symbol(code),
            format_decimal(amount, &digits)
        )))
    }
}

fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "JPY" => "\u{a5}".to_string(),
        other => format!("{other} "),
    }
}
