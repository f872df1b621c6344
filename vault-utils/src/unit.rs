use crate::error::parse;
use crate::error::Error;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

// rust_decimal keeps at most 28 fractional digits
const MAX_SCALE: u8 = 28;

fn check_unit(unit: u8) -> Result<(), crate::Error> {
    if unit > MAX_SCALE {
        return Err(Error::Parse(parse::ParseError::UnitConvertFailed(format!(
            "unit {} exceeds max scale {}",
            unit, MAX_SCALE
        ))));
    }
    Ok(())
}

/// Human readable amount, trailing zeros trimmed: `15000000000` with unit 10 is `"1.5"`.
pub fn format_to_string(value: u128, unit: u8) -> Result<String, crate::Error> {
    check_unit(unit)?;
    let int = i128::try_from(value).map_err(|e| {
        Error::Parse(parse::ParseError::UnitConvertFailed(format!(
            "format_to_string() value = {} error:{}",
            value, e
        )))
    })?;
    let res = Decimal::try_from_i128_with_scale(int, unit as u32)
        .map_err(parse::ParseError::from)?;
    Ok(res.normalize().to_string())
}

pub fn format_to_f64(value: u128, unit: u8) -> Result<f64, crate::Error> {
    let res = format_to_string(value, unit)?;
    string_to_f64(&res)
}

pub fn string_to_f64(value: &str) -> Result<f64, crate::Error> {
    let res = value.parse::<f64>().map_err(|e| {
        Error::Parse(parse::ParseError::UnitConvertFailed(format!(
            "string_to_f64() from str error:{}",
            e
        )))
    })?;
    Ok(res)
}

/// Parses user input into the smallest unit. Extra fractional digits are rounded half-up.
pub fn parse_units(value: &str, unit: u8) -> Result<u128, crate::Error> {
    check_unit(unit)?;
    let amount = Decimal::from_str(value.trim()).map_err(parse::ParseError::from)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::Parse(parse::ParseError::UnitConvertFailed(format!(
            "parse_units() negative value = {}",
            value
        ))));
    }
    let rounded =
        amount.round_dp_with_strategy(unit as u32, RoundingStrategy::MidpointAwayFromZero);

    let mantissa = rounded.mantissa().unsigned_abs();
    let shift = unit as u32 - rounded.scale();
    10u128
        .checked_pow(shift)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| {
            Error::Parse(parse::ParseError::UnitConvertFailed(format!(
                "parse_units() overflow value = {},unit = {}",
                value, unit
            )))
        })
}
