use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};

/// Significant digits kept by the transcendental helpers (`ln`, `exp` and
/// fractional powers).
pub const PRECISION: u64 = 50;
/// Extra digits carried through intermediate series terms.
const GUARD_DIGITS: u64 = 10;
/// Largest integer exponent computed exactly by repeated squaring. Larger
/// exponents go through `exp(y * ln(x))` at [`PRECISION`].
pub const MAX_EXACT_EXPONENT: u32 = 4096;
/// Largest shift amount accepted by `<<` and `>>`.
pub const MAX_SHIFT: u32 = 4096;
/// Largest magnitude `exp` accepts. The result of `exp(10^6)` already has
/// over 400 000 integer digits.
pub const MAX_EXP_ARGUMENT: u32 = 1_000_000;

/// Converts an `f64` to a decimal using its shortest round-trip
/// representation.
///
/// ## Returns
/// - `Some(BigDecimal)` for finite input.
/// - `None` for `NaN` and infinities.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use tally::util::num::decimal_from_f64;
///
/// assert_eq!(decimal_from_f64(0.1), BigDecimal::from_str("0.1").ok());
/// assert_eq!(decimal_from_f64(f64::NAN), None);
/// ```
#[must_use]
pub fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}

/// Converts a decimal to the nearest `f64`, if it is within range.
#[must_use]
pub fn decimal_to_f64(value: &BigDecimal) -> Option<f64> {
    value.to_f64().filter(|f| f.is_finite())
}

/// Converts a decimal to `u32` if and only if it is a non-negative integer
/// that fits.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use tally::util::num::to_u32;
///
/// assert_eq!(to_u32(&BigDecimal::from(7)), Some(7));
/// assert_eq!(to_u32(&BigDecimal::from(-1)), None);
/// assert_eq!(to_u32(&"2.5".parse().unwrap()), None);
/// ```
#[must_use]
pub fn to_u32(value: &BigDecimal) -> Option<u32> {
    if !value.is_integer() {
        return None;
    }
    value.to_u32()
}

/// Converts a decimal to `i64` if and only if it is an integer that fits.
#[must_use]
pub fn to_i64(value: &BigDecimal) -> Option<i64> {
    if !value.is_integer() {
        return None;
    }
    value.to_i64()
}

/// Renders a decimal without trailing fractional zeros and without
/// exponent notation, however large or small the magnitude.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use tally::util::num::format_decimal;
///
/// assert_eq!(format_decimal(&"616.000".parse().unwrap()), "616");
/// assert_eq!(format_decimal(&"1.50".parse().unwrap()), "1.5");
/// assert_eq!(format_decimal(&BigDecimal::from(1000)), "1000");
/// assert_eq!(format_decimal(&"0.0000001".parse().unwrap()), "0.0000001");
/// ```
#[must_use]
pub fn format_decimal(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}

/// Rounds towards negative infinity to an integer.
#[must_use]
pub fn floor(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Floor)
}

/// Rounds towards positive infinity to an integer.
#[must_use]
pub fn ceil(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Ceiling)
}

/// Rounds half away from zero to an integer.
#[must_use]
pub fn round(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::HalfUp)
}

/// Truncates towards zero, keeping `digits` fractional digits.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use tally::util::num::truncate;
///
/// let x: BigDecimal = "-3.14159".parse().unwrap();
/// assert_eq!(truncate(&x, 2), "-3.14".parse::<BigDecimal>().unwrap());
/// ```
#[must_use]
pub fn truncate(value: &BigDecimal, digits: u32) -> BigDecimal {
    value.with_scale_round(i64::from(digits), RoundingMode::Down)
}

/// Computes `base^exp` exactly by repeated squaring.
#[must_use]
pub fn pow_integer(base: &BigDecimal, exp: u32) -> BigDecimal {
    let mut result = BigDecimal::from(1);
    let mut square = base.clone();
    let mut e = exp;

    while e > 0 {
        if e & 1 == 1 {
            result = &result * &square;
        }
        e >>= 1;
        if e > 0 {
            square = &square * &square;
        }
    }
    result
}

/// Divides by `2^n` exactly, as `value * 5^n * 10^-n`.
///
/// Unlike `/`, the result is never rounded.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use tally::util::num::div_pow2;
///
/// assert_eq!(div_pow2(&BigDecimal::from(5), 3), "0.625".parse::<BigDecimal>().unwrap());
/// ```
#[must_use]
pub fn div_pow2(value: &BigDecimal, n: u32) -> BigDecimal {
    let (digits, scale) = (value * pow_integer(&BigDecimal::from(5), n)).into_bigint_and_exponent();
    BigDecimal::new(digits, scale + i64::from(n))
}

/// Computes `base ^ exponent`.
///
/// Integer exponents up to [`MAX_EXACT_EXPONENT`] in magnitude are exact.
/// Everything else is computed as `exp(exponent * ln(base))` to
/// [`PRECISION`] significant digits.
///
/// ## Errors
/// Returns a reason when the result does not exist: zero raised to a
/// negative power, or a negative base with a fractional exponent.
///
/// ## Example
/// ```
/// use bigdecimal::BigDecimal;
/// use tally::util::num::pow;
///
/// let r = pow(&BigDecimal::from(5), &BigDecimal::from(4)).unwrap();
/// assert_eq!(r, BigDecimal::from(625));
///
/// let r = pow(&BigDecimal::from(2), &BigDecimal::from(-2)).unwrap();
/// assert_eq!(r, "0.25".parse::<BigDecimal>().unwrap());
///
/// assert!(pow(&BigDecimal::from(-8), &"0.5".parse().unwrap()).is_err());
/// ```
pub fn pow(base: &BigDecimal, exponent: &BigDecimal) -> Result<BigDecimal, String> {
    let negative_exponent = *exponent < BigDecimal::zero();

    if base.is_zero() {
        return if negative_exponent {
            Err(format!("division by zero: 0 ^ {}", format_decimal(exponent)))
        } else if exponent.is_zero() {
            Ok(BigDecimal::from(1))
        } else {
            Ok(BigDecimal::zero())
        };
    }

    if let Some(e) = to_i64(exponent)
       && let Ok(magnitude) = u32::try_from(e.unsigned_abs())
       && magnitude <= MAX_EXACT_EXPONENT
    {
        let power = pow_integer(base, magnitude);
        return Ok(if negative_exponent { BigDecimal::from(1) / power } else { power });
    }

    if *base < BigDecimal::zero() {
        if let Some(e) = to_i64(exponent) {
            let magnitude = exp(&(ln(&base.abs())? * BigDecimal::from(e)))?;
            return Ok(if e % 2 == 0 { magnitude } else { -magnitude });
        }
        return Err(format!("{} ^ {} has no real result: negative base with a fractional exponent",
                           format_decimal(base),
                           format_decimal(exponent)));
    }

    let ln_base = ln(base)?;
    exp(&(exponent * &ln_base))
}

/// Computes the square root to the decimal library's default precision.
///
/// ## Errors
/// Returns a reason for negative input.
pub fn sqrt(value: &BigDecimal) -> Result<BigDecimal, String> {
    if *value < BigDecimal::zero() {
        return Err(format!("square root of a negative number: {}", format_decimal(value)));
    }
    value.sqrt()
         .ok_or_else(|| format!("square root of {} did not converge", format_decimal(value)))
}

/// Computes the natural logarithm to [`PRECISION`] significant digits.
///
/// The argument is scaled by powers of two into `[0.5, 2]` and the remainder
/// is summed as `2 * atanh((x - 1) / (x + 1))`.
///
/// ## Errors
/// Returns a reason for zero or negative input.
///
/// ## Example
/// ```
/// use bigdecimal::{BigDecimal, ToPrimitive};
/// use tally::util::num::ln;
///
/// let l = ln(&BigDecimal::from(10)).unwrap();
/// assert!((l.to_f64().unwrap() - std::f64::consts::LN_10).abs() < 1e-12);
///
/// assert!(ln(&BigDecimal::from(-1)).unwrap_err().contains("negative"));
/// ```
pub fn ln(value: &BigDecimal) -> Result<BigDecimal, String> {
    if value.is_zero() {
        return Err("logarithm of zero is undefined".to_string());
    }
    if *value < BigDecimal::zero() {
        return Err(format!("logarithm of a negative number: {}", format_decimal(value)));
    }

    let one = BigDecimal::from(1);
    let two = BigDecimal::from(2);
    let half = &one / &two;

    let mut x = value.clone();
    let mut halvings: i64 = 0;
    while x > two {
        x = &x / &two;
        halvings += 1;
    }
    while x < half {
        x = &x * &two;
        halvings -= 1;
    }

    let reduced = atanh_series(&((&x - &one) / (&x + &one)));
    let result = if halvings == 0 {
        reduced
    } else {
        reduced + ln2() * BigDecimal::from(halvings)
    };

    Ok(result.with_prec(PRECISION))
}

/// Computes `log_base(value)`.
///
/// ## Errors
/// Returns a reason when either logarithm is undefined or the base is one.
pub fn log(value: &BigDecimal, base: &BigDecimal) -> Result<BigDecimal, String> {
    let ln_base = ln(base)?;
    if ln_base.is_zero() {
        return Err("logarithm base 1 is undefined".to_string());
    }
    Ok((ln(value)? / ln_base).with_prec(PRECISION))
}

/// Computes `e^value` to [`PRECISION`] significant digits.
///
/// The argument is halved until it lies in `[-1, 1]`, summed as a Taylor
/// series, and the result squared back up.
///
/// ## Errors
/// Returns a reason when `|value|` exceeds [`MAX_EXP_ARGUMENT`].
///
/// ## Example
/// ```
/// use bigdecimal::{BigDecimal, ToPrimitive};
/// use tally::util::num::exp;
///
/// let e = exp(&BigDecimal::from(1)).unwrap();
/// assert!((e.to_f64().unwrap() - std::f64::consts::E).abs() < 1e-12);
/// ```
pub fn exp(value: &BigDecimal) -> Result<BigDecimal, String> {
    let working = PRECISION + GUARD_DIGITS;
    let one = BigDecimal::from(1);
    let two = BigDecimal::from(2);

    if value.abs() > BigDecimal::from(MAX_EXP_ARGUMENT) {
        return Err(format!("exponent {} is too large", format_decimal(value)));
    }

    let mut x = value.clone();
    let mut halvings = 0u32;
    while x.abs() > one {
        x = &x / &two;
        halvings += 1;
    }

    let epsilon = epsilon();
    let mut sum = one.clone();
    let mut term = one;
    let mut k = 1u32;
    loop {
        term = (&(&term * &x) / &BigDecimal::from(k)).with_prec(working);
        sum += &term;
        if term.abs() < epsilon {
            break;
        }
        k += 1;
    }

    for _ in 0..halvings {
        sum = (&sum * &sum).with_prec(working);
    }
    Ok(sum.with_prec(PRECISION))
}

/// `2 * (t + t^3/3 + t^5/5 + ...)`, valid for `|t| < 1`.
fn atanh_series(t: &BigDecimal) -> BigDecimal {
    let working = PRECISION + GUARD_DIGITS;
    let epsilon = epsilon();
    let t_squared = (t * t).with_prec(working);

    let mut power = t.with_prec(working);
    let mut sum = BigDecimal::zero();
    let mut n = 1u32;
    loop {
        let term = (&power / &BigDecimal::from(n)).with_prec(working);
        sum += &term;
        if term.abs() < epsilon {
            break;
        }
        power = (&power * &t_squared).with_prec(working);
        n += 2;
    }
    sum * BigDecimal::from(2)
}

fn ln2() -> BigDecimal {
    atanh_series(&(BigDecimal::from(1) / BigDecimal::from(3)))
}

/// `10^-(PRECISION + GUARD_DIGITS)`, the series cut-off.
fn epsilon() -> BigDecimal {
    let digits = u32::try_from(PRECISION + GUARD_DIGITS).unwrap_or(u32::MAX);
    BigDecimal::from(1) / pow_integer(&BigDecimal::from(10), digits)
}
