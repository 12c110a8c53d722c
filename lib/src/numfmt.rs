//! Numeric parsing and digit rendering on byte slices.
//!
//! The formatting layer and the `strto*`/`ato*` shims share these helpers so
//! the numeric edge cases live in exactly one place.

use crate::string::{isdigit, isspace, tolower};

/// Rendered digits for a single integer. Large enough for a 64-bit value in
/// any supported base plus a sign.
pub struct Digits {
    buf: [u8; 24],
    len: usize,
}

impl Digits {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn render(mut value: u64, base: u64, upper: bool) -> Digits {
    let mut out = Digits {
        buf: [0u8; 24],
        len: 0,
    };
    let mut tmp = [0u8; 24];
    let mut n = 0usize;
    loop {
        let digit = (value % base) as u8;
        tmp[n] = match digit {
            0..=9 => b'0' + digit,
            _ if upper => b'A' + digit - 10,
            _ => b'a' + digit - 10,
        };
        n += 1;
        value /= base;
        if value == 0 {
            break;
        }
    }
    while n > 0 {
        n -= 1;
        out.buf[out.len] = tmp[n];
        out.len += 1;
    }
    out
}

pub fn u64_to_decimal(value: u64) -> Digits {
    render(value, 10, false)
}

pub fn u64_to_hex(value: u64, upper: bool) -> Digits {
    render(value, 16, upper)
}

/// Magnitude digits only; the caller decides how the sign interacts with
/// padding.
pub fn i64_magnitude(value: i64) -> Digits {
    render(value.unsigned_abs(), 10, false)
}

/// Outcome of a parse: the value and how many input bytes it consumed.
/// `consumed == 0` means no conversion was performed.
pub struct Parsed<T> {
    pub value: T,
    pub consumed: usize,
}

fn skip_space(input: &[u8]) -> usize {
    let mut i = 0;
    while i < input.len() && isspace(input[i]) {
        i += 1;
    }
    i
}

fn read_sign(input: &[u8], at: usize) -> (bool, usize) {
    match input.get(at) {
        Some(b'-') => (true, at + 1),
        Some(b'+') => (false, at + 1),
        _ => (false, at),
    }
}

/// Parse a decimal integer with optional leading whitespace and sign,
/// saturating at the i64 range like `strtol` does at `LONG_MIN`/`LONG_MAX`.
pub fn parse_i64(input: &[u8]) -> Parsed<i64> {
    parse_i64_radix(input, 10)
}

/// Parse an integer in the given base. Base 0 auto-detects `0x` hex and
/// leading-zero octal. Bases other than 0, 8, 10 and 16 perform no
/// conversion.
pub fn parse_i64_radix(input: &[u8], base: u32) -> Parsed<i64> {
    let start = skip_space(input);
    let (negative, mut i) = read_sign(input, start);

    let mut radix = base;
    if radix == 0 {
        if input[i..].starts_with(b"0x") || input[i..].starts_with(b"0X") {
            radix = 16;
            i += 2;
        } else if input.get(i) == Some(&b'0') {
            radix = 8;
        } else {
            radix = 10;
        }
    } else if radix == 16 && (input[i..].starts_with(b"0x") || input[i..].starts_with(b"0X")) {
        i += 2;
    } else if !matches!(radix, 8 | 10 | 16) {
        return Parsed {
            value: 0,
            consumed: 0,
        };
    }

    let digit_value = |byte: u8| -> Option<u64> {
        let low = tolower(byte);
        let val = match low {
            b'0'..=b'9' => (low - b'0') as u64,
            b'a'..=b'f' => (low - b'a' + 10) as u64,
            _ => return None,
        };
        (val < radix as u64).then_some(val)
    };

    let digits_start = i;
    let mut value: u64 = 0;
    let mut saturated = false;
    while let Some(&byte) = input.get(i) {
        let Some(d) = digit_value(byte) else { break };
        value = match value
            .checked_mul(radix as u64)
            .and_then(|v| v.checked_add(d))
        {
            Some(v) => v,
            None => {
                saturated = true;
                u64::MAX
            }
        };
        i += 1;
    }

    if i == digits_start {
        return Parsed {
            value: 0,
            consumed: 0,
        };
    }

    let limit = if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    };
    if saturated || value > limit {
        value = limit;
    }

    let signed = if negative {
        (value as i64).wrapping_neg()
    } else {
        value as i64
    };
    Parsed {
        value: signed,
        consumed: i,
    }
}

/// Parse a floating point number: sign, integer part, fraction, optional
/// `e`/`E` exponent. No hex floats, no `inf`/`nan` words; the hosted
/// application never produces those in its config files.
pub fn parse_f64(input: &[u8]) -> Parsed<f64> {
    let start = skip_space(input);
    let (negative, mut i) = read_sign(input, start);

    let digits_start = i;
    let mut value: f64 = 0.0;
    while let Some(&byte) = input.get(i) {
        if !isdigit(byte) {
            break;
        }
        value = value * 10.0 + (byte - b'0') as f64;
        i += 1;
    }
    let mut any_digits = i > digits_start;

    if input.get(i) == Some(&b'.') {
        let mut scale = 0.1;
        let frac_start = i + 1;
        let mut j = frac_start;
        while let Some(&byte) = input.get(j) {
            if !isdigit(byte) {
                break;
            }
            value += (byte - b'0') as f64 * scale;
            scale *= 0.1;
            j += 1;
        }
        if j > frac_start {
            any_digits = true;
            i = j;
        } else if any_digits {
            // "12." consumes the dot, "." alone converts nothing.
            i = j;
        }
    }

    if !any_digits {
        return Parsed {
            value: 0.0,
            consumed: 0,
        };
    }

    if matches!(input.get(i), Some(b'e') | Some(b'E')) {
        let (exp_negative, exp_at) = read_sign(input, i + 1);
        let mut j = exp_at;
        let mut exp: i32 = 0;
        while let Some(&byte) = input.get(j) {
            if !isdigit(byte) {
                break;
            }
            exp = exp.saturating_mul(10).saturating_add((byte - b'0') as i32);
            j += 1;
        }
        if j > exp_at {
            let factor = if exp_negative { 0.1 } else { 10.0 };
            let mut k = 0;
            while k < exp {
                value *= factor;
                k += 1;
            }
            i = j;
        }
    }

    Parsed {
        value: if negative { -value } else { value },
        consumed: i,
    }
}
