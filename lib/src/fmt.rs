//! Printf-style formatting over byte sinks.
//!
//! The format string walker is shared by every `printf` family entry point
//! in the compat crate; only the sink and the argument source differ. The
//! supported conversions are `%d %i %u %x %X %p %s %c %f` with `-`/`0`
//! flags, width, precision and the `l` length modifier. Anything else is
//! copied through verbatim so a stray directive in the hosted application
//! never derails output.

use crate::numfmt::{i64_magnitude, u64_to_decimal, u64_to_hex};

/// Destination for formatted bytes. Bounded sinks silently drop overflow;
/// the walker still reports how many bytes it produced.
pub trait ByteSink {
    fn put(&mut self, byte: u8);
}

/// Sink over a caller-provided buffer, reserving the final byte for the
/// NUL terminator.
pub struct BufferSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Terminate the string and report how many bytes landed in the buffer,
    /// excluding the terminator.
    pub fn finish(self) -> usize {
        if !self.buf.is_empty() {
            let at = self.pos.min(self.buf.len() - 1);
            self.buf[at] = 0;
        }
        self.pos
    }
}

impl ByteSink for BufferSink<'_> {
    fn put(&mut self, byte: u8) {
        if self.pos + 1 < self.buf.len() {
            self.buf[self.pos] = byte;
            self.pos += 1;
        }
    }
}

/// Variadic argument access, decoupled from how the arguments are stored.
/// The compat crate implements this over a C `VaList`; tests drive it from
/// plain slices.
pub trait ArgSource {
    fn next_int(&mut self, long: bool) -> i64;
    fn next_uint(&mut self, long: bool) -> u64;
    fn next_ptr(&mut self) -> usize;
    fn next_char(&mut self) -> u8;
    fn next_f64(&mut self) -> f64;
    fn next_str(&mut self) -> Option<&[u8]>;
}

#[derive(Clone, Copy, Default)]
struct Spec {
    left: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    long: bool,
}

struct Out<'a> {
    sink: &'a mut dyn ByteSink,
    count: usize,
}

impl Out<'_> {
    fn put(&mut self, byte: u8) {
        self.sink.put(byte);
        self.count += 1;
    }

    fn put_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put(b);
        }
    }

    fn pad(&mut self, fill: u8, n: usize) {
        let mut i = 0;
        while i < n {
            self.put(fill);
            i += 1;
        }
    }

    /// Emit `prefix` (sign or base marker) and `body` under the width and
    /// alignment rules. Zero padding goes between prefix and body.
    fn put_field(&mut self, spec: &Spec, prefix: &[u8], body: &[u8], min_digits: usize) {
        let zeros = min_digits.saturating_sub(body.len());
        let content = prefix.len() + zeros + body.len();
        let fill = spec.width.saturating_sub(content);

        if spec.left {
            self.put_all(prefix);
            self.pad(b'0', zeros);
            self.put_all(body);
            self.pad(b' ', fill);
        } else if spec.zero && min_digits == 0 {
            self.put_all(prefix);
            self.pad(b'0', fill + zeros);
            self.put_all(body);
        } else {
            self.pad(b' ', fill);
            self.put_all(prefix);
            self.pad(b'0', zeros);
            self.put_all(body);
        }
    }
}

fn parse_number(fmt: &[u8], mut i: usize) -> (usize, usize) {
    let mut value = 0usize;
    while let Some(&byte) = fmt.get(i) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10) + (byte - b'0') as usize;
        i += 1;
    }
    (value, i)
}

fn put_float(out: &mut Out<'_>, spec: &Spec, value: f64) {
    if value.is_nan() {
        out.put_field(spec, b"", b"nan", 0);
        return;
    }

    let negative = value < 0.0 || (value == 0.0 && value.is_sign_negative());
    let prefix: &[u8] = if negative { b"-" } else { b"" };
    let magnitude = if negative { -value } else { value };

    if magnitude.is_infinite() {
        out.put_field(spec, prefix, b"inf", 0);
        return;
    }

    let precision = spec.precision.unwrap_or(6).min(9);
    let mut scale: u64 = 1;
    let mut i = 0;
    while i < precision {
        scale *= 10;
        i += 1;
    }

    // Round half away from zero at the requested precision. Values beyond
    // the u64 range saturate; the hosted application only prints small
    // numbers through this path.
    let scaled = magnitude * scale as f64 + 0.5;
    let total = if scaled >= u64::MAX as f64 {
        u64::MAX
    } else {
        scaled as u64
    };
    let whole = total / scale;
    let frac = total % scale;

    let whole_digits = u64_to_decimal(whole);
    let mut body = [0u8; 36];
    let mut len = 0usize;
    body[..whole_digits.len()].copy_from_slice(whole_digits.as_bytes());
    len += whole_digits.len();
    if precision > 0 {
        body[len] = b'.';
        len += 1;
        let frac_digits = u64_to_decimal(frac);
        let leading = precision - frac_digits.len();
        let mut k = 0;
        while k < leading {
            body[len] = b'0';
            len += 1;
            k += 1;
        }
        body[len..len + frac_digits.len()].copy_from_slice(frac_digits.as_bytes());
        len += frac_digits.len();
    }

    out.put_field(spec, prefix, &body[..len], 0);
}

fn put_str(out: &mut Out<'_>, spec: &Spec, bytes: &[u8]) {
    let shown = match spec.precision {
        Some(p) => bytes.len().min(p),
        None => bytes.len(),
    };
    let fill = spec.width.saturating_sub(shown);
    if spec.left {
        out.put_all(&bytes[..shown]);
        out.pad(b' ', fill);
    } else {
        out.pad(b' ', fill);
        out.put_all(&bytes[..shown]);
    }
}

/// Walk `fmt`, pulling arguments as directives demand, and emit the result
/// into `sink`. Returns the number of bytes produced, before any clipping a
/// bounded sink applies.
pub fn format_into(sink: &mut dyn ByteSink, fmt: &[u8], args: &mut dyn ArgSource) -> usize {
    let mut out = Out { sink, count: 0 };
    let mut i = 0usize;

    while i < fmt.len() {
        let byte = fmt[i];
        if byte != b'%' {
            out.put(byte);
            i += 1;
            continue;
        }

        let directive_start = i;
        i += 1;

        let mut spec = Spec::default();
        while let Some(&flag) = fmt.get(i) {
            match flag {
                b'-' => spec.left = true,
                b'0' => spec.zero = true,
                _ => break,
            }
            i += 1;
        }
        (spec.width, i) = parse_number(fmt, i);
        if fmt.get(i) == Some(&b'.') {
            let (precision, next) = parse_number(fmt, i + 1);
            spec.precision = Some(precision);
            i = next;
        }
        while let Some(&length) = fmt.get(i) {
            match length {
                b'l' => spec.long = true,
                b'h' => {}
                _ => break,
            }
            i += 1;
        }

        let Some(&conv) = fmt.get(i) else {
            // Trailing '%' with no conversion, emit it as-is.
            out.put(b'%');
            break;
        };
        i += 1;

        let min_digits = spec.precision.unwrap_or(0);
        match conv {
            b'%' => out.put(b'%'),
            b'd' | b'i' => {
                let value = args.next_int(spec.long);
                let sign: &[u8] = if value < 0 { b"-" } else { b"" };
                out.put_field(&spec, sign, i64_magnitude(value).as_bytes(), min_digits);
            }
            b'u' => {
                let value = args.next_uint(spec.long);
                out.put_field(&spec, b"", u64_to_decimal(value).as_bytes(), min_digits);
            }
            b'x' | b'X' => {
                let value = args.next_uint(spec.long);
                let digits = u64_to_hex(value, conv == b'X');
                out.put_field(&spec, b"", digits.as_bytes(), min_digits);
            }
            b'p' => {
                let value = args.next_ptr() as u64;
                out.put_field(&spec, b"0x", u64_to_hex(value, false).as_bytes(), 16);
            }
            b'c' => {
                let spec = Spec {
                    zero: false,
                    ..spec
                };
                let ch = [args.next_char()];
                out.put_field(&spec, b"", &ch, 0);
            }
            b's' => {
                let bytes = args.next_str();
                put_str(&mut out, &spec, bytes.unwrap_or(b"(null)"));
            }
            b'f' | b'F' => {
                let value = args.next_f64();
                put_float(&mut out, &spec, value);
            }
            _ => {
                // Unknown directive, reproduce it untouched.
                out.put_all(&fmt[directive_start..i]);
            }
        }
    }

    out.count
}
