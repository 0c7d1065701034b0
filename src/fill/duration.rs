use crate::fill::{ParseError, ParseReason};

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

const UNITS: [(&str, u64); 8] = [
	("ns", 1),
	("us", 1_000),
	("\u{00b5}s", 1_000),
	("\u{03bc}s", 1_000),
	("ms", 1_000_000),
	("s", NANOS_PER_SECOND),
	("m", NANOS_PER_MINUTE),
	("h", NANOS_PER_HOUR),
];

/// Parse a duration literal such as `1h30m`, `1.5s`, or `-250ms` into signed nanoseconds.
///
/// A literal is an optional sign followed by one or more decimal numbers, each
/// with an optional fraction and a mandatory unit (`ns`, `us`, `µs`, `ms`, `s`,
/// `m`, `h`). The bare literal `0` is accepted without a unit.
pub fn parse_duration(input: &str) -> Result<i64, ParseError> {
	let fail = |reason| ParseError::new("duration", input, reason);

	let (negative, mut rest) = match input.as_bytes().first() {
		Some(b'-') => (true, &input[1..]),
		Some(b'+') => (false, &input[1..]),
		_ => (false, input),
	};

	if rest == "0" {
		return Ok(0);
	}
	if rest.is_empty() {
		return Err(fail(ParseReason::Syntax));
	}

	let mut total = 0_u64;
	while !rest.is_empty() {
		let int_len = leading_digits(rest);
		let int_part = &rest[..int_len];
		rest = &rest[int_len..];

		let mut frac_part = "";
		if let Some(after_dot) = rest.strip_prefix('.') {
			let frac_len = leading_digits(after_dot);
			frac_part = &after_dot[..frac_len];
			rest = &after_dot[frac_len..];
		}
		if int_part.is_empty() && frac_part.is_empty() {
			return Err(fail(ParseReason::Syntax));
		}

		let unit_len = rest.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(rest.len());
		let unit = &rest[..unit_len];
		rest = &rest[unit_len..];
		if unit.is_empty() {
			return Err(fail(ParseReason::MissingUnit));
		}
		let Some(&(_, scale)) = UNITS.iter().find(|(name, _)| *name == unit) else {
			return Err(fail(ParseReason::UnknownUnit { unit: unit.to_owned() }));
		};

		let whole = if int_part.is_empty() {
			0
		} else {
			int_part.parse::<u64>().map_err(|_| fail(ParseReason::Range))?
		};
		let mut component = whole.checked_mul(scale).ok_or_else(|| fail(ParseReason::Range))?;
		if !frac_part.is_empty() {
			component = component
				.checked_add(fraction_nanos(frac_part, scale))
				.ok_or_else(|| fail(ParseReason::Range))?;
		}
		total = total.checked_add(component).ok_or_else(|| fail(ParseReason::Range))?;
	}

	let limit = if negative { 1_u64 << 63 } else { i64::MAX as u64 };
	if total > limit {
		return Err(fail(ParseReason::Range));
	}

	if negative {
		Ok((total as i64).wrapping_neg())
	} else {
		Ok(total as i64)
	}
}

/// Format signed nanoseconds as a literal accepted by [`parse_duration`].
pub fn format_duration(nanos: i64) -> String {
	if nanos == 0 {
		return "0s".to_owned();
	}

	let mut out = String::new();
	if nanos < 0 {
		out.push('-');
	}

	let magnitude = nanos.unsigned_abs();
	let hours = magnitude / NANOS_PER_HOUR;
	let minutes = magnitude % NANOS_PER_HOUR / NANOS_PER_MINUTE;
	let seconds = magnitude % NANOS_PER_MINUTE / NANOS_PER_SECOND;
	let fraction = magnitude % NANOS_PER_SECOND;

	if hours > 0 {
		out.push_str(&format!("{hours}h"));
	}
	if hours > 0 || minutes > 0 {
		out.push_str(&format!("{minutes}m"));
	}
	out.push_str(&seconds.to_string());
	if fraction > 0 {
		let digits = format!("{fraction:09}");
		out.push('.');
		out.push_str(digits.trim_end_matches('0'));
	}
	out.push('s');
	out
}

fn leading_digits(input: &str) -> usize {
	input.bytes().take_while(u8::is_ascii_digit).count()
}

/// Scale a fractional digit string by `scale`, truncating toward zero.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
	let mut numerator = 0_u64;
	let mut denominator = 1_f64;
	for byte in digits.bytes() {
		let Some(next) = numerator.checked_mul(10).and_then(|value| value.checked_add(u64::from(byte - b'0'))) else {
			break;
		};
		numerator = next;
		denominator *= 10.0;
	}
	(numerator as f64 * (scale as f64 / denominator)) as u64
}
