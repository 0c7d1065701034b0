/// Ordered key/value tag metadata attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
	entries: Vec<(Box<str>, Box<str>)>,
}

impl Tags {
	/// Parse conventional `key:"value" other:"value"` tag text.
	///
	/// Parsing stops at the first malformed pair; pairs before it are kept.
	pub fn parse(raw: &str) -> Self {
		let mut entries = Vec::new();
		let mut rest = raw;

		loop {
			rest = rest.trim_start_matches(' ');
			if rest.is_empty() {
				break;
			}

			let key_len = rest
				.bytes()
				.take_while(|byte| *byte > b' ' && *byte != b':' && *byte != b'"' && *byte != 0x7f)
				.count();
			if key_len == 0 || !rest[key_len..].starts_with(":\"") {
				break;
			}
			let key = &rest[..key_len];
			rest = &rest[key_len + 1..];

			let Some(close) = closing_quote(rest) else {
				break;
			};
			let Some(value) = unquote(&rest[1..close]) else {
				break;
			};
			rest = &rest[close + 1..];

			entries.push((key.into(), value.into_boxed_str()));
		}

		Self { entries }
	}

	/// Build tags from explicit pairs, preserving order.
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Box<str>>,
		V: Into<Box<str>>,
	{
		Self {
			entries: pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
		}
	}

	/// Value of the first pair whose key equals `key`.
	pub fn lookup(&self, key: &str) -> Option<&str> {
		self.entries.iter().find(|(name, _)| name.as_ref() == key).map(|(_, value)| value.as_ref())
	}

	/// Iterate pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(key, value)| (key.as_ref(), value.as_ref()))
	}

	/// Number of pairs.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no pairs are present.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Byte offset of the quote closing the string opened at `quoted[0]`.
fn closing_quote(quoted: &str) -> Option<usize> {
	let bytes = quoted.as_bytes();
	let mut idx = 1;
	while idx < bytes.len() && bytes[idx] != b'"' {
		if bytes[idx] == b'\\' {
			idx += 1;
		}
		idx += 1;
	}
	(idx < bytes.len()).then_some(idx)
}

/// Resolve backslash escapes: the single-character set, `\xHH`, `\uHHHH`,
/// `\UHHHHHHHH`, and three-digit octal. Byte escapes must combine into UTF-8.
fn unquote(body: &str) -> Option<String> {
	let mut out = Vec::with_capacity(body.len());
	let mut chars = body.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			push_char(&mut out, ch);
			continue;
		}
		match chars.next()? {
			'a' => out.push(0x07),
			'b' => out.push(0x08),
			'f' => out.push(0x0c),
			'n' => out.push(b'\n'),
			'r' => out.push(b'\r'),
			't' => out.push(b'\t'),
			'v' => out.push(0x0b),
			'"' => out.push(b'"'),
			'\\' => out.push(b'\\'),
			'\'' => out.push(b'\''),
			'x' => out.push(u8::try_from(hex_digits(&mut chars, 2)?).ok()?),
			'u' => push_char(&mut out, char::from_u32(hex_digits(&mut chars, 4)?)?),
			'U' => push_char(&mut out, char::from_u32(hex_digits(&mut chars, 8)?)?),
			first @ '0'..='7' => {
				let mut value = first.to_digit(8)?;
				for _ in 0..2 {
					value = value * 8 + chars.next()?.to_digit(8)?;
				}
				out.push(u8::try_from(value).ok()?);
			}
			_ => return None,
		}
	}
	String::from_utf8(out).ok()
}

fn push_char(out: &mut Vec<u8>, ch: char) {
	let mut buf = [0_u8; 4];
	out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Option<u32> {
	(0..count).try_fold(0_u32, |acc, _| Some(acc * 16 + chars.next()?.to_digit(16)?))
}
