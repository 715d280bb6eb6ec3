//! RFC 3986 percent-encoding and OAuth parameter normalization.

// std
use std::str::Utf8Error;
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved set (`A-Z a-z 0-9 - . _ ~`).
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `input` as OAuth 1.0a requires (uppercase hex, UTF-8 octets).
pub fn percent_encode(input: &str) -> String {
	utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Reverses [`percent_encode`].
pub fn percent_decode(input: &str) -> Result<String, Utf8Error> {
	percent_decode_str(input).decode_utf8().map(|value| value.into_owned())
}

/// Encodes every pair, sorts by key then value, and joins them as `k=v&k=v`.
///
/// Sorting happens on the encoded octets, which is what servers reproduce when verifying.
pub fn normalize_parameters<I, K, V>(pairs: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut encoded = pairs
		.into_iter()
		.map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
		.collect::<Vec<_>>();

	encoded.sort();

	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}
