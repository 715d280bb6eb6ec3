//! Scalar conversions shared by the operation builders.

// crates.io
use serde_json::Number;
use time::{
	Date, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
	macros::format_description,
};
// self
use crate::{_prelude::*, auth::IdentifierError, error::ConfigError};

/// Currency amount scaled by 1,000,000, as the Ads API expects for budgets and bids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MicroAmount(u64);
impl MicroAmount {
	/// Micros in one currency unit.
	pub const MICROS_PER_UNIT: u64 = 1_000_000;

	/// Wraps an amount already expressed in micros.
	pub const fn from_micros(micros: u64) -> Self {
		Self(micros)
	}

	/// Converts whole currency units, failing on overflow.
	pub fn from_units(units: u64) -> Option<Self> {
		units.checked_mul(Self::MICROS_PER_UNIT).map(Self)
	}

	/// Parses a decimal currency amount without going through floating point.
	///
	/// Accepts up to six fractional digits (trailing zeros are ignored).
	pub fn parse_units(raw: &str) -> Result<Self, AmountError> {
		let raw = raw.trim();

		if raw.is_empty() {
			return Err(AmountError::Empty);
		}
		if raw.starts_with('-') {
			return Err(AmountError::Negative);
		}

		let raw = raw.strip_prefix('+').unwrap_or(raw);
		let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));

		if (whole.is_empty() && frac.is_empty())
			|| !whole.bytes().all(|b| b.is_ascii_digit())
			|| !frac.bytes().all(|b| b.is_ascii_digit())
		{
			return Err(AmountError::Malformed { raw: raw.to_owned() });
		}

		let frac = frac.trim_end_matches('0');

		if frac.len() > 6 {
			return Err(AmountError::TooPrecise);
		}

		let whole = if whole.is_empty() {
			0
		} else {
			whole.parse::<u64>().map_err(|_| AmountError::Overflow)?
		};
		let frac = if frac.is_empty() {
			0
		} else {
			format!("{frac:0<6}")
				.parse::<u64>()
				.map_err(|_| AmountError::Malformed { raw: raw.to_owned() })?
		};

		whole
			.checked_mul(Self::MICROS_PER_UNIT)
			.and_then(|micros| micros.checked_add(frac))
			.map(Self)
			.ok_or(AmountError::Overflow)
	}

	/// Raw micro value.
	pub const fn micros(self) -> u64 {
		self.0
	}
}
impl Display for MicroAmount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)
	}
}

/// Reasons a currency amount is rejected.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AmountError {
	/// No digits were supplied.
	#[error("amount is empty")]
	Empty,
	/// Budgets and bids cannot be negative.
	#[error("amount cannot be negative")]
	Negative,
	/// Input is not a plain decimal number.
	#[error("`{raw}` is not a decimal amount")]
	Malformed {
		/// Rejected input.
		raw: String,
	},
	/// More than six fractional digits would be lost.
	#[error("amount has more than six decimal places")]
	TooPrecise,
	/// Micro value does not fit in 64 bits.
	#[error("amount is too large")]
	Overflow,
}

/// Amount as supplied by the host: a JSON number or its textual form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
	/// JSON number.
	Number(Number),
	/// Decimal text.
	Text(String),
}
impl AmountInput {
	/// Converts into micros, naming `param` in the error.
	pub fn to_micros(&self, param: &'static str) -> Result<MicroAmount, ConfigError> {
		let parsed = match self {
			Self::Number(n) => MicroAmount::parse_units(&n.to_string()),
			Self::Text(s) => MicroAmount::parse_units(s),
		};

		parsed.map_err(|e| ConfigError::InvalidParameter { name: param, reason: e.to_string() })
	}
}

/// Converts a host date-time into the `YYYY-MM-DDTHH:MM:SS.mmmZ` form the API accepts.
///
/// Zoned input (`Z`, `±HH:MM`, or `±HHMM`) is shifted to UTC; seconds are optional. Input
/// without an offset is read as UTC, and a bare date is midnight UTC.
pub fn normalize_timestamp(param: &'static str, raw: &str) -> Result<String, ConfigError> {
	let raw = raw.trim();

	if raw.is_empty() {
		return Err(ConfigError::MissingParameter { name: param });
	}

	let invalid = |reason: String| ConfigError::InvalidParameter { name: param, reason };
	let instant = match OffsetDateTime::parse(raw, &Rfc3339) {
		Ok(instant) => instant,
		Err(e) => parse_lenient(raw).ok_or_else(|| invalid(e.to_string()))?,
	};

	instant
		.to_offset(UtcOffset::UTC)
		.format(format_description!(
			"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
		))
		.map_err(|e| invalid(e.to_string()))
}

// ISO-8601 shapes outside RFC 3339.
fn parse_lenient(raw: &str) -> Option<OffsetDateTime> {
	let zoned = [
		format_description!(
			"[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
		),
		format_description!(
			"[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory][offset_minute]"
		),
		format_description!(
			"[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
		),
		format_description!(
			"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
		),
	];
	let naive = [
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
		format_description!("[year]-[month]-[day]T[hour]:[minute]Z"),
		format_description!("[year]-[month]-[day]T[hour]:[minute]"),
	];

	zoned
		.iter()
		.find_map(|format| OffsetDateTime::parse(raw, *format).ok())
		.or_else(|| {
			naive
				.iter()
				.find_map(|format| PrimitiveDateTime::parse(raw, *format).ok())
				.map(PrimitiveDateTime::assume_utc)
		})
		.or_else(|| {
			Date::parse(raw, format_description!("[year]-[month]-[day]"))
				.ok()
				.map(|date| date.midnight().assume_utc())
		})
}

/// Trims `raw` and fails with [`ConfigError::MissingParameter`] when nothing is left.
pub fn required(param: &'static str, raw: String) -> Result<String, ConfigError> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		Err(ConfigError::MissingParameter { name: param })
	} else if trimmed.len() == raw.len() {
		Ok(raw)
	} else {
		Ok(trimmed.to_owned())
	}
}

/// Parses a required identifier parameter.
pub fn identifier<T>(param: &'static str, raw: &str) -> Result<T, ConfigError>
where
	T: FromStr<Err = IdentifierError>,
{
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Err(ConfigError::MissingParameter { name: param });
	}

	trimmed.parse().map_err(|e: IdentifierError| ConfigError::InvalidParameter {
		name: param,
		reason: e.to_string(),
	})
}

/// Splits a comma-separated host list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()).map(str::to_owned).collect()
}
