//! Time zone used when reporting event timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Where event timestamps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputZone {
    /// The host's local time zone, resolved per timestamp (DST aware).
    #[default]
    Local,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl OutputZone {
    pub fn utc() -> Self {
        OutputZone::Fixed(Utc.fix())
    }

    /// Convert a UTC instant into this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            OutputZone::Local => instant.with_timezone(&Local).fixed_offset(),
            OutputZone::Fixed(offset) => instant.with_timezone(offset),
        }
    }
}

impl FromStr for OutputZone {
    type Err = String;

    /// Accepts `local`, `utc`/`z`, or an offset such as `+02:00`, `-0530`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" | "" => return Ok(OutputZone::Local),
            "utc" | "z" => return Ok(OutputZone::utc()),
            _ => {}
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(format!("Unknown timezone '{}'. Use 'local', 'utc' or '+HH:MM'", s)),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Malformed UTC offset '{}'", s));
        }
        let hours: i32 = digits[..2].parse().map_err(|_| format!("Malformed UTC offset '{}'", s))?;
        let minutes: i32 = digits[2..].parse().map_err(|_| format!("Malformed UTC offset '{}'", s))?;
        if minutes >= 60 {
            return Err(format!("Malformed UTC offset '{}'", s));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(OutputZone::Fixed)
            .ok_or_else(|| format!("UTC offset '{}' out of range", s))
    }
}

impl fmt::Display for OutputZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputZone::Local => f.write_str("local"),
            OutputZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
