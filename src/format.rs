//! Turns an uptime in seconds into the label and detail texts.
//!
//! Everything here is pure: the same seconds value and translation function
//! always yield the same strings.

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Maps an English unit key (`"day"`, `"days"`, ...) to the text shown.
pub type Translate = dyn Fn(&str) -> String;

/// Translation used when none is configured.
pub fn identity(key: &str) -> String {
    key.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Hour,
    Minute,
}

impl Unit {
    pub fn size_seconds(self) -> u64 {
        match self {
            Unit::Day => SECONDS_PER_DAY,
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Minute => SECONDS_PER_MINUTE,
        }
    }

    /// Translation key for `count` of this unit; only exactly one is singular.
    pub fn key(self, count: u64) -> &'static str {
        match (self, count == 1) {
            (Unit::Day, true) => "day",
            (Unit::Day, false) => "days",
            (Unit::Hour, true) => "hour",
            (Unit::Hour, false) => "hours",
            (Unit::Minute, true) => "minute",
            (Unit::Minute, false) => "minutes",
        }
    }
}

/// Days, hours and minutes left over after each larger unit is taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl DurationBreakdown {
    pub fn from_seconds(seconds: f64) -> Self {
        let total = whole_seconds(seconds);
        let (days, rem) = divmod(total, SECONDS_PER_DAY);
        let (hours, rem) = divmod(rem, SECONDS_PER_HOUR);
        let (minutes, _) = divmod(rem, SECONDS_PER_MINUTE);
        Self { days, hours, minutes }
    }
}

fn divmod(value: u64, divisor: u64) -> (u64, u64) {
    (value / divisor, value % divisor)
}

// Fractions are dropped; negative and NaN inputs saturate to zero.
fn whole_seconds(seconds: f64) -> u64 {
    seconds.trunc() as u64
}

fn phrase(count: u64, unit: Unit, translate: &Translate) -> String {
    format!("{} {}", count, translate(unit.key(count)))
}

/// The largest unit with a non-zero count, each counted from the total.
/// Falls back to minutes, so anything under a minute reads "0 minutes".
pub fn short_text(seconds: f64, translate: &Translate) -> String {
    let total = whole_seconds(seconds);
    let unit = [Unit::Day, Unit::Hour]
        .into_iter()
        .find(|unit| total / unit.size_seconds() > 0)
        .unwrap_or(Unit::Minute);
    phrase(total / unit.size_seconds(), unit, translate)
}

/// All three units, zero or not: `"<days> <hours> <minutes>"`.
pub fn detailed_text(seconds: f64, translate: &Translate) -> String {
    let breakdown = DurationBreakdown::from_seconds(seconds);
    format!(
        "{} {} {}",
        phrase(breakdown.days, Unit::Day, translate),
        phrase(breakdown.hours, Unit::Hour, translate),
        phrase(breakdown.minutes, Unit::Minute, translate),
    )
}

/// Both texts for one sample, recomputed every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub short: String,
    pub detailed: String,
}

impl DisplayText {
    pub fn render(seconds: f64, translate: &Translate) -> Self {
        Self {
            short: short_text(seconds, translate),
            detailed: detailed_text(seconds, translate),
        }
    }
}
