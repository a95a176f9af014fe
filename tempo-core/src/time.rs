//! Time utilities: fractional-day arithmetic and timezone-aware due dates.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Difference between `due` and `now` in fractional days.
/// Negative when the due date has passed.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (due - now).num_milliseconds() as f64 / 86_400_000.0
}

/// Parse a due date like "2026-08-20 17:00" in an IANA tz like
/// "America/Chicago", returning UTC.
pub fn parse_local_due_to_utc(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}
