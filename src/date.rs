//! Calendar dates rebuilt from free-form `day/month[/year]` text

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Error, Result};

/// Resolve an IANA zone name, falling back to UTC when it is unknown.
pub fn load_time_zone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(e) => {
            warn!(zone = name, error = %e, "unknown time zone, using UTC");
            Tz::UTC
        }
    }
}

/// Build a midnight timestamp in `tz` from `"day<delim>month[<delim>year]"`.
///
/// Non-numeric or missing components count as 0 and out-of-range values roll
/// over like calendar arithmetic (day 0 is the last day of the previous
/// month). Two-digit years are taken as 20xx; without a year component the
/// current year in `tz` is used.
pub fn create_date_from_string(s: &str, delim: &str, has_year: bool, tz: Tz) -> Result<DateTime<Tz>> {
    if s.is_empty() || delim.is_empty() {
        return Err(Error::EmptyDateInput);
    }

    let parts: Vec<&str> = s.split(delim).map(str::trim).collect();
    let component = |i: usize| -> i32 {
        parts.get(i).and_then(|p| p.parse::<i32>().ok()).unwrap_or(0)
    };

    let day = component(0);
    let month = component(1);
    let year = if has_year {
        let raw = parts.get(2).copied().unwrap_or("");
        let year = component(2);
        if raw.len() == 2 {
            year + 2000
        } else {
            year
        }
    } else {
        Utc::now().with_timezone(&tz).year()
    };

    let out_of_range = || Error::DateOutOfRange { day, month, year };

    let date = normalized_date(year, month, day).ok_or_else(out_of_range)?;
    let midnight = date.and_time(NaiveTime::MIN);
    local_datetime(tz, midnight).ok_or_else(out_of_range)
}

fn normalized_date(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let months = i64::from(month) - 1;
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(u32::try_from(months).ok()?))?
    } else {
        first.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
    };
    shifted.checked_add_signed(TimeDelta::try_days(i64::from(day) - 1)?)
}

// Midnight can fall inside a DST gap; the first valid instant after it is used.
fn local_datetime(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let later = naive.checked_add_signed(TimeDelta::hours(1))?;
        tz.from_local_datetime(&later).earliest()
    })
}
