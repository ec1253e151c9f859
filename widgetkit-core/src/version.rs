//! Date-based versions.

use std::time::SystemTime;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::types::{AssetRecord, VersionStamp};

/// Map a UTC timestamp to `(year, month, day, hour * 60 + minute)`.
///
/// Two files saved in the same minute get equal versions.
pub fn derive_version(timestamp: DateTime<Utc>) -> VersionStamp {
    VersionStamp::new(
        timestamp.year().max(0) as u32,
        timestamp.month(),
        timestamp.day(),
        timestamp.hour() * 60 + timestamp.minute(),
    )
}

/// [`derive_version`] for a file modification time.
pub fn derive_version_from_system_time(modified: SystemTime) -> VersionStamp {
    derive_version(DateTime::<Utc>::from(modified))
}

/// Highest version among `records`, or [`VersionStamp::ZERO`] when empty.
pub fn aggregate_version<'a, I>(records: I) -> VersionStamp
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    records
        .into_iter()
        .map(AssetRecord::version)
        .fold(VersionStamp::ZERO, VersionStamp::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().expect("valid date")
    }

    #[test]
    fn minute_of_day_combines_hour_and_minute() {
        assert_eq!(
            derive_version(at(2024, 3, 9, 13, 37)),
            VersionStamp::new(2024, 3, 9, 13 * 60 + 37)
        );
    }

    #[test]
    fn seconds_do_not_affect_version() {
        let a = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 1).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 59).unwrap();
        assert_eq!(derive_version(a), derive_version(b));
    }

    #[test]
    fn system_time_is_read_as_utc() {
        let t = at(2023, 12, 31, 23, 59);
        let st: SystemTime = t.into();
        assert_eq!(
            derive_version_from_system_time(st),
            VersionStamp::new(2023, 12, 31, 1439)
        );
    }
}
