//! Entry timestamp conversion.

use chrono::Local;
use chrono::NaiveDate;
use filetime::FileTime;

/// Converts a zip (DOS) timestamp to a filesystem time.
///
/// DOS timestamps carry no zone and are read as local time. Returns `None`
/// when the fields are not a valid calendar value or fall into a daylight
/// saving gap; an ambiguous local time resolves to its earliest instant.
///
/// # Examples
///
/// ```
/// use antj_core::extraction::timestamps::dos_to_filetime;
///
/// let dt = zip::DateTime::from_date_and_time(2015, 6, 15, 10, 30, 0).unwrap();
/// assert!(dos_to_filetime(dt).is_some());
/// ```
#[must_use]
pub fn dos_to_filetime(dt: zip::DateTime) -> Option<FileTime> {
    let local = NaiveDate::from_ymd_opt(
        i32::from(dt.year()),
        u32::from(dt.month()),
        u32::from(dt.day()),
    )?
    .and_hms_opt(
        u32::from(dt.hour()),
        u32::from(dt.minute()),
        u32::from(dt.second()),
    )?
    .and_local_timezone(Local)
    .earliest()?;

    Some(FileTime::from_unix_time(local.timestamp(), 0))
}
