// ------------------------------------------------------------------------------------------------
// --- Time normalization
// ------------------------------------------------------------------------------------------------

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Converts a wall-clock time to a day-relative minute offset for the
/// structured station exports. The agency clamps post-midnight departures to
/// the 00:00-02:59 range, so hours below 3 belong to the end of the service
/// day and are pushed past 1440 to sort after the evening trips.
pub fn service_day_minutes(hour: u32, minute: u32) -> i32 {
    let minutes = (hour * 60 + minute) as i32;
    if hour < 3 {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Converts a wall-clock time to an absolute minute count for the
/// semistructured line schedules. That format extends the hour field past 23
/// instead of wrapping ("24:15" is 00:15 the next day), so the plain
/// arithmetic already sorts late-night trips correctly. Must stay separate
/// from [`service_day_minutes`]: applying either policy to the other source
/// would silently reorder its trips.
pub fn absolute_minutes(hour: u32, minute: u32) -> i32 {
    (hour * 60 + minute) as i32
}
