//! Serializes time-sorted trip lists into the canonical per-station tables.
//!
//! One UTF-8 CSV file per station, named `{station}_{suffix}.csv`, one data
//! row per trip. The two pipelines share the record shape but label the time
//! column differently (`time` is day-relative, `abs_time` absolute).

use std::{fs, path::Path};

use crate::{
    error::Result,
    models::{NormalizedTrip, StationBucket},
};

const EXPORT_HEADER: [&str; 4] = ["line", "destination", "direction", "time"];
const SCHEDULE_HEADER: [&str; 4] = ["line", "destination", "direction", "abs_time"];

/// Writes one table per station of a parsed station export under
/// `{out_dir}/{line}/`. Trip lists are sorted here, ascending by
/// day-relative time; duplicates are preserved.
pub fn write_station_tables(
    out_dir: &Path,
    line: &str,
    suffix: &str,
    buckets: &StationBucket,
) -> Result<()> {
    let dir = out_dir.join(line);
    fs::create_dir_all(&dir)?;

    for (station, trips) in buckets.data() {
        let mut trips: Vec<&NormalizedTrip> = trips.iter().collect();
        trips.sort_by_key(|trip| trip.time());

        let path = dir.join(format!("{station}_{suffix}.csv"));
        write_table(&path, &EXPORT_HEADER, trips)?;
    }

    Ok(())
}

/// Writes the single table of a parsed line schedule. The parser already
/// sorted the trips by absolute time.
pub fn write_schedule_table(
    out_dir: &Path,
    station: &str,
    suffix: &str,
    trips: &[NormalizedTrip],
) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{station}_{suffix}.csv"));
    write_table(&path, &SCHEDULE_HEADER, trips)
}

fn write_table<'a>(
    path: &Path,
    header: &[&str; 4],
    trips: impl IntoIterator<Item = &'a NormalizedTrip>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for trip in trips {
        writer.serialize(trip)?;
    }
    writer.flush()?;
    Ok(())
}
