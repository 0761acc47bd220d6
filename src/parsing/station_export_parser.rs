/// # Station export parsing
///
/// One CSV file per line and service pattern, one row per trip instance. The
/// files are published in the agency's legacy Big5 charset; decoding with
/// anything else corrupts non-ASCII destination and station names.
///
/// The columns of interest (others are accepted and ignored):
///
/// * `StationID`: station the trip departs from
/// * `RouteID`: line identifier
/// * `DestinationStationID`: terminus the trip is bound for
/// * `Direction`: 0/1 travel direction, blank when no service is scheduled
/// * `DepartureTimes`: brace-wrapped pseudo-tuple holding the time of day
///
/// ## Example (excerpt):
///
/// `
/// StationID,RouteID,DestinationStationID,Direction,DepartureTimes
/// BL10,BL,BL01,0,"{1,,,06:23,}"   % departs 06:23
/// BL10,BL,BL23,1,{}               % placeholder: no scheduled service
/// BL10,BL,BL23,,                  % blank direction: no scheduled service
/// `
///
/// Post-midnight departures are clamped to 00:00-02:59 at the source, so
/// times are normalized with the service-day rollover policy.
///
/// 1 file(s).
/// File(s) read by the parser:
/// {line}/{pattern}.csv
use std::fs;

use crate::{
    error::{Error, Result},
    models::{NormalizedTrip, RawTripRecord, RowOutcome, SkipReason, StationBucket},
    parsing::{
        error::{PResult, ParsingError},
        helpers::{full_hhmm, packed_field_parser},
    },
    utils::service_day_minutes,
};

pub fn parse(path: &str) -> Result<StationBucket> {
    log::info!("Parsing station export {path}...");
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = encoding_rs::BIG5.decode(&bytes);
    if had_errors {
        return Err(Error::Decode(path.to_string()));
    }
    parse_export(&text, path)
}

/// Parses one already-decoded station export into per-station trip lists.
/// `file` is used for error context only.
pub fn parse_export(text: &str, file: &str) -> Result<StationBucket> {
    let mut buckets = StationBucket::new();
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let raw: RawTripRecord = record.deserialize(Some(&headers))?;
        let outcome = process_row(&raw).map_err(|error| Error::Parsing {
            error,
            file: file.to_string(),
            line: record.iter().collect::<Vec<_>>().join(","),
            // The header row is line 1.
            line_number: index + 2,
        })?;
        match outcome {
            RowOutcome::Accepted { station, trip } => buckets.push(station, trip),
            RowOutcome::Skipped(reason) => log::debug!("Skipping row {}: {reason}", index + 2),
        }
    }

    Ok(buckets)
}

/// Applies the per-row contract. The two guards mark absence of service and
/// skip the row; everything past them is a schema violation and fatal for
/// the file.
pub fn process_row(row: &RawTripRecord) -> PResult<RowOutcome> {
    let direction = row.direction.trim();
    if direction.is_empty() {
        return Ok(RowOutcome::Skipped(SkipReason::BlankDirection));
    }

    let departure = row.departure_times.trim();
    if departure.is_empty() || departure == "{}" {
        return Ok(RowOutcome::Skipped(SkipReason::NoScheduledService));
    }

    let direction: i32 = direction.parse()?;
    let time_of_day = extract_time_of_day(departure)?;
    let (hour, minute) = full_hhmm(&time_of_day)
        .ok_or_else(|| ParsingError::InvalidTimeOfDay(time_of_day.clone()))?;

    let trip = NormalizedTrip::new(
        row.route_id.clone(),
        row.destination_station_id.clone(),
        direction,
        service_day_minutes(hour, minute),
    );
    Ok(RowOutcome::Accepted {
        station: row.station_id.clone(),
        trip,
    })
}

/// The time of day sits at position 3 of the brace-wrapped pseudo-tuple.
/// The sibling positions are accepted as present but unused; a tuple with
/// fewer than 4 positions is a structural violation.
fn extract_time_of_day(field: &str) -> PResult<String> {
    let (_, positions) = packed_field_parser(field)?;
    positions
        .into_iter()
        .nth(3)
        .ok_or_else(|| ParsingError::DepartureFieldTooShort(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tests::get_json_values;
    use pretty_assertions::assert_eq;

    fn raw_row(direction: &str, departure_times: &str) -> RawTripRecord {
        RawTripRecord {
            station_id: "BL10".to_string(),
            route_id: "BL".to_string(),
            destination_station_id: "BL01".to_string(),
            direction: direction.to_string(),
            departure_times: departure_times.to_string(),
        }
    }

    #[test]
    fn extracts_time_of_day_from_packed_field() {
        assert_eq!(extract_time_of_day("{1,,,06:23,}").unwrap(), "06:23");
        assert_eq!(extract_time_of_day("{9,x,y,23:59,z}").unwrap(), "23:59");
    }

    #[test]
    fn short_packed_field_is_fatal() {
        let err = extract_time_of_day("{1,,}").unwrap_err();
        assert!(matches!(err, ParsingError::DepartureFieldTooShort(_)));
    }

    #[test]
    fn blank_direction_is_skipped_regardless_of_departure_field() {
        let outcome = process_row(&raw_row("", "{1,,,06:23,}")).unwrap();
        assert_eq!(outcome, RowOutcome::Skipped(SkipReason::BlankDirection));
        let outcome = process_row(&raw_row(" ", "not even a tuple")).unwrap();
        assert_eq!(outcome, RowOutcome::Skipped(SkipReason::BlankDirection));
    }

    #[test]
    fn placeholder_departure_field_is_skipped() {
        let outcome = process_row(&raw_row("0", "{}")).unwrap();
        assert_eq!(outcome, RowOutcome::Skipped(SkipReason::NoScheduledService));
        let outcome = process_row(&raw_row("0", "")).unwrap();
        assert_eq!(outcome, RowOutcome::Skipped(SkipReason::NoScheduledService));
    }

    #[test]
    fn malformed_direction_is_fatal() {
        let err = process_row(&raw_row("north", "{1,,,06:23,}")).unwrap_err();
        assert!(matches!(err, ParsingError::ParseInt(_)));
    }

    #[test]
    fn accepted_row_normalizes_with_service_day_rollover() {
        let outcome = process_row(&raw_row("1", "{1,,,02:10,}")).unwrap();
        let RowOutcome::Accepted { station, trip } = outcome else {
            panic!("expected an accepted row");
        };
        assert_eq!(station, "BL10");
        assert_eq!(trip.time(), 1570);

        let reference = r#"
            {
                "line": "BL",
                "destination": "BL01",
                "direction": 1,
                "time": 1570
            }"#;
        let (trip, reference) = get_json_values(&trip, reference).unwrap();
        assert_eq!(trip, reference);
    }

    #[test]
    fn export_buckets_by_station() {
        let text = "\
StationID,RouteID,DestinationStationID,Direction,DepartureTimes
BL10,BL,BL01,0,\"{1,,,06:23,}\"
BL10,BL,BL23,1,\"{1,,,05:00,}\"
BL11,BL,BL23,1,{}
BL11,BL,BL01,,
BL11,BL,BL01,0,\"{2,,,00:05,}\"
";
        let buckets = parse_export(text, "BL/12345.csv").unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.get("BL10").unwrap().len(), 2);

        let bl11 = buckets.get("BL11").unwrap();
        assert_eq!(bl11.len(), 1);
        assert_eq!(bl11[0].time(), 1445);
        assert_eq!(bl11[0].destination(), "BL01");
    }

    #[test]
    fn malformed_direction_aborts_the_file() {
        let text = "\
StationID,RouteID,DestinationStationID,Direction,DepartureTimes
BL10,BL,BL01,0,\"{1,,,06:23,}\"
BL10,BL,BL01,zero,\"{1,,,07:23,}\"
";
        let err = parse_export(text, "BL/12345.csv").unwrap_err();
        match err {
            Error::Parsing {
                file, line_number, ..
            } => {
                assert_eq!(file, "BL/12345.csv");
                assert_eq!(line_number, 3);
            }
            other => panic!("expected a parsing error, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_fatal() {
        let text = "\
StationID,RouteID,Direction,DepartureTimes
BL10,BL,0,\"{1,,,06:23,}\"
";
        let err = parse_export(text, "BL/12345.csv").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn big5_destination_names_survive_decoding() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(
            b"StationID,RouteID,DestinationStationID,Direction,DepartureTimes\n",
        );
        // 0xA5 0x78 is Big5 for U+53F0.
        bytes.extend_from_slice(b"BL10,BL,\xa5\x78,0,\"{1,,,06:23,}\"\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("12345.csv");
        std::fs::write(&path, bytes).unwrap();

        let buckets = parse(path.to_str().unwrap()).unwrap();
        let trips = buckets.get("BL10").unwrap();
        assert_eq!(trips[0].destination(), "\u{53F0}");
    }

    #[test]
    fn undecodable_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("12345.csv");
        std::fs::write(
            &path,
            b"StationID,RouteID,DestinationStationID,Direction,DepartureTimes\n\xff\xff\n",
        )
        .unwrap();

        let err = parse(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
