use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

// ------------------------------------------------------------------------------------------------
// --- RawTripRecord
// ------------------------------------------------------------------------------------------------

/// One row of a structured station export, exactly as published. Direction is
/// kept as a string because a blank value is an absence-of-service marker,
/// not a parse failure.
#[derive(Debug, Deserialize)]
pub struct RawTripRecord {
    #[serde(rename = "StationID")]
    pub station_id: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    #[serde(rename = "DestinationStationID")]
    pub destination_station_id: String,
    #[serde(rename = "Direction")]
    pub direction: String,
    #[serde(rename = "DepartureTimes")]
    pub departure_times: String,
}

// ------------------------------------------------------------------------------------------------
// --- NormalizedTrip
// ------------------------------------------------------------------------------------------------

/// The canonical unit of output for both pipelines. Field order matches the
/// output table columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTrip {
    line: String,
    destination: String,
    direction: i32,
    time: i32,
}

impl NormalizedTrip {
    pub fn new(line: String, destination: String, direction: i32, time: i32) -> Self {
        Self {
            line,
            destination,
            direction,
            time,
        }
    }

    // Getters/Setters

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Normalized minute offset, the sort key within a station's trip list.
    pub fn time(&self) -> i32 {
        self.time
    }
}

// ------------------------------------------------------------------------------------------------
// --- StationBucket
// ------------------------------------------------------------------------------------------------

/// Trips grouped by station identifier, built fresh for each raw input file.
/// Lists are kept in input order; sorting happens at write time.
#[derive(Debug, Default)]
pub struct StationBucket {
    data: FxHashMap<String, Vec<NormalizedTrip>>,
}

impl StationBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, station: String, trip: NormalizedTrip) {
        self.data.entry(station).or_default().push(trip);
    }

    pub fn get(&self, station: &str) -> Option<&Vec<NormalizedTrip>> {
        self.data.get(station)
    }

    pub fn data(&self) -> &FxHashMap<String, Vec<NormalizedTrip>> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ------------------------------------------------------------------------------------------------
// --- ServicePattern
// ------------------------------------------------------------------------------------------------

/// Weekday-pattern suffix of a structured export file. The agency publishes
/// one file per pattern, named by the digit codes below.
#[derive(
    Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
pub enum ServicePattern {
    #[strum(serialize = "12345")]
    Weekdays,
    #[strum(serialize = "6")]
    Saturday,
    #[strum(serialize = "7")]
    Sunday,
    #[strum(serialize = "67")]
    Weekend,
}

// ------------------------------------------------------------------------------------------------
// --- SectionTable
// ------------------------------------------------------------------------------------------------

/// Target of one direction section of a semistructured line schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTarget {
    destination: String,
    direction: i32,
}

impl SectionTarget {
    pub fn new(destination: String, direction: i32) -> Self {
        Self {
            destination,
            direction,
        }
    }

    // Getters/Setters

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }
}

/// Static mapping from section-header token to (destination, direction).
/// Passed into the schedule parser so further line-families can be supported
/// by extending configuration alone.
#[derive(Clone, Debug, Default)]
pub struct SectionTable {
    targets: FxHashMap<String, SectionTarget>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, header: &str, destination: &str, direction: i32) -> Self {
        self.targets.insert(
            header.to_string(),
            SectionTarget::new(destination.to_string(), direction),
        );
        self
    }

    pub fn get(&self, header: &str) -> Option<&SectionTarget> {
        self.targets.get(header)
    }

    /// Sections of the circular line-family: direction 0 runs towards
    /// increasing station numbers, direction 1 towards decreasing ones.
    pub fn circular_line() -> Self {
        Self::new()
            .with_section("Y-1", "Y20", 0)
            .with_section("Y-2", "Y07", 1)
    }
}

// ------------------------------------------------------------------------------------------------
// --- Row outcomes
// ------------------------------------------------------------------------------------------------

/// Why a row or line produced no trips. These are legitimate "no trip here"
/// conditions in the raw sources, never errors.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Blank Direction column in a station export row.
    BlankDirection,
    /// Blank or "{}" DepartureTimes: the empty-braces placeholder.
    NoScheduledService,
    /// Blank line in a line schedule.
    BlankLine,
    /// Line schedule data seen before the first section header.
    BeforeAnySection,
    /// First field is not a strict HH:MM token (comments and other noise).
    NotATimeRow,
}

/// Outcome of one station export row. Structural violations are the `Err`
/// arm of `PResult<RowOutcome>` and abort the whole file.
#[derive(Debug, PartialEq)]
pub enum RowOutcome {
    Accepted { station: String, trip: NormalizedTrip },
    Skipped(SkipReason),
}

/// Outcome of one line of a semistructured schedule. A single base-time line
/// may carry several same-hour trips. No fatal arm: that format is
/// hand-maintained free text and every malformed line is tolerated.
#[derive(Debug, PartialEq)]
pub enum LineOutcome {
    SectionStart(String),
    Accepted(Vec<NormalizedTrip>),
    Skipped(SkipReason),
}
