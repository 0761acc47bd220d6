#![doc = include_str!("../README.md")]
mod error;
mod models;
mod normalizer;
mod parsing;
mod utils;
mod writer;

pub use error::{Error, Result};
pub use models::*;
pub use normalizer::Normalizer;
pub use parsing::error::{PResult, ParsingError};
pub use parsing::{
    load_line_schedule, load_station_export, parse_export, parse_schedule, process_row,
};
pub use utils::{absolute_minutes, service_day_minutes};
pub use writer::{write_schedule_table, write_station_tables};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn both_pipelines_are_pure_and_repeatable() {
        let export = "\
StationID,RouteID,DestinationStationID,Direction,DepartureTimes
BL10,BL,BL01,0,\"{1,,,06:23,}\"
BL10,BL,BL23,1,\"{1,,,01:45,}\"
";
        let first = parse_export(export, "BL/67.csv").unwrap();
        let second = parse_export(export, "BL/67.csv").unwrap();
        assert_eq!(first.data(), second.data());

        let sections = SectionTable::circular_line();
        let lines = ["Y-1", "23:50,55", "24:05"];
        assert_eq!(
            parse_schedule(lines, &sections),
            parse_schedule(lines, &sections)
        );
    }
}
