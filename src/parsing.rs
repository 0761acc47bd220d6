pub mod error;
mod helpers;
mod line_schedule_parser;
mod station_export_parser;

pub use line_schedule_parser::parse as load_line_schedule;
pub use line_schedule_parser::parse_schedule;
pub use station_export_parser::parse as load_station_export;
pub use station_export_parser::{parse_export, process_row};
