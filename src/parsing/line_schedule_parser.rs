/// # Line schedule parsing
///
/// One hand-maintained plain-text file per station of a single line-family.
/// The file is organized into direction sections: a section-header token on
/// its own line opens a section, and every following line belongs to it until
/// the next header. Data rows carry a base departure time and a run of
/// same-hour minute offsets.
///
/// ## Example (excerpt):
///
/// `
/// Y-1
/// 06:00,15,30,45
/// 07:00,10,20,30,40,50
/// 24:05,20
/// Y-2
/// 06:02,17,32,47
/// `
///
/// Here `24:05` is 00:05 of the next day: this format extends the hour past
/// 23 instead of wrapping, so absolute minutes sort correctly on their own.
///
/// The source is free text and prone to formatting noise, so nothing below
/// file I/O is fatal: unknown tokens, comments and stray fields are skipped.
///
/// 1 file(s).
/// File(s) read by the parser:
/// {station}_{suffix}.txt
use crate::{
    error::Result,
    models::{LineOutcome, NormalizedTrip, SectionTable, SectionTarget, SkipReason},
    parsing::helpers::{full_hhmm, read_lines},
    utils::absolute_minutes,
};

pub fn parse(path: &str, sections: &SectionTable) -> Result<Vec<NormalizedTrip>> {
    log::info!("Parsing line schedule {path}...");
    let lines = read_lines(path)?;
    Ok(parse_schedule(lines.iter().map(String::as_str), sections))
}

/// Parses a whole schedule. Returns the file's trips sorted ascending by
/// absolute time; input order breaks ties.
pub fn parse_schedule<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    sections: &SectionTable,
) -> Vec<NormalizedTrip> {
    let mut trips = Vec::new();
    let mut current: Option<(String, &SectionTarget)> = None;

    for line in lines {
        match process_line(line, sections, &mut current) {
            LineOutcome::SectionStart(header) => log::debug!("Entering section {header}"),
            LineOutcome::Accepted(parsed) => trips.extend(parsed),
            LineOutcome::Skipped(reason) => log::debug!("Skipping line: {reason}"),
        }
    }

    trips.sort_by_key(NormalizedTrip::time);
    trips
}

fn process_line<'a>(
    line: &str,
    sections: &'a SectionTable,
    current: &mut Option<(String, &'a SectionTarget)>,
) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skipped(SkipReason::BlankLine);
    }

    if let Some(target) = sections.get(line) {
        *current = Some((line.to_string(), target));
        return LineOutcome::SectionStart(line.to_string());
    }

    let Some((header, target)) = current else {
        return LineOutcome::Skipped(SkipReason::BeforeAnySection);
    };

    let fields: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    let Some((hour, minute)) = fields.first().copied().and_then(full_hhmm) else {
        return LineOutcome::Skipped(SkipReason::NotATimeRow);
    };

    let mut parsed = vec![NormalizedTrip::new(
        header.clone(),
        target.destination().to_string(),
        target.direction(),
        absolute_minutes(hour, minute),
    )];

    // Trailing fields are minute offsets within the base hour; anything
    // non-numeric is formatting noise.
    for field in &fields[1..] {
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let Ok(offset) = field.parse::<u32>() else {
            continue;
        };
        parsed.push(NormalizedTrip::new(
            header.clone(),
            target.destination().to_string(),
            target.direction(),
            absolute_minutes(hour, offset),
        ));
    }

    LineOutcome::Accepted(parsed)
}
