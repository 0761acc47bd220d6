use std::{
    fs::File,
    io::{self, Read},
};

/// Row-level parsing primitives shared by the two pipelines.
use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::{char, one_of},
    combinator::{map, map_res},
    multi::count,
    sequence::delimited,
};

pub(crate) fn to_string(v: Vec<char>) -> String {
    v.into_iter().collect::<String>()
}

pub(crate) fn two_digit_parser(input: &str) -> IResult<&str, u32> {
    map_res(count(one_of("0123456789"), 2), |digits| {
        to_string(digits).parse::<u32>()
    })
    .parse(input)
}

/// Wall-clock token, e.g. "06:23". The hour is not range-checked: one raw
/// format encodes late-night trips as "24:15" and beyond.
pub(crate) fn hhmm_parser(input: &str) -> IResult<&str, (u32, u32)> {
    map(
        (two_digit_parser, char(':'), two_digit_parser),
        |(hour, _, minute)| (hour, minute),
    )
    .parse(input)
}

/// Strict variant: the whole field must be the HH:MM token, nothing else.
pub(crate) fn full_hhmm(field: &str) -> Option<(u32, u32)> {
    match hhmm_parser(field) {
        Ok(("", time)) => Some(time),
        _ => None,
    }
}

/// Packed departure field: a single brace-wrapped pseudo-tuple,
/// e.g. `{1,,,06:23,}` -> `["1", "", "", "06:23", ""]`.
pub(crate) fn packed_field_parser(input: &str) -> IResult<&str, Vec<String>> {
    map(
        delimited(char('{'), take_till(|c| c == '}'), char('}')),
        |inner: &str| inner.split(',').map(|s| s.trim().to_string()).collect(),
    )
    .parse(input)
}

pub(crate) fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let mut reader = io::BufReader::new(File::open(path)?);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents.lines().map(String::from).collect())
}
