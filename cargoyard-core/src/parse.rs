/// Parsers for color tags and floor layouts
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, one_of, space0},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many1,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::block::VisualTag;
use crate::error::{CargoError, Result};
use crate::floor::FloorGrid;

/// Parse a `#rrggbb` or `#rgb` color tag
pub fn parse_color(input: &str) -> Result<VisualTag> {
    match all_consuming(hex_color)(input.trim()) {
        Ok((_, color)) => Ok(color),
        Err(_) => Err(CargoError::InvalidColor(input.to_string())),
    }
}

fn hex_color(input: &str) -> IResult<&str, VisualTag> {
    preceded(tag("#"), alt((long_hex, short_hex)))(input)
}

fn long_hex(input: &str) -> IResult<&str, VisualTag> {
    map(tuple((hex_pair, hex_pair, hex_pair)), |(r, g, b)| {
        VisualTag::rgb(r, g, b)
    })(input)
}

fn short_hex(input: &str) -> IResult<&str, VisualTag> {
    map(tuple((hex_nibble, hex_nibble, hex_nibble)), |(r, g, b)| {
        VisualTag::rgb(r, g, b)
    })(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u8::from_str_radix(digits, 16),
    )(input)
}

// `#abc` expands to `#aabbcc`
fn hex_nibble(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()),
        |digit: &str| u8::from_str_radix(digit, 16).map(|v| v * 17),
    )(input)
}

/// Parse a floor layout: one row per line, `1`/`#` solid and `0`/`.` empty,
/// cells optionally separated by spaces or commas.
pub fn parse_floor_layout(input: &str) -> Result<FloorGrid> {
    let lines: Vec<(usize, &str)> = input.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();

    let first = lines.iter().position(|(_, l)| !l.trim().is_empty());
    let last = lines.iter().rposition(|(_, l)| !l.trim().is_empty());
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(CargoError::InvalidLayout {
                line: 1,
                reason: "layout has no rows".to_string(),
            })
        }
    };

    let mut rows = Vec::with_capacity(last - first + 1);
    for &(line, text) in &lines[first..=last] {
        rows.push(parse_row(line, text)?);
    }

    Ok(FloorGrid::new(rows))
}

fn parse_row(line: usize, text: &str) -> Result<Vec<bool>> {
    match all_consuming(row)(text) {
        Ok((_, cells)) => Ok(cells),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let reason = match e.input.trim().chars().next() {
                None => "empty row".to_string(),
                Some(c) => {
                    let column = text.len() - e.input.trim_start().len() + 1;
                    format!("unexpected character {:?} at column {}", c, column)
                }
            };
            Err(CargoError::InvalidLayout { line, reason })
        }
        Err(nom::Err::Incomplete(_)) => Err(CargoError::InvalidLayout {
            line,
            reason: "incomplete row".to_string(),
        }),
    }
}

fn row(input: &str) -> IResult<&str, Vec<bool>> {
    preceded(space0, many1(terminated(cell, cell_separator)))(input)
}

fn cell(input: &str) -> IResult<&str, bool> {
    alt((value(true, one_of("1#")), value(false, one_of("0."))))(input)
}

fn cell_separator(input: &str) -> IResult<&str, ()> {
    value((), tuple((space0, opt(char(',')), space0)))(input)
}
