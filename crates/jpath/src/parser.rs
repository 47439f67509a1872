//! A `nom`-based parser for the dotted JSONPath subset.
//!
//! ```text
//! path    := anchor ('.' key | quoted | bracket)*
//! anchor  := '$' | '@'
//! quoted  := "['" char* "']"
//! bracket := '[' int? (':' int? (':' int?)?)? ']'
//! ```
use super::ast::{Anchor, JsonPath, PathSegment};
use crate::error::PathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, none_of, one_of},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// --- Main Public Parser ---

pub fn parse_path(input: &str) -> Result<JsonPath, PathError> {
    let syntax = |message: String| PathError::Syntax {
        path: input.to_string(),
        message,
    };

    match path(input) {
        Ok(("", path)) => Ok(path),
        Ok((rem, _)) => Err(syntax(format!("Parser did not consume all input. Remainder: '{}'", rem))),
        Err(e) => Err(syntax(e.to_string())),
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_path(&raw).map_err(serde::de::Error::custom)
    }
}

// --- Combinators ---

fn path(input: &str) -> IResult<&str, JsonPath> {
    map(
        (anchor, many0(alt((map(preceded(char('.'), key), PathSegment::Key), quoted_key, bracket)))),
        |(anchor, segments)| JsonPath::new(anchor, segments),
    )
    .parse(input)
}

fn anchor(input: &str) -> IResult<&str, Anchor> {
    alt((value(Anchor::Root, char('$')), value(Anchor::Current, char('@')))).parse(input)
}

/// Everything up to the next separator or bracket belongs to the key, so
/// namespace prefixes (`ns:tag`) and attribute markers (`@id`, `_id`) survive.
fn key(input: &str) -> IResult<&str, String> {
    map(take_while1(|c: char| !matches!(c, '.' | '[' | ']')), str::to_string).parse(input)
}

/// `['key']` carries keys the dotted form cannot; a backslash escapes `'` and itself.
fn quoted_key(input: &str) -> IResult<&str, PathSegment> {
    map(
        delimited(
            tag("['"),
            many0(alt((none_of("'\\"), preceded(char('\\'), one_of("'\\"))))),
            tag("']"),
        ),
        |chars: Vec<char>| PathSegment::Key(chars.into_iter().collect()),
    )
    .parse(input)
}

fn number(input: &str) -> IResult<&str, isize> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<isize>).parse(input)
}

/// `[n]` is an index; any bracket containing a colon is a slice.
fn bracket(input: &str) -> IResult<&str, PathSegment> {
    map_res(
        delimited(
            char('['),
            pair(
                opt(number),
                opt(pair(preceded(char(':'), opt(number)), opt(preceded(char(':'), opt(number))))),
            ),
            char(']'),
        ),
        |(start, rest)| match rest {
            None => start.map(PathSegment::Index).ok_or(PathError::Syntax {
                path: input.to_string(),
                message: "empty brackets".to_string(),
            }),
            Some((stop, step)) => PathSegment::slice(start, stop, step.flatten()),
        },
    )
    .parse(input)
}
