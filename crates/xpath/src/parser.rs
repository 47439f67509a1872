//! A `nom`-based parser for the slash-separated XPath subset.
//!
//! ```text
//! xpath    := '/' (step ('/' step)*)? | '.' ('/' step)*
//! step     := '@'? tag ('[' digits ']')?
//! tag      := '{' uri? '}' name | name (':' name)?
//! ```
use super::ast::{Namespace, Step, Tag, XPath, XPathAnchor};
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res, opt},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// --- Main Public Parser ---

pub fn parse_xpath(input: &str) -> Result<XPath, XPathError> {
    let syntax = |message: String| XPathError::Syntax {
        path: input.to_string(),
        message,
    };

    let path = match xpath(input) {
        Ok(("", path)) => path,
        Ok((rem, _)) => {
            return Err(syntax(format!(
                "Parser did not consume all input. Remainder: '{}'",
                rem
            )));
        }
        Err(e) => return Err(syntax(e.to_string())),
    };

    if let Some(position) = path.steps[..path.steps.len().saturating_sub(1)]
        .iter()
        .position(|step| step.is_attribute)
    {
        return Err(syntax(format!("attribute step {} must be the last step", position + 1)));
    }
    for step in &path.steps {
        match step.index {
            Some(0) => return Err(syntax("repetition indices start at 1".to_string())),
            Some(_) if step.is_attribute => {
                return Err(syntax("an attribute step cannot carry an index".to_string()));
            }
            _ => {}
        }
    }
    Ok(path)
}

impl FromStr for XPath {
    type Err = XPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_xpath(s)
    }
}

impl Serialize for XPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for XPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_xpath(&raw).map_err(serde::de::Error::custom)
    }
}

// --- Combinators ---

fn xpath(input: &str) -> IResult<&str, XPath> {
    alt((
        map(preceded(char('/'), separated_list0(char('/'), step)), |steps| {
            XPath::new(XPathAnchor::Root, steps)
        }),
        map(preceded(char('.'), many0(preceded(char('/'), step))), |steps| {
            XPath::new(XPathAnchor::Context, steps)
        }),
    ))
    .parse(input)
}

fn is_name_char(c: char) -> bool {
    !matches!(c, '/' | '[' | ']' | '@' | '{' | '}' | ':') && !c.is_whitespace()
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char).parse(input)
}

fn expanded_tag(input: &str) -> IResult<&str, Tag> {
    map(
        pair(delimited(char('{'), take_while(|c: char| c != '}'), char('}')), name),
        |(uri, local): (&str, &str)| Tag {
            namespace: Some(Namespace::Uri(uri.to_string())),
            local: local.to_string(),
        },
    )
    .parse(input)
}

fn qualified_tag(input: &str) -> IResult<&str, Tag> {
    map(pair(name, opt(preceded(char(':'), name))), |(first, second)| match second {
        Some(local) => Tag::prefixed(first, local),
        None => Tag::local(first),
    })
    .parse(input)
}

fn index(input: &str) -> IResult<&str, usize> {
    map_res(delimited(char('['), digit1, char(']')), str::parse::<usize>).parse(input)
}

fn step(input: &str) -> IResult<&str, Step> {
    map(
        (opt(char('@')), alt((expanded_tag, qualified_tag)), opt(index)),
        |(at, tag, index)| Step {
            tag,
            index,
            is_attribute: at.is_some(),
        },
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_anchors() {
        assert_eq!(parse_xpath("/").unwrap(), XPath::root());
        assert_eq!(parse_xpath(".").unwrap(), XPath::context());
    }

    #[test]
    fn test_parse_absolute_path_with_attribute() {
        let path = parse_xpath("/a/ns:b[2]/@c").unwrap();
        assert!(path.is_absolute());
        assert!(path.is_attribute());
        assert_eq!(
            path.steps(),
            &[
                Step::element(Tag::local("a")),
                Step::indexed(Tag::prefixed("ns", "b"), 2),
                Step::attribute(Tag::local("c")),
            ]
        );
    }

    #[test]
    fn test_parse_expanded_names() {
        let path = parse_xpath("./{http://example.com/ns}item[1]/@{urn:x}id").unwrap();
        assert!(path.is_relative());
        assert_eq!(path.steps()[0], Step::indexed(Tag::expanded("http://example.com/ns", "item"), 1));
        assert_eq!(path.steps()[1], Step::attribute(Tag::expanded("urn:x", "id")));
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "/",
            ".",
            "/a",
            "/a/b[1]/c",
            "./child",
            "./@attrib",
            "/ns:root/ns:item[3]/@xml:lang",
            "/{urn:a}root/{urn:a}item",
            "/{urn:a}root/{}local[2]",
        ] {
            assert_eq!(parse_xpath(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_syntax_errors() {
        for text in [
            "", "a/b", "/a/", "//a", "./", ".a", "..", "/a[0]", "/a[x]", "/a[1", "/@a/b", "/a/@b[1]", "/a b",
            "/ns:", "/{urn:x", "/a:b:c",
        ] {
            assert!(
                matches!(parse_xpath(text), Err(XPathError::Syntax { .. })),
                "expected syntax error for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        let path: XPath = serde_json::from_str("\"/a/b[1]/@c\"").unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/a/b[1]/@c\"");
    }
}
