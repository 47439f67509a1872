#![allow(dead_code)]

pub mod fixtures;

use jsonize::{JsonPath, Jsonizer, MappingRule, XPath, parse_path, parse_xpath};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Routes library logging to the test output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn jp(text: &str) -> JsonPath {
    parse_path(text).unwrap_or_else(|e| panic!("bad JSONPath '{text}': {e}"))
}

pub fn xp(text: &str) -> XPath {
    parse_xpath(text).unwrap_or_else(|e| panic!("bad XPath '{text}': {e}"))
}

/// Infers rules from `xml` and applies them back to it.
pub fn round_trip(jsonizer: &Jsonizer, xml: &str) -> Result<(Vec<MappingRule>, serde_json::Value), jsonize::JsonizeError> {
    let rules = jsonizer.infer_map(xml)?;
    let json = jsonizer.convert(xml, &rules)?;
    Ok((rules, json))
}

/// The rule reading from `from`, searched through nested item mappings too.
pub fn find_rule<'r>(rules: &'r [MappingRule], from: &str) -> Option<&'r MappingRule> {
    rules.iter().find_map(|rule| {
        if rule.from.path.to_string() == from {
            Some(rule)
        } else {
            find_rule(&rule.item_mappings, from)
        }
    })
}
