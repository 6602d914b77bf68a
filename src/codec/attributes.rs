//! Attribute value grammars
//!
//! Every parser here is total: malformed text yields `None` (or a truncated
//! list) and never an error. Builders are the exact inverses for the values
//! the parsers accept.

use crate::models::{Quaternion, Scale, ScaleByDistance, Vector3};
use crate::xml::AttributeMap;

/// Wire prefix that marks an author-defined attribute
pub const CUSTOM_ATTRIBUTE_PREFIX: &str = "_";

// ============================================================================
// PARSING
// ============================================================================

/// Parse a single complete numeric literal
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Parse a comma/whitespace separated number list
///
/// Parsing stops at the first token that is not a number and keeps what was
/// read before it: `"-1 2.5 a 3"` gives `[-1, 2.5]`.
pub fn parse_number_array(text: &str) -> Option<Vec<f64>> {
    if text.is_empty() {
        return None;
    }
    Some(split_list(text).map_while(parse_number).collect())
}

/// Exactly three numbers
pub fn parse_vector3(text: &str) -> Option<Vector3> {
    match parse_number_array(text)?.as_slice() {
        [x, y, z] => Some(Vector3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Exactly four numbers, `x y z w`
pub fn parse_quaternion(text: &str) -> Option<Quaternion> {
    match parse_number_array(text)?.as_slice() {
        [x, y, z, w] => Some(Quaternion::new(*x, *y, *z, *w)),
        _ => None,
    }
}

/// Per-axis scale if three numbers are given, else a uniform factor
pub fn parse_scale(text: &str) -> Option<Scale> {
    parse_vector3(text)
        .map(Scale::Vector)
        .or_else(|| parse_number(text).map(Scale::Uniform))
}

/// `true` (any case) or a number
pub fn parse_boolean_or_number(text: &str) -> Option<ScaleByDistance> {
    if text.eq_ignore_ascii_case("true") {
        return Some(ScaleByDistance::Enabled(true));
    }
    parse_number(text).map(ScaleByDistance::Factor)
}

/// Space separated tokens, e.g. script `args`
pub fn parse_string_list(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ').map(str::to_string).collect()
}

/// Collect `_`-prefixed attributes, keyed without the prefix
pub fn parse_custom_attributes(attributes: &AttributeMap) -> AttributeMap {
    attributes
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(CUSTOM_ATTRIBUTE_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value.clone()))
        })
        .collect()
}

// ============================================================================
// BUILDING
// ============================================================================

pub fn build_number(value: f64) -> String {
    value.to_string()
}

pub fn build_number_array(values: &[f64], separator: &str) -> String {
    values
        .iter()
        .map(|v| build_number(*v))
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn build_vector3(v: &Vector3) -> String {
    build_number_array(&[v.x, v.y, v.z], " ")
}

pub fn build_quaternion(q: &Quaternion) -> String {
    build_number_array(&[q.x, q.y, q.z, q.w], " ")
}

pub fn build_scale(scale: &Scale) -> String {
    match scale {
        Scale::Uniform(factor) => build_number(*factor),
        Scale::Vector(v) => build_vector3(v),
    }
}

/// `"true"`; `false` is omitted unless `write_false` is set
pub fn build_boolean(value: bool, write_false: bool) -> Option<String> {
    match (value, write_false) {
        (true, _) => Some("true".to_string()),
        (false, true) => Some("false".to_string()),
        (false, false) => None,
    }
}

pub fn build_boolean_or_number(value: &ScaleByDistance, write_false: bool) -> Option<String> {
    match value {
        ScaleByDistance::Enabled(enabled) => build_boolean(*enabled, write_false),
        ScaleByDistance::Factor(factor) => Some(build_number(*factor)),
    }
}

/// `None` for an empty list so the attribute is left out
pub fn build_string_list(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(" "))
    }
}

/// Wire name of a custom attribute
pub fn custom_attribute_key(name: &str) -> String {
    format!("{}{}", CUSTOM_ATTRIBUTE_PREFIX, name)
}

pub fn is_custom_attribute_key(key: &str) -> bool {
    key.len() > CUSTOM_ATTRIBUTE_PREFIX.len() && key.starts_with(CUSTOM_ATTRIBUTE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3.14"), Some(3.14));
        assert_eq!(parse_number(" -2 "), Some(-2.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1m"), None);
    }

    #[test]
    fn test_number_array_separators() {
        assert_eq!(parse_number_array("-1,2.5,3"), Some(vec![-1.0, 2.5, 3.0]));
        assert_eq!(parse_number_array("-1 2.5 3"), Some(vec![-1.0, 2.5, 3.0]));
        assert_eq!(
            parse_number_array(",,,-1 , , 2.5 , ,, 3,,,"),
            Some(vec![-1.0, 2.5, 3.0])
        );
    }

    #[test]
    fn test_number_array_stops_at_first_invalid_token() {
        assert_eq!(parse_number_array("-1 2.5 a 3"), Some(vec![-1.0, 2.5]));
        assert_eq!(parse_number_array("a 1"), Some(vec![]));
        assert_eq!(parse_number_array(""), None);
    }

    #[test]
    fn test_vector3_arity() {
        assert_eq!(parse_vector3("1,2,3"), Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vector3(" 1 2 3 "), Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vector3("1,2,3,4"), None);
        assert_eq!(parse_vector3("1,2"), None);
        assert_eq!(parse_vector3(""), None);
    }

    #[test]
    fn test_quaternion_arity() {
        assert_eq!(
            parse_quaternion("1,2,3,4"),
            Some(Quaternion::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(parse_quaternion("1,2,3,4,5"), None);
        assert_eq!(parse_quaternion("1 2 3"), None);
    }

    #[test]
    fn test_scale_prefers_vector() {
        assert_eq!(parse_scale("2"), Some(Scale::Uniform(2.0)));
        assert_eq!(
            parse_scale("4 5 6"),
            Some(Scale::Vector(Vector3::new(4.0, 5.0, 6.0)))
        );
        assert_eq!(parse_scale("4 5"), None);
    }

    #[test]
    fn test_boolean_or_number() {
        assert_eq!(
            parse_boolean_or_number("TRUE"),
            Some(ScaleByDistance::Enabled(true))
        );
        assert_eq!(
            parse_boolean_or_number("1.1"),
            Some(ScaleByDistance::Factor(1.1))
        );
        assert_eq!(parse_boolean_or_number("false"), None);
    }

    #[test]
    fn test_builders() {
        assert_eq!(build_vector3(&Vector3::new(1.0, 2.5, -3.0)), "1 2.5 -3");
        assert_eq!(
            build_quaternion(&Quaternion::new(0.1, -0.2, -0.3, 0.4)),
            "0.1 -0.2 -0.3 0.4"
        );
        assert_eq!(build_scale(&Scale::Uniform(0.5)), "0.5");
        assert_eq!(build_number_array(&[1.0, 2.0], ","), "1,2");
        assert_eq!(build_boolean(false, false), None);
        assert_eq!(build_boolean(false, true).as_deref(), Some("false"));
        assert_eq!(
            build_boolean_or_number(&ScaleByDistance::Enabled(true), false).as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_string_list() {
        assert_eq!(parse_string_list(" arg 0.1 "), vec!["arg", "0.1"]);
        assert!(parse_string_list("  ").is_empty());
        assert_eq!(build_string_list(&[]), None);
        assert_eq!(
            build_string_list(&["a".to_string(), "b".to_string()]).as_deref(),
            Some("a b")
        );
    }

    #[test]
    fn test_custom_attributes_strip_prefix() {
        let mut attributes = AttributeMap::new();
        attributes.insert("id".to_string(), "a".to_string());
        attributes.insert("_custom-attr".to_string(), "data".to_string());
        attributes.insert("_".to_string(), "bare".to_string());

        let custom = parse_custom_attributes(&attributes);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.get("custom-attr").map(String::as_str), Some("data"));
        assert_eq!(custom_attribute_key("custom-attr"), "_custom-attr");
        assert!(!is_custom_attribute_key("_"));
    }
}
