//! Best-effort JSON recovery from free-form LLM output.
//!
//! Models frequently wrap an otherwise well-formed object in prose
//! ("Here is the JSON you requested: {...}"), so whole-text parsing fails.
//! We locate the first balanced top-level `{...}` with a scanner that tracks
//! string-literal state (braces inside strings, including escaped quotes,
//! do not count) and hand the candidate to serde_json. Anything that can't
//! be recovered degrades to `{"raw": <original text>}` — this function never
//! fails.

use serde_json::{Map, Value};

/// Extract the first JSON object embedded in `text`.
///
/// Returns the parsed object on success, or `{"raw": text}` when `text`
/// contains no `{`, the braces never balance, or the candidate does not
/// parse as an object.
pub fn extract_json(text: &str) -> Map<String, Value> {
    match find_balanced_object(text) {
        Some(candidate) => match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => map,
            _ => raw_fallback(text),
        },
        None => raw_fallback(text),
    }
}

/// Locate the first balanced `{...}` substring, counting braces only outside
/// string literals.
fn find_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    // Never balanced.
    None
}

fn raw_fallback(text: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("raw".to_string(), Value::String(text.to_string()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_of(text: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("raw".to_string(), Value::String(text.to_string()));
        map
    }

    #[test]
    fn test_pure_json_round_trips() {
        let value = json!({"a": 1, "b": {"c": [1, 2, 3]}, "d": "text"});
        let text = serde_json::to_string(&value).unwrap();
        let extracted = extract_json(&text);
        assert_eq!(Value::Object(extracted), value);
    }

    #[test]
    fn test_object_recovered_from_prose() {
        let text = "Sure! Here is the data: {\"a\":1, \"b\":{\"c\":2}} Hope that helps!";
        let extracted = extract_json(text);
        assert_eq!(Value::Object(extracted), json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json("no object here"), raw_of("no object here"));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(extract_json("{\"a\": 1"), raw_of("{\"a\": 1"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_json(""), raw_of(""));
    }

    #[test]
    fn test_error_sentinel_wraps_as_raw() {
        let text = "[ERROR] Gemini HTTP 500: upstream unavailable";
        let extracted = extract_json(text);
        assert_eq!(extracted.get("raw").unwrap().as_str().unwrap(), text);
    }

    #[test]
    fn test_first_of_multiple_objects_wins() {
        let text = "{\"first\": true} and later {\"second\": true}";
        let extracted = extract_json(text);
        assert_eq!(Value::Object(extracted), json!({"first": true}));
    }

    #[test]
    fn test_nested_objects() {
        let text = "prefix {\"outer\": {\"inner\": {\"deep\": 1}}} suffix";
        let extracted = extract_json(text);
        assert_eq!(
            Value::Object(extracted),
            json!({"outer": {"inner": {"deep": 1}}})
        );
    }

    #[test]
    fn test_braces_inside_string_literals() {
        let text = "note: {\"description\": \"uses {curly} braces\", \"n\": 2} done";
        let extracted = extract_json(text);
        assert_eq!(
            Value::Object(extracted),
            json!({"description": "uses {curly} braces", "n": 2})
        );
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = "{\"quote\": \"she said \\\"hi {there}\\\"\"}";
        let extracted = extract_json(text);
        assert_eq!(
            extracted.get("quote").unwrap().as_str().unwrap(),
            "she said \"hi {there}\""
        );
    }

    #[test]
    fn test_unterminated_string_is_raw() {
        let text = "{\"a\": \"never closes }";
        assert_eq!(extract_json(text), raw_of(text));
    }

    #[test]
    fn test_balanced_but_invalid_json_is_raw() {
        let text = "look: {not json at all} end";
        assert_eq!(extract_json(text), raw_of(text));
    }

    #[test]
    fn test_top_level_array_is_raw() {
        // No `{` before the array's contents exist — an array of scalars
        // has no object to recover.
        let text = "[1, 2, 3]";
        assert_eq!(extract_json(text), raw_of(text));
    }

    #[test]
    fn test_trailing_content_discarded() {
        let text = "{\"a\": 1}}}}} extra braces";
        let extracted = extract_json(text);
        assert_eq!(Value::Object(extracted), json!({"a": 1}));
    }

    #[test]
    fn test_unicode_around_object() {
        let text = "résumé → {\"ключ\": \"значение\"} ← done";
        let extracted = extract_json(text);
        assert_eq!(
            extracted.get("ключ").unwrap().as_str().unwrap(),
            "значение"
        );
    }
}
