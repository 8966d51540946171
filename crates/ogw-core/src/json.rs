//! # Document Serialization
//!
//! Catalog files are UTF-8 JSON re-written with 2-space indentation and a
//! trailing newline. Key order is preserved from the parsed input
//! (`serde_json` is built with `preserve_order`), non-ASCII text is written
//! unescaped. Serializing an unmodified document is deterministic, so a
//! no-op load/save cycle is byte-stable after the first normalization.

use serde_json::Value;

/// Parse catalog text into a lossless document tree.
pub fn parse_document(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Serialize a document tree in the on-disk format.
pub fn to_document_text(value: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn two_space_indent_and_trailing_newline() {
        let text = to_document_text(&json!({"catalog": {"groups": []}})).unwrap();
        assert_eq!(text, "{\n  \"catalog\": {\n    \"groups\": []\n  }\n}\n");
    }

    #[test]
    fn key_order_survives_round_trip() {
        let input = r#"{"zeta": 1, "alpha": {"y": 2, "b": 3}, "mid": [3, 1, 2]}"#;
        let doc = parse_document(input).unwrap();
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        let text = to_document_text(&doc).unwrap();
        assert!(text.find("\"zeta\"").unwrap() < text.find("\"alpha\"").unwrap());
        assert!(text.find("\"y\"").unwrap() < text.find("\"b\"").unwrap());
    }

    #[test]
    fn non_ascii_is_written_verbatim() {
        let text = to_document_text(&json!({"title": "Datenschutz-Folgenabschätzung"})).unwrap();
        assert!(text.contains("Datenschutz-Folgenabschätzung"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn normalized_text_is_byte_stable() {
        let raw = r#"{"catalog":{"groups":[{"id":"g","controls":[{"id":"A","props":[]}]}]}}"#;
        let first = to_document_text(&parse_document(raw).unwrap()).unwrap();
        let second = to_document_text(&parse_document(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(parse_document("{\"catalog\": ").is_err());
        assert!(parse_document("").is_err());
    }
}
