use serde::{Deserialize, Serialize};
use tracing::warn;

/// One suggestion decoded from a `Device.recommends` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub key: String,
    /// Comma-joined item names.
    pub missing_items: String,
}

/// Decodes every entry independently. A malformed entry leaves an empty
/// recommendation in its slot so positions stay aligned with the input.
pub fn decode_all<S: AsRef<str>>(items: &[S]) -> Vec<Recommendation> {
    items
        .iter()
        .enumerate()
        .map(|(slot, raw)| {
            let raw: &str = raw.as_ref();
            serde_json::from_str::<Recommendation>(raw).unwrap_or_else(|e| {
                warn!(slot, error = %e, raw, "undecodable recommendation");
                Recommendation::default()
            })
        })
        .collect()
}

/// Whether the display should rotate through entries.
pub fn loop_flag<T>(items: &[T]) -> bool {
    items.len() > 1
}

#[cfg(test)]
mod decoder_tests {
    use super::*;

    #[test]
    fn bad_entry_does_not_abort_batch() {
        let items = [
            "{malformed",
            r#"{"title":"A","key":"k","missingItems":"x,y"}"#,
        ];
        let decoded = decode_all(&items);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], Recommendation::default());
        assert_eq!(
            decoded[1],
            Recommendation {
                title: "A".into(),
                key: "k".into(),
                missing_items: "x,y".into(),
            }
        );
    }

    #[test]
    fn absent_fields_decode_empty() {
        let decoded = decode_all(&[r#"{"title":"Soup"}"#]);
        assert_eq!(decoded[0].title, "Soup");
        assert!(decoded[0].key.is_empty());
        assert!(decoded[0].missing_items.is_empty());
    }

    #[test]
    fn loop_only_for_more_than_one() {
        assert!(!loop_flag::<&str>(&[]));
        assert!(!loop_flag(&["a"]));
        assert!(loop_flag(&["a", "b"]));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(Recommendation {
            title: "Pasta".into(),
            key: "img1".into(),
            missing_items: "garlic".into(),
        })
        .unwrap();
        assert_eq!(json["missingItems"], "garlic");
    }
}
