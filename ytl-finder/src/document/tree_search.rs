//! Depth-first search over a [`Document`]
//!
//! All searches walk the tree in pre-order: a node is checked before its
//! children, object fields are visited in document order, and sequence
//! elements by ascending index. Scalars are leaves. Every function returns
//! `None` for "not found" and never fails.
//!
//! Paths are assembled on the way back out of the recursion, so no search
//! state outlives a call.

use super::{Document, Path, PathSegment};

/// Path to the first node whose value equals `target`
///
/// The root itself is checked first; a match there yields an empty path.
pub fn find_path_to_value(root: &Document, target: &Document) -> Option<Path> {
    search_value(root, target).map(into_path)
}

/// Path to the value of the first object field named `key`
///
/// The returned path ends with the matching `PathSegment::Key`.
pub fn find_path_to_key(root: &Document, key: &str) -> Option<Path> {
    search_key(root, &|name, _| name == key).map(|(reversed, _)| into_path(reversed))
}

/// Value of the first field in `subtree` whose name is one of `candidate_keys`
///
/// Nested objects and sequences are searched as they are encountered, before
/// the remaining siblings, so a match deep inside an early child wins over a
/// later shallow one. Fields holding `null` are treated as absent.
pub fn find_first_by_any_key<'a, K>(subtree: &'a Document, candidate_keys: &[K]) -> Option<&'a Document>
where
    K: AsRef<str>,
{
    search_key(subtree, &|name, value| {
        !value.is_null() && candidate_keys.iter().any(|k| k.as_ref() == name)
    })
    .map(|(_, value)| value)
}

/// Re-enter `root` at `path`
pub fn resolve_path<'a>(root: &'a Document, path: &Path) -> Option<&'a Document> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| match (segment, node) {
            (PathSegment::Key(key), Document::Object(map)) => map.get(key),
            (PathSegment::Index(index), Document::Array(items)) => items.get(*index),
            _ => None,
        })
}

/// Segments come back leaf-first; flip them into a root-first path
fn into_path(mut reversed: Vec<PathSegment>) -> Path {
    reversed.reverse();
    Path::new(reversed)
}

fn search_value(node: &Document, target: &Document) -> Option<Vec<PathSegment>> {
    if node == target {
        return Some(Vec::new());
    }

    match node {
        Document::Object(map) => map.iter().find_map(|(key, child)| {
            search_value(child, target).map(|mut rest| {
                rest.push(PathSegment::Key(key.clone()));
                rest
            })
        }),
        Document::Array(items) => items.iter().enumerate().find_map(|(index, child)| {
            search_value(child, target).map(|mut rest| {
                rest.push(PathSegment::Index(index));
                rest
            })
        }),
        _ => None,
    }
}

fn search_key<'a>(
    node: &'a Document,
    matches: &dyn Fn(&str, &Document) -> bool,
) -> Option<(Vec<PathSegment>, &'a Document)> {
    match node {
        Document::Object(map) => map.iter().find_map(|(key, child)| {
            if matches(key, child) {
                return Some((vec![PathSegment::Key(key.clone())], child));
            }
            search_key(child, matches).map(|(mut rest, found)| {
                rest.push(PathSegment::Key(key.clone()));
                (rest, found)
            })
        }),
        Document::Array(items) => items.iter().enumerate().find_map(|(index, child)| {
            search_key(child, matches).map(|(mut rest, found)| {
                rest.push(PathSegment::Index(index));
                (rest, found)
            })
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows_document() -> Document {
        json!({
            "header": {"title": "Music"},
            "rows": [
                {"anchor": "SONG", "contents": [{"text": "Bohemian Rhapsody"}]},
                {"anchor": "ARTIST", "contents": [{"text": "Queen (Remastered)"}]},
                {"anchor": "ARTIST", "contents": [{"text": "Someone Else"}]}
            ]
        })
    }

    #[test]
    fn test_value_path_resolves_to_target() {
        let doc = rows_document();
        let target = json!("ARTIST");

        let path = find_path_to_value(&doc, &target).unwrap();

        assert_eq!(path.to_string(), "$.rows[1].anchor");
        assert_eq!(resolve_path(&doc, &path), Some(&target));
    }

    #[test]
    fn test_value_first_in_traversal_order_wins() {
        let doc = json!([{"a": ["x", "needle"]}, "needle"]);
        let path = find_path_to_value(&doc, &json!("needle")).unwrap();

        assert_eq!(
            path.segments(),
            &[
                PathSegment::Index(0),
                PathSegment::Key("a".to_string()),
                PathSegment::Index(1),
            ]
        );
    }

    #[test]
    fn test_value_absent_is_none() {
        let doc = rows_document();
        assert!(find_path_to_value(&doc, &json!("ALBUM")).is_none());
    }

    #[test]
    fn test_value_matches_root() {
        let doc = json!("ARTIST");
        let path = find_path_to_value(&doc, &json!("ARTIST")).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_value_does_not_match_key_names() {
        let doc = json!({"ARTIST": 1});
        assert!(find_path_to_value(&doc, &json!("ARTIST")).is_none());
    }

    #[test]
    fn test_value_matches_non_string_scalars() {
        let doc = json!({"a": [null, true, 42]});
        let path = find_path_to_value(&doc, &json!(42)).unwrap();
        assert_eq!(path.to_string(), "$.a[2]");
    }

    #[test]
    fn test_key_path_ends_with_key() {
        let doc = rows_document();
        let path = find_path_to_key(&doc, "contents").unwrap();

        assert_eq!(path.to_string(), "$.rows[0].contents");
        assert_eq!(path.last(), Some(&PathSegment::Key("contents".to_string())));
    }

    #[test]
    fn test_key_absent_is_none() {
        assert!(find_path_to_key(&rows_document(), "album").is_none());
    }

    #[test]
    fn test_any_key_nested_grandchild() {
        let doc = json!({
            "outer": {"middle": {"simpleText": "deep"}},
            "later": "shallow"
        });

        let found = find_first_by_any_key(&doc, &["simpleText", "later"]);
        assert_eq!(found, Some(&json!("deep")));
    }

    #[test]
    fn test_any_key_preorder_checks_field_before_descending() {
        let doc = json!({"text": {"text": "inner"}});
        let found = find_first_by_any_key(&doc, &["text"]);
        assert_eq!(found, Some(&json!({"text": "inner"})));
    }

    #[test]
    fn test_any_key_respects_field_order() {
        let doc = json!({"simpleText": "first", "text": "second"});
        assert_eq!(find_first_by_any_key(&doc, &["text", "simpleText"]), Some(&json!("first")));
    }

    #[test]
    fn test_any_key_skips_null_values() {
        let doc = json!({"text": null, "more": [{"text": "value"}]});
        assert_eq!(find_first_by_any_key(&doc, &["text"]), Some(&json!("value")));
    }

    #[test]
    fn test_any_key_none_found() {
        let doc = rows_document();
        assert!(find_first_by_any_key(&doc, &["simpleText"]).is_none());
    }

    #[test]
    fn test_any_key_on_scalar_subtree() {
        assert!(find_first_by_any_key(&json!("text"), &["text"]).is_none());
        assert!(find_first_by_any_key(&Document::Null, &["text"]).is_none());
    }

    #[test]
    fn test_resolve_path_mismatch_is_none() {
        let doc = rows_document();
        let path = Path::new(vec![PathSegment::Index(0)]);
        assert!(resolve_path(&doc, &path).is_none());
    }
}
