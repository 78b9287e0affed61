// ============================================================================
// src/util/jsonpath.rs – Dotted-path access into response documents
// ============================================================================

use serde_json::{Map, Value};

/// `a.b.c` lookup; `None` when any segment is missing or not an object.
pub fn search<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |node, key| node.as_object()?.get(key))
}

/// Store `value` at `a.b.c`, creating missing intermediate objects.
pub fn set_value(doc: &mut Value, path: &str, value: Value) -> Result<(), String> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut node = doc;
    for key in parents.into_iter().flat_map(|p| p.split('.')) {
        let object = node
            .as_object_mut()
            .ok_or_else(|| format!("parent of '{key}' is not an object"))?;
        node = object
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    node.as_object_mut()
        .ok_or_else(|| format!("parent of '{leaf}' is not an object"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Empty strings, `null`, `false`, zero and empty containers count as absent.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_walks_nested_objects() {
        let doc = json!({"accessDetails": {"passwordData": {"ciphertext": "abc"}}});
        assert_eq!(
            search(&doc, "accessDetails.passwordData.ciphertext"),
            Some(&json!("abc"))
        );
        assert_eq!(search(&doc, "accessDetails.password"), None);
        assert_eq!(search(&json!({"a": [1]}), "a.b"), None);
    }

    #[test]
    fn set_value_creates_intermediates() {
        let mut doc = json!({});
        set_value(&mut doc, "accessDetails.password", json!("hunter2")).unwrap();
        assert_eq!(doc, json!({"accessDetails": {"password": "hunter2"}}));
    }

    #[test]
    fn set_value_keeps_siblings() {
        let mut doc = json!({"accessDetails": {"username": "Administrator"}});
        set_value(&mut doc, "accessDetails.password", json!("pw")).unwrap();
        assert_eq!(
            doc,
            json!({"accessDetails": {"username": "Administrator", "password": "pw"}})
        );
    }

    #[test]
    fn set_value_refuses_to_descend_into_scalars() {
        let mut doc = json!({"accessDetails": "oops"});
        assert!(set_value(&mut doc, "accessDetails.password", json!("pw")).is_err());
        assert!(set_value(&mut json!([]), "top", json!(1)).is_err());
    }

    #[test]
    fn emptiness_follows_truthiness() {
        for v in [json!(null), json!(""), json!(false), json!(0), json!([]), json!({})] {
            assert!(is_empty(&v), "{v} should be empty");
        }
        for v in [json!("x"), json!(true), json!(1), json!([0]), json!({"k": 0})] {
            assert!(!is_empty(&v), "{v} should not be empty");
        }
    }
}
