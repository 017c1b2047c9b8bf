//! Structural validation of tool parameter schemas.
//!
//! Run at registration time or in CI to catch malformed schemas before
//! an agent framework rejects them: a `required` key missing from
//! `properties`, an array without `items`, a non-object top level.

/// Validate a tool's `parameters_schema()`.
///
/// Returns a list of problems; empty means valid. Properties without a
/// `type` are allowed (freeform values), matching what strict-mode
/// function calling accepts.
pub fn validate_tool_schema(schema: &serde_json::Value, path: &str) -> Vec<String> {
    let mut errors = Vec::new();

    match schema.get("type").and_then(|t| t.as_str()) {
        Some("object") => {}
        Some(other) => {
            errors.push(format!("{path}: expected type \"object\", got \"{other}\""));
            return errors;
        }
        None => {
            errors.push(format!("{path}: missing \"type\": \"object\""));
            return errors;
        }
    }

    let properties = match schema.get("properties").and_then(|p| p.as_object()) {
        Some(p) => p,
        None => {
            errors.push(format!("{path}: missing or non-object \"properties\""));
            return errors;
        }
    };

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for req in required {
            if let Some(key) = req.as_str()
                && !properties.contains_key(key)
            {
                errors.push(format!(
                    "{path}: required key \"{key}\" not found in properties"
                ));
            }
        }
    }

    for (key, prop) in properties {
        let prop_path = format!("{path}.{key}");
        match prop.get("type").and_then(|t| t.as_str()) {
            Some("object") => errors.extend(validate_tool_schema(prop, &prop_path)),
            Some("array") => {
                if prop.get("items").is_none() {
                    errors.push(format!("{prop_path}: array property missing \"items\""));
                }
            }
            _ => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_schema_passes() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "The query" }
            },
            "required": ["query"]
        });
        assert!(validate_tool_schema(&schema, "test").is_empty());
    }

    #[test]
    fn missing_top_level_type_flagged() {
        let schema = serde_json::json!({ "properties": {} });
        let errors = validate_tool_schema(&schema, "test");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing \"type\""));
    }

    #[test]
    fn non_object_top_level_flagged() {
        let schema = serde_json::json!({ "type": "string" });
        let errors = validate_tool_schema(&schema, "test");
        assert!(errors[0].contains("expected type \"object\""));
    }

    #[test]
    fn orphan_required_key_flagged() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": { "query": { "type": "string" } },
            "required": ["query", "missing"]
        });
        let errors = validate_tool_schema(&schema, "test");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("\"missing\""));
    }

    #[test]
    fn array_without_items_flagged() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "included_sources": { "type": "array", "description": "Sources" }
            }
        });
        let errors = validate_tool_schema(&schema, "test");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing \"items\""));
    }

    #[test]
    fn freeform_property_allowed() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": { "data": { "description": "Any value" } }
        });
        assert!(validate_tool_schema(&schema, "test").is_empty());
    }
}
