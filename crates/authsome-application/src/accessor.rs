//! Field access on the active identity

use authsome_domain::Identity;
use authsome_domain::constants::PATH_SEPARATOR;
use serde_json::Value;

/// Look a field up on `identity`
///
/// - No field (or an empty one): the whole identity as a JSON object.
/// - A bare name: the top-level key if present, otherwise `<model>.<field>`.
/// - A dotted path: extracted as is.
pub fn field_value(identity: &Identity, model: &str, field: Option<&str>) -> Option<Value> {
    let field = match field {
        Some(field) if !field.is_empty() => field,
        _ => return Some(identity.clone().into_value()),
    };

    if field.contains(PATH_SEPARATOR) {
        return identity.extract(field).cloned();
    }

    if let Some(value) = identity.get(field) {
        return Some(value.clone());
    }

    identity
        .extract(&format!("{model}{PATH_SEPARATOR}{field}"))
        .cloned()
}
