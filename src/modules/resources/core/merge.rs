use serde_json::Value;

/// JSON merge patch: objects merge key by key, `null` removes a key, any
/// other value replaces the target.
pub fn merge_patch(target: &mut Value, patch: Value) {
    let Value::Object(patch_fields) = patch else {
        *target = patch;
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Default::default());
    }

    if let Value::Object(target_fields) = target {
        for (key, value) in patch_fields {
            if value.is_null() {
                target_fields.remove(&key);
            } else {
                merge_patch(target_fields.entry(key).or_insert(Value::Null), value);
            }
        }
    }
}
