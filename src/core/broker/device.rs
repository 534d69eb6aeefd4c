use uuid::Uuid;

/// Resolve the device identifier used for an upstream session call.
///
/// The caller's value wins when present and non-empty; otherwise a
/// fresh UUID v4 is generated. Generation cannot fail and collisions
/// are negligible, so anonymous widgets always get a usable identifier.
pub fn resolve_device_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}
