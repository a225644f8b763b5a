//! One configured field placed in a form's layout.

use serde::{Deserialize, Serialize};

use formworks_core::id::FieldId;

use crate::attributes::AttributeMap;
use crate::kind::FieldKind;

/// A single field instance: an opaque stable id, the kind tag selecting
/// its behavior, and the kind-specific attribute bag.
///
/// The id is generated once when the instance is constructed (from the
/// palette) and never changes; it is the join key used by drag-and-drop
/// targeting and by the submission value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInstance {
    /// Stable opaque id, unique within one document.
    pub id: FieldId,
    /// The behavior-selecting kind tag.
    pub kind: FieldKind,
    /// Kind-specific attributes (label, helper text, options, ...).
    pub attributes: AttributeMap,
}

impl FieldInstance {
    /// Creates an instance from parts.
    pub const fn new(id: FieldId, kind: FieldKind, attributes: AttributeMap) -> Self {
        Self {
            id,
            kind,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_shape() {
        let instance = FieldInstance::new(
            FieldId::from("a1b2c3d4"),
            FieldKind::Checkbox,
            AttributeMap::new().with("label", "Checkbox").with("required", false),
        );
        let json = serde_json::to_string(&instance).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a1b2c3d4","kind":"CheckboxField","attributes":{"label":"Checkbox","required":false}}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let instance = FieldInstance::new(
            FieldId::generate(),
            FieldKind::Select,
            AttributeMap::new()
                .with("label", "Select field")
                .with("options", vec!["one".to_string(), "two".to_string()]),
        );
        let json = serde_json::to_string(&instance).unwrap();
        let back: FieldInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
