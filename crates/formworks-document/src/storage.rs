//! The storage blob format.
//!
//! A document is persisted as one opaque text blob inside its form
//! record: a JSON array of `{"id", "kind", "attributes"}` objects in
//! visual order. Serialization is deterministic (ordered attribute maps,
//! stable field order), so `to_storage` is a pure function of the
//! document and the round-trip law `from_storage(to_storage(d)) == d`
//! holds for every valid document.
//!
//! Decoding distinguishes two failure classes: a blob that is not
//! well-formed (bad JSON, wrong shape, duplicate ids) is a
//! [`CorruptDocument`](FormworksError::CorruptDocument); a well-formed
//! blob naming a kind this build does not register is an
//! [`UnknownFieldKind`](FormworksError::UnknownFieldKind). Both are fatal
//! for the document, surfaced as page-level errors.

use serde::Deserialize;

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::FieldId;
use formworks_elements::{AttributeMap, FieldInstance, FieldKind};

use crate::document::FormDocument;

/// The stored shape of one element, with the kind still a raw tag so an
/// unregistered kind is reported as such rather than as a JSON error.
#[derive(Debug, Deserialize)]
struct StoredInstance {
    id: FieldId,
    kind: String,
    attributes: AttributeMap,
}

impl FormDocument {
    /// Serializes the document to its storage blob.
    pub fn to_storage(&self) -> String {
        serde_json::to_string(self.elements()).expect("document serialization is infallible")
    }

    /// Decodes a storage blob back into a document.
    pub fn from_storage(raw: &str) -> FormworksResult<Self> {
        let stored: Vec<StoredInstance> = serde_json::from_str(raw)
            .map_err(|e| FormworksError::CorruptDocument(e.to_string()))?;

        let mut elements = Vec::with_capacity(stored.len());
        for item in stored {
            let kind = FieldKind::parse_tag(&item.kind)?;
            elements.push(FieldInstance::new(item.id, kind, item.attributes));
        }
        Self::from_elements(elements)
    }
}
