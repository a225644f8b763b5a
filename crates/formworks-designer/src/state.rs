//! The designer's editing state: the live element list plus selection.

use formworks_core::error::FormworksResult;
use formworks_core::id::FieldId;
use formworks_document::FormDocument;
use formworks_elements::{FieldInstance, FieldRegistry};

/// The state of one form-editing session.
///
/// Owns the live ordered element list and the current selection. The
/// state is an explicit object passed to every consumer (no ambient
/// singleton), and all mutations go through the operations here, so the
/// document's invariants (unique ids, schema-valid attributes) hold at
/// every observable point.
#[derive(Debug, Clone, Default)]
pub struct DesignerState {
    elements: FormDocument,
    selected: Option<FieldId>,
}

impl DesignerState {
    /// Creates a state over an empty document (a brand-new form).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded from a persisted document.
    pub const fn from_document(document: FormDocument) -> Self {
        Self {
            elements: document,
            selected: None,
        }
    }

    /// The current document, in visual order.
    pub const fn document(&self) -> &FormDocument {
        &self.elements
    }

    pub(crate) fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.elements
    }

    /// Consumes the state, yielding the document for serialization.
    pub fn into_document(self) -> FormDocument {
        self.elements
    }

    /// The elements in visual order.
    pub fn elements(&self) -> &[FieldInstance] {
        self.elements.elements()
    }

    /// Number of elements on the canvas.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inserts an element at `index`, clamped to `[0, len]`.
    ///
    /// The instance's attributes are validated against its kind schema
    /// first; an instance that does not satisfy its schema is rejected
    /// with a validation error and the list is left untouched. In
    /// practice construction always yields valid defaults, so the check
    /// only fires for hand-built instances.
    pub fn add_element(&mut self, index: usize, instance: FieldInstance) -> FormworksResult<()> {
        let behavior = FieldRegistry::global().lookup(instance.kind)?;
        behavior.schema().validate(&instance.attributes)?;
        self.elements.insert(index, instance)
    }

    /// Removes the element with the given id.
    ///
    /// Silently does nothing when the id is absent. Removing the selected
    /// element clears the selection.
    pub fn remove_element(&mut self, id: &FieldId) {
        if self.elements.remove(id).is_some() && self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Replaces the element at the position matching `id`.
    ///
    /// Fails with [`FormworksError::ElementNotFound`] when the id is
    /// absent, and with a validation error when the replacement's
    /// attributes do not satisfy its kind schema. The replacement must
    /// keep the element's id; that is the caller's contract.
    pub fn update_element(&mut self, id: &FieldId, instance: FieldInstance) -> FormworksResult<()> {
        let behavior = FieldRegistry::global().lookup(instance.kind)?;
        behavior.schema().validate(&instance.attributes)?;
        self.elements.replace(id, instance)
    }

    /// Sets or clears the selection driving the property editor.
    pub fn set_selected(&mut self, id: Option<FieldId>) {
        self.selected = id;
    }

    /// The currently selected element id, if any.
    pub const fn selected(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    /// The currently selected element, if any.
    pub fn selected_element(&self) -> Option<&FieldInstance> {
        self.selected.as_ref().and_then(|id| self.elements.by_id(id))
    }
}

impl From<FormDocument> for DesignerState {
    fn from(document: FormDocument) -> Self {
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formworks_core::error::FormworksError;
    use formworks_elements::{fields, FieldKind};

    fn instance(id: &str, kind: FieldKind) -> FieldInstance {
        fields::construct(kind, FieldId::from(id))
    }

    #[test]
    fn test_add_clamps_and_orders() {
        let mut state = DesignerState::new();
        state.add_element(50, instance("aa", FieldKind::Text)).unwrap();
        state.add_element(0, instance("bb", FieldKind::Title)).unwrap();
        let ids: Vec<&str> = state.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["bb", "aa"]);
    }

    #[test]
    fn test_add_rejects_invalid_attributes() {
        let mut state = DesignerState::new();
        let mut bad = instance("aa", FieldKind::Text);
        bad.attributes.insert(fields::attr::LABEL, "x"); // below min length
        let err = state.add_element(0, bad).unwrap_err();
        assert!(matches!(err, FormworksError::Validation(_)));
        assert!(state.is_empty());
    }

    #[test]
    fn test_remove_is_silent_when_absent() {
        let mut state = DesignerState::new();
        state.remove_element(&FieldId::from("ghost"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_remove_clears_selection_of_removed() {
        let mut state = DesignerState::new();
        state.add_element(0, instance("aa", FieldKind::Text)).unwrap();
        state.add_element(1, instance("bb", FieldKind::Text)).unwrap();
        state.set_selected(Some(FieldId::from("aa")));

        state.remove_element(&FieldId::from("aa"));
        assert_eq!(state.selected(), None);

        // Removing an unselected element keeps the selection.
        state.set_selected(Some(FieldId::from("bb")));
        state.remove_element(&FieldId::from("ghost"));
        assert_eq!(state.selected(), Some(&FieldId::from("bb")));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut state = DesignerState::new();
        state.add_element(0, instance("aa", FieldKind::Text)).unwrap();
        let mut edited = instance("aa", FieldKind::Text);
        edited.attributes.insert(fields::attr::LABEL, "Full name");
        edited.attributes.insert(fields::attr::REQUIRED, true);
        state.update_element(&FieldId::from("aa"), edited).unwrap();

        let element = state.document().by_id(&FieldId::from("aa")).unwrap();
        assert_eq!(element.attributes.text(fields::attr::LABEL), Some("Full name"));
    }

    #[test]
    fn test_update_missing_fails() {
        let mut state = DesignerState::new();
        let err = state
            .update_element(&FieldId::from("zz"), instance("zz", FieldKind::Text))
            .unwrap_err();
        assert!(matches!(err, FormworksError::ElementNotFound(_)));
    }

    #[test]
    fn test_update_rejects_invalid_attributes() {
        let mut state = DesignerState::new();
        state.add_element(0, instance("aa", FieldKind::Paragraph)).unwrap();
        let mut bad = instance("aa", FieldKind::Paragraph);
        bad.attributes.insert(fields::attr::TEXT, "x".repeat(1001));
        assert!(state.update_element(&FieldId::from("aa"), bad).is_err());
        // Original attributes survive a rejected update.
        let element = state.document().by_id(&FieldId::from("aa")).unwrap();
        assert_eq!(element.attributes.text(fields::attr::TEXT), Some("Paragraph text"));
    }

    #[test]
    fn test_selected_element_accessor() {
        let mut state = DesignerState::new();
        state.add_element(0, instance("aa", FieldKind::Checkbox)).unwrap();
        assert!(state.selected_element().is_none());
        state.set_selected(Some(FieldId::from("aa")));
        assert_eq!(state.selected_element().unwrap().kind, FieldKind::Checkbox);
        state.set_selected(None);
        assert!(state.selected_element().is_none());
    }

    #[test]
    fn test_unique_ids_preserved_across_sequences() {
        let mut state = DesignerState::new();
        for i in 0..10 {
            state
                .add_element(i, instance(&format!("id{i:02}"), FieldKind::Text))
                .unwrap();
        }
        state.remove_element(&FieldId::from("id03"));
        state.remove_element(&FieldId::from("id07"));
        state.add_element(2, instance("id99", FieldKind::Date)).unwrap();

        let ids: Vec<&str> = state.elements().iter().map(|e| e.id.as_str()).collect();
        let unique: std::collections::HashSet<&&str> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        // Untouched elements keep their relative order.
        let pos = |id: &str| ids.iter().position(|x| *x == id).unwrap();
        assert!(pos("id00") < pos("id01"));
        assert!(pos("id04") < pos("id05"));
        assert!(pos("id08") < pos("id09"));
    }
}
