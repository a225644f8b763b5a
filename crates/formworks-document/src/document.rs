//! The ordered field list of one form.

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::FieldId;
use formworks_elements::FieldInstance;

/// The ordered collection of field instances defining a form's layout.
///
/// Insertion order equals visual top-to-bottom order and is
/// authoritative; there is no separate sort key. All ids within one
/// document are unique; the list operations enforce the invariant so it
/// can never be observed broken.
///
/// A document is mutated exclusively through the designer while its form
/// is unpublished, and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormDocument {
    elements: Vec<FieldInstance>,
}

impl FormDocument {
    /// Creates an empty document.
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Builds a document from an existing element list.
    ///
    /// Fails with [`FormworksError::CorruptDocument`] when two elements
    /// share an id.
    pub fn from_elements(elements: Vec<FieldInstance>) -> FormworksResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for element in &elements {
            if !seen.insert(element.id.clone()) {
                return Err(FormworksError::CorruptDocument(format!(
                    "duplicate field id: {}",
                    element.id
                )));
            }
        }
        Ok(Self { elements })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in visual order.
    pub fn elements(&self) -> &[FieldInstance] {
        &self.elements
    }

    /// Returns the element at a position.
    pub fn get(&self, index: usize) -> Option<&FieldInstance> {
        self.elements.get(index)
    }

    /// Returns the position of the element with the given id.
    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Returns the element with the given id.
    pub fn by_id(&self, id: &FieldId) -> Option<&FieldInstance> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Returns `true` when an element with the given id exists.
    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts an element, clamping `index` to `[0, len]`.
    ///
    /// Fails with a validation error when the id already exists; the
    /// unique-id invariant is structural, not a convention.
    pub fn insert(&mut self, index: usize, instance: FieldInstance) -> FormworksResult<()> {
        if self.contains(&instance.id) {
            return Err(FormworksError::validation(
                format!("field id already present: {}", instance.id),
                "duplicate_id",
            ));
        }
        let index = index.min(self.elements.len());
        self.elements.insert(index, instance);
        Ok(())
    }

    /// Removes and returns the element with the given id, or `None` when
    /// absent.
    pub fn remove(&mut self, id: &FieldId) -> Option<FieldInstance> {
        self.position(id).map(|index| self.elements.remove(index))
    }

    /// Replaces the element at the position matching `id`.
    ///
    /// Fails with [`FormworksError::ElementNotFound`] when absent. The id
    /// of the replacement must equal `id`; that is the caller's contract,
    /// checked in debug builds.
    pub fn replace(&mut self, id: &FieldId, instance: FieldInstance) -> FormworksResult<()> {
        debug_assert_eq!(&instance.id, id, "replacement must keep the element id");
        let index = self
            .position(id)
            .ok_or_else(|| FormworksError::ElementNotFound(id.to_string()))?;
        self.elements[index] = instance;
        Ok(())
    }

    /// Iterates elements in visual order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldInstance> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a FormDocument {
    type Item = &'a FieldInstance;
    type IntoIter = std::slice::Iter<'a, FieldInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
