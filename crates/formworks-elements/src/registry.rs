//! The static field behavior table and palette listing.
//!
//! One [`FieldBehavior`] per kind, assembled once into a global table.
//! Adding a kind is adding an enum variant plus one table entry; the
//! table is data, not a type hierarchy.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::FieldId;

use crate::fields;
use crate::instance::FieldInstance;
use crate::kind::{FieldKind, ALL_KINDS};
use crate::render::{self, InteractiveContext};
use crate::schema::AttributeSchema;

/// Pure palette metadata for the designer sidebar picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Symbolic icon name resolved by the presentation layer.
    pub icon: &'static str,
    /// Human-readable button label.
    pub label: &'static str,
}

/// The behavior bundle of one field kind.
///
/// Bundles everything the designer and the submission renderer need:
/// construction with defaults, the attribute schema, the required-field
/// predicate, palette metadata, and the three render hooks.
#[derive(Debug, Clone, Copy)]
pub struct FieldBehavior {
    /// The kind this bundle serves.
    pub kind: FieldKind,
    /// Palette picker metadata.
    pub palette: PaletteEntry,
}

impl FieldBehavior {
    /// Constructs a fresh instance with kind defaults under the given id.
    pub fn construct(&self, id: FieldId) -> FieldInstance {
        fields::construct(self.kind, id)
    }

    /// The attribute schema instances of this kind must satisfy.
    pub fn schema(&self) -> &'static AttributeSchema {
        fields::schema(self.kind)
    }

    /// Runs the required-field predicate against a submitted raw value.
    pub fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        fields::validate_submission(instance, raw)
    }

    /// Read-only designer-canvas rendering.
    pub fn render_designer_preview(&self, instance: &FieldInstance) -> String {
        render::designer_preview(instance)
    }

    /// Fillable submission-page rendering.
    pub fn render_interactive(
        &self,
        instance: &FieldInstance,
        ctx: &InteractiveContext<'_>,
    ) -> String {
        render::interactive(instance, ctx)
    }

    /// Attribute edit form rendering.
    pub fn render_property_editor(&self, instance: &FieldInstance) -> String {
        render::property_editor(instance)
    }
}

const fn palette_entry(kind: FieldKind) -> PaletteEntry {
    match kind {
        FieldKind::Text => PaletteEntry {
            icon: "text-fields",
            label: "Text field",
        },
        FieldKind::Title => PaletteEntry {
            icon: "heading-1",
            label: "Title",
        },
        FieldKind::SubTitle => PaletteEntry {
            icon: "heading-2",
            label: "Subtitle",
        },
        FieldKind::Paragraph => PaletteEntry {
            icon: "text-paragraph",
            label: "Paragraph",
        },
        FieldKind::Separator => PaletteEntry {
            icon: "separator-horizontal",
            label: "Separator",
        },
        FieldKind::Spacer => PaletteEntry {
            icon: "separator-vertical",
            label: "Spacer",
        },
        FieldKind::Number => PaletteEntry {
            icon: "number-input",
            label: "Number field",
        },
        FieldKind::TextArea => PaletteEntry {
            icon: "text-area",
            label: "Text area",
        },
        FieldKind::Date => PaletteEntry {
            icon: "calendar-days",
            label: "Date field",
        },
        FieldKind::Select => PaletteEntry {
            icon: "dropdown-menu",
            label: "Select field",
        },
        FieldKind::Checkbox => PaletteEntry {
            icon: "checkbox",
            label: "Checkbox",
        },
    }
}

/// Sidebar order: layout blocks first, then input fields.
const PALETTE_ORDER: [FieldKind; 11] = [
    FieldKind::Title,
    FieldKind::SubTitle,
    FieldKind::Paragraph,
    FieldKind::Separator,
    FieldKind::Spacer,
    FieldKind::Text,
    FieldKind::Number,
    FieldKind::TextArea,
    FieldKind::Date,
    FieldKind::Select,
    FieldKind::Checkbox,
];

/// The registry mapping each kind to its behavior bundle.
#[derive(Debug)]
pub struct FieldRegistry {
    table: BTreeMap<FieldKind, FieldBehavior>,
}

static GLOBAL: Lazy<FieldRegistry> = Lazy::new(|| {
    let table = ALL_KINDS
        .into_iter()
        .map(|kind| {
            (
                kind,
                FieldBehavior {
                    kind,
                    palette: palette_entry(kind),
                },
            )
        })
        .collect();
    FieldRegistry { table }
});

impl FieldRegistry {
    /// Returns the global registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Looks up the behavior bundle for a kind.
    ///
    /// Fails with [`FormworksError::UnknownFieldKind`] if the table has no
    /// entry. Impossible for a well-formed build, kept as a defensive
    /// check because a document referencing an unservable kind is a fatal
    /// integrity error, not a recoverable condition.
    pub fn lookup(&self, kind: FieldKind) -> FormworksResult<&FieldBehavior> {
        self.table
            .get(&kind)
            .ok_or_else(|| FormworksError::UnknownFieldKind(kind.as_tag().to_string()))
    }

    /// Palette entries in sidebar order (layout blocks, then inputs).
    pub fn palette(&self) -> Vec<(FieldKind, PaletteEntry)> {
        PALETTE_ORDER
            .into_iter()
            .filter_map(|kind| self.table.get(&kind).map(|b| (kind, b.palette)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_an_entry() {
        let registry = FieldRegistry::global();
        for kind in ALL_KINDS {
            let behavior = registry.lookup(kind).unwrap();
            assert_eq!(behavior.kind, kind);
        }
    }

    #[test]
    fn test_palette_lists_every_kind_layout_first() {
        let palette = FieldRegistry::global().palette();
        assert_eq!(palette.len(), ALL_KINDS.len());
        let first_input = palette.iter().position(|(k, _)| k.is_input()).unwrap();
        assert!(palette[..first_input].iter().all(|(k, _)| k.is_layout()));
        assert!(palette[first_input..].iter().all(|(k, _)| k.is_input()));
    }

    #[test]
    fn test_construct_through_registry() {
        let registry = FieldRegistry::global();
        let behavior = registry.lookup(FieldKind::Checkbox).unwrap();
        let instance = behavior.construct(FieldId::from("cb0cb0cb"));
        assert_eq!(instance.kind, FieldKind::Checkbox);
        assert!(behavior.schema().validate(&instance.attributes).is_ok());
    }

    #[test]
    fn test_validate_through_registry() {
        let registry = FieldRegistry::global();
        let behavior = registry.lookup(FieldKind::Text).unwrap();
        let mut instance = behavior.construct(FieldId::generate());
        instance.attributes.insert(crate::fields::attr::REQUIRED, true);
        assert!(!behavior.validate(&instance, ""));
        assert!(behavior.validate(&instance, "filled"));
    }

    #[test]
    fn test_palette_metadata_is_pure_data() {
        let (_, entry) = FieldRegistry::global().palette()[0];
        assert!(!entry.icon.is_empty());
        assert!(!entry.label.is_empty());
    }
}
