//! The closed enumeration of supported field kinds.
//!
//! Every kind that has ever been persisted must stay in this enum:
//! stored documents reference kinds by tag, and removing a variant would
//! orphan them. Adding a kind means adding a variant here plus one entry
//! in the registry table, never a new type hierarchy.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use formworks_core::error::{FormworksError, FormworksResult};

/// The type tag selecting a field's behavior bundle.
///
/// Kinds split into two groups:
///
/// - **Input kinds** collect a value from the person filling the form:
///   [`Text`](Self::Text), [`Number`](Self::Number),
///   [`TextArea`](Self::TextArea), [`Date`](Self::Date),
///   [`Select`](Self::Select), [`Checkbox`](Self::Checkbox).
/// - **Layout kinds** are static content with no user input:
///   [`Title`](Self::Title), [`SubTitle`](Self::SubTitle),
///   [`Paragraph`](Self::Paragraph), [`Separator`](Self::Separator),
///   [`Spacer`](Self::Spacer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Large heading.
    Title,
    /// Smaller heading.
    SubTitle,
    /// Free-text paragraph.
    Paragraph,
    /// Horizontal rule.
    Separator,
    /// Vertical whitespace of configurable height.
    Spacer,
    /// Numeric input.
    Number,
    /// Multi-line text input.
    TextArea,
    /// Date picker.
    Date,
    /// Single choice from a configurable option list.
    Select,
    /// Boolean checkbox.
    Checkbox,
}

/// All kinds, in declaration order.
pub const ALL_KINDS: [FieldKind; 11] = [
    FieldKind::Text,
    FieldKind::Title,
    FieldKind::SubTitle,
    FieldKind::Paragraph,
    FieldKind::Separator,
    FieldKind::Spacer,
    FieldKind::Number,
    FieldKind::TextArea,
    FieldKind::Date,
    FieldKind::Select,
    FieldKind::Checkbox,
];

impl FieldKind {
    /// Returns the persisted tag for this kind.
    ///
    /// Tags are the wire format of stored documents and must never change
    /// for an existing kind.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Text => "TextField",
            Self::Title => "TitleField",
            Self::SubTitle => "SubTitleField",
            Self::Paragraph => "ParagraphField",
            Self::Separator => "SeparatorField",
            Self::Spacer => "SpacerField",
            Self::Number => "NumberField",
            Self::TextArea => "TextAreaField",
            Self::Date => "DateField",
            Self::Select => "SelectField",
            Self::Checkbox => "CheckboxField",
        }
    }

    /// Parses a persisted tag back into a kind.
    ///
    /// Fails with [`FormworksError::UnknownFieldKind`] for tags this build
    /// does not know, a fatal integrity error for the document carrying
    /// the tag.
    pub fn parse_tag(tag: &str) -> FormworksResult<Self> {
        ALL_KINDS
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .ok_or_else(|| FormworksError::UnknownFieldKind(tag.to_string()))
    }

    /// Returns `true` for kinds that collect a value from the visitor.
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Number | Self::TextArea | Self::Date | Self::Select | Self::Checkbox
        )
    }

    /// Returns `true` for static layout kinds with no user input.
    pub const fn is_layout(self) -> bool {
        !self.is_input()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl Visitor<'_> for TagVisitor {
            type Value = FieldKind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field kind tag")
            }

            fn visit_str<E: de::Error>(self, tag: &str) -> Result<Self::Value, E> {
                FieldKind::parse_tag(tag).map_err(|_| E::custom(format!("unknown field kind: {tag}")))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}
