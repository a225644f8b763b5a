//! Per-kind defaults, construction, and submission validation.
//!
//! One dispatch module covers all kinds: the attribute name constants,
//! each kind's schema and default bag, and the required-field predicate
//! run against submitted raw values.

use formworks_core::id::FieldId;

use crate::attributes::AttributeMap;
use crate::instance::FieldInstance;
use crate::kind::FieldKind;
use crate::schema::{AttributeSchema, AttributeSpec};

/// Persisted attribute names.
///
/// These are wire format: stored documents reference attributes by these
/// exact names, so they must never change for an existing kind.
pub mod attr {
    /// Field caption shown above the input.
    pub const LABEL: &str = "label";
    /// Hint shown below the input.
    pub const HELPER_TEXT: &str = "helperText";
    /// Ghost text shown inside an empty input.
    pub const PLACEHOLDER: &str = "placeholder";
    /// Whether the field must be filled before submission.
    pub const REQUIRED: &str = "required";
    /// Choices of a select field.
    pub const OPTIONS: &str = "options";
    /// Heading text of title and subtitle blocks.
    pub const TITLE: &str = "title";
    /// Body text of a paragraph block.
    pub const TEXT: &str = "text";
    /// Visible rows of a text area.
    pub const ROWS: &str = "rows";
    /// Height of a spacer, in pixels.
    pub const HEIGHT: &str = "height";
}

const LABEL_SPEC: AttributeSpec = AttributeSpec::text(attr::LABEL, Some(2), Some(80));
const HELPER_TEXT_SPEC: AttributeSpec = AttributeSpec::text(attr::HELPER_TEXT, None, Some(300));
const PLACEHOLDER_SPEC: AttributeSpec = AttributeSpec::text(attr::PLACEHOLDER, None, Some(80));
const REQUIRED_SPEC: AttributeSpec = AttributeSpec::flag(attr::REQUIRED);

static TEXT_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[LABEL_SPEC, HELPER_TEXT_SPEC, REQUIRED_SPEC, PLACEHOLDER_SPEC]);
static NUMBER_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[LABEL_SPEC, HELPER_TEXT_SPEC, REQUIRED_SPEC, PLACEHOLDER_SPEC]);
static TEXT_AREA_SCHEMA: AttributeSchema = AttributeSchema::new(&[
    LABEL_SPEC,
    HELPER_TEXT_SPEC,
    REQUIRED_SPEC,
    PLACEHOLDER_SPEC,
    AttributeSpec::integer(attr::ROWS, 1, 10),
]);
static DATE_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[LABEL_SPEC, HELPER_TEXT_SPEC, REQUIRED_SPEC]);
static SELECT_SCHEMA: AttributeSchema = AttributeSchema::new(&[
    LABEL_SPEC,
    HELPER_TEXT_SPEC,
    REQUIRED_SPEC,
    PLACEHOLDER_SPEC,
    AttributeSpec::text_list(attr::OPTIONS),
]);
static CHECKBOX_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[LABEL_SPEC, HELPER_TEXT_SPEC, REQUIRED_SPEC]);
static TITLE_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[AttributeSpec::text(attr::TITLE, Some(2), Some(200))]);
static SUBTITLE_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[AttributeSpec::text(attr::TITLE, Some(2), Some(200))]);
// The paragraph schema owns `text`: the only attribute the kind
// declares, and both the property editor and the renderer go through it.
static PARAGRAPH_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[AttributeSpec::text(attr::TEXT, Some(2), Some(1000))]);
static SEPARATOR_SCHEMA: AttributeSchema = AttributeSchema::new(&[]);
static SPACER_SCHEMA: AttributeSchema =
    AttributeSchema::new(&[AttributeSpec::integer(attr::HEIGHT, 5, 200)]);

/// Returns the attribute schema of a kind.
pub fn schema(kind: FieldKind) -> &'static AttributeSchema {
    match kind {
        FieldKind::Text => &TEXT_SCHEMA,
        FieldKind::Number => &NUMBER_SCHEMA,
        FieldKind::TextArea => &TEXT_AREA_SCHEMA,
        FieldKind::Date => &DATE_SCHEMA,
        FieldKind::Select => &SELECT_SCHEMA,
        FieldKind::Checkbox => &CHECKBOX_SCHEMA,
        FieldKind::Title => &TITLE_SCHEMA,
        FieldKind::SubTitle => &SUBTITLE_SCHEMA,
        FieldKind::Paragraph => &PARAGRAPH_SCHEMA,
        FieldKind::Separator => &SEPARATOR_SCHEMA,
        FieldKind::Spacer => &SPACER_SCHEMA,
    }
}

/// Returns the default attribute bag a freshly constructed instance of
/// this kind carries.
pub fn default_attributes(kind: FieldKind) -> AttributeMap {
    match kind {
        FieldKind::Text => AttributeMap::new()
            .with(attr::LABEL, "Text field")
            .with(attr::HELPER_TEXT, "Fill in the text field")
            .with(attr::REQUIRED, false)
            .with(attr::PLACEHOLDER, "Text value here..."),
        FieldKind::Number => AttributeMap::new()
            .with(attr::LABEL, "Number field")
            .with(attr::HELPER_TEXT, "Fill in the number field")
            .with(attr::REQUIRED, false)
            .with(attr::PLACEHOLDER, "0"),
        FieldKind::TextArea => AttributeMap::new()
            .with(attr::LABEL, "Text area")
            .with(attr::HELPER_TEXT, "Fill in the text area")
            .with(attr::REQUIRED, false)
            .with(attr::PLACEHOLDER, "Longer text here...")
            .with(attr::ROWS, 3_i64),
        FieldKind::Date => AttributeMap::new()
            .with(attr::LABEL, "Date field")
            .with(attr::HELPER_TEXT, "Pick a date")
            .with(attr::REQUIRED, false),
        FieldKind::Select => AttributeMap::new()
            .with(attr::LABEL, "Select field")
            .with(attr::HELPER_TEXT, "Pick an item from the list")
            .with(attr::REQUIRED, false)
            .with(attr::PLACEHOLDER, "Item")
            .with(attr::OPTIONS, Vec::<String>::new()),
        FieldKind::Checkbox => AttributeMap::new()
            .with(attr::LABEL, "Checkbox")
            .with(attr::HELPER_TEXT, "Tick the checkbox")
            .with(attr::REQUIRED, false),
        FieldKind::Title => AttributeMap::new().with(attr::TITLE, "Title"),
        FieldKind::SubTitle => AttributeMap::new().with(attr::TITLE, "Subtitle"),
        FieldKind::Paragraph => AttributeMap::new().with(attr::TEXT, "Paragraph text"),
        FieldKind::Separator => AttributeMap::new(),
        FieldKind::Spacer => AttributeMap::new().with(attr::HEIGHT, 20_i64),
    }
}

/// Constructs a fresh instance of a kind with default attributes.
pub fn construct(kind: FieldKind, id: FieldId) -> FieldInstance {
    FieldInstance::new(id, kind, default_attributes(kind))
}

/// Runs the required-field predicate against a submitted raw value.
///
/// Input kinds require a non-empty value when their `required` attribute
/// is set (a checkbox requires the literal `"true"`); layout kinds carry
/// no user input and always validate.
pub fn validate_submission(instance: &FieldInstance, raw: &str) -> bool {
    if instance.kind.is_layout() {
        return true;
    }
    let required = instance.attributes.flag(attr::REQUIRED).unwrap_or(false);
    if !required {
        return true;
    }
    match instance.kind {
        FieldKind::Checkbox => raw == "true",
        _ => !raw.is_empty(),
    }
}
