//! HTML render hooks for field instances.
//!
//! Three hooks per kind, mirroring the three places a field appears:
//!
//! - [`designer_preview`] - read-only representation on the designer canvas
//! - [`interactive`] - the fillable control on the submission page
//! - [`property_editor`] - the attribute edit form shown when a field is
//!   selected in the designer
//!
//! All hooks emit plain HTML strings with deterministic attribute order,
//! so renderings are directly comparable in tests. The interactive
//! control is named by the instance id; that name is the key the
//! submission layer uses when committing values.

use std::fmt::Write as _;

use crate::attributes::AttributeValue;
use crate::fields::{attr, schema};
use crate::instance::FieldInstance;
use crate::kind::FieldKind;
use crate::schema::AttributeType;

/// Presentation state threaded into [`interactive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveContext<'a> {
    /// The value committed so far for this field, if any.
    pub value: Option<&'a str>,
    /// Whether the last submission attempt marked this field invalid.
    pub invalid: bool,
}

/// Escapes text for safe embedding in HTML content and attributes.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn label_line(instance: &FieldInstance, invalid: bool) -> String {
    let label = escape(instance.attributes.text(attr::LABEL).unwrap_or_default());
    let star = if instance.attributes.flag(attr::REQUIRED) == Some(true) {
        " *"
    } else {
        ""
    };
    let class = if invalid { "label invalid" } else { "label" };
    format!(r#"<label class="{class}" for="{}">{label}{star}</label>"#, instance.id)
}

fn helper_line(instance: &FieldInstance, invalid: bool) -> String {
    match instance.attributes.text(attr::HELPER_TEXT) {
        Some(text) if !text.is_empty() => {
            let class = if invalid { "helper invalid" } else { "helper" };
            format!(r#"<p class="{class}">{}</p>"#, escape(text))
        }
        _ => String::new(),
    }
}

fn static_block(instance: &FieldInstance) -> String {
    match instance.kind {
        FieldKind::Title => format!(
            r#"<h1 class="title">{}</h1>"#,
            escape(instance.attributes.text(attr::TITLE).unwrap_or_default())
        ),
        FieldKind::SubTitle => format!(
            r#"<h2 class="subtitle">{}</h2>"#,
            escape(instance.attributes.text(attr::TITLE).unwrap_or_default())
        ),
        FieldKind::Paragraph => format!(
            r#"<p class="paragraph">{}</p>"#,
            escape(instance.attributes.text(attr::TEXT).unwrap_or_default())
        ),
        FieldKind::Separator => r#"<hr class="separator" />"#.to_string(),
        FieldKind::Spacer => {
            let height = instance.attributes.integer(attr::HEIGHT).unwrap_or(20);
            format!(r#"<div class="spacer" style="height: {height}px"></div>"#)
        }
        _ => String::new(),
    }
}

fn input_control(instance: &FieldInstance, value: &str, invalid: bool, disabled: bool) -> String {
    let id = &instance.id;
    let class = if invalid { "input invalid" } else { "input" };
    let disabled_attr = if disabled { " disabled readonly" } else { "" };
    let placeholder = escape(instance.attributes.text(attr::PLACEHOLDER).unwrap_or_default());
    let value = escape(value);
    match instance.kind {
        FieldKind::Text => format!(
            r#"<input type="text" id="{id}" name="{id}" class="{class}" value="{value}" placeholder="{placeholder}"{disabled_attr} />"#
        ),
        FieldKind::Number => format!(
            r#"<input type="number" id="{id}" name="{id}" class="{class}" value="{value}" placeholder="{placeholder}"{disabled_attr} />"#
        ),
        FieldKind::Date => format!(
            r#"<input type="date" id="{id}" name="{id}" class="{class}" value="{value}"{disabled_attr} />"#
        ),
        FieldKind::TextArea => {
            let rows = instance.attributes.integer(attr::ROWS).unwrap_or(3);
            format!(
                r#"<textarea id="{id}" name="{id}" class="{class}" rows="{rows}" placeholder="{placeholder}"{disabled_attr}>{value}</textarea>"#
            )
        }
        FieldKind::Select => {
            let mut out = format!(r#"<select id="{id}" name="{id}" class="{class}"{disabled_attr}>"#);
            let _ = write!(out, r#"<option value="">{placeholder}</option>"#);
            if let Some(options) = instance.attributes.text_list(attr::OPTIONS) {
                for option in options {
                    let option = escape(option);
                    let selected = if option == value { " selected" } else { "" };
                    let _ = write!(out, r#"<option value="{option}"{selected}>{option}</option>"#);
                }
            }
            out.push_str("</select>");
            out
        }
        FieldKind::Checkbox => {
            let checked = if value == "true" { " checked" } else { "" };
            format!(
                r#"<input type="checkbox" id="{id}" name="{id}" class="{class}" value="true"{checked}{disabled_attr} />"#
            )
        }
        _ => String::new(),
    }
}

/// Renders the read-only designer-canvas representation of an instance.
pub fn designer_preview(instance: &FieldInstance) -> String {
    if instance.kind.is_layout() {
        // Layout kinds show a muted kind caption so an empty paragraph or
        // a spacer stays visible on the canvas.
        return format!(
            r#"<div class="preview"><span class="kind">{}</span>{}</div>"#,
            instance.kind,
            static_block(instance)
        );
    }
    format!(
        r#"<div class="preview">{}{}{}</div>"#,
        label_line(instance, false),
        input_control(instance, "", false, true),
        helper_line(instance, false)
    )
}

/// Renders the fillable control for the submission page.
///
/// The emitted control is named by the instance id; the submission layer
/// commits the control's value under that id on blur/change (checkbox and
/// select commit on toggle).
pub fn interactive(instance: &FieldInstance, ctx: &InteractiveContext<'_>) -> String {
    if instance.kind.is_layout() {
        return static_block(instance);
    }
    format!(
        r#"<div class="field">{}{}{}</div>"#,
        label_line(instance, ctx.invalid),
        input_control(instance, ctx.value.unwrap_or(""), ctx.invalid, false),
        helper_line(instance, ctx.invalid)
    )
}

/// Renders the attribute edit form for the selected instance.
///
/// One control per schema attribute, prefilled from the current bag. The
/// host commits edits through the designer's `update_element` once per
/// field blur or Enter keypress, never per keystroke.
pub fn property_editor(instance: &FieldInstance) -> String {
    let mut out = format!(r#"<form class="properties" data-element="{}">"#, instance.id);
    for spec in schema(instance.kind).specs() {
        let name = spec.name;
        let _ = write!(out, r#"<label for="prop-{name}">{name}</label>"#);
        match spec.value_type {
            AttributeType::Text => {
                let value = escape(instance.attributes.text(name).unwrap_or_default());
                // Long-form attributes get a textarea, as in the designer UI.
                if name == attr::HELPER_TEXT || name == attr::TEXT {
                    let _ = write!(
                        out,
                        r#"<textarea id="prop-{name}" name="{name}" rows="4">{value}</textarea>"#
                    );
                } else {
                    let _ = write!(
                        out,
                        r#"<input type="text" id="prop-{name}" name="{name}" value="{value}" />"#
                    );
                }
            }
            AttributeType::Bool => {
                let checked = if instance.attributes.flag(name) == Some(true) {
                    " checked"
                } else {
                    ""
                };
                let _ = write!(
                    out,
                    r#"<input type="checkbox" id="prop-{name}" name="{name}" value="true"{checked} />"#
                );
            }
            AttributeType::Integer => {
                let value = instance.attributes.integer(name).unwrap_or_default();
                let min = spec.min.unwrap_or(i64::MIN);
                let max = spec.max.unwrap_or(i64::MAX);
                let _ = write!(
                    out,
                    r#"<input type="number" id="prop-{name}" name="{name}" value="{value}" min="{min}" max="{max}" />"#
                );
            }
            AttributeType::TextList => {
                let _ = write!(out, r#"<ul class="options" id="prop-{name}">"#);
                if let Some(AttributeValue::TextList(items)) = instance.attributes.get(name) {
                    for (i, item) in items.iter().enumerate() {
                        let _ = write!(
                            out,
                            r#"<li><input type="text" name="{name}[{i}]" value="{}" /></li>"#,
                            escape(item)
                        );
                    }
                }
                let _ = write!(
                    out,
                    r#"</ul><button type="button" class="add-option" data-for="{name}">Add option</button>"#
                );
            }
        }
    }
    out.push_str("</form>");
    out
}
