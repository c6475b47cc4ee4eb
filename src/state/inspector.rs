//! Inspector pane state for the builder
//!
//! The inspector edits either the selected element's properties or, when
//! nothing is selected, the form's own title/description/status. Text is
//! typed into field buffers and applied to the builder on every edit, so
//! the canvas always reflects the latest keystroke.

use crate::state::builder::{BuilderState, ElementPatch, FormElement};
use crate::state::forms::FormField;

/// What the inspector is currently editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorTarget {
    /// The form's title/description/status
    FormMeta,
    /// The element with this id
    Element(String),
}

/// Editable inspector pane state
#[derive(Debug, Clone)]
pub struct InspectorState {
    pub target: InspectorTarget,
    pub fields: Vec<FormField>,
    /// Mirrors the element's required flag; toggled on its own row
    pub required: bool,
    /// Whether the element carries a required row at all
    has_required_row: bool,
    pub field_index: usize,
}

impl InspectorState {
    /// Inspector over the form's own metadata
    pub fn for_meta(builder: &BuilderState) -> Self {
        Self {
            target: InspectorTarget::FormMeta,
            fields: vec![
                FormField::text_with_value("title", "Form title", builder.title.clone()),
                FormField::text_with_value(
                    "description",
                    "Description",
                    builder.description.clone(),
                ),
            ],
            required: false,
            has_required_row: false,
            field_index: 0,
        }
    }

    /// Inspector over a single element
    pub fn for_element(element: &FormElement) -> Self {
        let mut fields = vec![FormField::text_with_value(
            "label",
            "Label",
            element.label.clone(),
        )];
        if element.element_type.has_placeholder() {
            fields.push(FormField::text_with_value(
                "placeholder",
                "Placeholder",
                element.placeholder.clone().unwrap_or_default(),
            ));
        }
        fields.push(FormField::text_with_value(
            "description",
            "Help text",
            element.description.clone().unwrap_or_default(),
        ));
        if element.element_type.has_options() {
            fields.push(FormField::text_with_value(
                "options",
                "Options (comma-separated)",
                element.options.clone().unwrap_or_default().join(", "),
            ));
        }

        Self {
            target: InspectorTarget::Element(element.id.clone()),
            fields,
            required: element.required,
            has_required_row: true,
            field_index: 0,
        }
    }

    /// Total navigable rows (fields plus the required toggle, if any)
    pub fn row_count(&self) -> usize {
        self.fields.len() + usize::from(self.has_required_row)
    }

    /// Whether the cursor sits on the required toggle row
    pub fn on_required_row(&self) -> bool {
        self.has_required_row && self.field_index == self.fields.len()
    }

    pub fn next_row(&mut self) {
        self.field_index = (self.field_index + 1) % self.row_count();
    }

    pub fn prev_row(&mut self) {
        if self.field_index == 0 {
            self.field_index = self.row_count() - 1;
        } else {
            self.field_index -= 1;
        }
    }

    /// The field under the cursor, unless on the required row
    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        if self.on_required_row() {
            None
        } else {
            self.fields.get_mut(self.field_index)
        }
    }

    pub fn toggle_required(&mut self) {
        if self.has_required_row {
            self.required = !self.required;
        }
    }

    fn field_text(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.as_text().to_string())
    }

    /// Build the element patch for the current buffers
    pub fn to_patch(&self) -> ElementPatch {
        let none_if_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };

        ElementPatch {
            label: self.field_text("label"),
            placeholder: self.field_text("placeholder").map(none_if_empty),
            required: Some(self.required),
            options: self.field_text("options").map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            }),
            description: self.field_text("description").map(none_if_empty),
        }
    }

    /// Write meta buffers back onto the builder (no-op for element targets)
    pub fn apply_meta(&self, builder: &mut BuilderState) {
        if self.target != InspectorTarget::FormMeta {
            return;
        }
        if let Some(title) = self.field_text("title") {
            builder.title = title;
        }
        if let Some(description) = self.field_text("description") {
            builder.description = description;
        }
    }
}
