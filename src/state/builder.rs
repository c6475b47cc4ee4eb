//! Form element model and builder editing state
//!
//! The builder holds the ordered element sequence for the form being
//! edited, plus selection and drag tracking. All operations are
//! in-memory; the form only reaches the backend on an explicit save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The twelve element kinds a form can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Number,
    Email,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
    Time,
    File,
    Heading,
    Paragraph,
}

impl ElementType {
    /// Palette order, also the canonical listing order
    pub const ALL: [ElementType; 12] = [
        ElementType::Text,
        ElementType::Number,
        ElementType::Email,
        ElementType::Textarea,
        ElementType::Select,
        ElementType::Checkbox,
        ElementType::Radio,
        ElementType::Date,
        ElementType::Time,
        ElementType::File,
        ElementType::Heading,
        ElementType::Paragraph,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ElementType::Text => "Text",
            ElementType::Number => "Number",
            ElementType::Email => "Email",
            ElementType::Textarea => "Textarea",
            ElementType::Select => "Select",
            ElementType::Checkbox => "Checkbox",
            ElementType::Radio => "Radio",
            ElementType::Date => "Date",
            ElementType::Time => "Time",
            ElementType::File => "File",
            ElementType::Heading => "Heading",
            ElementType::Paragraph => "Paragraph",
        }
    }

    /// Only choice-style elements carry an option list
    pub fn has_options(self) -> bool {
        matches!(
            self,
            ElementType::Select | ElementType::Checkbox | ElementType::Radio
        )
    }

    /// Static elements (headings, paragraphs) take no placeholder
    pub fn has_placeholder(self) -> bool {
        !matches!(self, ElementType::Heading | ElementType::Paragraph)
    }

    /// Default label for a freshly added element
    fn default_label(self) -> String {
        match self {
            ElementType::Heading => "Heading".to_string(),
            ElementType::Paragraph => "Paragraph".to_string(),
            other => format!("{} Field", other.label()),
        }
    }
}

/// Options seeded onto a new choice element
const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// A single field/control definition within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElement {
    pub id: String,
    pub element_type: ElementType,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub description: Option<String>,
}

impl FormElement {
    /// Create a new element with a generated id and type-derived defaults
    pub fn new(element_type: ElementType) -> Self {
        let options = element_type
            .has_options()
            .then(|| DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect());

        Self {
            id: Uuid::new_v4().to_string(),
            element_type,
            label: element_type.default_label(),
            placeholder: None,
            required: false,
            options,
            description: None,
        }
    }
}

/// Partial update merged into an element; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub description: Option<Option<String>>,
}

/// Direction for the neighbor-swap move operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Lifecycle state of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

impl FormStatus {
    pub fn label(self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Active => "active",
            FormStatus::Archived => "archived",
        }
    }
}

/// A saved form as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: FormStatus,
    pub elements: Vec<FormElement>,
    pub responses: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editing state for the builder view
#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    /// Id of the form being edited, `None` for a new form
    pub form_id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: FormStatus,
    pub elements: Vec<FormElement>,
    /// Id of the element currently selected on the canvas
    pub selected_element_id: Option<String>,
    /// Index of the element being dragged, while a drag is in flight
    pub drag_index: Option<usize>,
}

impl BuilderState {
    /// Start a fresh, empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing form into the builder
    pub fn from_form(form: &Form) -> Self {
        Self {
            form_id: Some(form.id.clone()),
            title: form.title.clone(),
            description: form.description.clone(),
            status: form.status,
            elements: form.elements.clone(),
            selected_element_id: None,
            drag_index: None,
        }
    }

    /// Append a new element of the given type; returns its id
    pub fn add_element(&mut self, element_type: ElementType) -> String {
        let element = FormElement::new(element_type);
        let id = element.id.clone();
        self.elements.push(element);
        self.selected_element_id = Some(id.clone());
        id
    }

    /// Merge a partial patch into the matching element; no-op if absent.
    /// Patches that would break the type invariants (options on a
    /// non-choice element, placeholder on a static element) are dropped.
    pub fn update_element(&mut self, id: &str, patch: ElementPatch) {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return;
        };

        if let Some(label) = patch.label {
            element.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            if element.element_type.has_placeholder() {
                element.placeholder = placeholder;
            }
        }
        if let Some(required) = patch.required {
            element.required = required;
        }
        if let Some(options) = patch.options {
            if element.element_type.has_options() && !options.is_empty() {
                element.options = Some(options);
            }
        }
        if let Some(description) = patch.description {
            element.description = description;
        }
    }

    /// Remove the matching element; clears the selection if it pointed at it
    pub fn delete_element(&mut self, id: &str) {
        self.elements.retain(|e| e.id != id);
        if self.selected_element_id.as_deref() == Some(id) {
            self.selected_element_id = None;
        }
    }

    /// Swap the element with its neighbor; no-op at sequence boundaries
    pub fn move_element(&mut self, id: &str, direction: MoveDirection) {
        let Some(index) = self.element_index(id) else {
            return;
        };
        match direction {
            MoveDirection::Up if index > 0 => {
                self.elements.swap(index, index - 1);
            }
            MoveDirection::Down if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
            }
            _ => {}
        }
    }

    /// Begin dragging the element at `index`
    pub fn drag_start(&mut self, index: usize) {
        if index < self.elements.len() {
            self.drag_index = Some(index);
        }
    }

    /// Live reorder: remove the dragged element and reinsert it at
    /// `target`, then track `target` as the new drag position
    pub fn drag_over(&mut self, target: usize) {
        let Some(from) = self.drag_index else {
            return;
        };
        if target >= self.elements.len() || from == target {
            return;
        }
        let element = self.elements.remove(from);
        self.elements.insert(target, element);
        self.drag_index = Some(target);
    }

    /// Finish the drag
    pub fn drag_end(&mut self) {
        self.drag_index = None;
    }

    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn selected_element(&self) -> Option<&FormElement> {
        let id = self.selected_element_id.as_deref()?;
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_element_id.as_deref()?;
        self.element_index(id)
    }

    /// Move the canvas selection to the next element
    pub fn select_next(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) if i + 1 < self.elements.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.selected_element_id = Some(self.elements[next].id.clone());
    }

    /// Move the canvas selection to the previous element
    pub fn select_prev(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        let prev = match self.selected_index() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.selected_element_id = Some(self.elements[prev].id.clone());
    }

    /// Presence check performed before the (simulated) save
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Form title is required".to_string());
        }
        Ok(())
    }

    /// Snapshot the builder into a form ready for the backend
    pub fn to_form(&self) -> Form {
        let now = Utc::now();
        Form {
            id: self
                .form_id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            elements: self.elements.clone(),
            responses: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder_with(types: &[ElementType]) -> BuilderState {
        let mut builder = BuilderState::new();
        for t in types {
            builder.add_element(*t);
        }
        builder
    }

    mod element_type {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_twelve_variants() {
            assert_eq!(ElementType::ALL.len(), 12);
        }

        #[test]
        fn test_options_only_for_choice_types() {
            for t in ElementType::ALL {
                let expected = matches!(
                    t,
                    ElementType::Select | ElementType::Checkbox | ElementType::Radio
                );
                assert_eq!(t.has_options(), expected, "{:?}", t);
            }
        }

        #[test]
        fn test_static_types_have_no_placeholder() {
            assert!(!ElementType::Heading.has_placeholder());
            assert!(!ElementType::Paragraph.has_placeholder());
            assert!(ElementType::Text.has_placeholder());
            assert!(ElementType::Select.has_placeholder());
        }

        #[test]
        fn test_serializes_lowercase() {
            let json = serde_json::to_string(&ElementType::Textarea).unwrap();
            assert_eq!(json, "\"textarea\"");
        }
    }

    mod add_element {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_appends_with_unique_ids() {
            let mut builder = BuilderState::new();
            let a = builder.add_element(ElementType::Text);
            let b = builder.add_element(ElementType::Number);
            assert_eq!(builder.elements.len(), 2);
            assert_ne!(a, b);
        }

        #[test]
        fn test_label_derived_from_type() {
            let mut builder = BuilderState::new();
            builder.add_element(ElementType::Email);
            builder.add_element(ElementType::Heading);
            assert_eq!(builder.elements[0].label, "Email Field");
            assert_eq!(builder.elements[1].label, "Heading");
        }

        #[test]
        fn test_select_seeds_three_default_options() {
            let mut builder = BuilderState::new();
            builder.add_element(ElementType::Select);
            assert_eq!(
                builder.elements[0].options,
                Some(vec![
                    "Option 1".to_string(),
                    "Option 2".to_string(),
                    "Option 3".to_string(),
                ])
            );
        }

        #[test]
        fn test_non_choice_types_have_no_options() {
            let mut builder = BuilderState::new();
            builder.add_element(ElementType::Text);
            builder.add_element(ElementType::Date);
            assert!(builder.elements.iter().all(|e| e.options.is_none()));
        }

        #[test]
        fn test_new_element_becomes_selection() {
            let mut builder = BuilderState::new();
            let id = builder.add_element(ElementType::Text);
            assert_eq!(builder.selected_element_id, Some(id));
        }
    }

    mod update_element {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_merges_patch_fields() {
            let mut builder = builder_with(&[ElementType::Text]);
            let id = builder.elements[0].id.clone();

            builder.update_element(
                &id,
                ElementPatch {
                    label: Some("Full name".to_string()),
                    placeholder: Some(Some("Jane Doe".to_string())),
                    required: Some(true),
                    ..Default::default()
                },
            );

            let element = &builder.elements[0];
            assert_eq!(element.label, "Full name");
            assert_eq!(element.placeholder, Some("Jane Doe".to_string()));
            assert!(element.required);
            assert_eq!(element.description, None);
        }

        #[test]
        fn test_absent_id_is_noop() {
            let mut builder = builder_with(&[ElementType::Text]);
            let before = builder.elements.clone();
            builder.update_element(
                "missing",
                ElementPatch {
                    label: Some("x".to_string()),
                    ..Default::default()
                },
            );
            assert_eq!(builder.elements, before);
        }

        #[test]
        fn test_placeholder_ignored_on_static_element() {
            let mut builder = builder_with(&[ElementType::Heading]);
            let id = builder.elements[0].id.clone();
            builder.update_element(
                &id,
                ElementPatch {
                    placeholder: Some(Some("nope".to_string())),
                    ..Default::default()
                },
            );
            assert_eq!(builder.elements[0].placeholder, None);
        }

        #[test]
        fn test_options_ignored_on_non_choice_element() {
            let mut builder = builder_with(&[ElementType::Text]);
            let id = builder.elements[0].id.clone();
            builder.update_element(
                &id,
                ElementPatch {
                    options: Some(vec!["a".to_string()]),
                    ..Default::default()
                },
            );
            assert_eq!(builder.elements[0].options, None);
        }

        #[test]
        fn test_empty_options_rejected_on_choice_element() {
            let mut builder = builder_with(&[ElementType::Radio]);
            let id = builder.elements[0].id.clone();
            builder.update_element(
                &id,
                ElementPatch {
                    options: Some(vec![]),
                    ..Default::default()
                },
            );
            // The seeded defaults survive
            assert_eq!(builder.elements[0].options.as_ref().unwrap().len(), 3);
        }
    }

    mod delete_element {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_then_delete_restores_list() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            let before = builder.elements.clone();

            let id = builder.add_element(ElementType::Select);
            assert_eq!(builder.elements.len(), 3);

            builder.delete_element(&id);
            assert_eq!(builder.elements, before);
        }

        #[test]
        fn test_clears_selection_of_deleted_element() {
            let mut builder = BuilderState::new();
            let id = builder.add_element(ElementType::Text);
            assert!(builder.selected_element_id.is_some());

            builder.delete_element(&id);
            assert_eq!(builder.selected_element_id, None);
        }

        #[test]
        fn test_keeps_selection_of_other_element() {
            let mut builder = BuilderState::new();
            let keep = builder.add_element(ElementType::Text);
            let drop = builder.add_element(ElementType::Number);
            builder.selected_element_id = Some(keep.clone());

            builder.delete_element(&drop);
            assert_eq!(builder.selected_element_id, Some(keep));
        }

        #[test]
        fn test_absent_id_is_noop() {
            let mut builder = builder_with(&[ElementType::Text]);
            builder.delete_element("missing");
            assert_eq!(builder.elements.len(), 1);
        }
    }

    mod move_element {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_up_swaps_with_previous() {
            let mut builder =
                builder_with(&[ElementType::Text, ElementType::Number, ElementType::Date]);
            let b = builder.elements[1].id.clone();

            builder.move_element(&b, MoveDirection::Up);

            let types: Vec<_> = builder.elements.iter().map(|e| e.element_type).collect();
            assert_eq!(
                types,
                vec![ElementType::Number, ElementType::Text, ElementType::Date]
            );
        }

        #[test]
        fn test_move_up_at_first_index_is_noop() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            let first = builder.elements[0].id.clone();
            let before = builder.elements.clone();

            builder.move_element(&first, MoveDirection::Up);
            assert_eq!(builder.elements, before);
        }

        #[test]
        fn test_move_down_at_last_index_is_noop() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            let last = builder.elements[1].id.clone();
            let before = builder.elements.clone();

            builder.move_element(&last, MoveDirection::Down);
            assert_eq!(builder.elements, before);
        }

        #[test]
        fn test_move_down_swaps_with_next() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            let first = builder.elements[0].id.clone();

            builder.move_element(&first, MoveDirection::Down);
            assert_eq!(builder.elements[1].id, first);
        }

        #[test]
        fn test_absent_id_is_noop() {
            let mut builder = builder_with(&[ElementType::Text]);
            let before = builder.elements.clone();
            builder.move_element("missing", MoveDirection::Down);
            assert_eq!(builder.elements, before);
        }
    }

    mod drag_reorder {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_drag_over_reinserts_at_target() {
            let mut builder =
                builder_with(&[ElementType::Text, ElementType::Number, ElementType::Date]);
            let dragged = builder.elements[0].id.clone();

            builder.drag_start(0);
            builder.drag_over(2);

            assert_eq!(builder.elements[2].id, dragged);
        }

        #[test]
        fn test_drag_over_updates_tracked_index() {
            let mut builder =
                builder_with(&[ElementType::Text, ElementType::Number, ElementType::Date]);

            builder.drag_start(0);
            builder.drag_over(1);
            assert_eq!(builder.drag_index, Some(1));

            // Live reorder: the next drag-over moves from the updated index
            builder.drag_over(2);
            assert_eq!(builder.drag_index, Some(2));
            assert_eq!(builder.elements[2].element_type, ElementType::Text);
        }

        #[test]
        fn test_drag_over_without_drag_start_is_noop() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            let before = builder.elements.clone();
            builder.drag_over(1);
            assert_eq!(builder.elements, before);
        }

        #[test]
        fn test_drag_over_out_of_bounds_is_noop() {
            let mut builder = builder_with(&[ElementType::Text, ElementType::Number]);
            builder.drag_start(0);
            builder.drag_over(5);
            assert_eq!(builder.drag_index, Some(0));
        }

        #[test]
        fn test_drag_end_clears_tracking() {
            let mut builder = builder_with(&[ElementType::Text]);
            builder.drag_start(0);
            builder.drag_end();
            assert_eq!(builder.drag_index, None);
        }

        #[test]
        fn test_drag_start_out_of_bounds_ignored() {
            let mut builder = builder_with(&[ElementType::Text]);
            builder.drag_start(3);
            assert_eq!(builder.drag_index, None);
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_select_next_and_prev_walk_the_canvas() {
            let mut builder =
                builder_with(&[ElementType::Text, ElementType::Number, ElementType::Date]);
            builder.selected_element_id = Some(builder.elements[0].id.clone());

            builder.select_next();
            assert_eq!(builder.selected_index(), Some(1));
            builder.select_next();
            assert_eq!(builder.selected_index(), Some(2));
            // Clamped at the end
            builder.select_next();
            assert_eq!(builder.selected_index(), Some(2));

            builder.select_prev();
            assert_eq!(builder.selected_index(), Some(1));
        }

        #[test]
        fn test_select_next_on_empty_canvas_is_noop() {
            let mut builder = BuilderState::new();
            builder.select_next();
            assert!(builder.selected_element_id.is_none());
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_title_rejected() {
            let builder = BuilderState::new();
            assert!(builder.validate().is_err());
        }

        #[test]
        fn test_whitespace_title_rejected() {
            let builder = BuilderState {
                title: "   ".to_string(),
                ..Default::default()
            };
            assert!(builder.validate().is_err());
        }

        #[test]
        fn test_titled_form_passes() {
            let builder = BuilderState {
                title: "Customer Survey".to_string(),
                ..Default::default()
            };
            assert!(builder.validate().is_ok());
        }
    }

    mod round_trip {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_form_to_form_preserves_elements() {
            let mut builder = builder_with(&[ElementType::Select, ElementType::Email]);
            builder.title = "Signup".to_string();
            builder.status = FormStatus::Active;

            let form = builder.to_form();
            let reloaded = BuilderState::from_form(&form);

            assert_eq!(reloaded.title, "Signup");
            assert_eq!(reloaded.status, FormStatus::Active);
            assert_eq!(reloaded.elements, builder.elements);
            assert_eq!(reloaded.form_id, Some(form.id));
        }
    }
}
