//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    /// Masked when rendered (passwords)
    Secret(String),
    /// Hour of day, 0-23
    Hour(u32),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single input field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
        }
    }

    /// Create a new secret (masked) field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Secret(String::new()),
        }
    }

    /// Create a new hour-of-day field
    pub fn hour(name: &str, label: &str, value: u32) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Hour(value),
        }
    }

    /// Get the text value (empty for hour fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => s,
            FieldValue::Hour(_) => "",
        }
    }

    /// Get the hour value (0 for text fields)
    pub fn as_hour(&self) -> u32 {
        match &self.value {
            FieldValue::Hour(h) => *h,
            _ => 0,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => s.push(c),
            FieldValue::Hour(h) => {
                if let Some(d) = c.to_digit(10) {
                    // Accumulate up to two digits, keeps the last entry small
                    *h = (*h * 10 + d) % 100;
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => {
                s.pop();
            }
            FieldValue::Hour(h) => {
                *h /= 10;
            }
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) => s.clear(),
            FieldValue::Hour(h) => *h = 0,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Secret(s) => "•".repeat(s.chars().count()),
            FieldValue::Hour(h) => format!("{h:02}:00"),
        }
    }
}
