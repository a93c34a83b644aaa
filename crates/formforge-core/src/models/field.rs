use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The closed set of field kinds a form can contain.
///
/// Each variant implies one rendering affordance and one response value
/// shape (see [`crate::responses`]). Unknown tags are rejected at
/// deserialization, so a `FieldType` in hand is always a member of this
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum FieldType {
    Name,
    Email,
    Phone,
    Address,
    Dropdown,
    Radio,
    Checkbox,
    Date,
    Signature,
    SingleLine,
    MultiLine,
    MultipleChoice,
    Grid,
    FileUpload,
    Rating,
}

impl FieldType {
    /// Whether this kind carries a `choices` list (DROPDOWN, RADIO,
    /// CHECKBOX, MULTIPLE_CHOICE). Shared by the schema validator and the
    /// generator post-processing so the two never disagree.
    pub fn is_choice_type(self) -> bool {
        matches!(
            self,
            FieldType::Dropdown
                | FieldType::Radio
                | FieldType::Checkbox
                | FieldType::MultipleChoice
        )
    }
}

/// Length/pattern rules attached to a string-shaped field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldValidation {
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// One entry in a form's schema: one input's type, label, and rules.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDefinition {
    /// Unique within the owning form's field list.
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Label shown to the respondent.
    pub display_name: String,
    #[serde(default)]
    pub mandatory: bool,
    /// Options for choice-bearing kinds; empty otherwise.
    #[serde(default)]
    pub choices: Vec<String>,
    /// Column options for GRID fields; empty otherwise.
    #[serde(default)]
    pub grid_options: Vec<String>,
    #[serde(default)]
    pub validation: Option<FieldValidation>,
    #[serde(default)]
    pub placeholder: Option<String>,
}
