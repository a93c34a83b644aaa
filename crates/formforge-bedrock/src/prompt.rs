//! Prompt assembly for form-schema generation.
//!
//! The system prompt fixes the model's role and the exact output
//! contract; the user message carries the requester's free text. The
//! output contract names every member of the closed field-type
//! vocabulary so the completion deserializes straight into a
//! [`formforge_core::models::form::FormDraft`].

pub const GENERATION_SYSTEM_PROMPT: &str = "\
You are an expert form builder. Given a user's description of the form \
they need, you design a structured form schema for it. You respond with \
a single JSON object and nothing else — no commentary, no markdown.";

/// Machine-readable description of the required output shape, appended
/// to every generation request.
pub const FORMAT_INSTRUCTIONS: &str = r#"Respond with a JSON object of this exact shape:

{
  "form_name": string,          // short, human-friendly form title
  "description": string,        // one or two sentences shown under the title
  "category": string,           // one of: "appointment", "registration", "order",
                                // "application", "feedback", "survey", "custom"
  "fields": [
    {
      "field_id": string,       // unique snake_case identifier within the form
      "type": string,           // one of: "NAME", "EMAIL", "PHONE", "ADDRESS",
                                // "DROPDOWN", "RADIO", "CHECKBOX", "DATE",
                                // "SIGNATURE", "SINGLE_LINE", "MULTI_LINE",
                                // "MULTIPLE_CHOICE", "GRID", "FILE_UPLOAD", "RATING"
      "display_name": string,   // label shown to the respondent
      "mandatory": boolean,
      "choices": [string],      // required and non-empty for DROPDOWN, RADIO,
                                // CHECKBOX, MULTIPLE_CHOICE; omit otherwise
      "grid_options": [string], // required and non-empty for GRID; omit otherwise
      "validation": {           // optional
        "min_length": number,   // optional
        "max_length": number,   // optional
        "pattern": string       // optional, a valid regular expression
      },
      "placeholder": string     // optional
    }
  ]
}"#;

/// Assemble the user message for one generation request.
pub fn build_user_message(query: &str) -> String {
    format!(
        "Generate a structured form based on the following user request.\n\
         User Request:\n{query}\n\n{FORMAT_INSTRUCTIONS}\n\n\
         Guidelines:\n\
         - Make fields relevant to the request\n\
         - Mark important fields as mandatory\n\
         - Include appropriate field types for the use case\n\
         - Add validation rules where needed\n\
         - Ensure field display names are user-friendly\n"
    )
}
