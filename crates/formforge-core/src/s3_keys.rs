//! S3 key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the
//! canonical layout of objects in the FormForge bucket. Submissions and
//! uploads nest under their form's prefix so a cascade delete is a
//! prefix delete; slug markers double as the slug → form-id index.

use uuid::Uuid;

pub fn form(id: Uuid) -> String {
    format!("forms/{id}.json")
}

pub const FORMS_PREFIX: &str = "forms/";

pub fn submission(form_id: Uuid, id: Uuid) -> String {
    format!("submissions/{form_id}/{id}.json")
}

pub fn submissions_prefix(form_id: Uuid) -> String {
    format!("submissions/{form_id}/")
}

pub fn slug(slug: &str) -> String {
    format!("slugs/{slug}.json")
}

pub const SLUGS_PREFIX: &str = "slugs/";

pub fn upload(form_id: Uuid, file_id: Uuid, filename: &str) -> String {
    format!("uploads/{form_id}/{file_id}/{filename}")
}

pub fn uploads_prefix(form_id: Uuid) -> String {
    format!("uploads/{form_id}/")
}
