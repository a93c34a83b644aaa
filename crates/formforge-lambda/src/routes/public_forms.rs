use axum::Json;
use axum::extract::{Path, State};

use formforge_core::models::form::PublicForm;
use formforge_storage::error::StorageError;
use formforge_storage::{forms, slugs};

use crate::error::ApiError;
use crate::state::AppState;

/// Fetch a published form by slug, for rendering to a respondent.
/// Unknown slugs 404; unpublished forms deny rather than leak.
pub async fn get_public_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicForm>, ApiError> {
    let form_id = match slugs::resolve(&state.s3, &state.bucket, &slug).await {
        Ok(id) => id,
        Err(StorageError::NotFound { .. }) => {
            return Err(ApiError::NotFound("form not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let form = forms::load(&state.s3, &state.bucket, form_id).await?;

    if !form.sharing.is_public {
        return Err(ApiError::Forbidden(
            "form is not publicly available".to_string(),
        ));
    }

    Ok(Json(PublicForm::from(form)))
}
