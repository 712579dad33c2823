//! # Form Replication Settings
//!
//! Per-form switches for forwarding and local deletion, and the id of the
//! matching form on the central site. Saving replaces all three values, so an
//! administrator can point a form at an existing remote form or clear the id
//! to have it created again.

use crate::state::AppState;
use crate::store::ConfigurationStore;
use actix_web::{web, HttpResponse};
use common::model::settings::FormSettings;

/// Actix web handler for `GET /api/settings/forms/{form_id}`.
///
/// # Returns
/// - `200 OK` with the `FormSettings`; defaults when none were saved.
/// - `404 Not Found` for an unknown form.
/// - `503 Service Unavailable` on a database error.
pub async fn get(state: web::Data<AppState>, form_id: web::Path<i64>) -> HttpResponse {
    let form_id = form_id.into_inner();
    if let Some(response) = missing_form(&state, form_id) {
        return response;
    }

    match state.store.form_settings(form_id) {
        Ok(settings) => HttpResponse::Ok().json(settings.unwrap_or_default()),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error loading form settings: {}", e)),
    }
}

/// Actix web handler for `POST /api/settings/forms/{form_id}`.
///
/// # Returns
/// - `200 OK` with a confirmation message.
/// - `404 Not Found` for an unknown form.
/// - `503 Service Unavailable` when the settings could not be written.
pub async fn save(
    state: web::Data<AppState>,
    form_id: web::Path<i64>,
    payload: web::Json<FormSettings>,
) -> HttpResponse {
    let form_id = form_id.into_inner();
    if let Some(response) = missing_form(&state, form_id) {
        return response;
    }

    match state.store.save_form_settings(form_id, &payload) {
        Ok(()) => HttpResponse::Ok().body("Aggregator settings updated"),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("There was an error while saving the Aggregator Settings: {}", e)),
    }
}

fn missing_form(state: &AppState, form_id: i64) -> Option<HttpResponse> {
    match state.store.form(form_id) {
        Ok(Some(_)) => None,
        Ok(None) => Some(HttpResponse::NotFound().body("Form not found")),
        Err(e) => Some(
            HttpResponse::ServiceUnavailable().body(format!("Error loading form: {}", e)),
        ),
    }
}
