//! # Form Retrieval
//!
//! Read access to the local form definitions for `GET /api/forms` and
//! `GET /api/forms/{form_id}`.

use crate::state::AppState;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /api/forms/{form_id}`.
///
/// # Returns
/// - `200 OK` with the `Form`, including fields and unmodelled properties.
/// - `404 Not Found` for an unknown id.
/// - `503 Service Unavailable` on a database error.
pub async fn process(state: web::Data<AppState>, form_id: web::Path<i64>) -> HttpResponse {
    match state.store.form(form_id.into_inner()) {
        Ok(Some(form)) => HttpResponse::Ok().json(form),
        Ok(None) => HttpResponse::NotFound().body("Form not found"),
        Err(e) => HttpResponse::ServiceUnavailable().body(format!("Error retrieving form: {}", e)),
    }
}

/// Actix web handler for `GET /api/forms`. Lists every form by id.
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    match state.store.forms() {
        Ok(forms) => HttpResponse::Ok().json(forms),
        Err(e) => HttpResponse::ServiceUnavailable().body(format!("Error retrieving forms: {}", e)),
    }
}
