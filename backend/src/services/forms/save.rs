//! # Form Creation
//!
//! Stores a new local form definition. The id is assigned by the database;
//! an id in the payload is ignored.

use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::form::Form;
use log::info;
use std::collections::HashSet;

/// Actix web handler for `POST /api/forms/save`.
///
/// # Returns
/// - `200 OK` with the saved `Form`, now carrying its id.
/// - `400 Bad Request` for an empty title or duplicate field ids.
/// - `503 Service Unavailable` on a database error.
pub async fn process(state: web::Data<AppState>, payload: web::Json<Form>) -> HttpResponse {
    let form = payload.into_inner();
    if let Err(e) = validate_form(&form) {
        return HttpResponse::BadRequest().body(e);
    }

    match state.store.insert_form(&form) {
        Ok(saved) => {
            info!("Form {:?} saved as {:?}", saved.title, saved.id);
            HttpResponse::Ok().json(saved)
        }
        Err(e) => HttpResponse::ServiceUnavailable().body(format!("Error saving form: {}", e)),
    }
}

fn validate_form(form: &Form) -> Result<(), String> {
    if form.title.trim().is_empty() {
        return Err("The form title must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for field in &form.fields {
        if !seen.insert(field.id) {
            return Err(format!("Field id {} is used more than once", field.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::services::{configure, test_support};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::form::Form;
    use serde_json::json;

    #[actix_web::test]
    async fn saved_forms_can_be_fetched() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/forms/save")
            .set_json(json!({
                "title": "Contact",
                "fields": [{ "id": 1, "label": "Name", "isRequired": true }]
            }))
            .to_request();
        let saved: Form = test::call_and_read_body_json(&app, req).await;
        let id = saved.id.unwrap();

        let fetched: Form = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/forms/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(fetched, saved);
        assert!(fetched.fields[0].is_required);

        let all: Vec<Form> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/forms").to_request(),
        )
        .await;
        assert_eq!(all.len(), 1);
    }

    #[actix_web::test]
    async fn duplicate_field_ids_are_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/forms/save")
            .set_json(json!({
                "title": "Contact",
                "fields": [{ "id": 1, "label": "Name" }, { "id": 1, "label": "Email" }]
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
