use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::{SubmitEntryRequest, SubmitEntryResponse};
use log::{error, info};

/// Actix web handler for `POST /api/entries/submit/{form_id}`.
///
/// # Returns
/// - `200 OK` with a `SubmitEntryResponse` once the entry is stored and the
///   "entry created" listeners have run, whatever they did with it.
/// - `400 Bad Request` when the values do not fit the form.
/// - `404 Not Found` for an unknown form.
/// - `503 Service Unavailable` when the entry could not be stored.
pub async fn process(
    state: web::Data<AppState>,
    form_id: web::Path<i64>,
    payload: web::Json<SubmitEntryRequest>,
) -> HttpResponse {
    let form_id = form_id.into_inner();
    let form = match state.store.form(form_id) {
        Ok(Some(form)) => form,
        Ok(None) => return HttpResponse::NotFound().body("Form not found"),
        Err(e) => {
            return HttpResponse::ServiceUnavailable().body(format!("Error loading form: {}", e))
        }
    };

    if let Err(e) = form.validate_submission(&payload.values) {
        return HttpResponse::BadRequest().body(e);
    }

    let entry = match state
        .origin_meta
        .current_identifier()
        .and_then(|origin| state.store.insert_entry(form_id, Some(&origin), &payload.values))
    {
        Ok(entry) => entry,
        Err(e) => {
            return HttpResponse::ServiceUnavailable().body(format!("Error saving entry: {}", e))
        }
    };
    let entry_id = entry.id;
    info!("Entry {} created for form {}", entry_id, form_id);

    // Listeners make blocking calls to the remote site.
    let events = state.events.clone();
    let store = state.store.clone();
    let retained = tokio::task::spawn_blocking(move || {
        events.entry_created(&entry, &form);
        store.entry(entry_id).map(|stored| stored.is_some())
    })
    .await;

    match retained {
        Ok(Ok(retained)) => HttpResponse::Ok().json(SubmitEntryResponse { entry_id, retained }),
        Ok(Err(e)) => {
            error!("Could not check entry {} after replication: {}", entry_id, e);
            HttpResponse::Ok().json(SubmitEntryResponse {
                entry_id,
                retained: true,
            })
        }
        Err(e) => {
            error!("Entry {} listeners did not complete: {}", entry_id, e);
            HttpResponse::InternalServerError().body(format!("Task join error: {}", e))
        }
    }
}
