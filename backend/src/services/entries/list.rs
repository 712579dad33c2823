//! # Entry Listing
//!
//! Serves the stored entries of a form together with their "Site ID". Entries
//! that were stored without one show the identifier this site uses now, and
//! the optional filter is applied to that resolved value.

use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::EntryFilterQuery;

/// Actix web handler for `GET /api/entries/{form_id}`.
///
/// # Arguments
/// * `query` - optional `operator` (`is`, `isnot`, `contains`) and `value`,
///   given together or not at all.
///
/// # Returns
/// - `200 OK` with the matching entries, oldest first.
/// - `400 Bad Request` when only one of `operator` and `value` is given.
/// - `503 Service Unavailable` on a database error.
pub async fn process(
    state: web::Data<AppState>,
    form_id: web::Path<i64>,
    query: web::Query<EntryFilterQuery>,
) -> HttpResponse {
    let filter = match (query.operator, query.value.as_deref()) {
        (Some(operator), Some(value)) => Some((operator, value)),
        (None, None) => None,
        _ => {
            return HttpResponse::BadRequest()
                .body("Filtering needs both an operator and a value")
        }
    };

    let entries = match state.store.entries(form_id.into_inner()) {
        Ok(entries) => entries,
        Err(e) => {
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error retrieving entries: {}", e))
        }
    };

    match state.origin_meta.resolve_and_filter(entries, filter) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error resolving site ids: {}", e)),
    }
}

/// Actix web handler for `GET /api/entries/meta`: the "Site ID" column
/// definition.
pub async fn meta(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.origin_meta.definition())
}
