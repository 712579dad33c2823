//! # Site Settings
//!
//! Connection to the central site and the identifier stamped on forwarded
//! entries. A site without a complete connection only receives entries.

use crate::state::AppState;
use crate::store::ConfigurationStore;
use actix_web::{web, HttpResponse};
use common::model::settings::SiteSettings;
use log::info;

/// Returns the saved site settings, or empty ones when nothing was saved yet.
pub async fn get(state: web::Data<AppState>) -> HttpResponse {
    match state.store.site_settings() {
        Ok(settings) => HttpResponse::Ok().json(settings.unwrap_or_default()),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error loading site settings: {}", e)),
    }
}

/// Actix web handler for `POST /api/settings/site`.
///
/// # Returns
/// - `200 OK` once the settings are stored.
/// - `400 Bad Request` when the remote URL is not an `http(s)` URL.
/// - `503 Service Unavailable` on a database error.
pub async fn save(state: web::Data<AppState>, payload: web::Json<SiteSettings>) -> HttpResponse {
    if let Err(e) = payload.validate() {
        return HttpResponse::BadRequest().body(e);
    }

    match state.store.save_site_settings(&payload) {
        Ok(()) => {
            info!(
                "Site settings updated (forwarding {})",
                if payload.remote_endpoint().is_some() { "on" } else { "off" }
            );
            HttpResponse::Ok().body("Site settings saved")
        }
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error saving site settings: {}", e)),
    }
}
