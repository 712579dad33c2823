//! # Settings Service
//!
//! Site-wide and per-form replication settings.
//!
//! ## Routes
//!
//! *   **`GET /site`** / **`POST /site`**: read or replace the site settings
//!     (remote URL, API keys, site identifier, results page switch). The
//!     remote URL must be empty or an `http(s)://` URL.
//! *   **`GET /forms/{form_id}`** / **`POST /forms/{form_id}`**: read or
//!     replace the replication settings of a local form. Saving a remote
//!     form id here maps the form to an existing form on the central site.

mod form;
mod site;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/settings";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/site", get().to(site::get))
        .route("/site", post().to(site::save))
        .route("/forms/{form_id}", get().to(form::get))
        .route("/forms/{form_id}", post().to(form::save))
}
