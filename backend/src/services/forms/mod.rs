//! # Form Service
//!
//! Local form definitions. Entries are submitted against these forms, and a
//! copy of a form is created on the central site the first time one of its
//! entries is forwarded.
//!
//! *   **`GET /`**: all forms.
//! *   **`POST /save`**: stores a new form and returns it with its id.
//! *   **`GET /{form_id}`**: a single form.

mod get;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/forms";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("/save", post().to(save::process))
        .route("/{form_id}", get().to(get::process))
}
