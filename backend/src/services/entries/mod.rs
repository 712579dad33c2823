//! # Entry Service
//!
//! Submissions and the entry list.
//!
//! ## Routes
//!
//! *   **`POST /submit/{form_id}`**: validates the values against the form,
//!     stores the entry with this site's identifier and fires the
//!     "entry created" event. The replication engine forwards the entry to
//!     the central site before the response is sent; the response tells
//!     whether the entry is still stored here.
//! *   **`GET /meta`**: definition of the "Site ID" column.
//! *   **`GET /{form_id}`**: entries of a form with their "Site ID". The
//!     optional `operator` (`is`, `isnot`, `contains`) and `value` query
//!     parameters filter on it.

mod list;
mod submit;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/entries";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/submit/{form_id}", post().to(submit::process))
        // Registered before `/{form_id}`, which would otherwise capture it.
        .route("/meta", get().to(list::meta))
        .route("/{form_id}", get().to(list::process))
}
