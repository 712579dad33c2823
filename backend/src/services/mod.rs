//! HTTP API of the aggregator host.
//!
//! Each sub-module owns one `/api/...` scope and registers its routes through
//! `configure_routes`.

pub mod entries;
pub mod forms;
pub mod results;
pub mod settings;

use actix_web::web;

/// Registers every API scope on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(settings::configure_routes())
        .service(forms::configure_routes())
        .service(entries::configure_routes())
        .service(results::configure_routes());
}
