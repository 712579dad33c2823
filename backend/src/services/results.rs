//! Configuration of the aggregation results page.
//!
//! The page is only offered when the site settings enable it, which is meant
//! for the central site.

use crate::state::AppState;
use crate::store::ConfigurationStore;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::settings::SiteSettings;
use serde_json::{json, Value};

const API_PATH: &str = "/api/results";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/config", get().to(process))
}

async fn process(state: web::Data<AppState>) -> HttpResponse {
    match state.store.site_settings() {
        Ok(settings) => HttpResponse::Ok().json(results_page_config(settings.as_ref())),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error loading site settings: {}", e)),
    }
}

/// `{"title": ...}` when the results page is enabled, `{}` otherwise.
pub fn results_page_config(settings: Option<&SiteSettings>) -> Value {
    if settings.is_some_and(|s| s.results_enabled) {
        json!({ "title": "Aggregation Results" })
    } else {
        json!({})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_follows_the_setting() {
        assert_eq!(results_page_config(None), json!({}));

        let mut settings = SiteSettings::default();
        assert_eq!(results_page_config(Some(&settings)), json!({}));

        settings.results_enabled = true;
        assert_eq!(
            results_page_config(Some(&settings)),
            json!({ "title": "Aggregation Results" })
        );
    }
}
