mod config;
mod entry_meta;
mod error;
mod events;
mod host;
mod remote;
mod replication;
mod services;
mod state;
mod store;

use crate::config::ServerConfig;
use crate::remote::WebApiConnector;
use crate::state::AppState;
use crate::store::SqliteStore;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();
    env_logger::init_from_env(Env::default().default_filter_or(config.log_filter.as_str()));

    let store = match SqliteStore::open(&config.database) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Cannot open database {}: {}", config.database.display(), e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let state = AppState::new(store, &config.site_name, Arc::new(WebApiConnector::new()));

    let (host, port) = config.bind_address();
    info!(
        "Server for site {:?} running at http://{}:{}",
        config.site_name, host, port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
        .bind((host, port))?
        .run()
        .await
}
