mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use std::io;
use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use log::info;

use config::{Config, StoreConfig};
use services::store::PurchaseStore;
use services::supabase::SupabaseStore;
use services::telegram::TelegramBot;
use state::AppState;

async fn build_store(store: &StoreConfig) -> io::Result<Arc<dyn PurchaseStore>> {
    match store {
        StoreConfig::Supabase { url, key } => {
            info!("Recording purchases in Supabase at {}", url);
            let store = SupabaseStore::new(url, key)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            Ok(Arc::new(store))
        }
        StoreConfig::Sqlite { database_url } => {
            info!("Recording purchases in SQLite at {}", database_url);
            let pool = db::init_pool(database_url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            Ok(Arc::new(db::SqliteStore::new(pool)))
        }
    }
}

fn logger_builder(filter_var: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(filter_var, "info"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // .env first, so RUST_LOG may come from it
    dotenvy::dotenv().ok();
    logger_builder("RUST_LOG").init();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store = build_store(&config.store).await?;
    let bot = match &config.telegram_bot_token {
        Some(token) => Some(
            TelegramBot::new(&config.telegram_api_url, token)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
        ),
        None => None,
    };
    let app_state = web::Data::new(AppState::new(store, bot));

    info!("BitGo Payment Handler listening on 0.0.0.0:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(app_state.clone())
            .configure(handlers::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
