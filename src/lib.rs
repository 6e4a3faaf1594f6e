#[cfg(feature = "data")]
pub mod cache;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod listing;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod toast;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::models::config::ServerConfig;
    use crate::repository::InMemoryRepository;
    use crate::routes::configure;
    use crate::services::public::PublicContentService;
    use crate::toast::ToastCenter;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = match &server_config.seed_path {
            Some(path) => InMemoryRepository::from_seed_file(path).map_err(|e| {
                std::io::Error::other(format!("Failed to load seed data from {path}: {e}"))
            })?,
            None => InMemoryRepository::new(),
        };
        let repo = web::Data::new(repo);
        let public = web::Data::new(PublicContentService::new(server_config.cache_duration_ms));
        let toasts = web::Data::new(ToastCenter::new(Duration::from_millis(
            server_config.toast_duration_ms,
        )));

        log::info!(
            "Starting {} on {}:{} (content API {})",
            server_config.app_name,
            server_config.address,
            server_config.port,
            server_config.api_base_url
        );

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(configure)
                .app_data(repo.clone())
                .app_data(public.clone())
                .app_data(toasts.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
