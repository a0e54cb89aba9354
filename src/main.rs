mod config;
mod dashboard;
mod db;
mod errors;
mod handlers;
mod health;
mod models;
mod security;
mod utils;

use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use sqlx::PgPool;
use log::info;
use env_logger::Env;
use actix_web::middleware::Logger;
use actix_web_httpauth::middleware::HttpAuthentication;
use std::collections::HashMap;

use crate::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    // Initialize the database pool and bring the schema up to date
    let pool = PgPool::connect(&config.database_url).await.expect("Failed to connect to the database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let bind_address = config.bind_address.clone();
    info!("Starting server at {}", bind_address);

    // Authentication middleware
    let auth = HttpAuthentication::bearer(crate::utils::jwt::validator);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "cura".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .service(
                web::resource("/v1/register")
                    .route(web::post().to(handlers::auth::register)),
            )
            .service(
                web::resource("/v1/login")
                    .route(web::post().to(handlers::auth::login)),
            )
            .service(
                web::resource("/v1/logout")
                    .wrap(auth.clone())
                    .route(web::post().to(handlers::auth::logout)),
            )
            .service(
                web::resource("/v1/user")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::profile::get_profile)),
            )
            .service(
                web::resource("/v1/user/details")
                    .wrap(auth.clone())
                    .route(web::patch().to(handlers::profile::update_personal_details)),
            )
            .service(
                web::resource("/v1/user/measurements")
                    .wrap(auth.clone())
                    .route(web::patch().to(handlers::profile::update_measurements)),
            )
            .service(
                web::resource("/v1/dashboard")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::dashboard::get_dashboard)),
            )
            .service(
                web::resource("/v1/exercise")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_exercises))
                    .route(web::post().to(handlers::activity::create_exercise)),
            )
            .service(
                web::resource("/v1/exercise/today")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_todays_exercises)),
            )
            .service(
                web::resource("/v1/food")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_food))
                    .route(web::post().to(handlers::activity::create_food)),
            )
            .service(
                web::resource("/v1/food/today")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_todays_meals)),
            )
            .service(
                web::resource("/v1/water")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_water))
                    .route(web::post().to(handlers::activity::create_water)),
            )
            .service(
                web::resource("/v1/water/today")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_todays_water)),
            )
            .service(
                web::resource("/v1/sleep")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::get_sleep))
                    .route(web::post().to(handlers::activity::create_sleep)),
            )
            .service(
                web::resource("/v1/admin/examples")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::admin::list_examples))
                    .route(web::post().to(handlers::admin::create_example)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
