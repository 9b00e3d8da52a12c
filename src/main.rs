use std::{env, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    routing::{delete, get, post, put},
    BoxError, Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

use crate::app::{env::Envy, errors::DefaultApiError};

mod app;
mod auth;
mod posts;
mod uploads;
mod users;

pub struct AppState {
    pub pool: PgPool,
    pub storage_dir: PathBuf,
    pub envy: Arc<Envy>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt::init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    tracing::info!("starting in {} mode", envy.app_env);

    // properties
    let port = envy.port.to_owned().unwrap_or(5000);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::POST, Method::GET, Method::PUT, Method::DELETE]);

    let pool = PgPoolOptions::new()
        .max_connections(50)
        .idle_timeout(Some(Duration::from_secs(60)))
        .connect(&envy.database_url)
        .await
        .expect("failed to connect to database");

    tracing::info!("connected to db");

    let storage_dir = PathBuf::from(envy.storage_dir.to_owned().unwrap_or(".".to_string()));
    uploads::service::ensure_upload_dirs(&storage_dir)
        .expect("failed to create upload directories");

    let state = Arc::new(AppState {
        pool,
        storage_dir,
        envy: Arc::new(envy),
    });

    // app
    let app = Router::new()
        .route("/", get(app::controller::get_root))
        // auth
        .route("/auth/register", post(auth::controller::register))
        .route("/auth/login", post(auth::controller::login))
        // users
        .route("/users/me", get(users::controller::get_user_from_request))
        // posts
        .route("/posts", post(posts::controller::create_post))
        .route("/posts", get(posts::controller::get_posts))
        .route("/posts/user", get(posts::controller::get_user_posts))
        .route("/posts/:id", get(posts::controller::get_post_by_id))
        .route("/posts/:id", put(posts::controller::edit_post_by_id))
        .route("/posts/:id", delete(posts::controller::delete_post_by_id))
        .route(
            "/posts/:post_id/download/:file_id",
            get(posts::controller::download_post_file),
        )
        .fallback(app::controller::route_not_found)
        // layers
        .layer(cors)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            uploads::service::MAX_REQUEST_SIZE,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err);
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(64, Duration::from_secs(1))),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
