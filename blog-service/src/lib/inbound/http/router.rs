use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::delete_post::delete_post;
use super::handlers::get_post::get_post;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::toggle_like::toggle_like;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::user::service::AuthService;
use crate::outbound::media::FsMediaStore;
use crate::outbound::preview::HttpPreviewFetcher;
use crate::outbound::repositories::PostgresLikeLedger;
use crate::outbound::repositories::PostgresPostRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type BlogPostService =
    PostService<PostgresPostRepository, PostgresLikeLedger, HttpPreviewFetcher<FsMediaStore>>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub post_service: Arc<BlogPostService>,
    pub media_store: Arc<FsMediaStore>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresUserRepository>>,
    post_service: Arc<BlogPostService>,
    media_store: Arc<FsMediaStore>,
) -> Router {
    let state = AppState {
        auth_service,
        post_service,
        media_store,
    };

    let public_routes = Router::new()
        .route("/api/auth/registration", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:post_id", get(get_post));

    let protected_routes = Router::new()
        .route("/api/posts", post(create_post))
        .route("/api/posts/:post_id/like", post(toggle_like))
        .route("/api/posts/:post_id", delete(delete_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
