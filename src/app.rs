use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::require_bearer;
use crate::store::SharedStore;

/// Dependencies shared by every handler; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub keys: Arc<JwtKeys>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, keys: JwtKeys, config: AppConfig) -> Self {
        Self {
            store,
            keys: Arc::new(keys),
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        .route("/", get(public::service::root))
        .route("/health", get(public::service::health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{books, cart, feeds, token, users};

    Router::new()
        // Books (read)
        .route("/books", get(books::list))
        .route("/book/:id", get(books::get_by_id))
        // Catalog feeds
        .route("/news", get(feeds::news))
        .route("/events", get(feeds::events))
        .route("/members", get(feeds::members))
        // Users and cart
        .route("/users", get(users::lookup).post(users::register_or_login))
        .route("/users/:email", get(users::lookup_by_path))
        .route("/cart", post(cart::add))
        // Token issuance
        .route("/jwt", post(token::issue))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::books;

    Router::new()
        .route("/book", post(books::create))
        .route(
            "/books",
            post(books::create)
                .put(books::update_by_query)
                .delete(books::delete_by_query),
        )
        .route("/books/:id", put(books::update).delete(books::delete))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
