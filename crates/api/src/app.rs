use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::services::{CodeSender, LogCodeSender, OtpService, OtpStore};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_role, require_user_auth, trace_id, RoleGate,
};
use crate::routes::{auth, cities, health, states, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub otp_store: Arc<dyn OtpStore>,
    pub code_sender: Arc<dyn CodeSender>,
}

impl AppState {
    pub fn otp_service(&self) -> OtpService {
        OtpService::new(
            self.otp_store.clone(),
            self.code_sender.clone(),
            self.config.otp_ttl(),
        )
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development default
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(
    config: Config,
    pool: PgPool,
    otp_store: Arc<dyn OtpStore>,
) -> Result<Router, JwtError> {
    let jwt = Arc::new(config.jwt_config()?);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        otp_store,
        code_sender: Arc::new(LogCodeSender),
    };

    // Any authenticated user
    let account_routes = Router::new()
        .route(
            "/user/me",
            get(users::me).put(users::update_me).delete(users::delete_me),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Admin or support. The role gate is added first so that it runs after
    // authentication (outermost layer runs first).
    let staff_routes = Router::new()
        .route("/user/users", get(users::list_users))
        .route(
            "/user/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/settings/states", post(states::create_state))
        .route(
            "/settings/states/:id",
            put(states::update_state).delete(states::delete_state),
        )
        .route("/settings/states/:id/city", post(cities::create_city))
        .route(
            "/settings/states/:id/city/:city_id",
            put(cities::update_city).delete(cities::delete_city),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGate::AdminOrSupport,
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let public_api_routes = Router::new()
        .route("/ping", get(health::ping))
        .route("/user/authenticate", post(auth::authenticate))
        .route("/user/token", post(auth::token))
        .route("/settings/states", get(states::list_states))
        .route("/settings/states/:id", get(states::get_state))
        .route("/settings/states/:id/city", get(cities::list_cities))
        .route("/settings/states/:id/city/:city_id", get(cities::get_city));

    let api_routes = Router::new()
        .merge(public_api_routes)
        .merge(account_routes)
        .merge(staff_routes);

    let prefix = config.path_prefix();
    let api_routes = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    // Operational routes stay at the root regardless of the prefix
    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(ops_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state))
}
