use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::repositories::{BookingRepository, PartnerRequestRepository, UserRepository};
use shared::jwt::{JwtConfig, JwtError};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{auth, bookings, health, partners};
use crate::services::{AuthService, BookingService, PartnerRequestService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(UserRepository::new(self.pool.clone()), self.jwt.clone())
    }

    pub fn booking_service(&self) -> BookingService {
        BookingService::new(BookingRepository::new(self.pool.clone()))
    }

    pub fn partner_service(&self) -> PartnerRequestService {
        PartnerRequestService::new(
            UserRepository::new(self.pool.clone()),
            BookingRepository::new(self.pool.clone()),
            PartnerRequestRepository::new(self.pool.clone()),
        )
    }
}

/// Builds the router. Fails only when the configured signing key is unusable.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let config = Arc::new(config);
    let jwt = Arc::new(config.jwt.build()?);

    let rate_limiter = RateLimiterState::new(config.security.rate_limit_per_minute).map(Arc::new);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        rate_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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
    };

    // Route layers run bottom-up: auth first, then rate limiting keyed by the user.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/all-users", get(auth::all_users))
        .route(
            "/api/bookings",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route(
            "/api/bookings/:id",
            put(bookings::update_booking).delete(bookings::delete_booking),
        )
        .route("/api/partners/request", post(partners::send_request))
        .route("/api/partners/incoming", get(partners::list_incoming))
        .route("/api/partners/outgoing", get(partners::list_outgoing))
        .route("/api/partners/:id/respond", put(partners::respond))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let public_routes = Router::new()
        .route("/", get(health::banner))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
