use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
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
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    event_invitations, event_participants, event_points, event_rules, events, health,
    league_admins, league_members, league_points, league_rules, leagues,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Create rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
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
    };

    // Protected routes (require user JWT authentication)
    // Middleware order: auth runs first, then rate limiting (which needs the
    // authenticated user)
    let protected_routes = Router::new()
        // League routes (v1)
        .route(
            "/api/v1/leagues",
            get(leagues::list_leagues).post(leagues::create_league),
        )
        .route(
            "/api/v1/leagues/:league_id",
            get(leagues::get_league).put(leagues::update_league),
        )
        .route(
            "/api/v1/leagues/:league_id/join",
            post(league_members::join_league),
        )
        .route(
            "/api/v1/leagues/:league_id/leave",
            post(league_members::leave_league),
        )
        .route(
            "/api/v1/leagues/:league_id/members",
            get(league_members::list_members).post(league_members::add_member),
        )
        .route(
            "/api/v1/leagues/:league_id/members/:user_id",
            delete(league_members::remove_member),
        )
        .route(
            "/api/v1/leagues/:league_id/admins/:user_id",
            post(league_admins::grant_admin).delete(league_admins::revoke_admin),
        )
        .route(
            "/api/v1/leagues/:league_id/rules",
            get(league_rules::list_rules).post(league_rules::create_rule),
        )
        .route(
            "/api/v1/leagues/:league_id/rules/:rule_id",
            put(league_rules::update_rule),
        )
        .route(
            "/api/v1/leagues/:league_id/points",
            post(league_points::assign_points),
        )
        .route(
            "/api/v1/leagues/:league_id/leaderboard",
            get(league_points::get_leaderboard),
        )
        // Event routes (v1)
        .route(
            "/api/v1/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/v1/events/:event_id",
            get(events::get_event).put(events::update_event),
        )
        .route(
            "/api/v1/events/:event_id/join",
            post(event_participants::join_event),
        )
        .route(
            "/api/v1/events/:event_id/leave",
            post(event_participants::leave_event),
        )
        .route(
            "/api/v1/events/:event_id/participants",
            get(event_participants::list_participants).post(event_participants::add_participant),
        )
        .route(
            "/api/v1/events/:event_id/participants/:user_id",
            delete(event_participants::remove_participant),
        )
        .route(
            "/api/v1/events/:event_id/rules",
            get(event_rules::list_rules).post(event_rules::create_rule),
        )
        .route(
            "/api/v1/events/:event_id/rules/:rule_id",
            put(event_rules::update_rule),
        )
        .route(
            "/api/v1/events/:event_id/points",
            post(event_points::assign_points),
        )
        .route(
            "/api/v1/events/:event_id/leaderboard",
            get(event_points::get_leaderboard),
        )
        .route(
            "/api/v1/events/:event_id/invitations",
            get(event_invitations::list_invitations).post(event_invitations::create_invitation),
        )
        .route(
            "/api/v1/events/:event_id/invitations/:invitation_id",
            delete(event_invitations::revoke_invitation),
        )
        .route(
            "/api/v1/events/:event_id/invitations/use",
            post(event_invitations::use_invitation),
        )
        // Rate limiting runs after auth (needs the user ID from auth)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
