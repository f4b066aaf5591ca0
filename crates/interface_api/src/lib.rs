//! HTTP API Layer
//!
//! REST API for the car insurance core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: cars, coverage checks, claims, history, health
//! - **Middleware**: tracing and request logging
//! - **DTOs**: camelCase request/response bodies
//! - **Error Handling**: domain errors mapped to HTTP status codes in one place
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppPorts, AppState};
//!
//! let state = AppState::new(AppPorts::postgres(pool), config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod validation;
pub mod scheduler;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckResult;
use domain_car::{CarPort, CarRegistry};
use domain_claims::{ClaimPort, ClaimRegistrar, HistoryComposer};
use domain_policy::{CoverageEvaluator, ExpiredPolicyLogPort, ExpiredPolicyMonitor, PolicyPort};
use infra_db::{
    DatabasePool, PostgresCarAdapter, PostgresClaimAdapter, PostgresExpiredPolicyLogAdapter,
    PostgresPolicyAdapter,
};

use crate::config::ApiConfig;
use crate::handlers::{cars, health};
use crate::middleware::request_logging;
use crate::validation::DateValidator;

/// The storage ports every service is built from
#[derive(Clone)]
pub struct AppPorts {
    pub cars: Arc<dyn CarPort>,
    pub policies: Arc<dyn PolicyPort>,
    pub claims: Arc<dyn ClaimPort>,
    pub expired_policy_log: Arc<dyn ExpiredPolicyLogPort>,
}

impl AppPorts {
    /// PostgreSQL adapters sharing one pool
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            cars: Arc::new(PostgresCarAdapter::new(pool.clone())),
            policies: Arc::new(PostgresPolicyAdapter::new(pool.clone())),
            claims: Arc::new(PostgresClaimAdapter::new(pool.clone())),
            expired_policy_log: Arc::new(PostgresExpiredPolicyLogAdapter::new(pool)),
        }
    }

    /// Empty in-memory adapters
    pub fn in_memory() -> Self {
        Self {
            cars: Arc::new(domain_car::ports::mock::MockCarPort::new()),
            policies: Arc::new(domain_policy::ports::mock::MockPolicyPort::new()),
            claims: Arc::new(domain_claims::ports::mock::MockClaimPort::new()),
            expired_policy_log: Arc::new(domain_policy::ports::mock::MockExpiredPolicyLogPort::new()),
        }
    }

    /// Runs every adapter's health check
    pub async fn health_checks(&self) -> Vec<HealthCheckResult> {
        let (cars, policies, claims, log) = tokio::join!(
            self.cars.health_check(),
            self.policies.health_check(),
            self.claims.health_check(),
            self.expired_policy_log.health_check(),
        );
        vec![cars, policies, claims, log]
    }

    /// Builds the expiry monitor over these ports
    pub fn expiry_monitor(&self) -> ExpiredPolicyMonitor {
        ExpiredPolicyMonitor::new(self.policies.clone(), self.expired_policy_log.clone())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ports: AppPorts,
    pub cars: CarRegistry,
    pub coverage: CoverageEvaluator,
    pub claims: ClaimRegistrar,
    pub history: HistoryComposer,
    pub dates: DateValidator,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(ports: AppPorts, config: ApiConfig) -> Self {
        let coverage = CoverageEvaluator::new(ports.cars.clone(), ports.policies.clone());

        Self {
            cars: CarRegistry::new(ports.cars.clone()),
            claims: ClaimRegistrar::new(ports.cars.clone(), coverage.clone(), ports.claims.clone()),
            history: HistoryComposer::new(
                ports.cars.clone(),
                ports.policies.clone(),
                ports.claims.clone(),
                config.timezone,
            ),
            coverage,
            dates: DateValidator::from_config(&config),
            ports,
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let car_routes = Router::new()
        .route("/", get(cars::list_cars).post(cars::register_car))
        .route("/:car_id/insurance-valid", get(cars::insurance_valid))
        .route("/:car_id/claims", axum::routing::post(cars::register_claim))
        .route("/:car_id/history", get(cars::car_history));

    Router::new()
        .merge(health_routes)
        .nest("/api/cars", car_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
