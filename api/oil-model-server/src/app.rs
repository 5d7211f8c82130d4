use crate::config::environment::{AppConfig, AuditStoreKind};
use crate::infra::InfraClients;
use crate::module::auth::crud::SessionStore;
use crate::module::shared::error::not_found;
use crate::module::{auth, model_run, system};
use crate::service::audit_service::AuditLogger;
use crate::service::engine_service::{ProcessEngine, SimulationEngine};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
    pub audit: Arc<AuditLogger>,
    pub engine: Arc<dyn SimulationEngine>,
}

impl AppState {
    pub fn new(config: AppConfig, infra: Option<InfraClients>) -> Self {
        let audit = match (config.audit_store, infra) {
            (AuditStoreKind::Memory, _) => AuditLogger::in_memory(),
            (AuditStoreKind::Mongo, Some(infra)) => AuditLogger::mongo(&infra.mongo_db),
            (AuditStoreKind::Mongo, None) => AuditLogger::unavailable("database not connected"),
        };
        let engine = ProcessEngine::from_config(&config);

        Self {
            config,
            sessions: Arc::new(SessionStore::default()),
            audit: Arc::new(audit),
            engine: Arc::new(engine),
        }
    }

    pub fn with_engine(mut self, engine: Arc<dyn SimulationEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Arc::new(audit);
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .merge(auth::route::register_routes(state.clone()))
        .merge(model_run::route::register_routes(state.clone()))
        .merge(system::route::register_routes(state))
        .fallback(not_found)
        .layer(cors)
}
