use parking_lot::RwLock;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::session::DashboardSession;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub session: RwLock<DashboardSession>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let session = DashboardSession::new(config.view);
        Self {
            config,
            session: RwLock::new(session),
        }
    }
}
