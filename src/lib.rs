pub mod chat;
pub mod config;
pub mod donation;
pub mod partnership;
pub mod rest;
pub mod storage;

use std::sync::Arc;

use chat::ChatService;
use config::AppConfig;
use donation::DonationService;
use partnership::PartnershipService;
use storage::Storage;

/// Shared application state passed to every route handler.
///
/// Built once at startup and handed to axum via `with_state` — there is no
/// module-level mutable state anywhere in the crate.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub storage: Arc<Storage>,
    pub chat: Arc<ChatService>,
    pub donations: Arc<DonationService>,
    pub partnerships: Arc<PartnershipService>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Wire the service layer on top of an initialised storage handle.
    pub fn new(config: Arc<AppConfig>, storage: Arc<Storage>) -> Self {
        Self {
            chat: Arc::new(ChatService::new(storage.clone())),
            donations: Arc::new(DonationService::new(storage.clone())),
            partnerships: Arc::new(PartnershipService::new(
                storage.clone(),
                config.impact.clone(),
            )),
            config,
            storage,
            started_at: std::time::Instant::now(),
        }
    }
}
