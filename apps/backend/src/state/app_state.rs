use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::game::GameSettings;
use crate::policy::Gate;
use crate::services::{CatchService, FishService, PlacementEngine, RankingService, RoundService};

/// Shared resources handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub security: SecurityConfig,
    pub settings: GameSettings,
    pub gate: Arc<dyn Gate>,
    pub engine: Arc<PlacementEngine>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        settings: GameSettings,
        gate: Arc<dyn Gate>,
        engine: Arc<PlacementEngine>,
    ) -> Self {
        Self {
            db,
            security,
            settings,
            gate,
            engine,
        }
    }

    pub fn catch_service(&self) -> CatchService {
        CatchService::new(self.gate.clone(), self.engine.clone(), self.settings)
    }

    pub fn ranking_service(&self) -> RankingService {
        RankingService::new(self.gate.clone())
    }

    pub fn fish_service(&self) -> FishService {
        FishService::new(self.engine.clone())
    }

    pub fn round_service(&self) -> RoundService {
        RoundService::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
