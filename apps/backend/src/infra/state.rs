use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::game::{EnvSettings, GameSettings};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::policy::{Gate, PermissionGate};
use crate::services::PlacementEngine;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, used by `main` and by tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
    settings: Option<GameSettings>,
    gate: Arc<dyn Gate>,
    seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: DbProfile::InMemory,
            settings: None,
            gate: Arc::new(PermissionGate),
            seed: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Without this, settings come from `CATCHFISH_*` environment variables.
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_gate(mut self, gate: Arc<dyn Gate>) -> Self {
        self.gate = gate;
        self
    }

    /// Seed the placement RNG so random placements are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let settings = self
            .settings
            .unwrap_or_else(|| GameSettings::load(&EnvSettings));
        let engine = match self.seed {
            Some(seed) => PlacementEngine::with_seed(settings, seed),
            None => PlacementEngine::new(settings),
        };

        // single entrypoint: connect + migrate
        let conn = bootstrap_db(&self.db_profile).await?;

        Ok(AppState::new(
            conn,
            self.security_config,
            settings,
            self.gate,
            Arc::new(engine),
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
