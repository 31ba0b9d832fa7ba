//! Tank use case.
//!
//! Screens scope their queries by the active-tank selection instead of
//! re-prompting the user; this use case keeps that selection in step with
//! the backend tank operations.

use anyhow::Result;
use aqua_client::ApiClient;
use aqua_core::session::SessionManager;
use aqua_core::tank::{Tank, TankDraft, WaterParameters};

use crate::auth_usecase::AuthUseCase;

/// Use case for tank listing, creation, and the active-tank selection.
#[derive(Clone)]
pub struct TankUseCase {
    api: ApiClient,
    session: SessionManager,
    auth: AuthUseCase,
}

impl TankUseCase {
    /// Creates a new use case over the shared client and session state.
    pub fn new(api: ApiClient, session: SessionManager) -> Self {
        let auth = AuthUseCase::new(api.clone(), session.clone());
        Self { api, session, auth }
    }

    /// Lists the user's tanks.
    pub async fn list_tanks(&self) -> Result<Vec<Tank>> {
        let token = self.auth.require_token().await?;
        Ok(self.api.get_tanks(&token).await?)
    }

    /// Creates a tank. The selection is untouched; activation happens only
    /// when the user picks a tank from the list.
    pub async fn create_tank(&self, draft: &TankDraft) -> Result<Tank> {
        let token = self.auth.require_token().await?;
        Ok(self.api.create_tank(&token, draft).await?)
    }

    /// Selects an existing tank as the active one.
    pub async fn activate(&self, tank_id: i64) {
        self.session.activate_tank(tank_id.to_string()).await;
    }

    /// Clears the active-tank selection.
    pub async fn clear_selection(&self) {
        self.session.clear_active_tank().await;
    }

    /// Fetches the currently active tank, or `None` when nothing is selected.
    pub async fn active_tank_detail(&self) -> Result<Option<Tank>> {
        let Some(raw_id) = self.session.active_tank_id().await else {
            return Ok(None);
        };

        let tank_id: i64 = match raw_id.parse() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(%raw_id, "stored active tank id is not numeric; ignoring");
                return Ok(None);
            }
        };

        let token = self.auth.require_token().await?;
        Ok(Some(self.api.get_tank(&token, tank_id).await?))
    }

    /// Records a water-test reading against the active tank.
    pub async fn record_water_test(&self, params: &WaterParameters) -> Result<()> {
        let Some(raw_id) = self.session.active_tank_id().await else {
            anyhow::bail!("no active tank selected");
        };
        let tank_id: i64 = raw_id
            .parse()
            .map_err(|_| anyhow::anyhow!("stored active tank id is not numeric"))?;

        let token = self.auth.require_token().await?;
        self.api
            .submit_water_parameters(&token, tank_id, params)
            .await?;
        Ok(())
    }
}
