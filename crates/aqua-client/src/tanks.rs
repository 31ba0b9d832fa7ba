//! Tank, species, and water-parameter endpoints.

use aqua_core::error::Result;
use aqua_core::tank::{SpeciesDraft, Tank, TankDraft, TankSpecies, WaterParameters};
use serde::Deserialize;

use crate::client::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct TankList {
    tanks: Vec<Tank>,
}

#[derive(Debug, Deserialize)]
struct SpeciesList {
    species: Vec<TankSpecies>,
}

impl ApiClient {
    /// Lists the authenticated user's tanks, newest first.
    pub async fn get_tanks(&self, token: &str) -> Result<Vec<Tank>> {
        let envelope: Envelope<TankList> = self
            .send_json(self.get("/tanks/get-tanks/").bearer_auth(token))
            .await?;
        Ok(envelope.data.tanks)
    }

    /// Fetches a single tank by id.
    pub async fn get_tank(&self, token: &str, tank_id: i64) -> Result<Tank> {
        let envelope: Envelope<Tank> = self
            .send_json(
                self.get(&format!("/tanks/tank/{}/", tank_id))
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Creates a tank and returns the stored entity (with its new id).
    pub async fn create_tank(&self, token: &str, draft: &TankDraft) -> Result<Tank> {
        let envelope: Envelope<Tank> = self
            .send_json(
                self.post("/tanks/tank/create/")
                    .bearer_auth(token)
                    .json(draft),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Updates an existing tank.
    pub async fn update_tank(&self, token: &str, tank_id: i64, draft: &TankDraft) -> Result<()> {
        self.send_unit(self.update_tank_request(token, tank_id, draft))
            .await
    }

    /// Tank updates go through `PUT`; the backend routes on the method.
    fn update_tank_request(
        &self,
        token: &str,
        tank_id: i64,
        draft: &TankDraft,
    ) -> reqwest::RequestBuilder {
        self.put(&format!("/tanks/tank/update/{}/", tank_id))
            .bearer_auth(token)
            .json(draft)
    }

    /// Lists the species stocked in a tank.
    pub async fn list_species(&self, token: &str, tank_id: i64) -> Result<Vec<TankSpecies>> {
        let list: SpeciesList = self
            .send_json(
                self.get(&format!("/tanks/{}/species/", tank_id))
                    .bearer_auth(token),
            )
            .await?;
        Ok(list.species)
    }

    /// Adds a species to a tank.
    pub async fn add_species(&self, token: &str, tank_id: i64, draft: &SpeciesDraft) -> Result<()> {
        self.send_unit(
            self.post(&format!("/tanks/{}/add-species/", tank_id))
                .bearer_auth(token)
                .json(draft),
        )
        .await
    }

    /// Removes a species entry from its tank.
    pub async fn delete_species(&self, token: &str, species_id: i64) -> Result<()> {
        self.send_unit(
            self.delete(&format!("/tanks/species/delete/{}/", species_id))
                .bearer_auth(token),
        )
        .await
    }

    /// Records a water-test reading for a tank.
    pub async fn submit_water_parameters(
        &self,
        token: &str,
        tank_id: i64,
        params: &WaterParameters,
    ) -> Result<()> {
        self.send_unit(
            self.post(&format!("/tanks/{}/water-parameters/", tank_id))
                .bearer_auth(token)
                .json(params),
        )
        .await
    }
}
