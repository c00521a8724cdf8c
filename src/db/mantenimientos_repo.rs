// src/db/mantenimientos_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::remote::{desenvelopar, RemoteStore},
    models::mantenimientos::{CrearMantenimientoPayload, Mantenimiento},
};

#[derive(Clone)]
pub struct MantenimientosRepository {
    store: Arc<dyn RemoteStore>,
}

impl MantenimientosRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Histórico de manutenções da empresa.
    pub async fn list_mantenimientos(&self) -> Result<Vec<Mantenimiento>, AppError> {
        let valor = self.store.fetch("/mantenimientos").await?;
        desenvelopar(valor, "mantenimientos")
    }

    pub async fn create_mantenimiento(
        &self,
        payload: &CrearMantenimientoPayload,
    ) -> Result<Mantenimiento, AppError> {
        let valor = self
            .store
            .create("/mantenimientos", serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "mantenimiento")
    }

    pub async fn delete_mantenimiento(&self, id: i64) -> Result<(), AppError> {
        self.store.remove(&format!("/mantenimientos/{id}")).await
    }
}
