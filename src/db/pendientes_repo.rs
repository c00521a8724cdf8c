// src/db/pendientes_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::remote::{desenvelopar, RemoteStore},
    models::pendientes::{CrearPendientePayload, Pendiente},
};

#[derive(Clone)]
pub struct PendientesRepository {
    store: Arc<dyn RemoteStore>,
}

impl PendientesRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn list_pendientes(&self) -> Result<Vec<Pendiente>, AppError> {
        let valor = self.store.fetch("/pendientes").await?;
        desenvelopar(valor, "pendientes")
    }

    pub async fn create_pendiente(
        &self,
        payload: &CrearPendientePayload,
    ) -> Result<Pendiente, AppError> {
        let valor = self
            .store
            .create("/pendientes", serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "pendiente")
    }

    /// Resolver um serviço avulso é apagar o registro.
    pub async fn delete_pendiente(&self, id: i64) -> Result<(), AppError> {
        self.store.remove(&format!("/pendientes/{id}")).await
    }
}
