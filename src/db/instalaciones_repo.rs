// src/db/instalaciones_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::remote::{desenvelopar, RemoteStore},
    models::instalaciones::{
        ActualizarInstalacionPayload, CrearInstalacionPayload, Instalacion,
    },
};

#[derive(Clone)]
pub struct InstalacionesRepository {
    store: Arc<dyn RemoteStore>,
}

impl InstalacionesRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn list_instalaciones(&self) -> Result<Vec<Instalacion>, AppError> {
        let valor = self.store.fetch("/instalaciones").await?;
        desenvelopar(valor, "instalaciones")
    }

    pub async fn create_instalacion(
        &self,
        payload: &CrearInstalacionPayload,
    ) -> Result<Instalacion, AppError> {
        let valor = self
            .store
            .create("/instalaciones", serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "instalacion")
    }

    /// Edição parcial: só os campos presentes no payload mudam.
    pub async fn update_instalacion(
        &self,
        id: i64,
        payload: &ActualizarInstalacionPayload,
    ) -> Result<Instalacion, AppError> {
        let valor = self
            .store
            .update(
                &format!("/instalaciones/{id}"),
                serde_json::to_value(payload)?,
            )
            .await?;
        desenvelopar(valor, "instalacion")
    }

    pub async fn delete_instalacion(&self, id: i64) -> Result<(), AppError> {
        self.store.remove(&format!("/instalaciones/{id}")).await
    }
}
