// src/db/clientes_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::remote::{desenvelopar, RemoteStore},
    models::clientes::{ActualizarClientePayload, Cliente, CrearClientePayload},
};

#[derive(Clone)]
pub struct ClientesRepository {
    store: Arc<dyn RemoteStore>,
}

impl ClientesRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// GET /clientes, com instalações e pendentes aninhados
    pub async fn list_clientes(&self) -> Result<Vec<Cliente>, AppError> {
        let valor = self.store.fetch("/clientes").await?;
        desenvelopar(valor, "clientes")
    }

    pub async fn create_cliente(
        &self,
        payload: &CrearClientePayload,
    ) -> Result<Cliente, AppError> {
        let valor = self
            .store
            .create("/clientes", serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "cliente")
    }

    pub async fn update_cliente(
        &self,
        id: i64,
        payload: &ActualizarClientePayload,
    ) -> Result<Cliente, AppError> {
        let valor = self
            .store
            .update(&format!("/clientes/{id}"), serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "cliente")
    }

    pub async fn delete_cliente(&self, id: i64) -> Result<(), AppError> {
        self.store.remove(&format!("/clientes/{id}")).await
    }
}
