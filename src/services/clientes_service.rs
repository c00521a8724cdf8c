// src/services/clientes_service.rs

use validator::Validate;

use crate::{
    common::{error::AppError, geo},
    db::ClientesRepository,
    models::clientes::{ActualizarClientePayload, Cliente, CrearClientePayload},
};

/// Raio do aviso de local duplicado ao marcar um cliente no mapa.
const RADIO_ALERTA_METROS: f64 = 50.0;

#[derive(Clone)]
pub struct ClientesService {
    clientes_repo: ClientesRepository,
}

impl ClientesService {
    pub fn new(clientes_repo: ClientesRepository) -> Self {
        Self { clientes_repo }
    }

    pub async fn listar(&self) -> Result<Vec<Cliente>, AppError> {
        self.clientes_repo.list_clientes().await
    }

    pub async fn buscar_cliente(&self, id: i64) -> Result<Cliente, AppError> {
        self.listar()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(AppError::ClienteNotFound(id))
    }

    pub async fn crear(&self, payload: &CrearClientePayload) -> Result<Cliente, AppError> {
        payload.validate()?;
        self.clientes_repo.create_cliente(payload).await
    }

    pub async fn actualizar(
        &self,
        id: i64,
        payload: &ActualizarClientePayload,
    ) -> Result<Cliente, AppError> {
        payload.validate()?;
        self.clientes_repo.update_cliente(id, payload).await
    }

    pub async fn eliminar(&self, id: i64) -> Result<(), AppError> {
        self.clientes_repo.delete_cliente(id).await
    }
}

/// Primeiro cliente já cadastrado a menos de 50 m do ponto marcado.
/// Clientes sem coordenadas ficam fora da conta.
pub fn cliente_cercano(lat: f64, lng: f64, clientes: &[Cliente]) -> Option<&Cliente> {
    clientes.iter().find(|c| match (c.lat, c.lng) {
        (Some(c_lat), Some(c_lng)) => {
            geo::distancia_metros(lat, lng, c_lat, c_lng) < RADIO_ALERTA_METROS
        }
        _ => false,
    })
}
