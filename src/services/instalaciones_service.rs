// src/services/instalaciones_service.rs

use validator::Validate;

use crate::{
    common::{error::AppError, fechas},
    db::InstalacionesRepository,
    models::instalaciones::{
        ActualizarInstalacionPayload, CrearInstalacionPayload, Instalacion,
    },
};

#[derive(Clone)]
pub struct InstalacionesService {
    instalaciones_repo: InstalacionesRepository,
}

impl InstalacionesService {
    pub fn new(instalaciones_repo: InstalacionesRepository) -> Self {
        Self { instalaciones_repo }
    }

    pub async fn listar(&self) -> Result<Vec<Instalacion>, AppError> {
        self.instalaciones_repo.list_instalaciones().await
    }

    pub async fn buscar_instalacion(&self, id: i64) -> Result<Instalacion, AppError> {
        self.listar()
            .await?
            .into_iter()
            .find(|inst| inst.id == id)
            .ok_or(AppError::InstalacionNotFound(id))
    }

    /// Cria a instalação; sem vencimento explícito, calcula o primeiro pela
    /// data de instalação e a frequência.
    pub async fn crear(
        &self,
        mut payload: CrearInstalacionPayload,
    ) -> Result<Instalacion, AppError> {
        payload.validate()?;

        if payload.proximo_mantenimiento.is_none() {
            payload.proximo_mantenimiento = fechas::proximo_desde_instalacion(
                payload.fecha_instalacion,
                payload.frecuencia_meses,
            );
        }

        self.instalaciones_repo.create_instalacion(&payload).await
    }

    /// Edição parcial. Mudou a data de instalação ou a frequência e o
    /// chamador não mandou vencimento novo? Recalcula.
    pub async fn actualizar(
        &self,
        instalacion: &Instalacion,
        mut cambio: ActualizarInstalacionPayload,
    ) -> Result<Instalacion, AppError> {
        let recalcular = (cambio.fecha_instalacion.is_some()
            || cambio.frecuencia_meses.is_some())
            && cambio.proximo_mantenimiento.is_none();

        if recalcular {
            let fecha_base = cambio
                .fecha_instalacion
                .unwrap_or(instalacion.fecha_instalacion);
            let frecuencia = cambio.frecuencia_meses.or(instalacion.frecuencia_meses);
            cambio.proximo_mantenimiento =
                fechas::proximo_desde_instalacion(fecha_base, frecuencia);
        }

        self.instalaciones_repo
            .update_instalacion(instalacion.id, &cambio)
            .await
    }

    pub async fn eliminar(&self, id: i64) -> Result<(), AppError> {
        self.instalaciones_repo.delete_instalacion(id).await
    }
}
