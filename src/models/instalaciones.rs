// src/models/instalaciones.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{mantenimientos::Mantenimiento, pendientes::Pendiente};

// Um equipamento instalado no cliente (CAMARAS | ALARMAS | AMBOS), com seu
// ciclo de manutenção em meses e o próximo vencimento já calculado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instalacion {
    pub id: i64,
    pub empresa_id: i64,
    pub cliente_id: i64,
    pub instalador_id: Option<i64>,

    pub tipo_sistema: Option<String>,

    pub fecha_instalacion: NaiveDate,
    // Frequência zero ou ausente desliga o recálculo automático; um
    // `proximo_mantenimiento` já existente continua valendo na agenda.
    #[serde(default)]
    pub frecuencia_meses: Option<u32>,
    pub proximo_mantenimiento: Option<NaiveDate>,

    pub activa: bool,

    #[serde(default)]
    pub mantenimientos: Vec<Mantenimiento>,
    #[serde(default)]
    pub pendientes: Vec<Pendiente>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CrearInstalacionPayload {
    pub empresa_id: i64,
    #[validate(range(min = 1, message = "required"))]
    pub cliente_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instalador_id: Option<i64>,

    #[validate(length(min = 1, message = "required"))]
    pub tipo_sistema: String,

    pub fecha_instalacion: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frecuencia_meses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximo_mantenimiento: Option<NaiveDate>,
}

// Edição parcial (PUT /instalaciones/{id})
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActualizarInstalacionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instalador_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_sistema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_instalacion: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frecuencia_meses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximo_mantenimiento: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activa: Option<bool>,
}
