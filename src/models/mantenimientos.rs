// src/models/mantenimientos.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Registro de manutenção realizada. Imutável depois de criado; a API só
// permite apagar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mantenimiento {
    pub id: i64,
    pub empresa_id: i64,
    pub instalacion_id: i64,
    pub realizado_por: Option<i64>,

    pub fecha: NaiveDate,
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrearMantenimientoPayload {
    pub empresa_id: i64,
    pub instalacion_id: i64,
    pub realizado_por: Option<i64>,
    pub fecha: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}
