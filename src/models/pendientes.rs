// src/models/pendientes.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Serviço avulso agendado para um cliente/instalação. Some da base quando é
// resolvido (DELETE /pendientes/{id}).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pendiente {
    pub id: i64,
    pub empresa_id: i64,
    pub cliente_id: i64,
    pub instalacion_id: i64,

    // Sem data o registro não entra na agenda
    pub fecha: Option<NaiveDate>,
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CrearPendientePayload {
    pub empresa_id: i64,
    #[validate(range(min = 1, message = "required"))]
    pub cliente_id: i64,
    #[validate(range(min = 1, message = "required"))]
    pub instalacion_id: i64,
    pub fecha: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}
