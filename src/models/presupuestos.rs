// src/models/presupuestos.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn estado_inicial() -> String {
    "pendiente".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Componente {
    pub id: i64,
    pub presupuesto_id: i64,
    pub nombre: String,
    pub cantidad: i32,
    pub precio: Decimal,
}

// Orçamento: o cliente pode estar vinculado (cliente_id) ou só descrito nos
// campos soltos, quando ainda não existe no cadastro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presupuesto {
    pub id: i64,
    pub empresa_id: i64,
    pub cliente_id: Option<i64>,

    pub cliente_nombre: Option<String>,
    pub cliente_telefono: Option<String>,
    pub cliente_direccion: Option<String>,
    pub cliente_email: Option<String>,

    pub tipo_sistema: Option<String>,
    pub descripcion: Option<String>,
    pub total: Option<Decimal>,

    #[serde(default = "estado_inicial")]
    pub estado: String,
    pub creado_por: Option<i64>,

    #[serde(default)]
    pub componentes: Vec<Componente>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CrearPresupuestoPayload {
    pub empresa_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,

    #[validate(length(min = 1, message = "required"))]
    pub cliente_nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_sistema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

// Edição parcial (PUT /presupuestos/{id}); mudar `estado` é o caso típico
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActualizarPresupuestoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
}
