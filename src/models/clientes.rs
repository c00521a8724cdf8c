// src/models/clientes.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{instalaciones::Instalacion, pendientes::Pendiente};

// Cliente como a API devolve em GET /clientes: com as instalações e os
// pendentes aninhados. Campos desconhecidos (presupuestos etc.) são ignorados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub empresa_id: i64,

    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub direccion: Option<String>,

    pub lat: Option<f64>,
    pub lng: Option<f64>,

    pub observaciones: Option<String>,
    pub activo: bool,

    #[serde(default)]
    pub instalaciones: Vec<Instalacion>,
    #[serde(default)]
    pub pendientes: Vec<Pendiente>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CrearClientePayload {
    pub empresa_id: i64,

    #[validate(length(min = 1, message = "required"))]
    pub nombre: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[validate(email(message = "invalid_email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

// Edição parcial: só os campos presentes viajam no PUT
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ActualizarClientePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[validate(email(message = "invalid_email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}
