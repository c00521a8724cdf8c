// src/models/usuarios.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rol {
    Admin,
    Supervisor,
    Instalador,
}

// Representa um usuário vindo da API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub empresa_id: Option<i64>,
    pub nombre: String,
    pub username: Option<String>,
    pub email: String,
    pub rol: Rol,
    pub activo: bool,
}

// Dados para login (a API aceita e-mail ou username no mesmo campo)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "required"))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

// Resposta de autenticação: token + usuário logado
#[derive(Debug, Clone, Deserialize)]
pub struct Sesion {
    pub token: String,
    pub usuario: Usuario,
}
