// src/db/remote.rs

use async_trait::async_trait;
use serde_json::Value;
use validator::Validate;

use crate::{
    common::error::AppError,
    models::usuarios::{LoginPayload, Sesion},
};

// Contrato genérico de acesso a dados: os quatro verbos que a API REST
// expõe por coleção. Os repositórios recebem isto injetado, o que permite
// testar os serviços contra uma implementação em memória.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value, AppError>;
    async fn create(&self, path: &str, payload: Value) -> Result<Value, AppError>;
    async fn update(&self, path: &str, payload: Value) -> Result<Value, AppError>;
    async fn remove(&self, path: &str) -> Result<(), AppError>;
}

// Implementação real sobre reqwest, com token Bearer emitido no login.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Mesmo cliente, agora autenticado.
    pub fn con_token(&self, token: String) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: Some(token),
            client: self.client.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn autorizar(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    // Resposta 2xx vira JSON; qualquer outra vira ApiRejection com a
    // mensagem que o backend mandou em "message"/"error", quando existe.
    async fn interpretar(respuesta: reqwest::Response) -> Result<Value, AppError> {
        let status = respuesta.status();

        if status.is_success() {
            if status == reqwest::StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            return Ok(respuesta.json().await?);
        }

        let cuerpo: Value = respuesta.json().await.unwrap_or(Value::Null);
        let message = cuerpo
            .get("message")
            .or_else(|| cuerpo.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("sin detalle")
            .to_string();

        Err(AppError::ApiRejection {
            status: status.as_u16(),
            message,
        })
    }

    /// POST /auth/login: troca credenciais por token + usuário.
    pub async fn login(&self, payload: &LoginPayload) -> Result<Sesion, AppError> {
        payload.validate()?;

        let respuesta = self
            .client
            .post(self.url("/auth/login"))
            .json(payload)
            .send()
            .await?;

        let valor = Self::interpretar(respuesta).await?;
        Ok(serde_json::from_value(valor)?)
    }
}

#[async_trait]
impl RemoteStore for ApiClient {
    async fn fetch(&self, path: &str) -> Result<Value, AppError> {
        let respuesta = self
            .autorizar(self.client.get(self.url(path)))
            .send()
            .await?;
        Self::interpretar(respuesta).await
    }

    async fn create(&self, path: &str, payload: Value) -> Result<Value, AppError> {
        let respuesta = self
            .autorizar(self.client.post(self.url(path)))
            .json(&payload)
            .send()
            .await?;
        Self::interpretar(respuesta).await
    }

    async fn update(&self, path: &str, payload: Value) -> Result<Value, AppError> {
        let respuesta = self
            .autorizar(self.client.put(self.url(path)))
            .json(&payload)
            .send()
            .await?;
        Self::interpretar(respuesta).await
    }

    async fn remove(&self, path: &str) -> Result<(), AppError> {
        let respuesta = self
            .autorizar(self.client.delete(self.url(path)))
            .send()
            .await?;
        Self::interpretar(respuesta).await?;
        Ok(())
    }
}

// O Flask envelopa as respostas ({"clientes": [...]}, {"cliente": {...}});
// extrai a chave pedida e cai no valor inteiro se o envelope não vier.
pub(crate) fn desenvelopar<T>(valor: Value, clave: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    let interno = match valor.get(clave) {
        Some(v) => v.clone(),
        None => valor,
    };
    Ok(serde_json::from_value(interno)?)
}
