// src/db/presupuestos_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::remote::{desenvelopar, RemoteStore},
    models::presupuestos::{
        ActualizarPresupuestoPayload, CrearPresupuestoPayload, Presupuesto,
    },
};

#[derive(Clone)]
pub struct PresupuestosRepository {
    store: Arc<dyn RemoteStore>,
}

impl PresupuestosRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn list_presupuestos(&self) -> Result<Vec<Presupuesto>, AppError> {
        let valor = self.store.fetch("/presupuestos").await?;
        desenvelopar(valor, "presupuestos")
    }

    pub async fn create_presupuesto(
        &self,
        payload: &CrearPresupuestoPayload,
    ) -> Result<Presupuesto, AppError> {
        let valor = self
            .store
            .create("/presupuestos", serde_json::to_value(payload)?)
            .await?;
        desenvelopar(valor, "presupuesto")
    }

    pub async fn update_presupuesto(
        &self,
        id: i64,
        payload: &ActualizarPresupuestoPayload,
    ) -> Result<Presupuesto, AppError> {
        let valor = self
            .store
            .update(
                &format!("/presupuestos/{id}"),
                serde_json::to_value(payload)?,
            )
            .await?;
        desenvelopar(valor, "presupuesto")
    }

    pub async fn delete_presupuesto(&self, id: i64) -> Result<(), AppError> {
        self.store.remove(&format!("/presupuestos/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    // Fake mínimo: devolve sempre o mesmo envelope e grava os deletes
    struct EnvelopeFijo {
        valor: Value,
        removes: std::sync::Mutex<Vec<String>>,
    }

    impl EnvelopeFijo {
        fn nuevo(valor: Value) -> Self {
            Self {
                valor,
                removes: std::sync::Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl RemoteStore for EnvelopeFijo {
        async fn fetch(&self, _path: &str) -> Result<Value, AppError> {
            Ok(self.valor.clone())
        }
        async fn create(&self, _path: &str, _payload: Value) -> Result<Value, AppError> {
            Ok(self.valor.clone())
        }
        async fn update(&self, _path: &str, _payload: Value) -> Result<Value, AppError> {
            Ok(self.valor.clone())
        }
        async fn remove(&self, path: &str) -> Result<(), AppError> {
            self.removes.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn presupuesto_json() -> Value {
        json!({
            "id": 4,
            "empresa_id": 1,
            "cliente_id": 2,
            "cliente_nombre": "Carlos",
            "cliente_telefono": null,
            "cliente_direccion": null,
            "cliente_email": null,
            "tipo_sistema": "AMBOS",
            "descripcion": null,
            "total": 2300.0,
            "estado": "aceptado",
            "creado_por": 1,
            "componentes": []
        })
    }

    #[tokio::test]
    async fn list_desenvelopa_presupuestos() {
        let store = Arc::new(EnvelopeFijo::nuevo(
            json!({ "presupuestos": [presupuesto_json()] }),
        ));

        let repo = PresupuestosRepository::new(store);
        let presupuestos = repo.list_presupuestos().await.unwrap();

        assert_eq!(presupuestos.len(), 1);
        assert_eq!(presupuestos[0].estado, "aceptado");
    }

    #[tokio::test]
    async fn ciclo_crear_actualizar_borrar() {
        let store = Arc::new(EnvelopeFijo::nuevo(
            json!({ "presupuesto": presupuesto_json() }),
        ));
        let repo = PresupuestosRepository::new(store.clone());

        let payload = CrearPresupuestoPayload {
            empresa_id: 1,
            cliente_id: Some(2),
            cliente_nombre: "Carlos".into(),
            cliente_telefono: None,
            cliente_direccion: None,
            cliente_email: None,
            tipo_sistema: Some("AMBOS".into()),
            descripcion: None,
            total: None,
        };
        let creado = repo.create_presupuesto(&payload).await.unwrap();
        assert_eq!(creado.id, 4);

        let cambio = ActualizarPresupuestoPayload {
            estado: Some("aceptado".into()),
            ..Default::default()
        };
        let actualizado = repo.update_presupuesto(4, &cambio).await.unwrap();
        assert_eq!(actualizado.estado, "aceptado");

        repo.delete_presupuesto(4).await.unwrap();
        assert_eq!(
            *store.removes.lock().unwrap(),
            vec!["/presupuestos/4".to_string()]
        );
    }
}
