// src/services/mantenimiento_service.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::{
    common::{error::AppError, fechas},
    db::{InstalacionesRepository, MantenimientosRepository, PendientesRepository},
    models::{
        agenda::{ItemAgenda, Resuelto, TipoItem},
        instalaciones::{ActualizarInstalacionPayload, Instalacion},
        mantenimientos::{CrearMantenimientoPayload, Mantenimiento},
        usuarios::Usuario,
    },
};

#[derive(Clone)]
pub struct MantenimientoService {
    mantenimientos_repo: MantenimientosRepository,
    instalaciones_repo: InstalacionesRepository,
    pendientes_repo: PendientesRepository,
    // Itens com resolução em voo; um segundo clique no mesmo item não pode
    // gerar dois mantenimientos.
    en_curso: Arc<Mutex<HashSet<(TipoItem, i64)>>>,
}

impl MantenimientoService {
    pub fn new(
        mantenimientos_repo: MantenimientosRepository,
        instalaciones_repo: InstalacionesRepository,
        pendientes_repo: PendientesRepository,
    ) -> Self {
        Self {
            mantenimientos_repo,
            instalaciones_repo,
            pendientes_repo,
            en_curso: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    // =========================================================================
    //  RESOLUÇÃO DE UM ITEM DA AGENDA
    // =========================================================================

    /// Marca um item da agenda como realizado.
    ///
    /// Três passos contra a API, em sequência estrita e sem rollback:
    /// 1. registra o mantenimiento feito;
    /// 2. recorrente com frequência: avança o próximo vencimento a partir
    ///    da data AGENDADA do item (terminar com atraso não desloca o ciclo);
    /// 3. serviço avulso: apaga o pendiente.
    ///
    /// A confirmação com o usuário acontece antes de chamar aqui.
    pub async fn resolver(
        &self,
        item: &ItemAgenda,
        usuario: &Usuario,
    ) -> Result<Resuelto, AppError> {
        let llave = (item.tipo, item.id);

        if !self.marcar_en_curso(llave)? {
            return Err(AppError::ResolucionEnCurso);
        }

        let resultado = self.ejecutar_resolucion(item, usuario).await;
        self.liberar(llave);
        resultado
    }

    async fn ejecutar_resolucion(
        &self,
        item: &ItemAgenda,
        usuario: &Usuario,
    ) -> Result<Resuelto, AppError> {
        let empresa_id = usuario.empresa_id.ok_or(AppError::EmpresaNoDefinida)?;

        // 1. o trabalho feito vira histórico
        let payload = CrearMantenimientoPayload {
            empresa_id,
            instalacion_id: item.instalacion_id,
            realizado_por: Some(usuario.id),
            fecha: item.fecha,
            notas: item.notas.clone(),
        };
        self.mantenimientos_repo
            .create_mantenimiento(&payload)
            .await?;

        // 2. recorrente: avança o ciclo
        if item.tipo == TipoItem::Mantenimiento {
            if let Some(frecuencia) = item.frecuencia_meses.filter(|m| *m > 0) {
                let cambio = ActualizarInstalacionPayload {
                    proximo_mantenimiento: Some(fechas::sumar_meses(item.fecha, frecuencia)),
                    ..Default::default()
                };
                self.instalaciones_repo
                    .update_instalacion(item.instalacion_id, &cambio)
                    .await?;
            }
        }

        // 3. avulso: o pendiente se elimina ao resolver
        if item.tipo == TipoItem::Servicio {
            self.pendientes_repo.delete_pendiente(item.id).await?;
        }

        tracing::info!(tipo = ?item.tipo, id = item.id, "Item da agenda resolvido");

        Ok(Resuelto {
            tipo: item.tipo,
            id: item.id,
        })
    }

    // =========================================================================
    //  REGISTRO MANUAL (fora da agenda)
    // =========================================================================

    /// Registra uma manutenção feita fora da agenda e avança o ciclo a
    /// partir da data REAL de execução.
    ///
    /// Exige frequência definida na instalação; a data chega como texto do
    /// formulário e é validada antes de qualquer chamada de rede.
    pub async fn registrar(
        &self,
        instalacion: &Instalacion,
        fecha: &str,
        notas: Option<String>,
        usuario: &Usuario,
    ) -> Result<Mantenimiento, AppError> {
        let fecha = fechas::parse_fecha(fecha)?;
        let empresa_id = usuario.empresa_id.ok_or(AppError::EmpresaNoDefinida)?;

        let frecuencia = instalacion
            .frecuencia_meses
            .filter(|m| *m > 0)
            .ok_or(AppError::FrecuenciaNoDefinida(instalacion.id))?;

        let payload = CrearMantenimientoPayload {
            empresa_id,
            instalacion_id: instalacion.id,
            realizado_por: Some(usuario.id),
            fecha,
            notas,
        };
        let mantenimiento = self
            .mantenimientos_repo
            .create_mantenimiento(&payload)
            .await?;

        let cambio = ActualizarInstalacionPayload {
            proximo_mantenimiento: Some(fechas::sumar_meses(fecha, frecuencia)),
            ..Default::default()
        };
        self.instalaciones_repo
            .update_instalacion(instalacion.id, &cambio)
            .await?;

        Ok(mantenimiento)
    }

    fn marcar_en_curso(&self, llave: (TipoItem, i64)) -> Result<bool, AppError> {
        let mut en_curso = self
            .en_curso
            .lock()
            .map_err(|_| anyhow::anyhow!("mutex de resoluções envenenado"))?;
        Ok(en_curso.insert(llave))
    }

    fn liberar(&self, llave: (TipoItem, i64)) {
        if let Ok(mut en_curso) = self.en_curso.lock() {
            en_curso.remove(&llave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tokio::sync::Notify;

    use crate::db::remote::RemoteStore;
    use crate::models::agenda::Urgencia;
    use crate::models::usuarios::Rol;
    use crate::services::agenda_service::{clasificar, quitar_resuelto};
    use crate::models::{clientes::Cliente, instalaciones::Instalacion};

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    // API falsa: grava cada verbo e devolve envelopes plausíveis. O update
    // de instalação mescla o payload numa instalação base, como o backend
    // faria com o PUT parcial.
    struct MemStore {
        instalacion_base: Value,
        creates: Mutex<Vec<(String, Value)>>,
        updates: Mutex<Vec<(String, Value)>>,
        removes: Mutex<Vec<String>>,
        gate: Option<Arc<Notify>>,
        fallar_create: bool,
    }

    impl MemStore {
        fn nuevo(instalacion_base: Value) -> Self {
            Self {
                instalacion_base,
                creates: Mutex::new(vec![]),
                updates: Mutex::new(vec![]),
                removes: Mutex::new(vec![]),
                gate: None,
                fallar_create: false,
            }
        }
    }

    #[async_trait]
    impl RemoteStore for MemStore {
        async fn fetch(&self, _path: &str) -> Result<Value, AppError> {
            Ok(json!({}))
        }

        async fn create(&self, path: &str, payload: Value) -> Result<Value, AppError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fallar_create {
                return Err(AppError::ApiRejection {
                    status: 500,
                    message: "boom".into(),
                });
            }

            let n = {
                let mut creates = self.creates.lock().unwrap();
                creates.push((path.to_string(), payload.clone()));
                creates.len() as i64
            };

            let mut con_id = payload;
            con_id["id"] = json!(1000 + n);
            Ok(json!({ "mantenimiento": con_id }))
        }

        async fn update(&self, path: &str, payload: Value) -> Result<Value, AppError> {
            self.updates
                .lock()
                .unwrap()
                .push((path.to_string(), payload.clone()));

            let mut mezclada = self.instalacion_base.clone();
            if let (Some(base), Some(cambios)) = (mezclada.as_object_mut(), payload.as_object()) {
                for (clave, valor) in cambios {
                    base.insert(clave.clone(), valor.clone());
                }
            }
            Ok(json!({ "instalacion": mezclada }))
        }

        async fn remove(&self, path: &str) -> Result<(), AppError> {
            self.removes.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn instalacion_json(id: i64, frecuencia: u32, proximo: &str) -> Value {
        json!({
            "id": id,
            "empresa_id": 1,
            "cliente_id": 12,
            "instalador_id": null,
            "tipo_sistema": "CAMARAS",
            "fecha_instalacion": "2024-06-01",
            "frecuencia_meses": frecuencia,
            "proximo_mantenimiento": proximo,
            "activa": true,
            "mantenimientos": [],
            "pendientes": []
        })
    }

    fn servicio(store: Arc<MemStore>) -> MantenimientoService {
        let remoto: Arc<dyn RemoteStore> = store;
        MantenimientoService::new(
            MantenimientosRepository::new(remoto.clone()),
            InstalacionesRepository::new(remoto.clone()),
            PendientesRepository::new(remoto),
        )
    }

    fn usuario() -> Usuario {
        Usuario {
            id: 9,
            empresa_id: Some(1),
            nombre: "Tecnico Uno".into(),
            username: None,
            email: "tecnico@empresa.uy".into(),
            rol: Rol::Instalador,
            activo: true,
        }
    }

    fn item_recurrente(instalacion_id: i64, fecha: NaiveDate, frecuencia: u32) -> ItemAgenda {
        ItemAgenda {
            tipo: TipoItem::Mantenimiento,
            id: instalacion_id,
            cliente_id: 12,
            instalacion_id,
            fecha,
            notas: Some("Mantenimiento programado · CAMARAS".into()),
            frecuencia_meses: Some(frecuencia),
            cliente: None,
            dias: 0,
            urgencia: Urgencia::Hoy,
        }
    }

    fn item_servicio(pendiente_id: i64, instalacion_id: i64, fecha: NaiveDate) -> ItemAgenda {
        ItemAgenda {
            tipo: TipoItem::Servicio,
            id: pendiente_id,
            cliente_id: 12,
            instalacion_id,
            fecha,
            notas: Some("Cambiar batería".into()),
            frecuencia_meses: None,
            cliente: None,
            dias: 0,
            urgencia: Urgencia::Hoy,
        }
    }

    #[tokio::test]
    async fn resolver_recurrente_avanza_el_ciclo_y_no_toca_pendientes() {
        let store = Arc::new(MemStore::nuevo(instalacion_json(7, 6, "2025-01-31")));
        let svc = servicio(store.clone());

        let resuelto = svc
            .resolver(&item_recurrente(7, d(2025, 1, 31), 6), &usuario())
            .await
            .unwrap();

        assert_eq!(
            resuelto,
            Resuelto {
                tipo: TipoItem::Mantenimiento,
                id: 7
            }
        );

        let creates = store.creates.lock().unwrap();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].0, "/mantenimientos");
        assert_eq!(creates[0].1["fecha"], json!("2025-01-31"));
        assert_eq!(creates[0].1["realizado_por"], json!(9));

        // 31/01 + 6 meses preserva o dia 31
        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "/instalaciones/7");
        assert_eq!(updates[0].1, json!({ "proximo_mantenimiento": "2025-07-31" }));

        assert!(store.removes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolver_avulso_borra_el_pendiente_y_no_toca_instalaciones() {
        let store = Arc::new(MemStore::nuevo(instalacion_json(42, 6, "2025-06-01")));
        let svc = servicio(store.clone());

        let resuelto = svc
            .resolver(&item_servicio(5, 42, d(2025, 6, 1)), &usuario())
            .await
            .unwrap();

        assert_eq!(resuelto.tipo, TipoItem::Servicio);
        assert_eq!(resuelto.id, 5);

        assert_eq!(store.creates.lock().unwrap().len(), 1);
        assert!(store.updates.lock().unwrap().is_empty());
        assert_eq!(*store.removes.lock().unwrap(), vec!["/pendientes/5".to_string()]);
    }

    #[tokio::test]
    async fn resolver_sin_frecuencia_no_actualiza_la_instalacion() {
        let store = Arc::new(MemStore::nuevo(instalacion_json(7, 0, "2025-06-01")));
        let svc = servicio(store.clone());

        let item = item_recurrente(7, d(2025, 6, 1), 0);
        svc.resolver(&item, &usuario()).await.unwrap();

        assert_eq!(store.creates.lock().unwrap().len(), 1);
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fallo_en_el_primer_paso_aborta_y_libera_el_item() {
        let mut mem = MemStore::nuevo(instalacion_json(7, 6, "2025-01-31"));
        mem.fallar_create = true;
        let store = Arc::new(mem);
        let svc = servicio(store.clone());

        let item = item_recurrente(7, d(2025, 1, 31), 6);
        let err = svc.resolver(&item, &usuario()).await.unwrap_err();
        assert!(matches!(err, AppError::ApiRejection { status: 500, .. }));

        // nada além do primeiro passo aconteceu
        assert!(store.updates.lock().unwrap().is_empty());
        assert!(store.removes.lock().unwrap().is_empty());

        // a trava foi liberada: a nova tentativa volta a falhar na API,
        // não com ResolucionEnCurso
        let err = svc.resolver(&item, &usuario()).await.unwrap_err();
        assert!(matches!(err, AppError::ApiRejection { .. }));
    }

    #[tokio::test]
    async fn doble_envio_del_mismo_item_es_rechazado() {
        let gate = Arc::new(Notify::new());
        let mut mem = MemStore::nuevo(instalacion_json(7, 6, "2025-01-31"));
        mem.gate = Some(gate.clone());
        let store = Arc::new(mem);
        let svc = servicio(store.clone());

        let item = item_recurrente(7, d(2025, 1, 31), 6);

        let svc_bg = svc.clone();
        let item_bg = item.clone();
        let usuario_bg = usuario();
        let primera = tokio::spawn(async move { svc_bg.resolver(&item_bg, &usuario_bg).await });

        // espera a primeira tentativa tomar a trava
        for _ in 0..100 {
            if svc.en_curso.lock().unwrap().len() == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let err = svc.resolver(&item, &usuario()).await.unwrap_err();
        assert!(matches!(err, AppError::ResolucionEnCurso));

        gate.notify_one();
        primera.await.unwrap().unwrap();

        // só um mantenimiento foi criado
        assert_eq!(store.creates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn registrar_avanza_desde_la_fecha_real() {
        let store = Arc::new(MemStore::nuevo(instalacion_json(7, 6, "2025-01-31")));
        let svc = servicio(store.clone());

        let instalacion: Instalacion =
            serde_json::from_value(instalacion_json(7, 6, "2025-01-31")).unwrap();

        let mantenimiento = svc
            .registrar(&instalacion, "2025-02-03", Some("Limpieza general".into()), &usuario())
            .await
            .unwrap();

        assert_eq!(mantenimiento.fecha, d(2025, 2, 3));

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates[0].1, json!({ "proximo_mantenimiento": "2025-08-03" }));
    }

    #[tokio::test]
    async fn registrar_exige_frecuencia_y_fecha_validas() {
        let store = Arc::new(MemStore::nuevo(instalacion_json(7, 6, "2025-01-31")));
        let svc = servicio(store.clone());

        let mut sin_frecuencia: Instalacion =
            serde_json::from_value(instalacion_json(7, 6, "2025-01-31")).unwrap();
        sin_frecuencia.frecuencia_meses = None;

        let err = svc
            .registrar(&sin_frecuencia, "2025-02-03", None, &usuario())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FrecuenciaNoDefinida(7)));

        let con_frecuencia: Instalacion =
            serde_json::from_value(instalacion_json(7, 6, "2025-01-31")).unwrap();
        let err = svc
            .registrar(&con_frecuencia, "03/02/2025", None, &usuario())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FechaInvalida(_)));

        // validação falhou antes de qualquer chamada de rede
        assert!(store.creates.lock().unwrap().is_empty());
    }

    // Cenário completo: cliente com instalação trimestral instalada em
    // 10/01; em 15/03 ela aparece na janela de 30 dias e, resolvida,
    // pula para 10/07.
    #[tokio::test]
    async fn ciclo_completo_de_un_mantenimiento_trimestral() {
        let hoy = d(2025, 3, 15);

        let cliente: Cliente = serde_json::from_value(json!({
            "id": 12,
            "empresa_id": 1,
            "nombre": "Panadería El Sol",
            "telefono": null,
            "email": null,
            "direccion": null,
            "lat": null,
            "lng": null,
            "observaciones": null,
            "activo": true
        }))
        .unwrap();

        let instalacion: Instalacion = serde_json::from_value(json!({
            "id": 7,
            "empresa_id": 1,
            "cliente_id": 12,
            "instalador_id": 9,
            "tipo_sistema": "ALARMAS",
            "fecha_instalacion": "2025-01-10",
            "frecuencia_meses": 3,
            "proximo_mantenimiento": "2025-04-10",
            "activa": true
        }))
        .unwrap();

        let mut agenda = clasificar(
            &[],
            &[instalacion],
            std::slice::from_ref(&cliente),
            hoy,
            30,
        );

        assert_eq!(agenda.len(), 1);
        let item = agenda[0].clone();
        assert_eq!(item.dias, 26);
        assert_eq!(item.urgencia, Urgencia::Normal);
        assert_eq!(item.cliente.as_ref().map(|c| c.id), Some(12));

        let store = Arc::new(MemStore::nuevo(instalacion_json(7, 3, "2025-04-10")));
        let svc = servicio(store.clone());

        let resuelto = svc.resolver(&item, &usuario()).await.unwrap();

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates[0].0, "/instalaciones/7");
        assert_eq!(updates[0].1, json!({ "proximo_mantenimiento": "2025-07-10" }));

        quitar_resuelto(&mut agenda, resuelto);
        assert!(agenda.is_empty());
    }
}
