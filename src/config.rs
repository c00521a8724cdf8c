// src/config.rs

use std::env;
use std::sync::Arc;

use crate::{
    db::{
        remote::{ApiClient, RemoteStore},
        ClientesRepository, InstalacionesRepository, MantenimientosRepository,
        PendientesRepository, PresupuestosRepository,
    },
    models::usuarios::{LoginPayload, Usuario},
    services::{
        AgendaService, ClientesService, InstalacionesService, MantenimientoService,
    },
};

// A camada de tela consome o AppState inteiro; o binário de agenda usa só
// uma parte.
#[allow(dead_code)]
#[derive(Clone)]
pub struct AppState {
    // Usuário autenticado na API; assina os mantenimientos que registrar
    pub usuario: Usuario,

    pub agenda_service: AgendaService,
    pub clientes_service: ClientesService,
    pub instalaciones_service: InstalacionesService,
    pub mantenimiento_service: MantenimientoService,
    pub presupuestos_repo: PresupuestosRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var("API_BASE_URL").expect("API_BASE_URL deve ser definida");
        let email = env::var("API_EMAIL").expect("API_EMAIL deve ser definido");
        let password = env::var("API_PASSWORD").expect("API_PASSWORD deve ser definida");

        // Abre a sessão na API; todas as chamadas seguintes levam o token
        let api = ApiClient::new(&base_url, None);
        let sesion = api.login(&LoginPayload { email, password }).await?;
        let api = api.con_token(sesion.token);

        tracing::info!(usuario = %sesion.usuario.email, "✅ Sessão aberta na API");

        // --- Monta o gráfico de dependências ---
        let store: Arc<dyn RemoteStore> = Arc::new(api);

        let clientes_repo = ClientesRepository::new(store.clone());
        let instalaciones_repo = InstalacionesRepository::new(store.clone());
        let mantenimientos_repo = MantenimientosRepository::new(store.clone());
        let pendientes_repo = PendientesRepository::new(store.clone());
        let presupuestos_repo = PresupuestosRepository::new(store);

        let agenda_service = AgendaService::new(
            clientes_repo.clone(),
            instalaciones_repo.clone(),
            pendientes_repo.clone(),
        );
        let clientes_service = ClientesService::new(clientes_repo);
        let instalaciones_service = InstalacionesService::new(instalaciones_repo.clone());
        let mantenimiento_service = MantenimientoService::new(
            mantenimientos_repo,
            instalaciones_repo,
            pendientes_repo,
        );

        Ok(Self {
            usuario: sesion.usuario,
            agenda_service,
            clientes_service,
            instalaciones_service,
            mantenimiento_service,
            presupuestos_repo,
        })
    }
}
