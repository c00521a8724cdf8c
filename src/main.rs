//src/main.rs

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod models;
mod services;

use crate::config::AppState;
use crate::services::agenda_service::{self, DIAS_ADELANTE};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: sem sessão na API não há o que fazer.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let hoy = chrono::Local::now().date_naive();

    let datos = app_state
        .agenda_service
        .cargar()
        .await
        .expect("Falha ao carregar os dados da agenda.");

    let resumen = agenda_service::resumen(
        &datos.pendientes,
        &datos.instalaciones,
        &datos.clientes,
        hoy,
        DIAS_ADELANTE,
    );
    tracing::info!(
        usuario = %app_state.usuario.nombre,
        clientes = resumen.clientes,
        servicios = resumen.servicios_en_rango,
        mantenimientos = resumen.mantenimientos_en_rango,
        total = resumen.total_pendientes(),
        "📋 Agenda dos próximos {DIAS_ADELANTE} dias"
    );

    let agenda = agenda_service::clasificar(
        &datos.pendientes,
        &datos.instalaciones,
        &datos.clientes,
        hoy,
        DIAS_ADELANTE,
    );

    if agenda.is_empty() {
        tracing::info!("Nenhum vencimento na janela. Tudo em dia!");
        return;
    }

    for item in &agenda {
        let nombre = item
            .cliente
            .as_ref()
            .map(|c| c.nombre.as_str())
            .unwrap_or("Cliente no encontrado");

        tracing::info!(
            tipo = ?item.tipo,
            urgencia = ?item.urgencia,
            fecha = %item.fecha,
            dias = item.dias,
            "{nombre}"
        );
    }
}
