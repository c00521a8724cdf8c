// src/services/agenda_service.rs

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::{
    common::{error::AppError, fechas},
    db::{ClientesRepository, InstalacionesRepository, PendientesRepository},
    models::{
        agenda::{ItemAgenda, Resuelto, ResumenAgenda, TipoItem, Urgencia},
        clientes::Cliente,
        instalaciones::Instalacion,
        pendientes::Pendiente,
    },
};

/// Janela padrão da agenda: tudo que vence nos próximos 30 dias.
pub const DIAS_ADELANTE: i64 = 30;

// As três coleções que alimentam a classificação.
#[derive(Debug, Clone)]
pub struct DatosAgenda {
    pub clientes: Vec<Cliente>,
    pub instalaciones: Vec<Instalacion>,
    pub pendientes: Vec<Pendiente>,
}

#[derive(Clone)]
pub struct AgendaService {
    clientes_repo: ClientesRepository,
    instalaciones_repo: InstalacionesRepository,
    pendientes_repo: PendientesRepository,
}

impl AgendaService {
    pub fn new(
        clientes_repo: ClientesRepository,
        instalaciones_repo: InstalacionesRepository,
        pendientes_repo: PendientesRepository,
    ) -> Self {
        Self {
            clientes_repo,
            instalaciones_repo,
            pendientes_repo,
        }
    }

    /// Busca clientes, instalações e pendentes. Os chamadores decidem quando
    /// recarregar; nada fica cacheado aqui.
    pub async fn cargar(&self) -> Result<DatosAgenda, AppError> {
        let clientes = self.clientes_repo.list_clientes().await?;
        let instalaciones = self.instalaciones_repo.list_instalaciones().await?;
        let pendientes = self.pendientes_repo.list_pendientes().await?;

        Ok(DatosAgenda {
            clientes,
            instalaciones,
            pendientes,
        })
    }

    /// Agenda pronta para a tela: carrega e classifica.
    pub async fn agenda(
        &self,
        hoy: NaiveDate,
        horizonte_dias: i64,
    ) -> Result<Vec<ItemAgenda>, AppError> {
        let datos = self.cargar().await?;
        Ok(clasificar(
            &datos.pendientes,
            &datos.instalaciones,
            &datos.clientes,
            hoy,
            horizonte_dias,
        ))
    }
}

// =============================================================================
//  CLASSIFICAÇÃO (função pura: sem rede, sem estado)
// =============================================================================

/// Mistura pendentes avulsos e manutenções recorrentes numa lista única,
/// ordenada por vencimento e etiquetada por urgência.
///
/// Entram: pendentes com data até o limite (vencidos inclusive) e
/// instalações ativas com próximo vencimento até o limite. Ficam fora:
/// registros sem data e instalações inativas, vença quando vencer.
pub fn clasificar(
    pendientes: &[Pendiente],
    instalaciones: &[Instalacion],
    clientes: &[Cliente],
    hoy: NaiveDate,
    horizonte_dias: i64,
) -> Vec<ItemAgenda> {
    let limite = hoy + Duration::days(horizonte_dias);

    let clientes_por_id: HashMap<i64, &Cliente> =
        clientes.iter().map(|c| (c.id, c)).collect();

    let mut servicios: Vec<ItemAgenda> = pendientes
        .iter()
        .filter_map(|p| {
            let fecha = p.fecha?;
            (fecha <= limite).then(|| {
                armar_item(
                    TipoItem::Servicio,
                    p.id,
                    p.cliente_id,
                    p.instalacion_id,
                    fecha,
                    p.notas.clone(),
                    None,
                    &clientes_por_id,
                    hoy,
                )
            })
        })
        .collect();
    servicios.sort_by_key(|item| item.fecha);

    let mut mantenimientos: Vec<ItemAgenda> = instalaciones
        .iter()
        .filter(|inst| inst.activa)
        .filter_map(|inst| {
            let fecha = inst.proximo_mantenimiento?;
            (fecha <= limite).then(|| {
                armar_item(
                    TipoItem::Mantenimiento,
                    inst.id,
                    inst.cliente_id,
                    inst.id,
                    fecha,
                    Some(notas_de_instalacion(inst)),
                    inst.frecuencia_meses,
                    &clientes_por_id,
                    hoy,
                )
            })
        })
        .collect();
    mantenimientos.sort_by_key(|item| item.fecha);

    // sort estável: num empate de data, serviço avulso fica antes
    let mut agenda = servicios;
    agenda.extend(mantenimientos);
    agenda.sort_by_key(|item| item.fecha);
    agenda
}

/// Contadores da tela inicial sobre a mesma janela da agenda.
pub fn resumen(
    pendientes: &[Pendiente],
    instalaciones: &[Instalacion],
    clientes: &[Cliente],
    hoy: NaiveDate,
    horizonte_dias: i64,
) -> ResumenAgenda {
    let limite = hoy + Duration::days(horizonte_dias);

    let servicios_en_rango = pendientes
        .iter()
        .filter(|p| p.fecha.is_some_and(|f| f <= limite))
        .count();

    let mantenimientos_en_rango = instalaciones
        .iter()
        .filter(|inst| inst.activa && inst.proximo_mantenimiento.is_some_and(|f| f <= limite))
        .count();

    ResumenAgenda {
        clientes: clientes.len(),
        servicios_en_rango,
        mantenimientos_en_rango,
    }
}

/// Tira da lista em memória exatamente o item que acabou de ser resolvido.
pub fn quitar_resuelto(agenda: &mut Vec<ItemAgenda>, resuelto: Resuelto) {
    agenda.retain(|item| !(item.tipo == resuelto.tipo && item.id == resuelto.id));
}

fn notas_de_instalacion(inst: &Instalacion) -> String {
    format!(
        "Mantenimiento programado · {}",
        inst.tipo_sistema.as_deref().unwrap_or("instalación")
    )
}

#[allow(clippy::too_many_arguments)]
fn armar_item(
    tipo: TipoItem,
    id: i64,
    cliente_id: i64,
    instalacion_id: i64,
    fecha: NaiveDate,
    notas: Option<String>,
    frecuencia_meses: Option<u32>,
    clientes_por_id: &HashMap<i64, &Cliente>,
    hoy: NaiveDate,
) -> ItemAgenda {
    let dias = fechas::dias_restantes(fecha, hoy);

    ItemAgenda {
        tipo,
        id,
        cliente_id,
        instalacion_id,
        fecha,
        notas,
        frecuencia_meses,
        cliente: clientes_por_id.get(&cliente_id).map(|c| (*c).clone()),
        dias,
        urgencia: Urgencia::desde_dias(dias),
    }
}
