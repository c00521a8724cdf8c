// src/models/agenda.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::clientes::Cliente;

// A agenda mistura duas origens; a tag diz qual foi e decide os efeitos da
// resolução (serviço avulso se apaga, manutenção recorrente avança o ciclo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoItem {
    // Pendiente avulso criado à mão
    Servicio,
    // Manutenção periódica de uma instalação
    Mantenimiento,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgencia {
    Vencido,
    Hoy,
    Pronto,
    Normal,
}

impl Urgencia {
    /// Faixa de urgência a partir dos dias restantes até o vencimento.
    pub fn desde_dias(dias: i64) -> Self {
        match dias {
            d if d < 0 => Urgencia::Vencido,
            0 => Urgencia::Hoy,
            1..=2 => Urgencia::Pronto,
            _ => Urgencia::Normal,
        }
    }
}

// Item já classificado e enriquecido da agenda de trabalho.
// `id` é o id do pendiente (Servicio) ou da instalação (Mantenimiento).
#[derive(Debug, Clone, Serialize)]
pub struct ItemAgenda {
    pub tipo: TipoItem,
    pub id: i64,
    pub cliente_id: i64,
    pub instalacion_id: i64,

    pub fecha: NaiveDate,
    pub notas: Option<String>,
    // Só vem preenchida nos itens recorrentes
    pub frecuencia_meses: Option<u32>,

    // Cliente resolvido por lookup; None se a referência está quebrada
    // (a tela mostra "Cliente no encontrado" em vez de derrubar a lista)
    pub cliente: Option<Cliente>,

    pub dias: i64,
    pub urgencia: Urgencia,
}

// O que o fluxo de resolução devolve para a tela tirar exatamente aquele
// item da lista em memória.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resuelto {
    pub tipo: TipoItem,
    pub id: i64,
}

// Contadores da tela inicial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResumenAgenda {
    pub clientes: usize,
    pub servicios_en_rango: usize,
    pub mantenimientos_en_rango: usize,
}

impl ResumenAgenda {
    pub fn total_pendientes(&self) -> usize {
        self.servicios_en_rango + self.mantenimientos_en_rango
    }
}
