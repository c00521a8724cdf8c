// src/common/fechas.rs

use chrono::{Months, NaiveDate};

use crate::common::error::AppError;

/// Soma `meses` de calendário a uma data, saturando no fim do mês.
///
/// 31/01 + 1 mês cai em 28/02 (ou 29/02 em ano bissexto), nunca transborda
/// para o mês seguinte. Função pura e total: no limite do calendário retorna
/// `NaiveDate::MAX` em vez de falhar.
pub fn sumar_meses(fecha: NaiveDate, meses: u32) -> NaiveDate {
    fecha
        .checked_add_months(Months::new(meses))
        .unwrap_or(NaiveDate::MAX)
}

/// Interpreta uma data "YYYY-MM-DD" pelos componentes numéricos.
///
/// Aceita um sufixo "T..." de hora e o descarta antes do parse. Nunca passa
/// pelo parser de datetime com fuso: perto da meia-noite em fusos negativos
/// isso deslocava o vencimento em um dia.
pub fn parse_fecha(valor: &str) -> Result<NaiveDate, AppError> {
    let solo_fecha = valor.split('T').next().unwrap_or(valor);
    NaiveDate::parse_from_str(solo_fecha, "%Y-%m-%d")
        .map_err(|_| AppError::FechaInvalida(valor.to_string()))
}

/// Dias inteiros (com sinal) entre hoje e a data de vencimento.
pub fn dias_restantes(fecha: NaiveDate, hoy: NaiveDate) -> i64 {
    (fecha - hoy).num_days()
}

/// Primeiro vencimento de uma instalação nova: data de instalação mais a
/// frequência. Sem frequência (ou frequência zero) não há ciclo automático.
pub fn proximo_desde_instalacion(
    fecha_instalacion: NaiveDate,
    frecuencia_meses: Option<u32>,
) -> Option<NaiveDate> {
    match frecuencia_meses {
        Some(meses) if meses > 0 => Some(sumar_meses(fecha_instalacion, meses)),
        _ => None,
    }
}
