// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use painel_domain::WeekIdentifier;
use serde_json::{Value, json};

use crate::{ComparisonRow, DashboardSnapshot, UtrData};

pub fn create_test_response(completed: u64, planned: u64, delivered: u64) -> Value {
    json!({
        "totais": {
            "corridas_ofertadas": completed + 20,
            "corridas_aceitas": completed + 5,
            "corridas_rejeitadas": 15,
            "corridas_completadas": completed,
            "segundos_planejados": planned,
            "segundos_realizados": delivered
        },
        "aderencia_dia": [
            {
                "dia_da_semana": "Segunda",
                "segundos_planejados": 36000,
                "segundos_realizados": 32400,
                "aderencia_percentual": 90.0
            },
            {
                "dia_da_semana": "Terça",
                "segundos_planejados": 36000,
                "segundos_realizados": 36000,
                "aderencia_percentual": 100.0
            }
        ],
        "aderencia_sub_praca": [
            { "sub_praca": "Centro", "aderencia_percentual": 80.0 },
            { "sub_praca": "Barra", "aderencia_percentual": 70.0 }
        ],
        "aderencia_origem": [],
        "aderencia_turno": [
            { "turno": "Manhã", "segundos_planejados": 7200, "segundos_realizados": 3600 }
        ],
        "dimensoes": {
            "anos": [2024, 2025],
            "semanas": ["2025-W10", "2025-W11"],
            "pracas": ["Rio"],
            "sub_pracas": ["Centro", "Barra"],
            "origens": ["App"],
            "turnos": ["Manhã", "Noite"]
        }
    })
}

pub fn create_test_row(week: u32, completed: u64, utr: Option<f64>) -> ComparisonRow {
    ComparisonRow::new(
        WeekIdentifier::new(2025, week),
        DashboardSnapshot::from_value(&create_test_response(completed, 72000, 64800)),
        utr.map(|utr| UtrData {
            utr,
            hours: 100.0,
            rides: 250.0,
        }),
    )
}
