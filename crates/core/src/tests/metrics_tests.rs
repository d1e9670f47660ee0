// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::metrics::{RIDES_COMPLETED, RIDES_OFFERED};
use crate::{MetricAliasTable, TimeValue, get_metric_value, get_time_metric};

#[test]
fn test_canonical_key_wins() {
    let obj = json!({ "corridas_ofertadas": 7, "ofertadas": 5 });
    assert!((get_metric_value(&obj, RIDES_OFFERED) - 7.0).abs() < f64::EPSILON);
}

#[test]
fn test_alias_fallback() {
    let obj = json!({ "ofertadas": 5 });
    assert!((get_metric_value(&obj, "corridas_ofertadas") - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_metric_is_zero() {
    assert!(get_metric_value(&json!({}), "corridas_ofertadas").abs() < f64::EPSILON);
    assert!(get_metric_value(&json!(null), RIDES_COMPLETED).abs() < f64::EPSILON);
}

#[test]
fn test_non_numeric_values_are_skipped() {
    let obj = json!({ "corridas_completadas": "n/a", "completadas": "12" });
    assert!((get_metric_value(&obj, RIDES_COMPLETED) - 12.0).abs() < f64::EPSILON);
}

#[test]
fn test_time_metric_fallbacks() {
    assert_eq!(
        get_time_metric(&json!({ "horas_realizadas": "10:30:00" }), "horas_entregues"),
        TimeValue::Text(String::from("10:30:00"))
    );
    assert_eq!(
        get_time_metric(&json!({ "horas_entregues": 3600 }), "horas_entregues"),
        TimeValue::Number(3600.0)
    );
    assert_eq!(
        get_time_metric(&json!({}), "horas_entregues"),
        TimeValue::Text(String::from("0"))
    );
}

#[test]
fn test_custom_alias_extends_table() {
    let table: MetricAliasTable = MetricAliasTable::new().with_alias(RIDES_OFFERED, "qtd_oferta");
    let obj = json!({ "qtd_oferta": 9 });

    assert!((table.get_metric_value(&obj, RIDES_OFFERED) - 9.0).abs() < f64::EPSILON);
    assert!(get_metric_value(&obj, RIDES_OFFERED).abs() < f64::EPSILON);
    assert_eq!(
        table.aliases(RIDES_OFFERED).last().map(String::as_str),
        Some("qtd_oferta")
    );
}

#[test]
fn test_empty_table_only_reads_canonical_key() {
    let table: MetricAliasTable = MetricAliasTable::empty();
    let obj = json!({ "ofertadas": 5 });
    assert!(table.get_metric_value(&obj, RIDES_OFFERED).abs() < f64::EPSILON);
}
