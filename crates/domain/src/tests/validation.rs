// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};
use time::macros::date;

use crate::validation::{
    DateFilters, sanitize_multi_select, validate_auxiliary_filters, validate_date_filters,
    validate_facet, validate_integer, validate_location_filters, validate_string,
};
use crate::{FilterModeKind, OrganizationScope, ValidationError, validate_filter_payload};

use super::helpers::test_today;

// ============================================================================
// Common validators
// ============================================================================

#[test]
fn test_validate_integer_accepts_numbers_and_numeric_strings() {
    assert_eq!(validate_integer(&json!(42), 1, 100, "Limite"), Ok(42));
    assert_eq!(validate_integer(&json!("42"), 1, 100, "Limite"), Ok(42));
    assert_eq!(validate_integer(&json!(" 7 "), 1, 100, "Limite"), Ok(7));
}

#[test]
fn test_validate_integer_coerces_like_parse_int() {
    assert_eq!(validate_integer(&json!("45abc"), 1, 53, "Semana"), Ok(45));
    assert_eq!(validate_integer(&json!(12.9), 1, 53, "Semana"), Ok(12));
    assert_eq!(validate_integer(&json!("-3"), -10, 10, "Valor"), Ok(-3));
}

#[test]
fn test_validate_integer_rejects_non_numeric() {
    let result = validate_integer(&json!("abc"), 1, 100, "Limite");
    assert!(matches!(result, Err(ValidationError::NotAnInteger { .. })));

    let result = validate_integer(&json!(true), 1, 100, "Limite");
    assert!(matches!(result, Err(ValidationError::NotAnInteger { .. })));
}

#[test]
fn test_validate_integer_rejects_out_of_range() {
    let result = validate_integer(&json!(101), 1, 100, "Limite");
    assert_eq!(
        result,
        Err(ValidationError::OutOfRange {
            field: String::from("Limite"),
            value: 101,
            min: 1,
            max: 100,
        })
    );
}

#[test]
fn test_validate_string_trims_and_bounds() {
    assert_eq!(
        validate_string("  Rio  ", 10, "Praça", false),
        Ok(String::from("Rio"))
    );
    assert!(matches!(
        validate_string("   ", 10, "Praça", false),
        Err(ValidationError::EmptyValue { .. })
    ));
    assert_eq!(validate_string("", 10, "Praça", true), Ok(String::new()));
    assert!(matches!(
        validate_string("São Paulo Capital", 5, "Praça", false),
        Err(ValidationError::TooLong { max_length: 5, .. })
    ));
}

#[test]
fn test_validate_string_counts_characters_not_bytes() {
    assert_eq!(
        validate_string("ãéíóú", 5, "Praça", false),
        Ok(String::from("ãéíóú"))
    );
}

// ============================================================================
// Date validators
// ============================================================================

#[test]
fn test_year_bounds() {
    for year in [2000, 2025, 2100] {
        let result = validate_date_filters(&json!({ "p_ano": year }), test_today());
        assert_eq!(result.unwrap().year, Some(year));
    }
    for year in [1999, 2101, 0] {
        let result = validate_date_filters(&json!({ "p_ano": year }), test_today());
        assert_eq!(result, Err(ValidationError::InvalidYear));
    }
    let result = validate_date_filters(&json!({ "p_ano": "abc" }), test_today());
    assert_eq!(result, Err(ValidationError::InvalidYear));
}

#[test]
fn test_week_bounds() {
    for week in [1, 27, 53] {
        let result = validate_date_filters(&json!({ "p_semana": week }), test_today());
        assert_eq!(result.unwrap().week, Some(week));
    }
    for week in [0, 54, -1] {
        let result = validate_date_filters(&json!({ "p_semana": week }), test_today());
        assert_eq!(result, Err(ValidationError::InvalidWeek));
    }
}

#[test]
fn test_absent_and_null_fields_are_skipped() {
    let result = validate_date_filters(
        &json!({ "p_ano": null, "p_semana": "", "p_data_inicial": null }),
        test_today(),
    );
    assert_eq!(result, Ok(DateFilters::default()));
}

#[test]
fn test_date_requires_iso_format() {
    for raw in ["2025/01/10", "10-01-2025", "2025-1-10", "2025-01-10T00:00:00"] {
        let result = validate_date_filters(&json!({ "p_data_inicial": raw }), test_today());
        assert!(
            matches!(result, Err(ValidationError::InvalidDate { .. })),
            "expected {raw} to be rejected"
        );
    }
}

#[test]
fn test_date_with_surrounding_whitespace_is_rejected() {
    for raw in [" 2025-01-01 ", "2025-01-01 ", "\t2025-01-01", "2025-01-01\n"] {
        let result = validate_date_filters(&json!({ "p_data_inicial": raw }), test_today());
        assert!(
            matches!(result, Err(ValidationError::InvalidDate { .. })),
            "expected {raw:?} to be rejected"
        );
    }
}

#[test]
fn test_date_must_be_a_calendar_date() {
    let result = validate_date_filters(&json!({ "p_data_inicial": "2025-02-30" }), test_today());
    assert!(matches!(result, Err(ValidationError::InvalidDate { .. })));
}

#[test]
fn test_date_cannot_be_in_the_future() {
    let result = validate_date_filters(&json!({ "p_data_final": "2025-06-16" }), test_today());
    assert!(matches!(result, Err(ValidationError::DateInFuture { .. })));

    let result = validate_date_filters(&json!({ "p_data_final": "2025-06-15" }), test_today());
    assert!(result.is_ok());
}

#[test]
fn test_date_cannot_precede_minimum() {
    let result = validate_date_filters(&json!({ "p_data_inicial": "2019-12-31" }), test_today());
    assert!(matches!(result, Err(ValidationError::DateTooEarly { .. })));
}

#[test]
fn test_end_before_start_is_rejected() {
    let result = validate_date_filters(
        &json!({ "p_data_inicial": "2025-03-10", "p_data_final": "2025-03-09" }),
        test_today(),
    );
    assert_eq!(result, Err(ValidationError::DateRangeInverted));
}

#[test]
fn test_single_date_bound_closes_the_range() {
    let result = validate_date_filters(&json!({ "p_data_inicial": "2025-03-10" }), test_today())
        .unwrap();
    assert_eq!(result.date_start, Some(date!(2025 - 03 - 10)));
    assert_eq!(result.date_end, Some(date!(2025 - 03 - 10)));

    let result =
        validate_date_filters(&json!({ "p_data_final": "2025-04-01" }), test_today()).unwrap();
    assert_eq!(result.date_start, Some(date!(2025 - 04 - 01)));
    assert_eq!(result.date_end, Some(date!(2025 - 04 - 01)));
}

// ============================================================================
// Location and auxiliary validators
// ============================================================================

#[test]
fn test_facet_rejects_script_injection() {
    let result = validate_facet(&json!("<script>alert(1)</script>"), "Praça", "praças");
    assert!(matches!(
        result,
        Err(ValidationError::InvalidCharacters { .. })
    ));
}

#[test]
fn test_facet_accepts_diacritics_digits_and_dots() {
    let result = validate_facet(&json!("São Paulo 2.0"), "Praça", "praças");
    assert_eq!(result, Ok(Some(String::from("São Paulo 2.0"))));
}

#[test]
fn test_facet_collapses_single_entry_and_joins_many() {
    assert_eq!(
        validate_facet(&json!(["Rio"]), "Praça", "praças"),
        Ok(Some(String::from("Rio")))
    );
    assert_eq!(
        validate_facet(&json!(" Rio , Niterói "), "Praça", "praças"),
        Ok(Some(String::from("Rio,Niterói")))
    );
    assert_eq!(validate_facet(&json!([]), "Praça", "praças"), Ok(None));
}

#[test]
fn test_facet_rejects_more_than_fifty_entries() {
    let entries: Vec<String> = (0..51).map(|i| format!("Praca {i}")).collect();
    let result = validate_facet(&json!(entries), "Praça", "praças");
    assert_eq!(
        result,
        Err(ValidationError::TooManyItems {
            label: String::from("praças"),
            max: 50,
        })
    );
}

#[test]
fn test_facet_rejects_overlong_entry() {
    let long: String = "a".repeat(101);
    let result = validate_facet(&json!(long), "Praça", "praças");
    assert!(matches!(
        result,
        Err(ValidationError::InvalidItemLength { .. })
    ));
}

#[test]
fn test_facet_rejects_non_string_items() {
    let result = validate_facet(&json!([{ "nome": "Rio" }]), "Praça", "praças");
    assert!(matches!(result, Err(ValidationError::UnexpectedType { .. })));
}

#[test]
fn test_multi_select_sanitization_is_lenient() {
    let raw: Value = json!(["  Centro ", "", "<b>Zona</b>", "x".repeat(150)]);
    let sanitized: Vec<String> = sanitize_multi_select(&raw).unwrap();
    assert_eq!(sanitized.len(), 3);
    assert_eq!(sanitized[0], "Centro");
    assert_eq!(sanitized[1], "<b>Zona</b>");
    assert_eq!(sanitized[2].chars().count(), 100);
}

#[test]
fn test_multi_select_is_capped_at_fifty() {
    let entries: Vec<String> = (0..80).map(|i| format!("Turno {i}")).collect();
    let sanitized: Vec<String> = sanitize_multi_select(&json!(entries)).unwrap();
    assert_eq!(sanitized.len(), 50);
    assert_eq!(sanitize_multi_select(&json!(["", "  "])), None);
}

#[test]
fn test_location_filters() {
    let result = validate_location_filters(&json!({
        "p_praca": "Rio",
        "p_sub_praca": ["Centro", "Barra"],
        "p_sub_pracas": ["Centro", "Barra"]
    }))
    .unwrap();

    assert_eq!(result.venue.as_deref(), Some("Rio"));
    assert_eq!(result.sub_venue.as_deref(), Some("Centro,Barra"));
    assert_eq!(
        result.sub_venues,
        Some(vec![String::from("Centro"), String::from("Barra")])
    );
}

#[test]
fn test_auxiliary_filters_validate_limit() {
    let result = validate_auxiliary_filters(&json!({ "p_origem": "App", "p_limite": "20" }))
        .unwrap();
    assert_eq!(result.origin.as_deref(), Some("App"));
    assert_eq!(result.limit, Some(20));

    let result = validate_auxiliary_filters(&json!({ "p_limite": 0 }));
    assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));

    let result = validate_auxiliary_filters(&json!({ "p_turno": "Manhã; DROP" }));
    assert!(matches!(
        result,
        Err(ValidationError::InvalidCharacters { .. })
    ));
}

// ============================================================================
// Payload orchestrator
// ============================================================================

#[test]
fn test_validate_filter_payload_normalizes_year_week_request() {
    let result = validate_filter_payload(
        &json!({
            "p_ano": "2025",
            "p_semana": 10,
            "p_semanas": [10, "11"],
            "p_praca": "Rio",
            "p_data_inicial": "2025-03-01",
            "p_filtro_modo": "ano_semana",
            "p_organization_id": "org-7",
            "p_limite": 5
        }),
        test_today(),
    )
    .unwrap();

    let payload = result.payload;
    assert_eq!(payload.mode, FilterModeKind::YearWeek);
    assert_eq!(payload.year, Some(2025));
    assert_eq!(payload.week, Some(10));
    assert_eq!(payload.weeks, Some(vec![10, 11]));
    assert_eq!(payload.venue.as_deref(), Some("Rio"));
    assert_eq!(payload.date_start, None);
    assert_eq!(payload.date_end, None);
    assert_eq!(
        payload.organization,
        OrganizationScope::Organization(String::from("org-7"))
    );
    assert_eq!(result.limit, Some(5));
}

#[test]
fn test_validate_filter_payload_infers_date_range_mode() {
    let result = validate_filter_payload(
        &json!({ "p_ano": 2025, "p_data_inicial": "2025-03-01", "p_data_final": "2025-03-07" }),
        test_today(),
    )
    .unwrap();

    assert_eq!(result.payload.mode, FilterModeKind::DateRange);
    assert_eq!(result.payload.year, None);
    assert_eq!(result.payload.date_start, Some(date!(2025 - 03 - 01)));
    assert_eq!(result.payload.date_end, Some(date!(2025 - 03 - 07)));
}

#[test]
fn test_validate_filter_payload_surfaces_first_error() {
    let result = validate_filter_payload(
        &json!({ "p_ano": 1990, "p_praca": "<script>" }),
        test_today(),
    );
    assert_eq!(result, Err(ValidationError::InvalidYear));

    let result = validate_filter_payload(&json!({ "p_semanas": [10, 60] }), test_today());
    assert_eq!(result, Err(ValidationError::InvalidWeek));

    let result = validate_filter_payload(&json!({ "p_filtro_modo": "mensal" }), test_today());
    assert!(matches!(result, Err(ValidationError::UnexpectedType { .. })));
}
