//! Property-based tests for reference parsing, classification and envelopes

use linear_cli::classify::{classify, Failure};
use linear_cli::envelope::{build_error, build_success, build_success_list, PageInfo, ResponseEnvelope};
use linear_cli::error::{CliError, ErrorCode};
use linear_cli::identifier::{is_opaque_id, EntityReference};
use linear_cli::render::truncate;
use proptest::prelude::*;
use serde_json::{json, Value};

fn opaque_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

proptest! {
    #[test]
    fn test_lowercase_uuids_are_opaque(id in opaque_id()) {
        prop_assert!(is_opaque_id(&id));
        prop_assert_eq!(EntityReference::parse(&id).unwrap(), EntityReference::OpaqueId(id));
    }

    #[test]
    fn test_uppercase_uuids_are_not_opaque(id in "[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}") {
        prop_assume!(id.bytes().any(|b| b.is_ascii_uppercase()));
        prop_assert!(!is_opaque_id(&id));
    }

    #[test]
    fn test_compound_keys_normalize_team(team in "[a-zA-Z]{1,8}", number in 0u64..1_000_000) {
        let reference = format!("{}-{}", team, number);
        let parsed = EntityReference::parse(&reference).unwrap();
        prop_assert_eq!(
            parsed.clone(),
            EntityReference::CompoundKey { team_key: team.to_ascii_uppercase(), number }
        );
        prop_assert_eq!(parsed.to_string(), format!("{}-{}", team.to_ascii_uppercase(), number));
    }

    #[test]
    fn test_leading_zero_numbers_are_invalid(team in "[A-Z]{1,5}", digits in "0[0-9]{1,5}") {
        let reference = format!("{}-{}", team, digits);
        prop_assert!(EntityReference::parse(&reference).is_err());
    }

    #[test]
    fn test_typed_failures_pass_through(message in ".{0,40}", index in 0usize..ErrorCode::ALL.len()) {
        let original = CliError::new(ErrorCode::ALL[index], message);
        let classified = classify(&Failure::from(original.clone()));
        prop_assert_eq!(classified, original);
    }

    #[test]
    fn test_array_success_equals_pageless_list(values in prop::collection::vec(any::<i64>(), 0..8)) {
        let rows: Vec<Value> = values.iter().map(|v| json!({ "n": v })).collect();
        prop_assert_eq!(
            build_success(Value::Array(rows.clone())),
            build_success_list(rows, None)
        );
    }

    #[test]
    fn test_truncate_respects_width(text in "\\PC{0,80}", width in 1usize..40) {
        let out = truncate(&text, width);
        prop_assert!(out.chars().count() <= width);
        if text.chars().count() <= width {
            prop_assert_eq!(out, text);
        }
    }

    #[test]
    fn test_classification_is_total_and_idempotent(message in "\\PC{0,60}") {
        let first = classify(&Failure::Error(anyhow::anyhow!(message.clone())));
        prop_assert!(ErrorCode::ALL.contains(&first.code));
        let second = classify(&Failure::from(first.clone()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_envelopes_survive_encoding(
        values in prop::collection::vec(any::<i64>(), 0..5),
        ratios in prop::collection::vec(
            any::<f64>().prop_filter("finite", |f| f.is_finite()),
            0..5,
        ),
        has_next in any::<bool>(),
        cursor in prop::option::of("[a-z0-9]{1,12}"),
        message in "[ -~]{0,30}",
    ) {
        let rows: Vec<Value> = values
            .iter()
            .map(|v| json!({ "n": v }))
            .chain(ratios.iter().map(|f| json!({ "progress": f })))
            .collect();
        let page_info = PageInfo {
            has_next_page: has_next,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: cursor,
        };
        for envelope in [
            build_success(json!({ "rows": rows.clone() })),
            build_success_list(rows.clone(), Some(page_info.clone())),
            build_error(ErrorCode::NotFound, message.clone(), None),
        ] {
            let text = serde_json::to_string(&envelope).unwrap();
            let decoded: ResponseEnvelope = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(decoded, envelope);
        }
    }
}
