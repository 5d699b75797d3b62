//! Property-based tests for report merging and reconstruction.

use proptest::prelude::*;
use turnstile::{FieldError, FieldValue, Location, ValidationReport};

fn arb_location() -> impl Strategy<Value = Location> {
    prop_oneof![
        Just(Location::Path),
        Just(Location::Query),
        Just(Location::Body),
    ]
}

fn arb_value() -> impl Strategy<Value = Option<FieldValue>> {
    prop_oneof![
        Just(None),
        any::<i64>().prop_map(|n| Some(FieldValue::Int(n))),
        "[a-z]{0,8}".prop_map(|s| Some(FieldValue::Str(s))),
        any::<bool>().prop_map(|b| Some(FieldValue::Bool(b))),
    ]
}

prop_compose! {
    fn arb_fragment()(
        field in "[a-z]{1,6}",
        value in arb_value(),
        location in arb_location(),
        failed in any::<bool>(),
    ) -> ValidationReport {
        let errors = if failed {
            vec![FieldError {
                field: field.clone(),
                location,
                message: "Invalid value".into(),
                value: String::new(),
            }]
        } else {
            Vec::new()
        };
        // A failed field has no final value, mirroring chain output.
        let value = if failed { None } else { value };
        ValidationReport::fragment(field, value, errors)
    }
}

proptest! {
    #[test]
    fn merge_is_associative(
        a in arb_fragment(),
        b in arb_fragment(),
        c in arb_fragment(),
    ) {
        let left = ValidationReport::merge([
            ValidationReport::merge([a.clone(), b.clone()]),
            c.clone(),
        ]);
        let right = ValidationReport::merge([
            a.clone(),
            ValidationReport::merge([b.clone(), c.clone()]),
        ]);
        let flat = ValidationReport::merge([a, b, c]);

        prop_assert_eq!(&left, &right);
        prop_assert_eq!(&left, &flat);
    }

    #[test]
    fn empty_report_is_merge_identity(fragment in arb_fragment()) {
        let left = ValidationReport::merge([ValidationReport::new(), fragment.clone()]);
        let right = ValidationReport::merge([fragment.clone(), ValidationReport::new()]);

        prop_assert_eq!(&left, &fragment);
        prop_assert_eq!(&right, &fragment);
    }

    #[test]
    fn has_errors_iff_errors_nonempty(fragments in prop::collection::vec(arb_fragment(), 0..6)) {
        let merged = ValidationReport::merge(fragments);
        prop_assert_eq!(merged.has_errors(), !merged.errors().is_empty());
    }

    #[test]
    fn by_field_entries_are_a_subset_of_errors(
        fragments in prop::collection::vec(arb_fragment(), 0..6),
    ) {
        let merged = ValidationReport::merge(fragments);
        let by_field = merged.by_field();

        prop_assert!(by_field.len() <= merged.errors().len());
        for (field, error) in &by_field {
            // Each view entry is the last accumulated error for its field.
            let last = merged
                .errors()
                .iter()
                .rev()
                .find(|e| &e.field == field)
                .expect("field came from the error list");
            prop_assert_eq!(error, last);
        }
    }

    #[test]
    fn passed_json_only_contains_passing_fields(
        fragments in prop::collection::vec(arb_fragment(), 0..6),
    ) {
        let merged = ValidationReport::merge(fragments);
        let passed = merged.passed_json();
        let object = passed.as_object().expect("always an object");

        // Flat single-segment names only in this generator, so membership
        // maps directly onto top-level keys.
        for (field, _) in object {
            prop_assert!(merged.value_of(field).is_some());
        }
        for error in merged.errors() {
            if merged.value_of(&error.field).is_none() {
                // Fields that never passed must not leak values.
                prop_assert!(!object.contains_key(&error.field));
            }
        }
    }
}
