//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::Utc;
use desk_core::entities::*;
use desk_core::enums::*;
use desk_core::responses::*;
use desk_core::trail::TrailOperation;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_ticket() -> Ticket {
    let now = Utc::now();
    Ticket {
        id: "tkt-a3f8b2c1".into(),
        category_ref: CategoryRef::new("cat-0badf00d"),
        issue_type: "Outage".into(),
        description: "core switch down".into(),
        status: TicketStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

roundtrip_and_validate!(
    category_roundtrip,
    Category,
    Category {
        id: "cat-0badf00d".into(),
        name: "Network".into(),
        issue_types: vec!["Outage".into(), "Slow".into()],
    }
);

roundtrip_and_validate!(ticket_roundtrip, Ticket, sample_ticket());

roundtrip_and_validate!(
    labeled_ticket_roundtrip,
    LabeledTicket,
    LabeledTicket {
        ticket: sample_ticket(),
        category: UNKNOWN_CATEGORY.into(),
    }
);

roundtrip_and_validate!(
    trail_operation_roundtrip,
    TrailOperation,
    TrailOperation {
        v: 1,
        ts: Utc::now().to_rfc3339(),
        run: "run-12345678".into(),
        op: TrailOp::Replace,
        entity: EntityType::Category,
        id: "taxonomy".into(),
        data: serde_json::json!({"removed": 2, "inserted": 3}),
    }
);

#[test]
fn ticket_document_stores_category_id_field() {
    let json = serde_json::to_value(sample_ticket()).unwrap();
    assert_eq!(json["category_id"], "cat-0badf00d");
    assert!(json.get("category_ref").is_none());
    assert_eq!(json["status"], "pending");
}

#[test]
fn labeled_ticket_flattens_ticket_fields() {
    let labeled = LabeledTicket {
        ticket: sample_ticket(),
        category: "Network".into(),
    };
    let json = serde_json::to_value(&labeled).unwrap();
    assert_eq!(json["id"], "tkt-a3f8b2c1");
    assert_eq!(json["category"], "Network");
}

#[test]
fn category_ref_shape() {
    assert!(CategoryRef::new("cat-0badf00d").is_well_formed());
    assert!(!CategoryRef::new("507f1f77bcf86cd799439011").is_well_formed());
}

#[test]
fn category_allows_only_listed_issue_types() {
    let category = Category {
        id: "cat-0badf00d".into(),
        name: "Network".into(),
        issue_types: vec!["Outage".into()],
    };
    assert!(category.allows("Outage"));
    assert!(!category.allows("outage"));
}
