//! Message composition, category membership, and schema checks across the
//! whole taxonomy.

use orm_core::errors::*;
use orm_core::options::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use schemars::schema_for;

fn driver() -> DriverError {
    DriverError::new("ERR-DRIVER")
        .with_sql_state("XX999")
        .with_vendor_code(4242)
}

fn sql() -> Option<String> {
    Some("update t_orders set status = ?".to_string())
}

/// One instance of every leaf, paired with the field values its message
/// must mention.
fn every_leaf() -> Vec<(OrmError, Vec<&'static str>)> {
    vec![
        (
            OrmError::invalid_setting("orm.flush_mode", "sometimes", &["manual", "auto"]),
            vec!["orm.flush_mode", "sometimes", "manual"],
        ),
        (OrmError::unknown_profile("eager-orders"), vec!["eager-orders"]),
        (OrmError::unknown_filter("tenantFilter"), vec!["tenantFilter"]),
        (OrmError::instantiation("AuditInterceptor"), vec!["AuditInterceptor"]),
        (OrmError::mapping("bad mapping for Invoice"), vec!["Invoice"]),
        (
            OrmError::duplicate_mapping(DuplicateKind::Table, "t_orders"),
            vec!["table", "t_orders"],
        ),
        (
            OrmError::mapping_not_found("resource", "orders.xml"),
            vec!["resource", "orders.xml"],
        ),
        (
            OrmError::property_not_found("Order", "totl"),
            vec!["Order", "totl"],
        ),
        (OrmError::unknown_entity_type("Shipment"), vec!["Shipment"]),
        (OrmError::generic_jdbc(driver(), sql()), vec!["ERR-DRIVER", "t_orders"]),
        (OrmError::sql_grammar(driver(), sql()), vec!["ERR-DRIVER", "t_orders"]),
        (
            OrmError::constraint_violation(
                driver(),
                sql(),
                ConstraintKind::ForeignKey,
                Some("fk_customer".to_string()),
            ),
            vec!["ERR-DRIVER", "t_orders", "fk_customer", "foreign_key"],
        ),
        (OrmError::data_error(driver(), sql()), vec!["XX999", "t_orders"]),
        (OrmError::jdbc_connection(driver(), None), vec!["4242"]),
        (OrmError::query_timeout(driver(), sql()), vec!["ERR-DRIVER"]),
        (OrmError::lock_acquisition(driver(), sql()), vec!["ERR-DRIVER"]),
        (OrmError::pessimistic_lock(driver(), sql()), vec!["ERR-DRIVER"]),
        (OrmError::lock_timeout(driver(), sql()), vec!["ERR-DRIVER"]),
        (OrmError::stale_state("batch update returned 0 rows"), vec!["0 rows"]),
        (OrmError::stale_object_state("Order", 17), vec!["Order", "17"]),
        (
            OrmError::optimistic_entity_lock(
                "Order",
                Some(Identifier::from("A-17")),
                LockMode::Optimistic,
            ),
            vec!["Order", "A-17", "optimistic"],
        ),
        (OrmError::session("session is disconnected"), vec!["disconnected"]),
        (OrmError::resource_closed("ScrollableResults"), vec!["ScrollableResults"]),
        (
            OrmError::lazy_initialization("could not initialize proxy Order#3"),
            vec!["Order#3"],
        ),
        (OrmError::object_not_found(3, "Order"), vec!["Order", "3"]),
        (OrmError::object_deleted(4, "Order"), vec!["Order", "4"]),
        (OrmError::wrong_class(5, "Order"), vec!["Order", "5"]),
        (OrmError::non_unique_object(6, "Order"), vec!["Order", "6"]),
        (
            OrmError::entity_filtered(7, "Order", "activeOnly"),
            vec!["Order", "7", "activeOnly"],
        ),
        (
            OrmError::transient_object(Some("LineItem".to_string())),
            vec!["LineItem"],
        ),
        (
            OrmError::transient_property_value("Customer", "Order", "customer"),
            vec!["Customer", "Order", "customer"],
        ),
        (OrmError::persistent_object(Some("Order".to_string())), vec!["Order"]),
        (OrmError::transaction("commit failed"), vec!["commit failed"]),
        (OrmError::transaction_required("executeUpdate"), vec!["executeUpdate"]),
        (OrmError::rollback_only(), vec!["rollback"]),
        (
            OrmError::query("unexpected token", Some("from Ordr".to_string())),
            vec!["from Ordr"],
        ),
        (OrmError::non_unique_result(4), vec!["4"]),
        (
            OrmError::query_parameter("no such parameter", Some("customerId".to_string())),
            vec!["customerId"],
        ),
        (
            OrmError::property_access("Order", "total", AccessDirection::Get),
            vec!["Order", "total", "getter"],
        ),
        (
            OrmError::property_value("Order", "customer"),
            vec!["Order", "customer"],
        ),
        (OrmError::assertion_failure("collection entry missing"), vec!["entry missing"]),
    ]
}

#[test]
fn every_leaf_message_mentions_its_fields() {
    for (err, fields) in every_leaf() {
        let message = err.to_string();
        for field in fields {
            assert!(
                message.contains(field),
                "{:?} message {message:?} is missing {field:?}",
                err.kind()
            );
        }
    }
}

#[test]
fn every_leaf_kind_is_covered_once() {
    let mut kinds: Vec<ErrorKind> = every_leaf().iter().map(|(err, _)| err.kind()).collect();
    let total = kinds.len();
    kinds.sort_by_key(|kind| kind.as_str());
    kinds.dedup();
    assert_eq!(kinds.len(), total);
    assert_eq!(total, 41);
}

#[test]
fn every_leaf_keeps_an_attached_cause() {
    for (err, _) in every_leaf() {
        let kind = err.kind();
        let err = err.with_cause(std::io::Error::other("disk quota exceeded"));

        let mut chain = Vec::new();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        assert_eq!(
            chain.last().map(String::as_str),
            Some("disk quota exceeded"),
            "{kind:?} lost its cause"
        );
        assert!(
            err.describe().ends_with("; caused by: disk quota exceeded"),
            "{kind:?} describe omits its cause"
        );
    }
}

#[test]
fn category_checks_match_leaf_membership() {
    for (err, _) in every_leaf() {
        assert_eq!(err.category(), err.kind().category());
        for category in [
            Category::Configuration,
            Category::Mapping,
            Category::Jdbc,
            Category::Lock,
            Category::Session,
            Category::Identity,
            Category::Usage,
            Category::Transaction,
            Category::Query,
            Category::Property,
            Category::Internal,
        ] {
            assert_eq!(err.is_category(category), err.category() == category);
        }
    }
}

#[rstest]
#[case(OrmError::sql_grammar(driver(), None), Category::Jdbc)]
#[case(OrmError::pessimistic_lock(driver(), None), Category::Lock)]
#[case(OrmError::stale_state("row count mismatch"), Category::Lock)]
#[case(OrmError::wrong_class(1, "Order"), Category::Identity)]
#[case(OrmError::rollback_only(), Category::Transaction)]
fn category_pattern_matching(#[case] err: OrmError, #[case] expected: Category) {
    let matched = match err {
        OrmError::Jdbc(_) => Category::Jdbc,
        OrmError::Lock(_) => Category::Lock,
        OrmError::Identity(_) => Category::Identity,
        OrmError::Transaction(_) => Category::Transaction,
        _ => Category::Internal,
    };
    assert_eq!(matched, expected);
}

#[test]
fn only_non_unique_result_is_recoverable() {
    for (err, _) in every_leaf() {
        assert_eq!(err.is_recoverable(), err.kind() == ErrorKind::NonUniqueResult);
    }
}

#[test]
fn only_assertion_failure_is_internal() {
    for (err, _) in every_leaf() {
        assert_eq!(err.is_internal(), err.kind() == ErrorKind::AssertionFailure);
    }
}

#[test]
fn object_not_found_reads_back_context() {
    let id = Identifier::from(vec![Identifier::from(10), Identifier::from("EU")]);
    let err = OrmError::object_not_found(id.clone(), "Order");
    assert_eq!(err.identifier(), Some(&id));
    assert_eq!(err.entity_name(), Some("Order"));
    assert_eq!(
        err.to_string(),
        "No row with the given identifier exists: [Order#(10, EU)]"
    );
}

#[test]
fn absent_context_never_panics() {
    let messages = [
        OrmError::transient_object(None).to_string(),
        OrmError::persistent_object(None).to_string(),
        OrmError::query("bad", None).to_string(),
        OrmError::optimistic_entity_lock("", None, LockMode::None).to_string(),
        OrmError::constraint_violation(DriverError::new(""), None, ConstraintKind::Other, None)
            .to_string(),
    ];
    assert!(messages.iter().all(|message| !message.is_empty()));
}

// --- Schema validation ---

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

macro_rules! schema_accepts {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
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

schema_accepts!(identifier_schema, Identifier, Identifier::from(vec![Identifier::from(1), Identifier::from("x")]));
schema_accepts!(error_kind_schema, ErrorKind, ErrorKind::OptimisticEntityLock);
schema_accepts!(category_schema, Category, Category::Identity);
schema_accepts!(lock_mode_schema, LockMode, LockMode::PessimisticForceIncrement);
schema_accepts!(
    handling_mode_schema,
    PhysicalConnectionHandlingMode,
    PhysicalConnectionHandlingMode::DelayedAcquisitionAndReleaseBeforeTransactionCompletion
);
schema_accepts!(cache_mode_schema, CacheMode, CacheMode::Refresh);

#[test]
fn schema_rejects_unknown_variant() {
    let schema = serde_json::to_value(schema_for!(FlushMode)).unwrap();
    let errors = validate_against_schema(&schema, &serde_json::json!("sometimes"));
    assert!(!errors.is_empty());
}
