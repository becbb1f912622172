//! Property tests for the pipeline laws: passthrough, idempotence,
//! projection, pagination composition and scope independence.

use proptest::prelude::*;
use quarry_core::{
    query::Query,
    record::{Record, Source},
    value::Value,
};

const NAMES: [&str; 6] = ["Bob", "Rob", "Tim", "Hap", "Ted", "Sam"];

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(&NAMES[..]),
        0_i64..60,
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(name, age, flag)| {
            let mut record = Record::new().with("name", name).with("age", age);
            if let Some(flag) = flag {
                record.insert("flag", flag);
            }
            record
        })
}

fn arb_source() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..24)
}

// Filter + order applied by hand, used as the reference for window laws.
fn reference_rows(records: &[Record], min_age: i64) -> Vec<Record> {
    let mut rows: Vec<Record> = records
        .iter()
        .filter(|r| r.get("age").and_then(Value::as_i64).is_some_and(|a| a > min_age))
        .cloned()
        .collect();
    rows.sort_by_key(|r| r.get("age").and_then(Value::as_i64).unwrap_or_default());
    rows
}

proptest! {
    #[test]
    fn empty_settings_return_the_source(records in arb_source()) {
        let response = Query::with_source(records.clone()).execute().expect("execute");

        prop_assert_eq!(response.records(), Some(records.as_slice()));
    }

    #[test]
    fn execute_is_idempotent(records in arb_source(), min_age in 0_i64..60, limit in 0_u32..10) {
        let query = Query::with_source(records)
            .where_with("age > ?", min_age)
            .order_by_desc("age")
            .limit(limit);

        prop_assert_eq!(query.execute(), query.execute());
    }

    #[test]
    fn projection_matches_surviving_records(records in arb_source(), min_age in 0_i64..60) {
        let base = Query::with_source(records).where_with("age > ?", min_age).order_by("age");
        let rows = base.execute().expect("rows");
        let projected = base.scope().select("flag").execute().expect("projected");

        prop_assert_eq!(projected.len(), rows.len());
        let expected: Vec<Value> = rows
            .records()
            .unwrap_or_default()
            .iter()
            .map(|r| r.get("flag").cloned().unwrap_or(Value::Null))
            .collect();
        prop_assert_eq!(projected.values(), Some(expected.as_slice()));
    }

    #[test]
    fn pagination_is_take_of_drop(
        records in arb_source(),
        min_age in 0_i64..60,
        offset in 0_u32..30,
        limit in 0_u32..30,
    ) {
        let response = Query::with_source(records.clone())
            .where_with("age > ?", min_age)
            .order_by("age")
            .offset(offset)
            .limit(limit)
            .execute()
            .expect("execute");

        let expected: Vec<Record> = reference_rows(&records, min_age)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        prop_assert_eq!(response.records(), Some(expected.as_slice()));
    }

    #[test]
    fn scope_is_independent(records in arb_source(), min_age in 0_i64..60, limit in 0_u32..10) {
        let source = Source::new(records);
        let original = Query::with_source(source).where_with("age > ?", min_age);
        let before = original.execute().expect("before");

        let scoped = original.scope().order_by_desc("name").limit(limit).select("name");
        let _ = scoped.execute().expect("scoped");
        let scoped_before = scoped.execute().expect("scoped");

        prop_assert_eq!(original.execute().expect("after"), before);

        let _original = original.order_by("age").limit(1);
        prop_assert_eq!(scoped.execute().expect("scoped after"), scoped_before);
    }
}
