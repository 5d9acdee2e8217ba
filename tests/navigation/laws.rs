// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use lazypath::*;
use serde_json::json;

fn samples() -> Vec<Value> {
    vec![
        Value::from(json!(null)),
        Value::from(json!(42)),
        Value::from(json!("text")),
        Value::from(json!({"a": 1, "b": [1, 2]})),
        Value::from(json!([])),
        Value::from(json!([1, 2, 3])),
        Value::from(json!([{"a": 1}, {"b": 2}, {"a": 3}])),
        Value::from(json!([[{"a": 1}], [], [{"a": 2}, {"a": 3}]])),
        Value::from(json!([{"a": 1}, "x", [1], 2.5])),
        Value::record(FieldRecord::new("Meta").with_field("a", 7)),
    ]
}

fn outcome(result: LookupResult<Navigable>) -> Result<Vec<Value>, LookupError> {
    result.map(|n| n.values().collect())
}

#[test]
fn classification_is_idempotent() -> Result<()> {
    for value in samples() {
        let once = classify(value.clone());
        let twice = classify(classify(value.clone()).into_value());
        assert_eq!(once.kind(), twice.kind(), "{value}");

        for step in [Step::from("a"), Step::Index(0), Step::Slice(Slice::from(1..))] {
            assert_eq!(
                outcome(classify(value.clone()).apply(&step)),
                outcome(classify(classify(value.clone()).into_value()).apply(&step)),
                "{value} {step}"
            );
        }
        assert_eq!(
            once.values().collect::<Vec<_>>(),
            twice.values().collect::<Vec<_>>()
        );
    }
    Ok(())
}

#[test]
fn broadcast_keeps_exactly_the_elements_with_the_key() -> Result<()> {
    let items = Value::from(json!([
        {"a": 1}, {"b": 2}, {"a": null}, {"a": [3]}, {}, {"a": {"c": 4}}
    ]));
    let expected: Vec<Value> = items
        .as_array()?
        .iter()
        .filter_map(|item| item.get("a"))
        .collect();

    let projected: Vec<Value> = classify(items.clone()).by_attribute("a")?.values().collect();
    assert_eq!(projected, expected);
    assert!(projected.len() <= items.as_array()?.len());

    // No element has the key.
    let none: Vec<Value> = classify(items).by_attribute("zzz")?.values().collect();
    assert!(none.is_empty());
    Ok(())
}

#[test]
fn projection_over_nested_sequences_flattens() -> Result<()> {
    let nested = Value::from(json!([
        [{"k": 1}, {"x": 0}, {"k": 2}],
        [],
        [{"k": 3}],
        [{"x": 1}]
    ]));

    let mut expected = vec![];
    for inner in nested.as_array()? {
        expected.extend(classify(inner.clone()).by_attribute("k")?.values());
    }

    let flattened: Vec<Value> = classify(nested).by_attribute("k")?.values().collect();
    assert_eq!(flattened, expected);
    assert_eq!(flattened, vec![Value::from(1), Value::from(2), Value::from(3)]);
    Ok(())
}

#[test]
fn slices_are_clamped() -> Result<()> {
    let items: Vec<Value> = (0..5i64).map(Value::from).collect();
    let n = items.len() as i64;

    for i in -3..8 {
        for j in -3..8 {
            let lo = i.clamp(0, n);
            let hi = j.clamp(0, n).max(lo);
            let expected: Vec<Value> = (lo..hi).map(Value::from).collect();

            let sliced = classify(Value::from(items.clone())).by_index_or_slice(i..j)?;
            assert!(matches!(sliced, Navigable::Sequence(_)));
            assert_eq!(sliced.values().collect::<Vec<_>>(), expected, "[{i}:{j}]");
        }
    }
    Ok(())
}

#[test]
fn open_slices() -> Result<()> {
    let items = || classify(json!([1, 2, 3, 4]));
    let take = |n: Navigable| n.values().collect::<Vec<_>>();

    assert_eq!(take(items().by_index_or_slice(2..)?), vec![Value::from(3), Value::from(4)]);
    assert_eq!(take(items().by_index_or_slice(..1)?), vec![Value::from(1)]);
    assert_eq!(take(items().by_index_or_slice(..)?).len(), 4);
    Ok(())
}

#[test]
fn index_on_scalars_is_positional() -> Result<()> {
    let items = || classify(json!(["a", "b", "c"]));
    let single = |n: Navigable| n.values().collect::<Vec<_>>();

    assert_eq!(single(items().by_index_or_slice(0)?), vec![Value::from("a")]);
    assert_eq!(single(items().by_index_or_slice(-1)?), vec![Value::from("c")]);
    assert!(matches!(
        items().by_index_or_slice(-4),
        Err(LookupError::IndexOutOfRange { index: -4, len: 3 })
    ));

    // Index into nothing is nothing.
    assert!(single(classify(json!([])).by_index_or_slice(5)?).is_empty());
    Ok(())
}

#[test]
fn index_broadcasts_over_nested_sequences() -> Result<()> {
    let nested = classify(json!([[1, 2], [3], [4, 5, 6]]));
    let seconds: Vec<Value> = nested.by_index_or_slice(1)?.values().collect();
    assert_eq!(seconds, vec![Value::from(2), Value::from(5)]);
    Ok(())
}
