// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use std::env;

use anyhow::{bail, Result};
use lazypath::*;
use serde::Deserialize;
use test_generator::test_resources;

mod laws;

// Process test value specified in yaml to interpret special encodings.
pub fn process_value(v: &Value) -> Result<Value> {
    match v {
        // Handle record encoded as an object
        // record! :
        //   shape: Meta
        //   fields: { ... }
        //   children: [ ... ]
        Value::Object(fields)
            if fields.len() == 1 && matches!(v.get("record!"), Some(Value::Object(_))) =>
        {
            let encoded = v.get("record!").unwrap_or(Value::Null);
            let shape = match encoded.get("shape") {
                Some(Value::String(s)) => s,
                _ => bail!("record! requires a shape name"),
            };

            let mut record = FieldRecord::new(&shape);
            if let Some(fields) = encoded.get("fields") {
                for (name, value) in fields.as_object()?.iter() {
                    record = record.with_field(name, process_value(value)?);
                }
            }
            if let Some(children) = encoded.get("children") {
                let children = children
                    .as_array()?
                    .iter()
                    .map(process_value)
                    .collect::<Result<Vec<_>>>()?;
                record = record.with_children(children);
            }
            Ok(Value::record(record))
        }

        // Handle one-shot source encoded as an object
        // stream! :
        //   - item1
        //   - item2
        Value::Object(fields)
            if fields.len() == 1 && matches!(v.get("stream!"), Some(Value::Array(_))) =>
        {
            let items = v
                .get("stream!")
                .unwrap_or(Value::Null)
                .as_array()?
                .iter()
                .map(process_value)
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::stream(items))
        }

        // Recursively process arrays
        Value::Array(items) => {
            let mut array_value = Value::new_array();
            let array = array_value.as_array_mut()?;
            for item in items.iter() {
                array.push(process_value(item)?);
            }
            Ok(array_value)
        }

        // Recursively process objects
        Value::Object(fields) => {
            let mut object_value = Value::new_object();
            let object = object_value.as_object_mut()?;
            for (key, value) in fields.iter() {
                object.insert(key.clone(), process_value(value)?);
            }
            Ok(object_value)
        }

        Value::Record(_) | Value::Stream(_) => {
            bail!("unexpected {} in value read from yaml", v.type_name())
        }

        // Simple variants
        _ => Ok(v.clone()),
    }
}

fn display_values(c: &Value, e: &Value) -> Result<String> {
    Ok(format!(
        "\nleft  = {}\nright = {}\n",
        serde_json::to_string_pretty(c)?,
        serde_json::to_string_pretty(e)?
    ))
}

// Helper function to match computed and expected values.
// On mismatch, prints the failing sub-value instead of the whole value.
fn match_values_impl(computed: &Value, expected: &Value) -> Result<()> {
    match (&computed, &expected) {
        (Value::Array(a1), Value::Array(a2)) => {
            if a1.len() != a2.len() {
                bail!(
                    "array length mismatch: {} != {}{}",
                    a1.len(),
                    a2.len(),
                    display_values(computed, expected)?
                );
            }

            for (v1, v2) in a1.iter().zip(a2.iter()) {
                match_values_impl(v1, v2)?;
            }
            Ok(())
        }

        (Value::Object(o1), Value::Object(o2)) => {
            if o1.len() != o2.len() {
                bail!(
                    "object length mismatch: {} != {}{}",
                    o1.len(),
                    o2.len(),
                    display_values(computed, expected)?
                );
            }

            for ((k1, v1), (k2, v2)) in o1.iter().zip(o2.iter()) {
                if k1 != k2 {
                    bail!("key mismatch: {k1} != {k2}{}", display_values(computed, expected)?);
                }
                match_values_impl(v1, v2)?;
            }
            Ok(())
        }

        (Value::Record(r1), Value::Record(r2)) => {
            if !same_shape(&**r1, &**r2) {
                bail!(
                    "record shape mismatch: {} != {}{}",
                    r1.shape(),
                    r2.shape(),
                    display_values(computed, expected)?
                );
            }
            for name in r1.field_names() {
                match (r1.field(name), r2.field(name)) {
                    (Some(v1), Some(v2)) => match_values_impl(&v1, &v2)?,
                    _ => bail!("field `{name}` missing{}", display_values(computed, expected)?),
                }
            }
            Ok(())
        }

        (Value::Number(n1), Value::Number(n2)) if n1 == n2 => Ok(()),
        (Value::String(s1), Value::String(s2)) if s1 == s2 => Ok(()),
        (Value::Bool(b1), Value::Bool(b2)) if b1 == b2 => Ok(()),
        (Value::Null, Value::Null) => Ok(()),

        _ => bail!("value mismatch: {}", display_values(computed, expected)?),
    }
}

fn match_values(computed: &Value, expected: &Value) -> Result<()> {
    match match_values_impl(computed, expected) {
        Ok(()) => Ok(()),
        Err(e) => bail!("\nmismatch in {}{}", display_values(computed, expected)?, e),
    }
}

pub fn check_output(computed_results: &[Value], expected_results: &[Value]) -> Result<()> {
    if computed_results.len() != expected_results.len() {
        bail!(
            "the number of computed results ({}) and expected results ({}) is not equal{}",
            computed_results.len(),
            expected_results.len(),
            display_values(
                &Value::from(computed_results.to_vec()),
                &Value::from(expected_results.to_vec())
            )?
        );
    }

    for (computed, expected_result) in computed_results.iter().zip(expected_results.iter()) {
        let expected = match process_value(expected_result) {
            Ok(e) => e,
            _ => bail!("unable to process value :\n {expected_result:?}"),
        };
        match_values(computed, &expected)?;
    }

    Ok(())
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TestCase {
    note: String,
    data: Value,
    steps: Path,
    want_result: Option<Vec<Value>>,
    error: Option<String>,
    limit: Option<usize>,
    skip: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let _ = env_logger::try_init();

    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        if case.skip == Some(true) {
            println!("skipped");
            continue;
        }

        match (&case.want_result, &case.error) {
            (Some(_), None) | (None, Some(_)) => (),
            _ => bail!("either want_result or error must be specified in test case."),
        }

        let data = process_value(&case.data)?;
        match case.steps.evaluate(data) {
            Ok(values) => match &case.want_result {
                Some(want_result) => {
                    let results: Vec<Value> = match case.limit {
                        Some(n) => values.take(n).collect(),
                        None => values.collect(),
                    };
                    check_output(&results, want_result)?;
                }
                None => bail!("`{}` succeeded and did not produce any errors", case.steps),
            },
            Err(actual) => match &case.error {
                Some(expected) => {
                    let actual = actual.to_string();
                    if !actual.contains(expected) {
                        bail!(
                            "Error message\n`{}\n`\ndoes not contain `{}`",
                            actual,
                            expected
                        );
                    }
                    println!("{actual}");
                }
                None => return Err(actual.into()),
            },
        }

        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test]
#[ignore = "intended for running a single yaml file"]
fn one_yaml() -> Result<()> {
    let mut file = String::default();

    for a in env::args() {
        if a.ends_with(".yaml") {
            file = a;
        }
    }

    if file.is_empty() {
        bail!("missing <yaml-file>");
    }

    yaml_test(file.as_str())
}

#[test_resources("tests/navigation/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}
