//! Schema-driven parameter coercion.
//!
//! CLI parameters arrive as strings; the charm's action schema declares
//! some of them as integers, numbers, or booleans. Coercion is lenient:
//! anything the schema does not cover, or that fails to parse, goes
//! through as the original string and the orchestrator gets the final
//! say.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use ceph_bench_juju::{ActionSchemas, ParamKind};

/// Coerce string parameters to their schema-declared types.
pub fn coerce_params(
    schemas: &ActionSchemas,
    action: &str,
    params: &BTreeMap<String, String>,
) -> BTreeMap<String, Value> {
    params
        .iter()
        .map(|(key, raw)| {
            let kind = schemas.kind_of(action, key).unwrap_or(ParamKind::String);
            (key.clone(), coerce_one(action, key, raw, kind))
        })
        .collect()
}

fn coerce_one(action: &str, key: &str, raw: &str, kind: ParamKind) -> Value {
    let coerced = match kind {
        ParamKind::Integer => raw.parse::<i64>().ok().map(Value::from),
        ParamKind::Number => raw.parse::<f64>().ok().map(Value::from),
        ParamKind::Boolean => raw.parse::<bool>().ok().map(Value::from),
        ParamKind::String => return Value::from(raw),
    };
    coerced.unwrap_or_else(|| {
        warn!(action, key, value = raw, "parameter does not parse as its declared type");
        Value::from(raw)
    })
}
