// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Moves inline method schemas into `components.schemas`.
//!
//! Every schema node reachable from a method's params and result is replaced
//! (children first) by a reference to a component keyed by the node's content,
//! so identical schemas share one entry.

use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::openrpc::{Components, OpenRpcDocument};
use crate::schema::JsonSchema;

const HASH_PREFIX_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A content-derived hash of `schema` that does not depend on key order.
pub fn canonical_hash(schema: &JsonSchema) -> Result<String, SchemaError> {
    let value = serde_json::to_value(schema)?;
    let mut canonical = String::new();
    write_canonical(&value, &mut canonical)?;

    let digest = Sha256::digest(canonical.as_bytes());
    let mut hash = base16ct::lower::encode_string(&digest);
    hash.truncate(HASH_PREFIX_LEN);
    Ok(hash)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<(), SchemaError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            out.push('{');
            for (index, (key, value)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(value, out)?;
            }
            out.push('}');
        }
        Value::Array(values) => {
            out.push('[');
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(value, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Component key for a schema: a readable prefix plus its canonical hash.
pub fn component_key(schema: &JsonSchema) -> Result<String, SchemaError> {
    let prefix = schema
        .title
        .as_deref()
        .or(schema.schema_type.as_deref())
        .unwrap_or("schema");
    Ok(format!("{prefix}_{}", canonical_hash(schema)?))
}

/// Replace every inline schema in the document's methods with a component reference.
///
/// Running this on an already flattened document changes nothing, since pure
/// references are left in place.
pub fn flatten_schemas(document: &mut OpenRpcDocument) -> Result<(), SchemaError> {
    let mut components = document.components.take().unwrap_or_default();

    let result = document.methods.iter_mut().try_for_each(|method| {
        method
            .content_descriptors_mut()
            .try_for_each(|descriptor| flatten_node(&mut descriptor.schema, &mut components))
    });

    if !components.schemas.is_empty() {
        document.components = Some(components);
    }
    result
}

fn flatten_node(schema: &mut JsonSchema, components: &mut Components) -> Result<(), SchemaError> {
    if schema.is_pure_reference() {
        return Ok(());
    }

    for child in schema.children_mut() {
        flatten_node(child, components)?;
    }

    let key = component_key(schema)?;
    let reference = JsonSchema::component_ref(&key);
    let definition = std::mem::replace(schema, reference);
    components.schemas.entry(key).or_insert(definition);
    Ok(())
}
