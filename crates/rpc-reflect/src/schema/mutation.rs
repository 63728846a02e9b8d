// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The built-in schema mutations.

use indexmap::IndexMap;
use rpc_introspection::{AdditionalProperties, JsonSchema};

use crate::error::ReflectError;
use crate::types::TypeInfo;

/// The empty interface accepts any JSON value.
pub fn any_value_mapper(ty: &TypeInfo) -> Option<JsonSchema> {
    if !ty.is_empty_interface() {
        return None;
    }
    Some(JsonSchema::one_of(
        ["array", "object", "string", "number", "integer", "boolean", "null"]
            .into_iter()
            .map(JsonSchema::new)
            .collect(),
    ))
}

pub fn description_from_type(schema: &mut JsonSchema, ty: &TypeInfo) {
    if schema.description.is_none() {
        schema.description = Some(ty.full_name());
    }
}

/// Pointers and slices may be null.
pub fn nilable_from_type(schema: &mut JsonSchema, ty: &TypeInfo) {
    if ty.is_nilable() {
        let inner = std::mem::take(schema);
        *schema = JsonSchema::one_of(vec![inner, JsonSchema::null()]);
    }
}

/// Without explicitly required properties, every property is required.
pub fn require_by_default(_root: &JsonSchema, node: &mut JsonSchema) -> Result<(), ReflectError> {
    if node.required.is_empty() && !node.properties.is_empty() {
        node.required = node.properties.keys().cloned().collect();
    }
    Ok(())
}

/// Inline every `#/definitions/...` reference.
///
/// A description on the referencing node survives when the definition has none.
pub fn expand_references(root: &JsonSchema, node: &mut JsonSchema) -> Result<(), ReflectError> {
    let Some(name) = node.definition_target() else {
        return Ok(());
    };

    let definitions = collect_definitions(root);
    let expanded = resolve(&name, &definitions, &mut Vec::new())?;
    replace_keeping_description(node, expanded);
    Ok(())
}

pub fn remove_definitions(_root: &JsonSchema, node: &mut JsonSchema) -> Result<(), ReflectError> {
    node.definitions.clear();
    Ok(())
}

/// Boolean `additionalProperties` become the empty schema.
pub fn normalize_additional_properties(
    _root: &JsonSchema,
    node: &mut JsonSchema,
) -> Result<(), ReflectError> {
    if let Some(AdditionalProperties::Allowed(_)) = node.additional_properties {
        node.additional_properties = Some(AdditionalProperties::Schema(Box::default()));
    }
    Ok(())
}

fn collect_definitions(root: &JsonSchema) -> IndexMap<&str, &JsonSchema> {
    let mut definitions = IndexMap::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        for (name, definition) in &node.definitions {
            definitions.entry(name.as_str()).or_insert(definition);
        }
        pending.extend(node.children());
    }
    definitions
}

fn resolve(
    name: &str,
    definitions: &IndexMap<&str, &JsonSchema>,
    expanding: &mut Vec<String>,
) -> Result<JsonSchema, ReflectError> {
    if expanding.iter().any(|outer| outer == name) {
        return Err(ReflectError::UnsupportedType {
            type_name: name.to_string(),
            reason: "recursive type".to_string(),
        });
    }
    let definition = definitions
        .get(name)
        .ok_or_else(|| ReflectError::UnsupportedType {
            type_name: name.to_string(),
            reason: "unresolved reference".to_string(),
        })?;

    expanding.push(name.to_string());
    let mut expanded = (*definition).clone();
    expanded.definitions.clear();
    expanded.walk_depth_first(&mut |child| {
        if let Some(inner) = child.definition_target() {
            let resolved = resolve(&inner, definitions, expanding)?;
            replace_keeping_description(child, resolved);
        }
        Ok::<_, ReflectError>(())
    })?;
    expanding.pop();

    Ok(expanded)
}

fn replace_keeping_description(node: &mut JsonSchema, replacement: JsonSchema) {
    let description = node.description.take();
    *node = replacement;
    if node.description.is_none() {
        node.description = description;
    }
}
