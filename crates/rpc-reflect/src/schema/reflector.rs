// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use rpc_introspection::{AdditionalProperties, JsonSchema};

use super::SchemaOptions;
use crate::error::ReflectError;
use crate::types::{StructField, TypeInfo, TypeKind};

/// Produces the raw schema tree for a type.
pub trait TypeReflector: Send + Sync {
    fn reflect(&self, ty: &TypeInfo, options: &SchemaOptions) -> Result<JsonSchema, ReflectError>;
}

/// Reflects named structs into a root `definitions` map, referenced by `$ref`.
///
/// Struct schemas disallow additional properties and list only explicitly
/// required fields as `required`. Pointers are transparent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReflector;

impl TypeReflector for DefaultReflector {
    fn reflect(&self, ty: &TypeInfo, options: &SchemaOptions) -> Result<JsonSchema, ReflectError> {
        let mut definitions = IndexMap::new();
        let mut schema = reflect_type(ty, options, &mut definitions)?;
        schema.definitions = definitions;
        Ok(schema)
    }
}

fn reflect_type(
    ty: &TypeInfo,
    options: &SchemaOptions,
    definitions: &mut IndexMap<String, JsonSchema>,
) -> Result<JsonSchema, ReflectError> {
    if ty.is_named() {
        let identity = ty.identity();
        if options.ignored_types.contains(&identity) {
            return Ok(JsonSchema::default());
        }
        if let Some(schema) = options.type_overrides.get(&identity) {
            return Ok(schema.clone());
        }
    }
    if let Some(mapped) = options.type_mapper.as_ref().and_then(|mapper| mapper(ty)) {
        return Ok(mapped);
    }

    let schema = match &ty.kind {
        TypeKind::Bool => JsonSchema::boolean(),
        TypeKind::Int | TypeKind::Uint => JsonSchema::integer(),
        TypeKind::Float => JsonSchema::number(),
        TypeKind::String => JsonSchema::string(),
        TypeKind::Pointer(elem) => reflect_type(elem, options, definitions)?,
        TypeKind::Slice(elem) | TypeKind::Array { elem, .. } => {
            // Byte sequences are serialized as strings.
            if elem.kind == TypeKind::Uint && elem.name == "uint8" {
                JsonSchema::string()
            } else {
                JsonSchema::array(reflect_type(elem, options, definitions)?)
            }
        }
        TypeKind::Map { value, .. } => JsonSchema::object().with_additional_properties(
            AdditionalProperties::Schema(Box::new(reflect_type(value, options, definitions)?)),
        ),
        TypeKind::Interface { .. } => JsonSchema::default(),
        TypeKind::Struct(fields) if ty.is_named() => {
            let name = definition_name(ty);
            // Registered before the fields are visited so that recursive
            // types end in a reference instead of unbounded recursion.
            if !definitions.contains_key(&name) {
                definitions.insert(name.clone(), JsonSchema::default());
                let definition = reflect_struct(fields, options, definitions)?;
                definitions.insert(name.clone(), definition);
            }
            JsonSchema::definition_ref(&name)
        }
        TypeKind::Struct(fields) => reflect_struct(fields, options, definitions)?,
        TypeKind::Func | TypeKind::Chan(_) => {
            return Err(ReflectError::UnsupportedType {
                type_name: ty.printed(),
                reason: "functions and channels have no JSON representation".to_string(),
            });
        }
    };
    Ok(schema)
}

/// Definitions are keyed by module-qualified name: `Point` from two modules
/// are two definitions.
pub fn definition_name(ty: &TypeInfo) -> String {
    ty.identity().to_string()
}

fn reflect_struct(
    fields: &[StructField],
    options: &SchemaOptions,
    definitions: &mut IndexMap<String, JsonSchema>,
) -> Result<JsonSchema, ReflectError> {
    let mut schema = JsonSchema::object()
        .with_additional_properties(AdditionalProperties::Allowed(false));

    for field in fields.iter().filter(|field| !field.skip) {
        let name = field.serialized_name().to_string();
        let field_schema = reflect_type(&field.ty, options, definitions)?;
        if field.required {
            schema.required.push(name.clone());
        }
        schema.properties.insert(name, field_schema);
    }
    Ok(schema)
}
