// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Turning runtime types into JSON schemas.
//!
//! A [`TypeReflector`] produces the raw schema tree for a type. The
//! [`SchemaEngine`] then applies the type-level mutations (which see the
//! source type) followed by each tree-level mutation, walked depth-first over
//! the whole tree.

pub mod mutation;
pub mod reflector;

use std::collections::HashMap;
use std::sync::Arc;

use rpc_introspection::JsonSchema;
use tracing::trace;

use crate::error::ReflectError;
use crate::types::{TypeIdentity, TypeInfo, TypeKind};

pub use reflector::{DefaultReflector, TypeReflector};

pub type TypeMapper = Arc<dyn Fn(&TypeInfo) -> Option<JsonSchema> + Send + Sync>;

/// Applied once to the top-level schema of a field, with the field's type.
pub type TypeMutation = Arc<dyn Fn(&mut JsonSchema, &TypeInfo) + Send + Sync>;

/// Applied to every node of the tree. The first argument is the tree as it
/// was before this mutation started.
pub type TreeMutation =
    Arc<dyn Fn(&JsonSchema, &mut JsonSchema) -> Result<(), ReflectError> + Send + Sync>;

#[derive(Clone)]
pub struct SchemaOptions {
    /// Types reflected as an empty (unconstrained) schema
    pub ignored_types: Vec<TypeIdentity>,
    /// Fixed schemas for specific named types
    pub type_overrides: HashMap<TypeIdentity, JsonSchema>,
    /// Consulted for every type before its structure is reflected
    pub type_mapper: Option<TypeMapper>,
    pub type_mutations: Vec<TypeMutation>,
    pub tree_mutations: Vec<TreeMutation>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            ignored_types: Vec::new(),
            type_overrides: HashMap::new(),
            type_mapper: Some(Arc::new(mutation::any_value_mapper)),
            type_mutations: vec![
                Arc::new(mutation::description_from_type),
                Arc::new(mutation::nilable_from_type),
            ],
            tree_mutations: vec![
                Arc::new(mutation::require_by_default),
                Arc::new(mutation::expand_references),
                Arc::new(mutation::remove_definitions),
                Arc::new(mutation::normalize_additional_properties),
            ],
        }
    }
}

impl SchemaOptions {
    pub fn with_ignored_type(mut self, identity: TypeIdentity) -> Self {
        self.ignored_types.push(identity);
        self
    }

    pub fn with_type_override(mut self, identity: TypeIdentity, schema: JsonSchema) -> Self {
        self.type_overrides.insert(identity, schema);
        self
    }
}

pub struct SchemaEngine {
    options: SchemaOptions,
    reflector: Arc<dyn TypeReflector>,
}

impl Default for SchemaEngine {
    fn default() -> Self {
        Self::new(SchemaOptions::default())
    }
}

impl SchemaEngine {
    pub fn new(options: SchemaOptions) -> Self {
        Self {
            options,
            reflector: Arc::new(DefaultReflector),
        }
    }

    pub fn with_reflector(mut self, reflector: Arc<dyn TypeReflector>) -> Self {
        self.reflector = reflector;
        self
    }

    pub fn type_to_schema(&self, ty: &TypeInfo) -> Result<JsonSchema, ReflectError> {
        if let TypeKind::Func | TypeKind::Chan(_) = ty.deref().kind {
            return Err(ReflectError::UnsupportedType {
                type_name: ty.printed(),
                reason: "functions and channels have no JSON representation".to_string(),
            });
        }

        let mut schema = self.reflector.reflect(ty, &self.options)?;

        for mutation in &self.options.type_mutations {
            mutation(&mut schema, ty);
        }

        for mutation in &self.options.tree_mutations {
            let root = schema.clone();
            schema.walk_depth_first(&mut |node| mutation(&root, node))?;
        }

        trace!(type_name = %ty, "reflected schema");
        Ok(schema)
    }
}
