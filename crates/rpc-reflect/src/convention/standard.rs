// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use rpc_introspection::ContentDescriptor;

use super::{Convention, ConventionConfig};
use crate::callable::Callable;
use crate::declaration::DeclarationRecord;
use crate::descriptor::{DescriptorPolicy, build_content_descriptor};
use crate::error::ReflectError;
use crate::fields::{NamedField, expand_field_list};
use crate::schema::SchemaEngine;
use crate::types::TypeInfo;

/// Methods of the shape `func (r *Receiver) Method(arg Arg, reply *Reply) error`.
pub struct StandardConvention {
    config: ConventionConfig,
    engine: SchemaEngine,
    policy: Arc<dyn DescriptorPolicy>,
}

impl StandardConvention {
    pub fn new(config: ConventionConfig) -> Self {
        let engine = SchemaEngine::new(config.schema.clone());
        let policy = config
            .descriptor_policy
            .clone()
            .unwrap_or_else(|| Arc::new(PrintedTypeDescriptors));
        Self {
            config,
            engine,
            policy,
        }
    }
}

impl Default for StandardConvention {
    fn default() -> Self {
        Self::new(ConventionConfig::default())
    }
}

/// Exported, `(Arg, *Reply) error`, with exported or built-in argument types.
pub fn is_standard_eligible(callable: &Callable) -> bool {
    if !callable.exported {
        return false;
    }
    let [arg, reply] = callable.params.as_slice() else {
        return false;
    };
    let [result] = callable.results.as_slice() else {
        return false;
    };

    arg.is_exported_or_builtin()
        && reply.is_pointer()
        && reply.is_exported_or_builtin()
        && result.is_error()
}

/// `Module.Method`, or `Receiver.Method` without a module name.
pub fn standard_method_name(module: Option<&str>, receiver: &TypeInfo, method_name: &str) -> String {
    let qualifier = module
        .filter(|module| !module.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| receiver.deref_all().name.clone());
    format!("{qualifier}.{method_name}")
}

/// Content descriptors are described by the type as written in the declaration.
pub struct PrintedTypeDescriptors;

impl DescriptorPolicy for PrintedTypeDescriptors {
    fn description(&self, _ty: &TypeInfo, field: &NamedField<'_>) -> Option<String> {
        Some(field.type_expr().to_string())
    }
}

impl StandardConvention {
    fn expanded_params<'a>(
        &self,
        callable: &Callable,
        declaration: &'a DeclarationRecord,
    ) -> Result<Vec<NamedField<'a>>, ReflectError> {
        let fields = expand_field_list(&declaration.params, self.config.field_naming);
        if fields.len() != callable.params.len() {
            return Err(ReflectError::SignatureMismatch {
                symbol: callable.symbol.clone(),
                declared: fields.len(),
                actual: callable.params.len(),
            });
        }
        Ok(fields)
    }
}

impl Convention for StandardConvention {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn config(&self) -> &ConventionConfig {
        &self.config
    }

    fn descriptor_policy(&self) -> &dyn DescriptorPolicy {
        self.policy.as_ref()
    }

    fn is_eligible(&self, callable: &Callable) -> bool {
        is_standard_eligible(callable)
    }

    fn method_name(&self, module: Option<&str>, receiver: &TypeInfo, callable: &Callable) -> String {
        standard_method_name(module, receiver, callable.bare_name())
    }

    fn params(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<Vec<ContentDescriptor>, ReflectError> {
        let fields = self.expanded_params(callable, declaration)?;
        let descriptor = build_content_descriptor(
            self.descriptor_policy(),
            &self.engine,
            &callable.params[0],
            &fields[0],
        )?;
        Ok(vec![descriptor])
    }

    fn result(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<ContentDescriptor, ReflectError> {
        let fields = self.expanded_params(callable, declaration)?;
        build_content_descriptor(
            self.descriptor_policy(),
            &self.engine,
            callable.params[1].deref(),
            &fields[1],
        )
    }
}
