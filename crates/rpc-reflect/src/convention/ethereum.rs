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

use super::{Convention, ConventionConfig, lower_first};
use crate::callable::Callable;
use crate::declaration::DeclarationRecord;
use crate::descriptor::{DescriptorPolicy, build_content_descriptor};
use crate::error::ReflectError;
use crate::fields::{NamedField, expand_field_list};
use crate::schema::SchemaEngine;
use crate::types::TypeInfo;

/// Methods with any argument list, an optional leading context, and at most
/// one value besides a trailing error.
pub struct EthereumConvention {
    config: ConventionConfig,
    engine: SchemaEngine,
    policy: Arc<dyn DescriptorPolicy>,
}

impl EthereumConvention {
    pub fn new(config: ConventionConfig) -> Self {
        let engine = SchemaEngine::new(config.schema.clone());
        let policy = config
            .descriptor_policy
            .clone()
            .unwrap_or_else(|| Arc::new(QualifiedTypeDescriptors));
        Self {
            config,
            engine,
            policy,
        }
    }
}

impl Default for EthereumConvention {
    fn default() -> Self {
        Self::new(ConventionConfig::default())
    }
}

pub fn is_ethereum_eligible(callable: &Callable) -> bool {
    if !callable.exported {
        return false;
    }
    match callable.results.as_slice() {
        [] | [_] => true,
        [value, error] => !value.is_error() && error.is_error(),
        _ => false,
    }
}

/// `module_method` with the first letter of each part lowercased; the
/// receiver type name stands in for a missing module name.
///
/// ```text
/// ethereum_method_name(None, "Calculator", "Add") == "calculator_add"
/// ```
pub fn ethereum_method_name(
    module: Option<&str>,
    receiver_type_name: &str,
    method_name: &str,
) -> String {
    let qualifier = module
        .filter(|module| !module.is_empty())
        .unwrap_or(receiver_type_name);
    format!("{}_{}", lower_first(qualifier), lower_first(method_name))
}

/// Content descriptors are described by the back-quoted fully qualified type.
pub struct QualifiedTypeDescriptors;

impl DescriptorPolicy for QualifiedTypeDescriptors {
    fn description(&self, ty: &TypeInfo, _field: &NamedField<'_>) -> Option<String> {
        Some(format!("`{}`", ty.full_name()))
    }
}

fn expect_field_count(
    callable: &Callable,
    fields: &[NamedField<'_>],
    types: &[TypeInfo],
) -> Result<(), ReflectError> {
    if fields.len() != types.len() {
        return Err(ReflectError::SignatureMismatch {
            symbol: callable.symbol.clone(),
            declared: fields.len(),
            actual: types.len(),
        });
    }
    Ok(())
}

impl Convention for EthereumConvention {
    fn name(&self) -> &'static str {
        "ethereum"
    }

    fn config(&self) -> &ConventionConfig {
        &self.config
    }

    fn descriptor_policy(&self) -> &dyn DescriptorPolicy {
        self.policy.as_ref()
    }

    fn is_eligible(&self, callable: &Callable) -> bool {
        is_ethereum_eligible(callable)
    }

    fn method_name(&self, module: Option<&str>, receiver: &TypeInfo, callable: &Callable) -> String {
        ethereum_method_name(module, &receiver.deref_all().name, callable.bare_name())
    }

    fn params(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<Vec<ContentDescriptor>, ReflectError> {
        let fields = expand_field_list(&declaration.params, self.config.field_naming);
        expect_field_count(callable, &fields, &callable.params)?;

        callable
            .params
            .iter()
            .zip(&fields)
            .enumerate()
            .filter(|(index, (ty, _))| !(*index == 0 && ty.is_context_like()))
            .map(|(_, (ty, field))| {
                build_content_descriptor(self.descriptor_policy(), &self.engine, ty, field)
            })
            .collect()
    }

    fn result(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<ContentDescriptor, ReflectError> {
        let fields = expand_field_list(&declaration.results, self.config.field_naming);
        expect_field_count(callable, &fields, &callable.results)?;

        match callable.results.first() {
            Some(value) if !value.is_error() => {
                build_content_descriptor(self.descriptor_policy(), &self.engine, value, &fields[0])
            }
            _ => Ok(ContentDescriptor::null()),
        }
    }
}
