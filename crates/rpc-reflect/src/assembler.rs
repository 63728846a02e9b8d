// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use regex::Regex;
use rpc_introspection::MethodObject;
use tracing::{debug, instrument};

use crate::callable::{Callable, ServiceReceiver};
use crate::convention::Convention;
use crate::declaration::{DeclarationSource, correlate};
use crate::error::ReflectError;
use crate::types::TypeInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Compiler-synthesized; there is no declaration to document
    Autogenerated,
    /// The method name matches a blacklist pattern
    Blacklisted,
}

/// The outcome of assembling one callable.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    Assembled(Box<MethodObject>),
    Ineligible,
    Skipped(SkipReason),
}

/// Turns the callables of a receiver into methods, following one convention.
pub struct MethodAssembler<'a> {
    convention: &'a dyn Convention,
    declarations: &'a dyn DeclarationSource,
    blacklist: &'a [Regex],
}

impl<'a> MethodAssembler<'a> {
    pub fn new(convention: &'a dyn Convention, declarations: &'a dyn DeclarationSource) -> Self {
        Self {
            convention,
            declarations,
            blacklist: &[],
        }
    }

    /// Patterns checked in addition to the convention's own blacklist.
    pub fn with_blacklist(mut self, blacklist: &'a [Regex]) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// All methods of `receiver`, in callable order. Ineligible and skipped
    /// callables are left out; any other failure aborts.
    #[instrument(
        name = "MethodAssembler::assemble_receiver",
        level = "debug",
        skip_all,
        fields(
            convention = self.convention.name(),
            receiver = %receiver.receiver_type()
            )
        )]
    pub fn assemble_receiver(
        &self,
        module: Option<&str>,
        receiver: &dyn ServiceReceiver,
    ) -> Result<Vec<MethodObject>, ReflectError> {
        let mut methods = Vec::new();
        for callable in receiver.callables() {
            if let Assembly::Assembled(method) =
                self.assemble(module, receiver.receiver_type(), callable)?
            {
                methods.push(*method);
            }
        }
        Ok(methods)
    }

    #[instrument(
        name = "MethodAssembler::assemble",
        level = "debug",
        skip_all,
        fields(symbol = %callable.symbol)
        )]
    pub fn assemble(
        &self,
        module: Option<&str>,
        receiver: &TypeInfo,
        callable: &Callable,
    ) -> Result<Assembly, ReflectError> {
        let convention = self.convention;

        if !convention.is_eligible(callable) {
            debug!("ineligible");
            return Ok(Assembly::Ineligible);
        }
        if callable.is_autogenerated() {
            debug!("skipping autogenerated callable");
            return Ok(Assembly::Skipped(SkipReason::Autogenerated));
        }

        let name = convention.method_name(module, receiver, callable);
        if convention.is_blacklisted(&name)
            || self.blacklist.iter().any(|pattern| pattern.is_match(&name))
        {
            debug!(method = %name, "skipping blacklisted method");
            return Ok(Assembly::Skipped(SkipReason::Blacklisted));
        }

        let declaration = correlate(callable, self.declarations)?;
        let params = convention.params(callable, declaration)?;
        let result = convention.result(callable, declaration)?;

        let method = MethodObject {
            name,
            summary: convention.summary(declaration),
            description: convention.description(receiver, callable, declaration),
            tags: Vec::new(),
            external_docs: convention.external_docs(receiver, callable),
            params,
            result,
            deprecated: convention.deprecated(declaration),
            param_structure: convention.param_structure(),
        };
        debug!(method = %method.name, params = method.params.len(), "assembled");

        Ok(Assembly::Assembled(Box::new(method)))
    }
}
