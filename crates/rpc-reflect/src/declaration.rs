// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Source-level declarations and their correlation with runtime callables.

use std::collections::HashMap;

use tracing::debug;

use crate::callable::{Callable, CallableOrigin};
use crate::error::ReflectError;
use crate::types::TypeIdentity;

/// One entry of a parameter or result list: a type bound to zero or more names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroup {
    pub names: Vec<String>,
    /// The type as written in source, e.g. `*AddReply`
    pub type_expr: String,
    /// Comment on the lines before the field
    pub doc: Option<String>,
    /// Comment trailing the field on the same line
    pub comment: Option<String>,
}

impl FieldGroup {
    pub fn named<I, S>(names: I, type_expr: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            type_expr: type_expr.into(),
            ..Default::default()
        }
    }

    pub fn unnamed(type_expr: impl Into<String>) -> Self {
        Self {
            type_expr: type_expr.into(),
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Parsed metadata for one function or method declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub name: String,
    pub receiver: Option<TypeIdentity>,
    pub doc: Option<String>,
    pub params: Vec<FieldGroup>,
    pub results: Vec<FieldGroup>,
    /// The declaration as printed from source
    pub source: String,
}

impl DeclarationRecord {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn method(receiver: TypeIdentity, name: impl Into<String>) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::function(name)
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_param(mut self, group: FieldGroup) -> Self {
        self.params.push(group);
        self
    }

    pub fn with_result(mut self, group: FieldGroup) -> Self {
        self.results.push(group);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Lookup of the declarations in a source unit.
pub trait DeclarationSource: Send + Sync {
    fn declarations(&self, file: &str) -> Option<&[DeclarationRecord]>;
}

/// In-process declarations, grouped by defining file.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    units: HashMap<String, Vec<DeclarationRecord>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<String>, record: DeclarationRecord) {
        self.units.entry(file.into()).or_default().push(record);
    }

    pub fn with_declaration(mut self, file: impl Into<String>, record: DeclarationRecord) -> Self {
        self.insert(file, record);
        self
    }
}

impl DeclarationSource for SymbolTable {
    fn declarations(&self, file: &str) -> Option<&[DeclarationRecord]> {
        self.units.get(file).map(Vec::as_slice)
    }
}

/// Find the declaration of `callable` in its defining source unit.
///
/// A method matches only a declaration on the same receiver type (compared by
/// identity, so `Foo` never matches `FooBar`); a free function only matches a
/// declaration without a receiver.
pub fn correlate<'a>(
    callable: &Callable,
    source: &'a dyn DeclarationSource,
) -> Result<&'a DeclarationRecord, ReflectError> {
    let file = match &callable.origin {
        CallableOrigin::Source { file, .. } => file.as_str(),
        CallableOrigin::Autogenerated => "<autogenerated>",
    };
    let not_found = || ReflectError::DeclarationNotFound {
        symbol: callable.symbol.clone(),
        file: file.to_string(),
    };

    let receiver = callable
        .receiver
        .as_ref()
        .map(|receiver| receiver.deref_all().identity());

    let record = source
        .declarations(file)
        .ok_or_else(not_found)?
        .iter()
        .find(|record| record.name == callable.bare_name() && record.receiver == receiver)
        .ok_or_else(not_found)?;

    debug!(symbol = %callable.symbol, file, "correlated declaration");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeInfo;

    const MODULE: &str = "example.com/calc";

    fn calculator(name: &str) -> TypeInfo {
        TypeInfo::structure(MODULE, name, vec![])
    }

    fn table() -> SymbolTable {
        SymbolTable::new()
            .with_declaration(
                "calc.go",
                DeclarationRecord::method(TypeIdentity::new(MODULE, "CalculatorRPC"), "Add")
                    .with_doc("Add on the RPC wrapper."),
            )
            .with_declaration(
                "calc.go",
                DeclarationRecord::method(TypeIdentity::new(MODULE, "Calculator"), "Add")
                    .with_doc("Add adds two integers together."),
            )
            .with_declaration("calc.go", DeclarationRecord::function("Add"))
    }

    #[test]
    fn matches_receiver_by_identity() {
        let table = table();
        let callable = Callable::new("calc.(*Calculator).Add")
            .with_receiver(TypeInfo::pointer_to(calculator("Calculator")))
            .defined_at("calc.go", 12);

        let record = correlate(&callable, &table).unwrap();
        assert_eq!(record.doc.as_deref(), Some("Add adds two integers together."));
    }

    #[test]
    fn free_functions_match_declarations_without_receiver() {
        let table = table();
        let callable = Callable::new("calc.Add").defined_at("calc.go", 40);

        let record = correlate(&callable, &table).unwrap();
        assert!(record.receiver.is_none());
    }

    #[test]
    fn prefix_of_receiver_name_does_not_match() {
        let table = table();
        let callable = Callable::new("Add")
            .with_receiver(calculator("Calc"))
            .defined_at("calc.go", 12);

        assert!(matches!(
            correlate(&callable, &table),
            Err(ReflectError::DeclarationNotFound { .. })
        ));
    }

    #[test]
    fn unknown_file_is_not_found() {
        let table = table();
        let callable = Callable::new("Add")
            .with_receiver(calculator("Calculator"))
            .defined_at("other.go", 1);

        let err = correlate(&callable, &table).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No declaration found for 'Add' in 'other.go'"
        );
    }
}
