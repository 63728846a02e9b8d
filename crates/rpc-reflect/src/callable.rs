// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::types::{TypeInfo, starts_uppercase};

/// Where a callable was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallableOrigin {
    Source { file: String, line: u32 },
    /// Synthesized by the compiler (e.g. promoted wrappers); has no declaration.
    Autogenerated,
}

/// A function or bound method, as seen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    /// Possibly qualified symbol, e.g. `fakearithmetic.(*Calculator).Add`
    pub symbol: String,
    pub exported: bool,
    pub receiver: Option<TypeInfo>,
    /// Parameter types, not counting the receiver
    pub params: Vec<TypeInfo>,
    pub results: Vec<TypeInfo>,
    pub origin: CallableOrigin,
}

impl Callable {
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let exported = starts_uppercase(bare_symbol_name(&symbol));
        Self {
            symbol,
            exported,
            receiver: None,
            params: Vec::new(),
            results: Vec::new(),
            origin: CallableOrigin::Autogenerated,
        }
    }

    pub fn with_receiver(mut self, receiver: TypeInfo) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_param(mut self, ty: TypeInfo) -> Self {
        self.params.push(ty);
        self
    }

    pub fn with_result(mut self, ty: TypeInfo) -> Self {
        self.results.push(ty);
        self
    }

    pub fn defined_at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.origin = CallableOrigin::Source {
            file: file.into(),
            line,
        };
        self
    }

    pub fn autogenerated(mut self) -> Self {
        self.origin = CallableOrigin::Autogenerated;
        self
    }

    /// The symbol without any package or receiver qualifier.
    pub fn bare_name(&self) -> &str {
        bare_symbol_name(&self.symbol)
    }

    pub fn is_autogenerated(&self) -> bool {
        self.origin == CallableOrigin::Autogenerated
    }
}

fn bare_symbol_name(symbol: &str) -> &str {
    symbol.rsplit('.').next().unwrap_or(symbol)
}

/// A registered service object whose methods become RPC methods.
pub trait ServiceReceiver: Send + Sync {
    /// The receiver's named type (not a pointer to it).
    fn receiver_type(&self) -> &TypeInfo;

    fn callables(&self) -> &[Callable];
}

/// A [`ServiceReceiver`] described entirely by data.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    receiver_type: TypeInfo,
    callables: Vec<Callable>,
}

impl ServiceDescriptor {
    pub fn new(receiver_type: TypeInfo) -> Self {
        Self {
            receiver_type,
            callables: Vec::new(),
        }
    }

    /// Add a method bound to a pointer to this receiver.
    pub fn with_method(mut self, callable: Callable) -> Self {
        let receiver = TypeInfo::pointer_to(self.receiver_type.clone());
        self.callables.push(callable.with_receiver(receiver));
        self
    }

    /// Add a callable as is, with or without a receiver.
    pub fn with_callable(mut self, callable: Callable) -> Self {
        self.callables.push(callable);
        self
    }
}

impl ServiceReceiver for ServiceDescriptor {
    fn receiver_type(&self) -> &TypeInfo {
        &self.receiver_type
    }

    fn callables(&self) -> &[Callable] {
        &self.callables
    }
}
