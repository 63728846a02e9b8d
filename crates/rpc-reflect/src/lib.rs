// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Builds OpenRPC documents from described service receivers.
//!
//! The pipeline, per callable:
//! - a [`Convention`] decides eligibility and the public method name
//! - the callable is correlated with its [`DeclarationRecord`] for names and docs
//! - parameter and result fields are expanded and reflected into schemas by the [`SchemaEngine`]
//! - the [`MethodAssembler`] combines everything into a method
//!
//! The [`Discoverer`] runs this over every registered receiver and aggregates the
//! result into one sorted [`OpenRpcDocument`](rpc_introspection::OpenRpcDocument).

pub mod assembler;
pub mod callable;
pub mod config;
pub mod convention;
pub mod declaration;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod fields;
pub mod meta;
pub mod schema;
pub mod types;

pub use assembler::{Assembly, MethodAssembler, SkipReason};
pub use callable::{Callable, CallableOrigin, ServiceDescriptor, ServiceReceiver};
pub use config::DiscoverConfig;
pub use convention::{
    Convention, ConventionConfig, EthereumConvention, PrintedTypeDescriptors,
    QualifiedTypeDescriptors, StandardConvention, ethereum_method_name,
};
pub use declaration::{DeclarationRecord, DeclarationSource, FieldGroup, SymbolTable, correlate};
pub use descriptor::{DescriptorPolicy, build_content_descriptor};
pub use document::Discoverer;
pub use error::ReflectError;
pub use fields::{FieldNaming, NamedField, expand_field_group, expand_field_list};
pub use meta::{Endpoint, MetaRegisterer, StaticMeta};
pub use schema::{SchemaEngine, SchemaOptions};
pub use types::{StructField, TypeIdentity, TypeInfo, TypeKind};

pub use common::env_const::DuplicateMethodPolicy;
