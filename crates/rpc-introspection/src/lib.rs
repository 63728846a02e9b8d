// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! OpenRPC document types.
//!
//! This crate provides:
//! - The OpenRPC document model (methods, content descriptors, servers, components)
//! - A recursive JSON Schema tree with a depth-first walker
//! - Schema flattening: moving every inline schema into `components.schemas`, keyed by a
//!   canonical content hash
//!
//! # Example
//!
//! ```
//! use rpc_introspection::{ContentDescriptor, JsonSchema, MethodObject, OpenRpcDocument};
//!
//! let doc = OpenRpcDocument::new("My API", "1.0.0").with_method(MethodObject::new(
//!     "hello",
//!     ContentDescriptor::new("result", JsonSchema::string()),
//! ));
//! ```

pub mod flatten;
pub mod openrpc;
pub mod schema;

pub use flatten::{SchemaError, canonical_hash, flatten_schemas};
pub use openrpc::{
    Components, ContentDescriptor, ExternalDocs, InfoObject, MethodObject, OpenRpcDocument,
    ParamStructure, ServerObject, TagObject,
};
pub use schema::{AdditionalProperties, JsonSchema};
