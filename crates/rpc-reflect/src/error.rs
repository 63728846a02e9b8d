// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use reflect_env::EnvError;
use rpc_introspection::SchemaError;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("No declaration found for '{symbol}' in '{file}'")]
    DeclarationNotFound { symbol: String, file: String },

    #[error("Declaration of '{symbol}' has {declared} fields but the signature has {actual}")]
    SignatureMismatch {
        symbol: String,
        declared: usize,
        actual: usize,
    },

    #[error("Type '{type_name}' cannot be described by a schema: {reason}")]
    UnsupportedType { type_name: String, reason: String },

    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Method '{0}' is registered more than once")]
    DuplicateMethod(String),

    #[error("Invalid method blacklist pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Env(#[from] EnvError),
}
