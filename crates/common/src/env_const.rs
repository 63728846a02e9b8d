// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use reflect_env::{EnvError, Environment};

pub const OPENRPC_LOG: &str = "OPENRPC_LOG";

pub const OPENRPC_FLATTEN_SCHEMAS: &str = "OPENRPC_FLATTEN_SCHEMAS";
pub const OPENRPC_STAMP_VERSION: &str = "OPENRPC_STAMP_VERSION";
pub const OPENRPC_DUPLICATE_METHODS: &str = "OPENRPC_DUPLICATE_METHODS"; // "allow" (default), "reject" or "keep-first"
pub const OPENRPC_RPC_DISCOVER: &str = "OPENRPC_RPC_DISCOVER";
pub const OPENRPC_METHOD_BLACKLIST: &str = "OPENRPC_METHOD_BLACKLIST";

/// What to do when two registered receivers produce the same public method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMethodPolicy {
    /// Keep every method; the sort order decides which one a reader sees first.
    #[default]
    Allow,
    /// Fail the build.
    Reject,
    /// Keep only the first method (in registration order) for each name.
    KeepFirst,
}

pub fn get_duplicate_method_policy(env: &dyn Environment) -> Result<DuplicateMethodPolicy, EnvError> {
    match env.get(OPENRPC_DUPLICATE_METHODS) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "allow" => Ok(DuplicateMethodPolicy::Allow),
            "reject" | "error" => Ok(DuplicateMethodPolicy::Reject),
            "keep-first" => Ok(DuplicateMethodPolicy::KeepFirst),
            _ => Err(EnvError::InvalidEnum {
                env_key: OPENRPC_DUPLICATE_METHODS,
                env_value: value,
                message: "Must be one of 'allow', 'reject', or 'keep-first'".to_string(),
            }),
        },
        None => Ok(DuplicateMethodPolicy::Allow),
    }
}

pub fn get_flatten_schemas(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(OPENRPC_FLATTEN_SCHEMAS, false)
}

pub fn get_stamp_version(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(OPENRPC_STAMP_VERSION, true)
}

pub fn get_rpc_discover(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(OPENRPC_RPC_DISCOVER, false)
}

pub fn get_method_blacklist(env: &dyn Environment) -> Vec<String> {
    env.get_list(OPENRPC_METHOD_BLACKLIST)
}
