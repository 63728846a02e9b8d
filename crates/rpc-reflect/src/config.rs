// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::env_const::{
    DuplicateMethodPolicy, get_duplicate_method_policy, get_flatten_schemas,
    get_method_blacklist, get_rpc_discover, get_stamp_version,
};
use reflect_env::Environment;
use regex::Regex;

use crate::error::ReflectError;

/// Document-wide build options.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    pub flatten_schemas: bool,
    /// Append the build time to `info.version`
    pub stamp_version: bool,
    pub duplicate_methods: DuplicateMethodPolicy,
    /// Add the `rpc.discover` method
    pub rpc_discover: bool,
    /// Applied to every receiver, on top of each convention's own blacklist
    pub method_blacklist: Vec<Regex>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            flatten_schemas: false,
            stamp_version: true,
            duplicate_methods: DuplicateMethodPolicy::default(),
            rpc_discover: false,
            method_blacklist: Vec::new(),
        }
    }
}

impl DiscoverConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, ReflectError> {
        let method_blacklist = get_method_blacklist(env)
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            flatten_schemas: get_flatten_schemas(env)?,
            stamp_version: get_stamp_version(env)?,
            duplicate_methods: get_duplicate_method_policy(env)?,
            rpc_discover: get_rpc_discover(env)?,
            method_blacklist,
        })
    }
}
