// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Aggregation of all registered receivers into one OpenRPC document.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use common::env_const::DuplicateMethodPolicy;
use rpc_introspection::{
    ContentDescriptor, JsonSchema, MethodObject, OpenRpcDocument, flatten_schemas,
};
use tracing::{debug, info, instrument, warn};

use crate::assembler::MethodAssembler;
use crate::callable::ServiceReceiver;
use crate::config::DiscoverConfig;
use crate::convention::Convention;
use crate::declaration::DeclarationSource;
use crate::error::ReflectError;
use crate::meta::{Endpoint, MetaRegisterer};

pub const RPC_DISCOVER_METHOD: &str = "rpc.discover";
pub const OPENRPC_META_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/open-rpc/meta-schema/master/schema.json";

struct Registration {
    module: Option<String>,
    receiver: Arc<dyn ServiceReceiver>,
    convention: Option<Arc<dyn Convention>>,
}

/// Builds OpenRPC documents from registered receivers.
///
/// Receivers are read-only during a build; every call to [`Discoverer::discover`]
/// recomputes the document from scratch.
pub struct Discoverer {
    config: DiscoverConfig,
    meta: Option<Arc<dyn MetaRegisterer>>,
    declarations: Option<Arc<dyn DeclarationSource>>,
    convention: Option<Arc<dyn Convention>>,
    registrations: Vec<Registration>,
    endpoints: Vec<Endpoint>,
    build_time: Option<DateTime<Utc>>,
}

impl Discoverer {
    pub fn new(config: DiscoverConfig) -> Self {
        Self {
            config,
            meta: None,
            declarations: None,
            convention: None,
            registrations: Vec::new(),
            endpoints: Vec::new(),
            build_time: None,
        }
    }

    pub fn with_meta(mut self, meta: Arc<dyn MetaRegisterer>) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_declarations(mut self, declarations: Arc<dyn DeclarationSource>) -> Self {
        self.declarations = Some(declarations);
        self
    }

    /// The convention for receivers registered without one.
    pub fn with_convention(mut self, convention: Arc<dyn Convention>) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Use a fixed time for the version stamp instead of the current time.
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = Some(build_time);
        self
    }

    pub fn register_receiver(&mut self, receiver: Arc<dyn ServiceReceiver>) {
        self.registrations.push(Registration {
            module: None,
            receiver,
            convention: None,
        });
    }

    /// Register a receiver whose methods are qualified by `module` instead of the receiver type name.
    pub fn register_receiver_name(
        &mut self,
        module: impl Into<String>,
        receiver: Arc<dyn ServiceReceiver>,
    ) {
        self.registrations.push(Registration {
            module: Some(module.into()),
            receiver,
            convention: None,
        });
    }

    pub fn register_receiver_with(
        &mut self,
        module: Option<String>,
        receiver: Arc<dyn ServiceReceiver>,
        convention: Arc<dyn Convention>,
    ) {
        self.registrations.push(Registration {
            module,
            receiver,
            convention: Some(convention),
        });
    }

    pub fn register_endpoint(&mut self, endpoint: impl Into<Endpoint>) {
        self.endpoints.push(endpoint.into());
    }

    #[instrument(name = "Discoverer::discover", skip_all)]
    pub fn discover(&self) -> Result<OpenRpcDocument, ReflectError> {
        let meta = self
            .meta
            .as_ref()
            .ok_or(ReflectError::MissingCollaborator("meta"))?;

        let mut document = OpenRpcDocument::with_info(meta.info());
        document.external_docs = meta.external_docs();
        document.servers = meta.servers(&self.endpoints);

        let mut methods = self.collect_methods()?;
        if self.config.rpc_discover {
            methods.push(rpc_discover_method());
        }

        // Stable, so equal names keep registration order.
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        apply_duplicate_policy(&mut methods, self.config.duplicate_methods)?;
        document.methods = methods;

        if self.config.stamp_version {
            let build_time = self.build_time.unwrap_or_else(Utc::now);
            document.info.version = stamp_version(&document.info.version, build_time);
        }

        if self.config.flatten_schemas {
            flatten_schemas(&mut document)?;
        }

        info!(methods = document.methods.len(), "discovered OpenRPC document");
        Ok(document)
    }

    fn collect_methods(&self) -> Result<Vec<MethodObject>, ReflectError> {
        if self.registrations.is_empty() {
            return Ok(Vec::new());
        }
        let declarations = self
            .declarations
            .as_deref()
            .ok_or(ReflectError::MissingCollaborator("declaration source"))?;

        let mut methods = Vec::new();
        for registration in &self.registrations {
            let convention = registration
                .convention
                .as_deref()
                .or(self.convention.as_deref())
                .ok_or(ReflectError::MissingCollaborator("convention"))?;

            let assembled = MethodAssembler::new(convention, declarations)
                .with_blacklist(&self.config.method_blacklist)
                .assemble_receiver(registration.module.as_deref(), registration.receiver.as_ref())?;
            debug!(
                receiver = %registration.receiver.receiver_type(),
                methods = assembled.len(),
                "collected receiver methods"
            );
            methods.extend(assembled);
        }
        Ok(methods)
    }
}

/// Expects `methods` sorted by name.
fn apply_duplicate_policy(
    methods: &mut Vec<MethodObject>,
    policy: DuplicateMethodPolicy,
) -> Result<(), ReflectError> {
    let duplicate = methods
        .windows(2)
        .find(|pair| pair[0].name == pair[1].name)
        .map(|pair| pair[0].name.clone());
    let Some(name) = duplicate else {
        return Ok(());
    };

    match policy {
        DuplicateMethodPolicy::Allow => {
            warn!(method = %name, "method name registered more than once");
        }
        DuplicateMethodPolicy::Reject => return Err(ReflectError::DuplicateMethod(name)),
        DuplicateMethodPolicy::KeepFirst => {
            methods.dedup_by(|later, earlier| later.name == earlier.name);
        }
    }
    Ok(())
}

/// `<base>+<RFC 3339 build time>`, or just the build time without a base.
pub fn stamp_version(base: &str, build_time: DateTime<Utc>) -> String {
    let stamp = build_time.to_rfc3339_opts(SecondsFormat::Secs, true);
    if base.is_empty() {
        stamp
    } else {
        format!("{base}+{stamp}")
    }
}

fn rpc_discover_method() -> MethodObject {
    let result = ContentDescriptor::new(
        "OpenRPC Schema",
        JsonSchema::reference(OPENRPC_META_SCHEMA_URL),
    );
    MethodObject::new(RPC_DISCOVER_METHOD, result)
        .with_description("Returns an OpenRPC schema as a description of this service")
}
