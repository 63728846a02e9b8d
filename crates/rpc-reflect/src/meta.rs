// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Document-level metadata: info, external docs and servers.

use std::net::SocketAddr;

use rpc_introspection::{ExternalDocs, InfoObject, ServerObject};

/// A network endpoint the service listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub network: String,
    pub address: String,
}

impl Endpoint {
    pub fn new(network: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            address: address.into(),
        }
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new("tcp", addr.to_string())
    }
}

pub trait MetaRegisterer: Send + Sync {
    fn info(&self) -> InfoObject;

    fn external_docs(&self) -> Option<ExternalDocs> {
        None
    }

    fn servers(&self, endpoints: &[Endpoint]) -> Vec<ServerObject> {
        endpoints
            .iter()
            .map(|endpoint| ServerObject::new(&endpoint.network, &endpoint.address))
            .collect()
    }
}

/// Fixed metadata.
#[derive(Debug, Clone)]
pub struct StaticMeta {
    info: InfoObject,
    external_docs: Option<ExternalDocs>,
}

impl StaticMeta {
    pub fn new(info: InfoObject) -> Self {
        Self {
            info,
            external_docs: None,
        }
    }

    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.external_docs = Some(external_docs);
        self
    }
}

impl MetaRegisterer for StaticMeta {
    fn info(&self) -> InfoObject {
        self.info.clone()
    }

    fn external_docs(&self) -> Option<ExternalDocs> {
        self.external_docs.clone()
    }
}
