// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! OpenRPC specification types.
//!
//! This module defines types that conform to the OpenRPC 1.3.2 specification.
//! See: https://spec.open-rpc.org/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::JsonSchema;

pub const OPENRPC_VERSION: &str = "1.3.2";

/// The root OpenRPC document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRpcDocument {
    /// The OpenRPC specification version (e.g., "1.3.2")
    pub openrpc: String,
    /// Metadata about the API
    pub info: InfoObject,
    /// Where the API is served from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerObject>,
    #[serde(
        rename = "externalDocs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocs>,
    /// The available RPC methods
    pub methods: Vec<MethodObject>,
    /// Reusable schema components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl OpenRpcDocument {
    /// Create a new OpenRPC document with the given title and version
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self::with_info(InfoObject::new(title, version))
    }

    pub fn with_info(info: InfoObject) -> Self {
        Self {
            openrpc: OPENRPC_VERSION.to_string(),
            info,
            servers: Vec::new(),
            external_docs: None,
            methods: Vec::new(),
            components: None,
        }
    }

    pub fn with_method(mut self, method: MethodObject) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = Some(components);
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodObject> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoObject {
    /// The title of the API
    pub title: String,
    /// The version of the API (not the OpenRPC spec version)
    pub version: String,
    /// A description of the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "termsOfService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_of_service: Option<String>,
}

impl InfoObject {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerObject {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServerObject {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

impl ExternalDocs {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            description: None,
            url: url.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a server expects `params` to be passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamStructure {
    ByName,
    #[default]
    ByPosition,
    Either,
}

/// An RPC method definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodObject {
    /// The canonical name of the method
    pub name: String,
    /// A short summary of what the method does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// A verbose explanation of the method behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagObject>,
    #[serde(
        rename = "externalDocs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocs>,
    /// The parameters for this method
    pub params: Vec<ContentDescriptor>,
    /// The result of calling this method
    pub result: ContentDescriptor,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(rename = "paramStructure", default)]
    pub param_structure: ParamStructure,
}

impl MethodObject {
    pub fn new(name: impl Into<String>, result: ContentDescriptor) -> Self {
        Self {
            name: name.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            external_docs: None,
            params: Vec::new(),
            result,
            deprecated: false,
            param_structure: ParamStructure::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_param(mut self, param: ContentDescriptor) -> Self {
        self.params.push(param);
        self
    }

    /// Parameter and result descriptors, in document order.
    pub fn content_descriptors_mut(&mut self) -> impl Iterator<Item = &mut ContentDescriptor> {
        self.params
            .iter_mut()
            .chain(std::iter::once(&mut self.result))
    }
}

/// Describes a method parameter or result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// The name of the content
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// A description of the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The JSON Schema describing the content
    pub schema: JsonSchema,
    pub required: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl ContentDescriptor {
    pub fn new(name: impl Into<String>, schema: JsonSchema) -> Self {
        Self {
            name: name.into(),
            summary: None,
            description: None,
            schema,
            required: true,
            deprecated: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The descriptor used when a method has no non-error result.
    pub fn null() -> Self {
        Self::new("Null", JsonSchema::null()).with_description("Null")
    }
}

/// Reusable schema components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Components {
    /// Schema definitions, keyed by content hash
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, JsonSchema>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, name: impl Into<String>, schema: JsonSchema) -> Self {
        self.schemas.insert(name.into(), schema);
        self
    }
}
