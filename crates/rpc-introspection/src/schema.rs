// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! JSON Schema tree used for parameter and result descriptions.
//!
//! A small subset of JSON Schema: the keywords that the
//! reflection pipeline produces and that the OpenRPC meta-schema accepts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const COMPONENTS_SCHEMA_PREFIX: &str = "#/components/schemas/";
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A JSON Schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// A reference to another schema
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The type of the schema
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// For object types, property schemas (in declaration order)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, JsonSchema>,

    /// For array types, the schema of items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<JsonSchema>,

    /// Required properties for objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    /// Named definitions that `#/definitions/...` references point into
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, JsonSchema>,
}

/// `additionalProperties` may be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<JsonSchema>),
}

impl JsonSchema {
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    pub fn integer() -> Self {
        Self::new("integer")
    }

    pub fn number() -> Self {
        Self::new("number")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn null() -> Self {
        Self::new("null")
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    pub fn array(items: JsonSchema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn one_of(variants: Vec<JsonSchema>) -> Self {
        Self {
            one_of: variants,
            ..Default::default()
        }
    }

    pub fn reference(path: impl Into<String>) -> Self {
        Self {
            reference: Some(path.into()),
            ..Default::default()
        }
    }

    /// Create a reference to a schema in the components section
    pub fn component_ref(name: &str) -> Self {
        Self::reference(format!("{COMPONENTS_SCHEMA_PREFIX}{name}"))
    }

    /// Create a reference to a schema in the root `definitions` map. The name
    /// is escaped as a JSON pointer token, so it may contain `/`.
    pub fn definition_ref(name: &str) -> Self {
        let token = name.replace('~', "~0").replace('/', "~1");
        Self::reference(format!("{DEFINITIONS_PREFIX}{token}"))
    }

    /// The `definitions` entry this node refers to, if it is a definition reference.
    pub fn definition_target(&self) -> Option<String> {
        self.reference
            .as_deref()
            .and_then(|reference| reference.strip_prefix(DEFINITIONS_PREFIX))
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: JsonSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = Some(additional);
        self
    }

    pub fn with_definition(mut self, name: impl Into<String>, schema: JsonSchema) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }

    /// A node that only points elsewhere and carries no definition of its own.
    pub fn is_pure_reference(&self) -> bool {
        self.reference.is_some()
            && self.schema_type.is_none()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.one_of.is_empty()
            && self.additional_properties.is_none()
            && self.definitions.is_empty()
    }

    /// Direct sub-schemas, in a stable order.
    pub fn children(&self) -> Vec<&JsonSchema> {
        let mut children: Vec<&JsonSchema> = self.properties.values().collect();
        if let Some(items) = self.items.as_deref() {
            children.push(items);
        }
        children.extend(self.one_of.iter());
        if let Some(AdditionalProperties::Schema(schema)) = self.additional_properties.as_ref() {
            children.push(schema.as_ref());
        }
        children.extend(self.definitions.values());
        children
    }

    pub fn children_mut(&mut self) -> Vec<&mut JsonSchema> {
        let mut children: Vec<&mut JsonSchema> = self.properties.values_mut().collect();
        if let Some(items) = self.items.as_deref_mut() {
            children.push(items);
        }
        children.extend(self.one_of.iter_mut());
        if let Some(AdditionalProperties::Schema(schema)) = self.additional_properties.as_mut() {
            children.push(schema.as_mut());
        }
        children.extend(self.definitions.values_mut());
        children
    }

    /// Visit this node and then every nested node (pre-order), stopping at the first error.
    pub fn walk_depth_first<E>(
        &mut self,
        visit: &mut dyn FnMut(&mut JsonSchema) -> Result<(), E>,
    ) -> Result<(), E> {
        visit(self)?;
        for child in self.children_mut() {
            child.walk_depth_first(visit)?;
        }
        Ok(())
    }
}
