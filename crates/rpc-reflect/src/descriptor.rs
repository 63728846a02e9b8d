// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rpc_introspection::ContentDescriptor;

use crate::error::ReflectError;
use crate::fields::NamedField;
use crate::schema::SchemaEngine;
use crate::types::TypeInfo;

/// Whether documentation text mentions "deprecated", in any case, anywhere.
pub fn mentions_deprecated(text: Option<&str>) -> bool {
    text.is_some_and(|text| text.to_lowercase().contains("deprecated"))
}

/// Per-field metadata of a content descriptor.
pub trait DescriptorPolicy: Send + Sync {
    fn name(&self, field: &NamedField<'_>) -> String {
        field.name.clone()
    }

    fn summary(&self, field: &NamedField<'_>) -> Option<String> {
        field.summary().map(str::to_string)
    }

    fn description(&self, ty: &TypeInfo, field: &NamedField<'_>) -> Option<String>;

    fn required(&self, _field: &NamedField<'_>) -> bool {
        true
    }

    fn deprecated(&self, field: &NamedField<'_>) -> bool {
        mentions_deprecated(field.group.doc.as_deref())
            || mentions_deprecated(field.group.comment.as_deref())
    }
}

pub fn build_content_descriptor(
    policy: &dyn DescriptorPolicy,
    engine: &SchemaEngine,
    ty: &TypeInfo,
    field: &NamedField<'_>,
) -> Result<ContentDescriptor, ReflectError> {
    let schema = engine.type_to_schema(ty)?;

    Ok(ContentDescriptor {
        name: policy.name(field),
        summary: policy.summary(field),
        description: policy.description(ty, field),
        schema,
        required: policy.required(field),
        deprecated: policy.deprecated(field),
    })
}
