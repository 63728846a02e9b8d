// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::declaration::FieldGroup;

/// A field group bound to exactly one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedField<'a> {
    pub name: String,
    pub group: &'a FieldGroup,
}

impl NamedField<'_> {
    /// The trailing comment, falling back to the leading doc comment.
    pub fn summary(&self) -> Option<&str> {
        non_blank(&self.group.comment).or_else(|| non_blank(&self.group.doc))
    }

    pub fn type_expr(&self) -> &str {
        &self.group.type_expr
    }
}

fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// How names are synthesized for unnamed field groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldNaming {
    /// Drop the package qualifier of pointers to named types: `*geometry.Circle` becomes `*Circle`.
    pub strip_pointer_qualifier: bool,
}

impl FieldNaming {
    fn synthesize(&self, type_expr: &str) -> String {
        if self.strip_pointer_qualifier
            && let Some(pointee) = type_expr.strip_prefix('*')
            && let Some((_, name)) = pointee.rsplit_once('.')
        {
            return format!("*{name}");
        }
        type_expr.to_string()
    }
}

/// One named field per declared name, or a single field named after the printed type.
pub fn expand_field_group<'a>(group: &'a FieldGroup, naming: FieldNaming) -> Vec<NamedField<'a>> {
    if group.names.is_empty() {
        return vec![NamedField {
            name: naming.synthesize(&group.type_expr),
            group,
        }];
    }

    group
        .names
        .iter()
        .map(|name| NamedField {
            name: name.clone(),
            group,
        })
        .collect()
}

pub fn expand_field_list(groups: &[FieldGroup], naming: FieldNaming) -> Vec<NamedField<'_>> {
    groups
        .iter()
        .flat_map(|group| expand_field_group(group, naming))
        .collect()
}
