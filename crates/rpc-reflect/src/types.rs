// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Runtime type descriptions of the service being documented.
//!
//! A [`TypeInfo`] is what a reflective runtime would report for a value: its
//! defining module, its name (empty for composite types such as `[]int`) and
//! its structural kind.

use std::fmt;

/// The structural identity of a named type: its defining module and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity {
    pub module_path: String,
    pub name: String,
}

impl TypeIdentity {
    pub fn new(module_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module_path.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.module_path, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    Int,
    Uint,
    Float,
    String,
    Struct(Vec<StructField>),
    Map {
        key: Box<TypeInfo>,
        value: Box<TypeInfo>,
    },
    Slice(Box<TypeInfo>),
    Array {
        elem: Box<TypeInfo>,
        len: usize,
    },
    Pointer(Box<TypeInfo>),
    /// An interface with the given method set. An empty set accepts any value.
    Interface {
        methods: Vec<String>,
    },
    Func,
    Chan(Box<TypeInfo>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    /// Name used when serialized, if it differs from `name`
    pub json_name: Option<String>,
    pub ty: TypeInfo,
    /// Explicitly marked as required
    pub required: bool,
    /// Never serialized (unexported or explicitly skipped)
    pub skip: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, ty: TypeInfo) -> Self {
        let name = name.into();
        let skip = !starts_uppercase(&name);
        Self {
            name,
            json_name: None,
            ty,
            required: false,
            skip,
        }
    }

    pub fn with_json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = Some(json_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn serialized_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// Empty for built-in and composite types
    pub module_path: String,
    /// Empty for composite types such as pointers, slices and maps
    pub name: String,
    pub kind: TypeKind,
}

impl TypeInfo {
    pub fn named(module_path: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            module_path: module_path.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn builtin(name: impl Into<String>, kind: TypeKind) -> Self {
        Self::named("", name, kind)
    }

    fn composite(kind: TypeKind) -> Self {
        Self::named("", "", kind)
    }

    pub fn structure(
        module_path: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<StructField>,
    ) -> Self {
        Self::named(module_path, name, TypeKind::Struct(fields))
    }

    pub fn bool() -> Self {
        Self::builtin("bool", TypeKind::Bool)
    }

    pub fn int() -> Self {
        Self::builtin("int", TypeKind::Int)
    }

    pub fn uint8() -> Self {
        Self::builtin("uint8", TypeKind::Uint)
    }

    pub fn float64() -> Self {
        Self::builtin("float64", TypeKind::Float)
    }

    pub fn string() -> Self {
        Self::builtin("string", TypeKind::String)
    }

    /// The built-in `error` interface.
    pub fn error() -> Self {
        Self::builtin(
            "error",
            TypeKind::Interface {
                methods: vec!["Error".to_string()],
            },
        )
    }

    /// The request context type, which some conventions accept as a leading parameter.
    pub fn context() -> Self {
        Self::named(
            "context",
            "Context",
            TypeKind::Interface {
                methods: vec![
                    "Deadline".to_string(),
                    "Done".to_string(),
                    "Err".to_string(),
                    "Value".to_string(),
                ],
            },
        )
    }

    /// The empty interface: any value.
    pub fn any() -> Self {
        Self::composite(TypeKind::Interface { methods: vec![] })
    }

    pub fn pointer_to(elem: TypeInfo) -> Self {
        Self::composite(TypeKind::Pointer(Box::new(elem)))
    }

    pub fn slice_of(elem: TypeInfo) -> Self {
        Self::composite(TypeKind::Slice(Box::new(elem)))
    }

    pub fn array_of(elem: TypeInfo, len: usize) -> Self {
        Self::composite(TypeKind::Array {
            elem: Box::new(elem),
            len,
        })
    }

    pub fn map_of(key: TypeInfo, value: TypeInfo) -> Self {
        Self::composite(TypeKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn func() -> Self {
        Self::composite(TypeKind::Func)
    }

    pub fn chan_of(elem: TypeInfo) -> Self {
        Self::composite(TypeKind::Chan(Box::new(elem)))
    }

    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(&self.module_path, &self.name)
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// One level of pointer indirection removed.
    pub fn deref(&self) -> &TypeInfo {
        match &self.kind {
            TypeKind::Pointer(elem) => elem,
            _ => self,
        }
    }

    /// Every level of pointer indirection removed.
    pub fn deref_all(&self) -> &TypeInfo {
        let mut ty = self;
        while let TypeKind::Pointer(elem) = &ty.kind {
            ty = elem;
        }
        ty
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// Values of pointer and slice types may be absent.
    pub fn is_nilable(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_) | TypeKind::Slice(_))
    }

    pub fn is_error(&self) -> bool {
        self.module_path.is_empty() && self.name == "error"
    }

    pub fn is_context_like(&self) -> bool {
        let ty = self.deref_all();
        ty.module_path == "context" && ty.name == "Context"
    }

    pub fn is_empty_interface(&self) -> bool {
        matches!(&self.deref().kind, TypeKind::Interface { methods } if methods.is_empty())
    }

    pub fn is_exported_or_builtin(&self) -> bool {
        let ty = self.deref_all();
        ty.module_path.is_empty() || starts_uppercase(&ty.name)
    }

    /// The type as it would be written in source, qualified by its package name.
    pub fn printed(&self) -> String {
        if self.is_named() {
            return match package_name(&self.module_path) {
                Some(package) => format!("{package}.{}", self.name),
                None => self.name.clone(),
            };
        }

        match &self.kind {
            TypeKind::Pointer(elem) => format!("*{}", elem.printed()),
            TypeKind::Slice(elem) => format!("[]{}", elem.printed()),
            TypeKind::Array { elem, len } => format!("[{len}]{}", elem.printed()),
            TypeKind::Map { key, value } => format!("map[{}]{}", key.printed(), value.printed()),
            TypeKind::Chan(elem) => format!("chan {}", elem.printed()),
            TypeKind::Func => "func()".to_string(),
            TypeKind::Interface { methods } if methods.is_empty() => "interface {}".to_string(),
            TypeKind::Interface { methods } => format!("interface {{ {} }}", methods.join("; ")),
            TypeKind::Struct(_) => "struct {...}".to_string(),
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Int => "int".to_string(),
            TypeKind::Uint => "uint".to_string(),
            TypeKind::Float => "float64".to_string(),
            TypeKind::String => "string".to_string(),
        }
    }

    /// The type qualified by its full module path, e.g. `*example.com/geometry.Circle`.
    pub fn full_name(&self) -> String {
        let (prefix, ty) = match &self.kind {
            TypeKind::Pointer(elem) => ("*", elem.as_ref()),
            _ => ("", self),
        };

        if !ty.is_named() {
            return self.printed();
        }
        format!("{prefix}{}", ty.identity())
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.printed())
    }
}

fn package_name(module_path: &str) -> Option<&str> {
    module_path.rsplit('/').next().filter(|name| !name.is_empty())
}

pub(crate) fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
