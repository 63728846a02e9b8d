// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Method-shape conventions.
//!
//! A convention decides which callables are RPC methods, what they are called
//! and how their parameters and result map to content descriptors. The
//! method-level documentation (summary, description, deprecation, external
//! docs) is shared by every convention through the trait's provided methods.

mod ethereum;
mod standard;

pub use ethereum::{
    EthereumConvention, QualifiedTypeDescriptors, ethereum_method_name, is_ethereum_eligible,
};
pub use standard::{
    PrintedTypeDescriptors, StandardConvention, is_standard_eligible, standard_method_name,
};

use std::sync::Arc;

use regex::Regex;
use rpc_introspection::{ContentDescriptor, ExternalDocs, ParamStructure};

use crate::callable::{Callable, CallableOrigin};
use crate::declaration::DeclarationRecord;
use crate::descriptor::{DescriptorPolicy, mentions_deprecated};
use crate::error::ReflectError;
use crate::fields::FieldNaming;
use crate::schema::SchemaOptions;
use crate::types::TypeInfo;

pub const GITHUB_LINK_DESCRIPTION: &str = "Github remote link";

#[derive(Clone)]
pub struct ConventionConfig {
    pub field_naming: FieldNaming,
    /// Methods whose public name matches any of these are skipped
    pub method_blacklist: Vec<Regex>,
    pub schema: SchemaOptions,
    /// Per-field names and docs of content descriptors; each convention has its own default
    pub descriptor_policy: Option<Arc<dyn DescriptorPolicy>>,
    /// Language tag of the code block in method descriptions
    pub source_language: String,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            field_naming: FieldNaming::default(),
            method_blacklist: Vec::new(),
            schema: SchemaOptions::default(),
            descriptor_policy: None,
            source_language: "go".to_string(),
        }
    }
}

impl ConventionConfig {
    pub fn with_blacklist_pattern(mut self, pattern: &str) -> Result<Self, ReflectError> {
        self.method_blacklist.push(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_descriptor_policy(mut self, policy: Arc<dyn DescriptorPolicy>) -> Self {
        self.descriptor_policy = Some(policy);
        self
    }
}

pub trait Convention: Send + Sync {
    fn name(&self) -> &'static str;

    fn config(&self) -> &ConventionConfig;

    fn descriptor_policy(&self) -> &dyn DescriptorPolicy;

    fn is_eligible(&self, callable: &Callable) -> bool;

    fn method_name(&self, module: Option<&str>, receiver: &TypeInfo, callable: &Callable) -> String;

    fn params(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<Vec<ContentDescriptor>, ReflectError>;

    fn result(
        &self,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Result<ContentDescriptor, ReflectError>;

    fn is_blacklisted(&self, method_name: &str) -> bool {
        self.config()
            .method_blacklist
            .iter()
            .any(|pattern| pattern.is_match(method_name))
    }

    /// The first line of the doc comment.
    fn summary(&self, declaration: &DeclarationRecord) -> Option<String> {
        declaration
            .doc
            .as_deref()
            .and_then(|doc| doc.lines().map(str::trim).find(|line| !line.is_empty()))
            .map(str::to_string)
    }

    /// The declaration source as a code block, preceded by a link to it when one can be built.
    fn description(
        &self,
        receiver: &TypeInfo,
        callable: &Callable,
        declaration: &DeclarationRecord,
    ) -> Option<String> {
        let code = format!(
            "```{}\n{}\n```",
            self.config().source_language,
            declaration.source
        );
        match github_link(receiver, callable) {
            Some(url) => Some(format!("[{url}]({url})\n{code}")),
            None => Some(code),
        }
    }

    fn deprecated(&self, declaration: &DeclarationRecord) -> bool {
        mentions_deprecated(declaration.doc.as_deref())
    }

    fn external_docs(&self, receiver: &TypeInfo, callable: &Callable) -> Option<ExternalDocs> {
        github_link(receiver, callable)
            .map(|url| ExternalDocs::new(url).with_description(GITHUB_LINK_DESCRIPTION))
    }

    fn param_structure(&self) -> ParamStructure {
        ParamStructure::ByPosition
    }
}

/// Link to the callable's definition, for receivers defined in a github.com module.
///
/// `github.com/<owner>/<repo>/<dir>...` becomes
/// `https://github.com/<owner>/<repo>/blob/master/<dir>/<file>#L<line>`.
pub fn github_link(receiver: &TypeInfo, callable: &Callable) -> Option<String> {
    let CallableOrigin::Source { file, line } = &callable.origin else {
        return None;
    };
    let module_path = &receiver.deref_all().module_path;
    if !module_path.starts_with("github.com/") {
        return None;
    }

    let segments: Vec<&str> = module_path.split('/').collect();
    if segments.len() < 3 {
        return None;
    }
    let repository = segments[..3].join("/");
    let directory = match segments[3..].join("/") {
        relative if relative.is_empty() => relative,
        relative => format!("/{relative}"),
    };
    let base = file.rsplit('/').next().unwrap_or(file);

    Some(format!(
        "https://{repository}/blob/master{directory}/{base}#L{line}"
    ))
}

pub(crate) fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::FieldGroup;
    use crate::fields::NamedField;

    /// Optional fields described by their declared type.
    struct OptionalFields;

    impl DescriptorPolicy for OptionalFields {
        fn description(&self, ty: &TypeInfo, field: &NamedField<'_>) -> Option<String> {
            Some(format!("{} ({})", field.type_expr(), ty.printed()))
        }

        fn required(&self, _field: &NamedField<'_>) -> bool {
            false
        }
    }

    fn receiver(module_path: &str) -> TypeInfo {
        TypeInfo::structure(module_path, "Calculator", vec![])
    }

    fn callable() -> Callable {
        Callable::new("Add").defined_at("/home/dev/go/src/fakearithmetic/fakemath.go", 82)
    }

    #[test]
    fn github_links() {
        assert_eq!(
            github_link(
                &receiver("github.com/etclabscore/go-openrpc-reflect/internal/fakearithmetic"),
                &callable()
            )
            .as_deref(),
            Some(
                "https://github.com/etclabscore/go-openrpc-reflect/blob/master/internal/fakearithmetic/fakemath.go#L82"
            )
        );
        assert_eq!(
            github_link(&receiver("github.com/etclabscore/calc"), &callable()).as_deref(),
            Some("https://github.com/etclabscore/calc/blob/master/fakemath.go#L82")
        );
        assert_eq!(github_link(&receiver("example.com/calc"), &callable()), None);
        assert_eq!(
            github_link(
                &receiver("github.com/etclabscore/calc"),
                &Callable::new("Add").autogenerated()
            ),
            None
        );
    }

    #[test]
    fn lower_first_letter() {
        assert_eq!(lower_first("Calculator"), "calculator");
        assert_eq!(lower_first("HasBatteries"), "hasBatteries");
        assert_eq!(lower_first("calc"), "calc");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn shared_method_documentation() {
        let convention = StandardConvention::default();
        let declaration = DeclarationRecord::function("Div")
            .with_doc("Div is deprecated. Use Mul instead.\nSecond line.")
            .with_source("func (c *CalculatorRPC) Div(arg DivArg, reply *DivReply) error");

        assert_eq!(
            convention.summary(&declaration).as_deref(),
            Some("Div is deprecated. Use Mul instead.")
        );
        assert!(convention.deprecated(&declaration));
        assert_eq!(
            convention
                .description(&receiver("example.com/calc"), &callable(), &declaration)
                .as_deref(),
            Some("```go\nfunc (c *CalculatorRPC) Div(arg DivArg, reply *DivReply) error\n```")
        );

        let linked = convention
            .description(&receiver("github.com/acme/calc"), &callable(), &declaration)
            .unwrap();
        assert!(linked.starts_with(
            "[https://github.com/acme/calc/blob/master/fakemath.go#L82](https://github.com/acme/calc/blob/master/fakemath.go#L82)\n```go\n"
        ));
    }

    #[test]
    fn blacklist_matches_method_names() {
        let config = ConventionConfig::default()
            .with_blacklist_pattern("^Calculator\\.Broken")
            .unwrap();
        let convention = StandardConvention::new(config);
        assert!(convention.is_blacklisted("Calculator.BrokenReset"));
        assert!(!convention.is_blacklisted("Calculator.Add"));

        assert!(ConventionConfig::default().with_blacklist_pattern("(").is_err());
    }

    #[test]
    fn descriptor_policy_is_injectable() {
        let config =
            ConventionConfig::default().with_descriptor_policy(Arc::new(OptionalFields));

        let double = Callable::new("Double")
            .with_param(TypeInfo::int())
            .with_result(TypeInfo::int());
        let double_declaration = DeclarationRecord::function("Double")
            .with_param(FieldGroup::named(["n"], "int"))
            .with_result(FieldGroup::unnamed("int"));

        let ethereum = EthereumConvention::new(config.clone());
        let params = ethereum.params(&double, &double_declaration).unwrap();
        assert_eq!(params[0].description.as_deref(), Some("int (int)"));
        assert!(!params[0].required);
        assert!(!ethereum.result(&double, &double_declaration).unwrap().required);

        let defaults = EthereumConvention::default()
            .params(&double, &double_declaration)
            .unwrap();
        assert_eq!(defaults[0].description.as_deref(), Some("`int`"));
        assert!(defaults[0].required);

        let add = Callable::new("Add")
            .with_param(TypeInfo::int())
            .with_param(TypeInfo::pointer_to(TypeInfo::int()))
            .with_result(TypeInfo::error());
        let add_declaration = DeclarationRecord::function("Add")
            .with_param(FieldGroup::named(["arg"], "int"))
            .with_param(FieldGroup::named(["reply"], "*int"))
            .with_result(FieldGroup::unnamed("error"));

        let standard = StandardConvention::new(config);
        let result = standard.result(&add, &add_declaration).unwrap();
        assert_eq!(result.description.as_deref(), Some("*int (int)"));
        assert!(!result.required);
    }
}
