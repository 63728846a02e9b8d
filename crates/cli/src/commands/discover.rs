// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fs::File,
    io::{self, Write},
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
};

use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueEnum, builder::PossibleValue};
use common::env_const::{OPENRPC_FLATTEN_SCHEMAS, OPENRPC_RPC_DISCOVER};
use reflect_env::{MapEnvironment, SystemEnvironment};
use rpc_introspection::{ExternalDocs, InfoObject, OpenRpcDocument};
use rpc_reflect::{
    Convention, DiscoverConfig, Discoverer, EthereumConvention, ServiceReceiver,
    StandardConvention, StaticMeta,
};
use tracing::info;

use crate::commands::command::{CommandDefinition, flag_arg, get, listen_arg, output_arg};
use crate::demo;

pub(crate) struct DiscoverCommandDefinition {}

impl CommandDefinition for DiscoverCommandDefinition {
    fn command(&self) -> Command {
        Command::new("discover")
            .about("Print the OpenRPC document of the demo ledger service")
            .arg(
                Arg::new("convention")
                    .long("convention")
                    .short('c')
                    .value_parser(clap::builder::EnumValueParser::<MethodConvention>::new())
                    .help("Method shape to document. Default: ethereum")
                    .default_value("ethereum"),
            )
            .arg(
                Arg::new("api-version")
                    .long("api-version")
                    .help("Base version of the API, stamped with the build time")
                    .default_value("1.0.0"),
            )
            .arg(flag_arg(
                "flatten",
                "Move every schema into `components.schemas`",
            ))
            .arg(flag_arg("rpc-discover", "Include the `rpc.discover` method"))
            .arg(listen_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let env = MapEnvironment::new_with_fallback(Arc::new(SystemEnvironment));
        discover(matches, env)
    }
}

/// Flags are layered over `env`, so `--flatten` wins over `OPENRPC_FLATTEN_SCHEMAS=false`.
fn discover(matches: &ArgMatches, mut env: MapEnvironment) -> Result<()> {
    let convention: MethodConvention =
        get(matches, "convention").unwrap_or(MethodConvention::Ethereum);
    let api_version: String = get(matches, "api-version").unwrap_or_default();

    if matches.get_flag("flatten") {
        env.set(OPENRPC_FLATTEN_SCHEMAS, "true");
    }
    if matches.get_flag("rpc-discover") {
        env.set(OPENRPC_RPC_DISCOVER, "true");
    }
    let config = DiscoverConfig::from_env(&env)?;

    let (receiver, convention): (Arc<dyn ServiceReceiver>, Arc<dyn Convention>) =
        match convention {
            MethodConvention::Standard => (
                Arc::new(demo::ledger_rpc()),
                Arc::new(StandardConvention::default()),
            ),
            MethodConvention::Ethereum => (
                Arc::new(demo::ledger()),
                Arc::new(EthereumConvention::default()),
            ),
        };

    let meta = StaticMeta::new(
        InfoObject::new("Ledger", api_version)
            .with_description("A demo ledger service, documented by reflection."),
    )
    .with_external_docs(
        ExternalDocs::new("https://spec.open-rpc.org").with_description("OpenRPC specification"),
    );

    let mut discoverer = Discoverer::new(config)
        .with_meta(Arc::new(meta))
        .with_declarations(Arc::new(demo::declarations()))
        .with_convention(convention);
    discoverer.register_receiver(receiver);
    for address in matches.get_many::<SocketAddr>("listen").into_iter().flatten() {
        discoverer.register_endpoint(*address);
    }

    let document = discoverer.discover()?;
    write_document(&document, get(matches, "output"))
}

fn write_document(document: &OpenRpcDocument, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            serde_json::to_writer_pretty(&mut File::create(&path)?, document)?;
            info!(path = %path.display(), "wrote OpenRPC document");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, document)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[derive(Clone, Debug)]
enum MethodConvention {
    Standard,
    Ethereum,
}

impl ValueEnum for MethodConvention {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Standard, Self::Ethereum]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Standard => Some(PossibleValue::new("standard")),
            Self::Ethereum => Some(PossibleValue::new("ethereum")),
        }
    }
}

#[cfg(test)]
mod tests {
    use common::env_const::{OPENRPC_METHOD_BLACKLIST, OPENRPC_STAMP_VERSION};

    use super::*;

    fn run_with_env(args: &[&str], env: MapEnvironment) -> Result<OpenRpcDocument> {
        let output = tempfile::NamedTempFile::new()?;
        let output_path = output.path().to_str().unwrap_or_default().to_string();

        let matches = DiscoverCommandDefinition {}.command().try_get_matches_from(
            ["discover", "--output", output_path.as_str()]
                .into_iter()
                .chain(args.iter().copied()),
        )?;
        discover(&matches, env)?;

        Ok(serde_json::from_reader(File::open(output.path())?)?)
    }

    fn run(args: &[&str]) -> Result<OpenRpcDocument> {
        run_with_env(args, MapEnvironment::new())
    }

    fn method_names(document: &OpenRpcDocument) -> Vec<&str> {
        document
            .methods
            .iter()
            .map(|method| method.name.as_str())
            .collect()
    }

    #[test]
    fn ethereum_demo() {
        let document = run(&["--listen", "127.0.0.1:8545"]).unwrap();

        assert_eq!(
            method_names(&document),
            vec!["ledger_balance", "ledger_credit", "ledger_history", "ledger_transfer"]
        );
        assert!(document.method("ledger_credit").unwrap().deprecated);
        assert_eq!(document.servers[0].url, "127.0.0.1:8545");
        assert!(document.info.version.starts_with("1.0.0"));

        let transfer = document.method("ledger_transfer").unwrap();
        let params: Vec<_> = transfer.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["from", "to", "amount"]);
    }

    #[test]
    fn standard_demo_flattened() {
        let document = run(&["--convention", "standard", "--flatten", "--rpc-discover"]).unwrap();

        assert_eq!(
            method_names(&document),
            vec!["LedgerRPC.Balance", "LedgerRPC.Transfer", "rpc.discover"]
        );
        assert!(document.components.is_some());
        assert!(
            document
                .methods
                .iter()
                .all(|method| method.result.schema.is_pure_reference())
        );
    }

    #[test]
    fn environment_configures_the_build() {
        let env = MapEnvironment::from([
            (OPENRPC_STAMP_VERSION, "false"),
            (OPENRPC_METHOD_BLACKLIST, "^ledger_credit$"),
            (OPENRPC_FLATTEN_SCHEMAS, "false"),
        ]);
        let document = run_with_env(&["--api-version", "2.1.0", "--flatten"], env).unwrap();

        assert_eq!(document.info.version, "2.1.0");
        assert_eq!(
            method_names(&document),
            vec!["ledger_balance", "ledger_history", "ledger_transfer"]
        );
        assert!(document.components.is_some());
    }
}
