// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A small ledger service, described in both method shapes.

use rpc_reflect::{
    Callable, DeclarationRecord, FieldGroup, ServiceDescriptor, StructField, SymbolTable,
    TypeInfo, TypeKind,
};

const MODULE: &str = "github.com/openrpc-reflect/demo/ledger";
const FILE: &str = "ledger/ledger.go";

fn uint64() -> TypeInfo {
    TypeInfo::builtin("uint64", TypeKind::Uint)
}

fn receipt() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "Receipt",
        vec![
            StructField::new("ID", TypeInfo::string()).with_json_name("id"),
            StructField::new("From", TypeInfo::string()).with_json_name("from"),
            StructField::new("To", TypeInfo::string()).with_json_name("to"),
            StructField::new("Amount", uint64()).with_json_name("amount"),
            StructField::new("Memo", TypeInfo::pointer_to(TypeInfo::string()))
                .with_json_name("memo"),
        ],
    )
}

fn ledger_type() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "Ledger",
        vec![StructField::new(
            "balances",
            TypeInfo::map_of(TypeInfo::string(), uint64()),
        )],
    )
}

fn ledger_rpc_type() -> TypeInfo {
    TypeInfo::structure(MODULE, "LedgerRPC", vec![])
}

fn transfer_arg() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "TransferArg",
        vec![
            StructField::new("From", TypeInfo::string())
                .with_json_name("from")
                .required(),
            StructField::new("To", TypeInfo::string())
                .with_json_name("to")
                .required(),
            StructField::new("Amount", uint64())
                .with_json_name("amount")
                .required(),
            StructField::new("Memo", TypeInfo::string()).with_json_name("memo"),
        ],
    )
}

/// Methods in the Ethereum shape.
pub fn ledger() -> ServiceDescriptor {
    ServiceDescriptor::new(ledger_type())
        .with_method(
            Callable::new("ledger.(*Ledger).Balance")
                .with_param(TypeInfo::context())
                .with_param(TypeInfo::string())
                .with_result(uint64())
                .with_result(TypeInfo::error())
                .defined_at(FILE, 24),
        )
        .with_method(
            Callable::new("ledger.(*Ledger).Transfer")
                .with_param(TypeInfo::context())
                .with_param(TypeInfo::string())
                .with_param(TypeInfo::string())
                .with_param(uint64())
                .with_result(TypeInfo::pointer_to(receipt()))
                .with_result(TypeInfo::error())
                .defined_at(FILE, 33),
        )
        .with_method(
            Callable::new("ledger.(*Ledger).History")
                .with_param(TypeInfo::string())
                .with_result(TypeInfo::slice_of(receipt()))
                .defined_at(FILE, 52),
        )
        .with_method(
            Callable::new("ledger.(*Ledger).Credit")
                .with_param(TypeInfo::string())
                .with_param(uint64())
                .with_result(TypeInfo::error())
                .defined_at(FILE, 61),
        )
        .with_method(Callable::new("ledger.(*Ledger).audit").defined_at(FILE, 70))
}

/// Methods in the Standard shape.
pub fn ledger_rpc() -> ServiceDescriptor {
    ServiceDescriptor::new(ledger_rpc_type())
        .with_method(
            Callable::new("ledger.(*LedgerRPC).Balance")
                .with_param(TypeInfo::named(MODULE, "Account", TypeKind::String))
                .with_param(TypeInfo::pointer_to(uint64()))
                .with_result(TypeInfo::error())
                .defined_at(FILE, 84),
        )
        .with_method(
            Callable::new("ledger.(*LedgerRPC).Transfer")
                .with_param(transfer_arg())
                .with_param(TypeInfo::pointer_to(receipt()))
                .with_result(TypeInfo::error())
                .defined_at(FILE, 90),
        )
}

pub fn declarations() -> SymbolTable {
    let ledger = ledger_type().identity();
    let ledger_rpc = ledger_rpc_type().identity();

    [
        DeclarationRecord::method(ledger.clone(), "Balance")
            .with_doc("Balance returns the balance of an account.")
            .with_param(FieldGroup::named(["ctx"], "context.Context"))
            .with_param(FieldGroup::named(["account"], "string").with_comment("account holder"))
            .with_result(FieldGroup::unnamed("uint64"))
            .with_result(FieldGroup::unnamed("error"))
            .with_source("func (l *Ledger) Balance(ctx context.Context, account string) (uint64, error)"),
        DeclarationRecord::method(ledger.clone(), "Transfer")
            .with_doc("Transfer moves funds between two accounts.\nThe receipt is nil when nothing was moved.")
            .with_param(FieldGroup::named(["ctx"], "context.Context"))
            .with_param(FieldGroup::named(["from", "to"], "string"))
            .with_param(FieldGroup::named(["amount"], "uint64"))
            .with_result(FieldGroup::named(["receipt"], "*Receipt"))
            .with_result(FieldGroup::named(["err"], "error"))
            .with_source(
                "func (l *Ledger) Transfer(ctx context.Context, from, to string, amount uint64) (receipt *Receipt, err error)",
            ),
        DeclarationRecord::method(ledger.clone(), "History")
            .with_doc("History lists the receipts of an account, oldest first.")
            .with_param(FieldGroup::named(["account"], "string"))
            .with_result(FieldGroup::unnamed("[]Receipt"))
            .with_source("func (l *Ledger) History(account string) []Receipt"),
        DeclarationRecord::method(ledger.clone(), "Credit")
            .with_doc("Credit adds funds to an account.\nDeprecated: use Transfer from the treasury account.")
            .with_param(FieldGroup::named(["account"], "string"))
            .with_param(FieldGroup::named(["amount"], "uint64"))
            .with_result(FieldGroup::unnamed("error"))
            .with_source("func (l *Ledger) Credit(account string, amount uint64) error"),
        DeclarationRecord::method(ledger, "audit").with_source("func (l *Ledger) audit()"),
        DeclarationRecord::method(ledger_rpc.clone(), "Balance")
            .with_doc("Balance returns the balance of an account.")
            .with_param(FieldGroup::named(["account"], "Account"))
            .with_param(FieldGroup::named(["balance"], "*uint64"))
            .with_result(FieldGroup::unnamed("error"))
            .with_source("func (l *LedgerRPC) Balance(account Account, balance *uint64) error"),
        DeclarationRecord::method(ledger_rpc, "Transfer")
            .with_doc("Transfer moves funds between two accounts.")
            .with_param(FieldGroup::named(["arg"], "TransferArg"))
            .with_param(FieldGroup::named(["receipt"], "*Receipt"))
            .with_result(FieldGroup::unnamed("error"))
            .with_source("func (l *LedgerRPC) Transfer(arg TransferArg, receipt *Receipt) error"),
    ]
    .into_iter()
    .fold(SymbolTable::new(), |table, record| {
        table.with_declaration(FILE, record)
    })
}
