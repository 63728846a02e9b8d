// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A calculator service with methods of many shapes: two receivers
//! (`Calculator` for the Ethereum convention, `CalculatorRPC` for the
//! Standard one) and the declarations of their methods.

#![allow(dead_code)]

use rpc_reflect::{
    Callable, DeclarationRecord, FieldGroup, ServiceDescriptor, StructField, SymbolTable,
    TypeInfo,
};

pub const MODULE: &str = "github.com/etclabscore/go-openrpc-reflect/internal/fakearithmetic";
pub const GEOMETRY_MODULE: &str = "github.com/etclabscore/go-openrpc-reflect/internal/fakegeometry";
pub const FILE: &str =
    "/home/dev/go/src/github.com/etclabscore/go-openrpc-reflect/internal/fakearithmetic/fakemath.go";

pub fn calculator_type() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "Calculator",
        vec![
            StructField::new("h", TypeInfo::slice_of(history_item())),
            StructField::new("r", TypeInfo::pointer_to(record())),
        ],
    )
}

pub fn calculator_rpc_type() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "CalculatorRPC",
        vec![StructField::new("Calculator", TypeInfo::pointer_to(calculator_type())).skipped()],
    )
}

pub fn history_item() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "HistoryItem",
        vec![
            StructField::new("Method", TypeInfo::string()),
            StructField::new("Args", TypeInfo::slice_of(TypeInfo::any())),
        ],
    )
}

pub fn record() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "Record",
        vec![
            StructField::new("Count", TypeInfo::int()).with_json_name("total_calculator_use"),
            StructField::new("Operations", op_tally()),
        ],
    )
}

pub fn op_tally() -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        "OpTally",
        vec![StructField::new(
            "m",
            TypeInfo::map_of(TypeInfo::string(), TypeInfo::int()),
        )],
    )
}

pub fn circle() -> TypeInfo {
    TypeInfo::structure(
        GEOMETRY_MODULE,
        "Circle",
        vec![
            StructField::new("Radius", TypeInfo::float64()),
            StructField::new("X", TypeInfo::float64()),
            StructField::new("Y", TypeInfo::float64()),
        ],
    )
}

pub fn pi() -> TypeInfo {
    TypeInfo::structure(MODULE, "Pi", vec![])
}

pub fn big_int() -> TypeInfo {
    TypeInfo::structure(
        "math/big",
        "Int",
        vec![
            StructField::new("neg", TypeInfo::bool()),
            StructField::new("abs", TypeInfo::slice_of(TypeInfo::uint8())),
        ],
    )
}

fn named(name: &str, underlying: TypeInfo) -> TypeInfo {
    TypeInfo::named(MODULE, name, underlying.kind)
}

fn operands(name: &str) -> TypeInfo {
    TypeInfo::structure(
        MODULE,
        name,
        vec![
            StructField::new("A", TypeInfo::int()).with_json_name("a"),
            StructField::new("B", TypeInfo::int()).with_json_name("b"),
        ],
    )
}

pub fn add_arg() -> TypeInfo {
    operands("AddArg")
}

fn method(name: &str, line: u32) -> Callable {
    Callable::new(format!("fakearithmetic.(*Calculator).{name}")).defined_at(FILE, line)
}

fn rpc_method(name: &str, line: u32) -> Callable {
    Callable::new(format!("fakearithmetic.(*CalculatorRPC).{name}")).defined_at(FILE, line)
}

/// Methods promoted from the embedded `*Calculator` are compiler-generated wrappers.
fn promoted(name: &str) -> Callable {
    Callable::new(format!("fakearithmetic.(*CalculatorRPC).{name}")).autogenerated()
}

pub fn calculator() -> ServiceDescriptor {
    ServiceDescriptor::new(calculator_type())
        .with_method(method("memoryReset", 49))
        .with_method(
            method("storeLatest", 57)
                .with_param(TypeInfo::string())
                .with_param(TypeInfo::slice_of(TypeInfo::any())),
        )
        .with_method(method("HasBatteries", 71).with_result(TypeInfo::bool()))
        .with_method(
            method("Add", 77)
                .with_param(TypeInfo::int())
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::int()),
        )
        .with_method(
            method("ConstructCircle", 86)
                .with_param(TypeInfo::float64())
                .with_param(TypeInfo::float64())
                .with_param(TypeInfo::float64())
                .with_result(TypeInfo::pointer_to(circle())),
        )
        .with_method(
            method("GuessAreaOfCircle", 96)
                .with_param(TypeInfo::pointer_to(pi()))
                .with_param(TypeInfo::pointer_to(circle()))
                .with_result(TypeInfo::float64()),
        )
        .with_method(
            method("Mul", 101)
                .with_param(TypeInfo::int())
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::int())
                .with_result(TypeInfo::error()),
        )
        .with_method(
            method("BigMul", 110)
                .with_param(TypeInfo::pointer_to(big_int()))
                .with_param(TypeInfo::pointer_to(big_int()))
                .with_result(TypeInfo::pointer_to(big_int())),
        )
        .with_method(
            method("Div", 118)
                .with_param(TypeInfo::int())
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::error()),
        )
        .with_method(
            method("IsZero", 124)
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::bool()),
        )
        .with_method(method("History", 130).with_result(TypeInfo::slice_of(history_item())))
        .with_method(method("Last", 135).with_result(TypeInfo::pointer_to(history_item())))
        .with_method(method("GetRecord", 143).with_result(TypeInfo::pointer_to(record())))
        .with_method(method("Reset", 148))
        .with_method(
            method("ThreePseudoRandomNumbers", 153)
                .with_result(TypeInfo::int())
                .with_result(TypeInfo::int())
                .with_result(TypeInfo::int()),
        )
        .with_method(
            method("LatestError", 160)
                .with_result(TypeInfo::error())
                .with_result(TypeInfo::bool()),
        )
        .with_method(
            method("SumWithContext", 166)
                .with_param(TypeInfo::context())
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::int())
                .with_result(TypeInfo::error()),
        )
}

pub fn calculator_rpc() -> ServiceDescriptor {
    ServiceDescriptor::new(calculator_rpc_type())
        .with_method(
            rpc_method("HasBatteries", 183)
                .with_param(named("HasBatteriesArg", TypeInfo::string()))
                .with_param(TypeInfo::pointer_to(named(
                    "HasBatteriesReply",
                    TypeInfo::bool(),
                )))
                .with_result(TypeInfo::error()),
        )
        .with_method(
            rpc_method("Add", 195)
                .with_param(add_arg())
                .with_param(TypeInfo::pointer_to(named("AddReply", TypeInfo::int())))
                .with_result(TypeInfo::error()),
        )
        .with_method(
            rpc_method("BigMul", 206)
                .with_param(TypeInfo::structure(
                    MODULE,
                    "BigMulArg",
                    vec![
                        StructField::new("A", TypeInfo::pointer_to(big_int())).with_json_name("a"),
                        StructField::new("B", TypeInfo::pointer_to(big_int())),
                    ],
                ))
                .with_param(TypeInfo::pointer_to(TypeInfo::named(
                    MODULE,
                    "BigMulReply",
                    big_int().kind,
                )))
                .with_result(TypeInfo::error()),
        )
        .with_method(
            rpc_method("Div", 218)
                .with_param(operands("DivArg"))
                .with_param(TypeInfo::pointer_to(named("DivReply", TypeInfo::int())))
                .with_result(TypeInfo::error()),
        )
        .with_method(
            rpc_method("Mul", 224)
                .with_param(TypeInfo::int())
                .with_param(TypeInfo::int())
                .with_result(TypeInfo::int())
                .with_result(TypeInfo::error()),
        )
        .with_method(
            rpc_method("IsZero", 235)
                .with_param(big_int())
                .with_param(TypeInfo::pointer_to(named("IsZeroArg", TypeInfo::bool())))
                .with_result(TypeInfo::error()),
        )
        .with_method(rpc_method("BrokenReset", 239))
        .with_method(promoted("Reset"))
        .with_method(
            promoted("ConstructCircle")
                .with_param(TypeInfo::float64())
                .with_param(TypeInfo::float64())
                .with_param(TypeInfo::float64())
                .with_result(TypeInfo::pointer_to(circle())),
        )
}

fn calculator_decl(name: &str) -> DeclarationRecord {
    DeclarationRecord::method(calculator_type().identity(), name)
}

fn rpc_decl(name: &str) -> DeclarationRecord {
    DeclarationRecord::method(calculator_rpc_type().identity(), name)
}

fn error_result() -> FieldGroup {
    FieldGroup::unnamed("error")
}

fn calculator_declarations() -> Vec<DeclarationRecord> {
    vec![
        calculator_decl("memoryReset")
            .with_doc("memoryReset will not be an RPC eligible method because it is not exported.")
            .with_source("func (c *Calculator) memoryReset()"),
        calculator_decl("storeLatest")
            .with_param(FieldGroup::named(["operationName"], "string"))
            .with_param(FieldGroup::named(["args"], "...interface{}"))
            .with_source("func (c *Calculator) storeLatest(operationName string, args ...interface{})"),
        calculator_decl("HasBatteries")
            .with_doc("HasBatteries checks whether the calculator has batteries.")
            .with_result(FieldGroup::unnamed("bool"))
            .with_source("func (c *Calculator) HasBatteries() bool"),
        calculator_decl("Add")
            .with_doc("Add adds two integers together.")
            .with_param(FieldGroup::named(["argA", "argB"], "int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_source("func (c *Calculator) Add(argA, argB int) int"),
        calculator_decl("ConstructCircle")
            .with_doc("ConstructCircle makes a circle.\nIt returns an unnamed external package type pointer.")
            .with_param(FieldGroup::named(["x", "y"], "float64"))
            .with_param(FieldGroup::named(["radius"], "float64"))
            .with_result(FieldGroup::unnamed("*fakegeometry.Circle"))
            .with_source(
                "func (c *Calculator) ConstructCircle(x, y float64, radius float64) *fakegeometry.Circle",
            ),
        calculator_decl("GuessAreaOfCircle")
            .with_doc("GuessAreaOfCircle returns a pretty good guess.\nIt accepts an unnamed external package pointer as its only argument.")
            .with_param(FieldGroup::unnamed("*Pi"))
            .with_param(FieldGroup::unnamed("*fakegeometry.Circle"))
            .with_result(FieldGroup::unnamed("float64"))
            .with_source("func (c *Calculator) GuessAreaOfCircle(*Pi, *fakegeometry.Circle) float64"),
        calculator_decl("Mul")
            .with_doc("Mul multiplies the arguments.")
            .with_param(FieldGroup::named(["argA"], "int"))
            .with_param(FieldGroup::named(["argB"], "int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_result(error_result())
            .with_source("func (c *Calculator) Mul(argA int, argB int) (int, error)"),
        calculator_decl("BigMul")
            .with_doc("BigMul returns a new *big.Int, the product of argA and argB.")
            .with_param(FieldGroup::named(["argA", "argB"], "*big.Int"))
            .with_result(FieldGroup::unnamed("*big.Int"))
            .with_source("func (c *Calculator) BigMul(argA, argB *big.Int) *big.Int"),
        calculator_decl("Div")
            .with_doc("Div doesn's actually do anything. You should use Mul instead.\nWarning: Deprecated.")
            .with_param(FieldGroup::unnamed("int"))
            .with_param(FieldGroup::unnamed("int"))
            .with_result(error_result())
            .with_source("func (c *Calculator) Div(int, int) error"),
        calculator_decl("IsZero")
            .with_doc("IsZero tells you if a number is zero. People love this one.")
            .with_param(FieldGroup::named(["argA"], "int"))
            .with_result(FieldGroup::unnamed("bool"))
            .with_source("func (c *Calculator) IsZero(argA int) bool"),
        calculator_decl("History")
            .with_doc("History returns the complete history of the calculator since it was last reset.")
            .with_result(FieldGroup::unnamed("[]HistoryItem"))
            .with_source("func (c *Calculator) History() []HistoryItem"),
        calculator_decl("Last")
            .with_doc("Last returns the last command the calculator did.")
            .with_result(FieldGroup::named(["calculation"], "*HistoryItem"))
            .with_source("func (c *Calculator) Last() (calculation *HistoryItem)"),
        calculator_decl("GetRecord")
            .with_doc("GetRecord returns a special data type with a total use count and a tally of done operations.")
            .with_result(FieldGroup::unnamed("*Record"))
            .with_source("func (c *Calculator) GetRecord() *Record"),
        calculator_decl("Reset")
            .with_doc("Reset clears the calculator memory.")
            .with_source("func (c *Calculator) Reset()"),
        calculator_decl("ThreePseudoRandomNumbers")
            .with_doc("ThreeRandomNumbers returns three psdeuo-random numbers.")
            .with_result(FieldGroup::unnamed("int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_source("func (c *Calculator) ThreePseudoRandomNumbers() (int, int, int)"),
        calculator_decl("LatestError")
            .with_doc("Latest error returns the latest error the calculator encountered.")
            .with_result(error_result())
            .with_result(FieldGroup::unnamed("bool"))
            .with_source("func (c *Calculator) LatestError() (error, bool)"),
        calculator_decl("SumWithContext")
            .with_doc("AddWithContext has context.Context as its first parameter,\nwhich ethereum/go-ethereum/rpc will skip.")
            .with_param(FieldGroup::named(["ctx"], "context.Context"))
            .with_param(FieldGroup::named(["number"], "int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_result(error_result())
            .with_source("func (c *Calculator) SumWithContext(ctx context.Context, number int) (int, error)"),
    ]
}

fn calculator_rpc_declarations() -> Vec<DeclarationRecord> {
    vec![
        rpc_decl("HasBatteries")
            .with_doc("HasBatteries returns true if the calculator has batteries.")
            .with_param(FieldGroup::named(["arg"], "HasBatteriesArg"))
            .with_param(FieldGroup::named(["reply"], "*HasBatteriesReply"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) HasBatteries(arg HasBatteriesArg, reply *HasBatteriesReply) error"),
        rpc_decl("Add")
            .with_doc("Add sums the A and B fields of the argument.")
            .with_param(FieldGroup::named(["arg"], "AddArg"))
            .with_param(FieldGroup::named(["reply"], "*AddReply"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) Add(arg AddArg, reply *AddReply) error"),
        rpc_decl("BigMul")
            .with_param(FieldGroup::named(["arg"], "BigMulArg"))
            .with_param(FieldGroup::named(["reply"], "*BigMulReply"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) BigMul(arg BigMulArg, reply *BigMulReply) error"),
        rpc_decl("Div")
            .with_doc("Div is deprecated. Use Mul instead.")
            .with_param(FieldGroup::named(["arg"], "DivArg"))
            .with_param(FieldGroup::named(["reply"], "*DivReply"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) Div(arg DivArg, reply *DivReply) error"),
        rpc_decl("Mul")
            .with_doc("Mul multiplies the arguments,\nbut WILL NOT be eligible in standard RPC; wrong signature.")
            .with_param(FieldGroup::named(["argA"], "int"))
            .with_param(FieldGroup::named(["argB"], "int"))
            .with_result(FieldGroup::unnamed("int"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) Mul(argA int, argB int) (int, error)"),
        rpc_decl("IsZero")
            .with_doc("IsZero has throwaway parameters.")
            .with_param(FieldGroup::unnamed("big.Int"))
            .with_param(FieldGroup::unnamed("*IsZeroArg"))
            .with_result(error_result())
            .with_source("func (c *CalculatorRPC) IsZero(big.Int, *IsZeroArg) error"),
        rpc_decl("BrokenReset").with_source("func (c *CalculatorRPC) BrokenReset()"),
    ]
}

pub fn declarations() -> SymbolTable {
    let mut table = SymbolTable::new();
    for record in calculator_declarations()
        .into_iter()
        .chain(calculator_rpc_declarations())
    {
        table.insert(FILE, record);
    }
    table
}
