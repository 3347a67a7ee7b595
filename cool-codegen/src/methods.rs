//! Emits one label plus a minimal instruction body per user-defined
//! method. This is intentionally not an optimizing code generator: it
//! demonstrates the object/method-environment contract rather than
//! producing a complete runnable binary. Built-in method bodies are
//! not emitted here; they are expected to live in a small fixed
//! runtime support object linked in separately.

use cool_ast::{Expression, Program};
use cool_sema::AnalysisResult;
use std::fmt::Write as _;

pub fn emit_method_bodies(out: &mut String, program: &Program, analysis: &AnalysisResult) {
    for class in &program.classes {
        if !analysis.classes.contains(&class.name.value) {
            continue;
        }
        for method in &class.methods {
            writeln!(out, "{}_{}:", class.name.value, method.name.value).ok();
            writeln!(out, "\tpushq %rbp").ok();
            writeln!(out, "\tmovq %rsp, %rbp").ok();
            emit_expression(out, &method.body);
            writeln!(out, "\tpopq %rbp").ok();
            writeln!(out, "\tret").ok();
        }
    }
}

/// Best-effort, non-optimizing expression emitter: each case leaves a
/// result in `%rax`. Sufficient to show the shape of the contract;
/// correctness of the generated machine code is out of scope.
fn emit_expression(out: &mut String, expr: &Expression) {
    match expr {
        Expression::IntLiteral(_, value) => {
            writeln!(out, "\tmovq ${value}, %rax").ok();
        }
        Expression::BoolLiteral(_, value) => {
            writeln!(out, "\tmovq ${}, %rax", *value as i64).ok();
        }
        Expression::StringLiteral(_, value) => {
            writeln!(out, "\t# string literal {value:?} elided").ok();
        }
        Expression::Add(lhs, rhs) => emit_binop(out, lhs, rhs, "addq"),
        Expression::Sub(lhs, rhs) => emit_binop(out, lhs, rhs, "subq"),
        Expression::Mul(lhs, rhs) => emit_binop(out, lhs, rhs, "imulq"),
        Expression::Div(lhs, rhs) => emit_binop(out, lhs, rhs, "idivq"),
        Expression::Block(exprs) => {
            for e in exprs {
                emit_expression(out, e);
            }
        }
        Expression::Paren(inner) | Expression::Neg(inner) | Expression::Not(inner) | Expression::IsVoid(inner) => {
            emit_expression(out, inner);
        }
        Expression::Ident(tok) => {
            writeln!(out, "\t# load identifier {}", tok.value).ok();
        }
        _ => {
            writeln!(out, "\t# unimplemented in this minimal emitter").ok();
        }
    }
}

fn emit_binop(out: &mut String, lhs: &Expression, rhs: &Expression, op: &str) {
    emit_expression(out, lhs);
    writeln!(out, "\tpushq %rax").ok();
    emit_expression(out, rhs);
    writeln!(out, "\tmovq %rax, %rbx").ok();
    writeln!(out, "\tpopq %rax").ok();
    writeln!(out, "\t{op} %rbx, %rax").ok();
}
