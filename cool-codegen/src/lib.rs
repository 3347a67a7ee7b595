//! A minimal, non-optimizing x86-64 assembly emitter.
//!
//! Consumes exactly the interface the semantic analyzer is specified
//! to hand off: the class table, the object environments, and the
//! method environment (with defining class, needed to place
//! dispatch-table slots). Does not run unless the caller has already
//! checked `had_errors` on the analysis result; see `cool-cli`.

mod layout;
mod methods;

use cool_ast::Program;
use cool_sema::AnalysisResult;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("cannot generate code for a program with unresolved semantic errors")]
    HadSemanticErrors,
}

/// Emits a complete `.s` file: object layout constants, one vtable per
/// class, and one text body per successfully type-checked method.
pub fn generate(program: &Program, analysis: &AnalysisResult) -> Result<String, CodegenError> {
    if analysis.had_errors {
        return Err(CodegenError::HadSemanticErrors);
    }

    let mut out = String::new();
    writeln!(out, "\t.section .rodata").ok();
    layout::emit_class_name_table(&mut out, &analysis.classes);

    writeln!(out, "\t.section .data").ok();
    layout::emit_vtables(&mut out, &analysis.classes, &analysis.method_environment);

    writeln!(out, "\t.section .text").ok();
    methods::emit_method_bodies(&mut out, program, analysis);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_ast::{Class, Expression, Method, Token};

    fn tok(v: &str) -> Token {
        Token::new(v, 1, 1)
    }

    #[test]
    fn refuses_to_run_after_semantic_errors() {
        let program = Program {
            classes: vec![Class {
                name: tok("Main"),
                superclass: None,
                attributes: vec![],
                methods: vec![Method {
                    name: tok("main"),
                    formals: vec![],
                    return_type: tok("Object"),
                    body: Expression::Ident(tok("undeclared")),
                }],
            }],
        };
        let analysis = cool_sema::analyze(&program, None).expect("analyzes");
        assert!(analysis.had_errors);
        assert!(matches!(generate(&program, &analysis), Err(CodegenError::HadSemanticErrors)));
    }

    #[test]
    fn emits_assembly_for_a_clean_program() {
        let program = Program {
            classes: vec![Class {
                name: tok("Main"),
                superclass: None,
                attributes: vec![],
                methods: vec![Method {
                    name: tok("main"),
                    formals: vec![],
                    return_type: tok("Int"),
                    body: Expression::IntLiteral(tok("0"), 0),
                }],
            }],
        };
        let analysis = cool_sema::analyze(&program, None).expect("analyzes");
        assert!(!analysis.had_errors);
        let asm = generate(&program, &analysis).expect("generates");
        assert!(asm.contains("Main_main"));
    }
}
