//! The semantic analyzer: class hierarchy construction, well-formedness
//! checking, symbol-environment construction, and `SELF_TYPE`/`lub`
//! aware expression type-checking.
//!
//! [`analyze`] is the single entry point and mirrors the pass ordering
//! of the system it replaces: built-ins, class registration, parent
//! linking, cycle detection, attributes, methods, environments, then
//! attribute initializers and method bodies. Every pass follows
//! continue-past-error: a bad construct gets one diagnostic and is
//! skipped or given a placeholder type, but the pipeline always runs
//! to completion and always returns whatever tables it managed to
//! build.

pub mod attributes;
pub mod builtins;
pub mod context;
pub mod cycles;
pub mod environment;
pub mod expr;
pub mod methods;
pub mod parent_linker;
pub mod registrar;

use context::{ClassTable, Ty};
use cool_ast::Program;
use cool_diagnostics::{Diagnostic, DiagnosticEngine};
use environment::MethodEnvironment;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemaError {
    #[error("program has no classes to analyze")]
    NoClasses,
}

pub struct AnalysisResult {
    pub classes: ClassTable,
    pub object_environments: HashMap<String, Vec<(String, Ty)>>,
    pub method_environment: MethodEnvironment,
    pub had_errors: bool,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn analyze(program: &Program, filename: Option<String>) -> Result<AnalysisResult, SemaError> {
    if program.classes.is_empty() {
        return Err(SemaError::NoClasses);
    }

    let mut classes = ClassTable::new();
    let methods = MethodEnvironment::new();
    let mut diagnostics = DiagnosticEngine::new();

    log::info!("installing builtin classes");
    builtins::install(&mut classes, &methods);

    log::info!("registering {} user classes", program.classes.len());
    registrar::register_classes(program, &mut classes, &filename, &mut diagnostics);

    log::debug!("linking parent classes");
    parent_linker::link_parents(program, &mut classes, &filename, &mut diagnostics);

    log::debug!("checking for inheritance cycles");
    cycles::check_cycles(program, &classes, &filename, &mut diagnostics);

    log::debug!("checking attributes");
    attributes::check_attributes(program, &mut classes, &filename, &mut diagnostics);

    log::debug!("checking methods and overrides");
    methods::register_methods(program, &mut classes, &methods, &filename, &mut diagnostics);

    log::info!("building object and method environments");
    environment::build_method_environment(&classes, &methods);
    let mut object_environments = HashMap::new();
    for class_name in classes.names_in_order() {
        let env = environment::build_object_environment(&classes, class_name);
        object_environments.insert(class_name.clone(), env);
    }

    log::info!("type-checking attribute initializers and method bodies");
    check_bodies(program, &classes, &methods, &object_environments, &filename, &mut diagnostics);

    let had_errors = diagnostics.has_errors();
    Ok(AnalysisResult {
        classes,
        object_environments,
        method_environment: methods,
        had_errors,
        diagnostics: diagnostics.diagnostics().to_vec(),
    })
}

fn check_bodies(
    program: &Program,
    classes: &ClassTable,
    methods: &MethodEnvironment,
    object_environments: &HashMap<String, Vec<(String, Ty)>>,
    filename: &Option<String>,
    diagnostics: &mut DiagnosticEngine,
) {
    for class in &program.classes {
        if !classes.contains(&class.name.value) {
            continue;
        }
        let Some(base_scope) = object_environments.get(&class.name.value) else { continue };

        for attr in &class.attributes {
            let Some(value) = &attr.value else { continue };
            let declared_ty = if attr.type_.value == context::SELF_TYPE_NAME {
                Ty::SelfType
            } else if classes.contains(&attr.type_.value) {
                Ty::class(attr.type_.value.clone())
            } else {
                continue; // already reported by the attribute checker
            };
            let mut ctx = expr::ExprContext::new(
                classes,
                methods,
                class.name.value.clone(),
                base_scope.clone(),
                &mut *diagnostics,
                filename.clone(),
            );
            let value_ty = expr::check_expression(&mut ctx, value);
            // Attribute-initializer compatibility uses plain subtype,
            // not SELF_TYPE-aware subtype, unlike every other check in
            // this function. Deliberately retained asymmetry.
            let incompatible = !ctx.conforms_plain(&value_ty, &declared_ty);
            if incompatible {
                let anchor = value.anchor();
                diagnostics.error(
                    cool_diagnostics::Stage::Semantic,
                    cool_diagnostics::error_codes::E_ATTR_INIT_INCOMPATIBLE,
                    format!(
                        "Type {} of initialization expression of attribute {} is incompatible with declared type {}",
                        value_ty.display(),
                        attr.name.value,
                        declared_ty.display()
                    ),
                    cool_diagnostics::Span::new(filename.clone(), anchor.line, anchor.column),
                );
            }
        }

        for method in &class.methods {
            let Some(sig) = methods.get(&class.name.value, &method.name.value) else { continue };
            let mut scope = base_scope.clone();
            for (name, ty) in &sig.formals {
                scope.push((name.clone(), ty.clone()));
            }
            let mut ctx = expr::ExprContext::new(classes, methods, class.name.value.clone(), scope, &mut *diagnostics, filename.clone());
            let body_ty = expr::check_expression(&mut ctx, &method.body);
            let incompatible = !ctx.conforms_self_aware(&body_ty, &sig.return_type);
            if incompatible {
                let anchor = method.body.anchor();
                diagnostics.error(
                    cool_diagnostics::Stage::Semantic,
                    cool_diagnostics::error_codes::E_METHOD_BODY_INCOMPATIBLE,
                    format!(
                        "Type {} of the body of method {} is incompatible with declared return type {}",
                        body_ty.display(),
                        method.name.value,
                        sig.return_type.display()
                    ),
                    cool_diagnostics::Span::new(filename.clone(), anchor.line, anchor.column),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_ast::{Attribute, Class, Expression, Formal, Method, Token};

    fn tok(v: &str) -> Token {
        Token::new(v, 1, 1)
    }

    #[test]
    fn rejects_empty_program() {
        let program = Program { classes: vec![] };
        assert!(matches!(analyze(&program, None), Err(SemaError::NoClasses)));
    }

    #[test]
    fn well_formed_program_has_no_errors() {
        let program = Program {
            classes: vec![Class {
                name: tok("Main"),
                superclass: Some(tok("IO")),
                attributes: vec![Attribute {
                    name: tok("x"),
                    type_: tok("Int"),
                    value: Some(Expression::IntLiteral(tok("5"), 5)),
                }],
                methods: vec![Method {
                    name: tok("main"),
                    formals: vec![],
                    return_type: tok("Object"),
                    body: Expression::Dispatch {
                        method: tok("out_string"),
                        args: vec![Expression::StringLiteral(tok("hi"), "hi".to_string())],
                    },
                }],
            }],
        };
        let result = analyze(&program, None).expect("analyzes");
        assert!(!result.had_errors, "unexpected diagnostics: {:?}", result.diagnostics);
    }

    #[test]
    fn undefined_identifier_is_reported() {
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
        let result = analyze(&program, None).expect("analyzes");
        assert!(result.had_errors);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.message.contains("Undefined identifier undeclared")));
    }

    #[test]
    fn attribute_init_rejects_self_type_against_concrete_declared_type() {
        // Attribute initializer compatibility is plain subtype: a
        // SELF_TYPE-valued initializer is never compatible with a
        // concretely-declared attribute type, even though the dynamic
        // type of `self` is always a subtype of the class itself.
        let program = Program {
            classes: vec![Class {
                name: tok("Main"),
                superclass: None,
                attributes: vec![Attribute {
                    name: tok("x"),
                    type_: tok("Main"),
                    value: Some(Expression::New(tok("SELF_TYPE"))),
                }],
                methods: vec![],
            }],
        };
        let result = analyze(&program, None).expect("analyzes");
        assert!(result.had_errors);
    }

    #[test]
    fn method_override_with_mismatched_return_type_is_rejected() {
        let program = Program {
            classes: vec![
                Class {
                    name: tok("A"),
                    superclass: None,
                    attributes: vec![],
                    methods: vec![Method {
                        name: tok("f"),
                        formals: vec![],
                        return_type: tok("Int"),
                        body: Expression::IntLiteral(tok("0"), 0),
                    }],
                },
                Class {
                    name: tok("B"),
                    superclass: Some(tok("A")),
                    attributes: vec![],
                    methods: vec![Method {
                        name: tok("f"),
                        formals: vec![],
                        return_type: tok("String"),
                        body: Expression::StringLiteral(tok("s"), "s".to_string()),
                    }],
                },
            ],
        };
        let result = analyze(&program, None).expect("analyzes");
        assert!(result.had_errors);
    }

    #[test]
    fn formals_are_visible_in_method_body() {
        let program = Program {
            classes: vec![Class {
                name: tok("Main"),
                superclass: None,
                attributes: vec![],
                methods: vec![Method {
                    name: tok("id"),
                    formals: vec![Formal {
                        name: tok("x"),
                        type_: tok("Int"),
                    }],
                    return_type: tok("Int"),
                    body: Expression::Ident(tok("x")),
                }],
            }],
        };
        let result = analyze(&program, None).expect("analyzes");
        assert!(!result.had_errors, "{:?}", result.diagnostics);
    }
}
