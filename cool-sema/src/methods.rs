//! Method registration (with per-formal validation) and the
//! override-consistency pass, which always looks up the overridden
//! signature by name rather than by position in the ancestor's
//! feature list.

use crate::context::{ClassTable, MethodSignature, Ty, SELF_TYPE_NAME};
use crate::environment::MethodEnvironment;
use cool_ast::Program;
use cool_diagnostics::{error_codes, DiagnosticEngine, Span, Stage};
use std::collections::HashSet;

fn type_exists(classes: &ClassTable, name: &str) -> bool {
    name == SELF_TYPE_NAME || classes.contains(name)
}

pub fn register_methods(
    program: &Program,
    classes: &mut ClassTable,
    methods: &MethodEnvironment,
    filename: &Option<String>,
    diagnostics: &mut DiagnosticEngine,
) {
    for class in &program.classes {
        if !classes.contains(&class.name.value) {
            continue;
        }
        let mut seen_methods = HashSet::new();
        for method in &class.methods {
            let span = Span::new(filename.clone(), method.name.line, method.name.column);
            if !seen_methods.insert(method.name.value.clone()) {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_METHOD_REDEFINED,
                    format!("Class {} redefines method {}", class.name.value, method.name.value),
                    span,
                );
                continue;
            }

            let mut formal_names = HashSet::new();
            let mut formals = Vec::new();
            for formal in &method.formals {
                let formal_span = Span::new(filename.clone(), formal.name.line, formal.name.column);
                if formal.name.value == "self" {
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_FORMAL_ILLEGAL_NAME,
                        format!(
                            "Method {} of class {} has formal parameter with illegal name self",
                            method.name.value, class.name.value
                        ),
                        formal_span,
                    );
                    continue;
                }
                if formal.type_.value == SELF_TYPE_NAME {
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_FORMAL_ILLEGAL_TYPE,
                        format!(
                            "Method {} of class {} has formal parameter {} with illegal type SELF_TYPE",
                            method.name.value, class.name.value, formal.name.value
                        ),
                        formal_span,
                    );
                    continue;
                }
                if !formal_names.insert(formal.name.value.clone()) {
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_FORMAL_DUPLICATE,
                        format!(
                            "Method {} of class {} redefines formal parameter {}",
                            method.name.value, class.name.value, formal.name.value
                        ),
                        formal_span,
                    );
                    continue;
                }
                if !type_exists(classes, &formal.type_.value) {
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_FORMAL_UNKNOWN_TYPE,
                        format!(
                            "Method {} of class {} has formal parameter {} with undefined type {}",
                            method.name.value, class.name.value, formal.name.value, formal.type_.value
                        ),
                        formal_span,
                    );
                    continue;
                }
                formals.push((formal.name.value.clone(), Ty::class(formal.type_.value.clone())));
            }

            if !type_exists(classes, &method.return_type.value) {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_METHOD_UNKNOWN_RETURN_TYPE,
                    format!(
                        "Class {} has method {} with undefined return type {}",
                        class.name.value, method.name.value, method.return_type.value
                    ),
                    span,
                );
                continue;
            }
            let return_type = if method.return_type.value == SELF_TYPE_NAME {
                Ty::SelfType
            } else {
                Ty::class(method.return_type.value.clone())
            };

            if let Some(ctx) = classes.get_mut(&class.name.value) {
                ctx.methods.push(method.name.value.clone());
            }
            methods.insert(
                class.name.value.clone(),
                MethodSignature {
                    name: method.name.value.clone(),
                    return_type,
                    formals,
                    defining_class: class.name.value.clone(),
                },
            );
        }
    }

    check_overrides(program, classes, methods, filename, diagnostics);
}

/// Every override must match its nearest overridden ancestor
/// signature exactly in arity, formal types (positionally), and
/// return type. The ancestor signature is always looked up by method
/// name, never by the overriding method's position in its own
/// class's feature list.
fn check_overrides(
    program: &Program,
    classes: &ClassTable,
    methods: &MethodEnvironment,
    filename: &Option<String>,
    diagnostics: &mut DiagnosticEngine,
) {
    for class in &program.classes {
        let Some(ctx) = classes.get(&class.name.value) else { continue };
        let Some(parent) = ctx.parent.clone() else { continue };
        for method in &class.methods {
            let Some(own_sig) = methods.get(&class.name.value, &method.name.value) else { continue };
            let Some(ancestor_name) = classes
                .ancestors(&parent)
                .into_iter()
                .find(|ancestor| methods.get(ancestor, &method.name.value).is_some())
            else {
                continue;
            };
            let ancestor_sig = match methods.get(&ancestor_name, &method.name.value) {
                Some(sig) => sig,
                None => continue,
            };
            let span = Span::new(filename.clone(), method.name.line, method.name.column);

            if own_sig.formals.len() != ancestor_sig.formals.len() {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_OVERRIDE_ARITY,
                    format!(
                        "Method {} of class {} overrides the inherited method with a different number of formal parameters",
                        method.name.value, class.name.value
                    ),
                    span,
                );
                continue;
            }
            let mut formal_mismatch = false;
            for ((own_name, own_ty), (_, ancestor_ty)) in own_sig.formals.iter().zip(ancestor_sig.formals.iter()) {
                if own_ty != ancestor_ty {
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_OVERRIDE_FORMAL_TYPE,
                        format!(
                            "Method {} of class {} changes type of formal parameter {} from {} to {}",
                            method.name.value,
                            class.name.value,
                            own_name,
                            ancestor_ty.display(),
                            own_ty.display()
                        ),
                        span.clone(),
                    );
                    formal_mismatch = true;
                }
            }
            if formal_mismatch {
                continue;
            }
            if own_sig.return_type != ancestor_sig.return_type {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_OVERRIDE_RETURN_TYPE,
                    format!(
                        "Method {} of class {} changes return type from {} to {}",
                        method.name.value,
                        class.name.value,
                        ancestor_sig.return_type.display(),
                        own_sig.return_type.display()
                    ),
                    span,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClassContext, OBJECT};
    use cool_ast::{Class, Expression, Formal, Method, Token};

    fn method(name: &str, formals: Vec<Formal>, return_type: &str) -> Method {
        Method {
            name: Token::new(name, 1, 1),
            formals,
            return_type: Token::new(return_type, 1, 1),
            body: Expression::IntLiteral(Token::new("0", 1, 1), 0),
        }
    }

    #[test]
    fn rejects_override_with_changed_formal_type() {
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new("Int", Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("String", Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("A", Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("B", Some("A".to_string())));

        let methods_env = MethodEnvironment::new();
        let program = Program {
            classes: vec![
                Class {
                    name: Token::new("A", 1, 1),
                    superclass: None,
                    attributes: vec![],
                    methods: vec![method(
                        "f",
                        vec![Formal {
                            name: Token::new("x", 1, 1),
                            type_: Token::new("Int", 1, 1),
                        }],
                        "Int",
                    )],
                },
                Class {
                    name: Token::new("B", 2, 1),
                    superclass: Some(Token::new("A", 2, 1)),
                    attributes: vec![],
                    methods: vec![method(
                        "f",
                        vec![Formal {
                            name: Token::new("x", 2, 1),
                            type_: Token::new("String", 2, 1),
                        }],
                        "Int",
                    )],
                },
            ],
        };
        let mut diagnostics = DiagnosticEngine::new();
        register_methods(&program, &mut classes, &methods_env, &None, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }
}
