//! Attribute registration (pass A, per class) and inherited-shadow
//! checking (pass B, after every class has finished pass A).

use crate::context::{ClassTable, Ty, SELF_TYPE_NAME};
use cool_ast::Program;
use cool_diagnostics::{error_codes, DiagnosticEngine, Span, Stage};
use std::collections::HashSet;

fn type_exists(classes: &ClassTable, name: &str) -> bool {
    name == SELF_TYPE_NAME || classes.contains(name)
}

pub fn check_attributes(program: &Program, classes: &mut ClassTable, filename: &Option<String>, diagnostics: &mut DiagnosticEngine) {
    // Pass A: register each class's own attributes.
    for class in &program.classes {
        if !classes.contains(&class.name.value) {
            continue;
        }
        let mut seen = HashSet::new();
        for attr in &class.attributes {
            let span = Span::new(filename.clone(), attr.name.line, attr.name.column);
            if attr.name.value == "self" {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_ATTRIBUTE_ILLEGAL_NAME,
                    format!("Class {} has attribute with illegal name self", class.name.value),
                    span,
                );
                continue;
            }
            if !seen.insert(attr.name.value.clone()) {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_ATTRIBUTE_REDEFINED,
                    format!("Class {} redefines attribute {}", class.name.value, attr.name.value),
                    span,
                );
                continue;
            }
            if !type_exists(classes, &attr.type_.value) {
                diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_ATTRIBUTE_UNKNOWN_TYPE,
                    format!(
                        "Class {} has attribute {} with undefined type {}",
                        class.name.value, attr.name.value, attr.type_.value
                    ),
                    span,
                );
                continue;
            }
            let ty = if attr.type_.value == SELF_TYPE_NAME {
                Ty::SelfType
            } else {
                Ty::class(attr.type_.value.clone())
            };
            if let Some(ctx) = classes.get_mut(&class.name.value) {
                ctx.attributes.push((attr.name.value.clone(), ty));
            }
        }
    }

    // Pass B: no attribute may shadow one declared by an ancestor.
    // Runs only after every class's own attributes are registered so
    // detection does not depend on textual class order.
    for class in &program.classes {
        let Some(ctx) = classes.get(&class.name.value) else { continue };
        let own_names: HashSet<_> = ctx.attributes.iter().map(|(n, _)| n.clone()).collect();
        let Some(parent) = ctx.parent.clone() else { continue };
        for ancestor in classes.ancestors(&parent) {
            let Some(ancestor_ctx) = classes.get(&ancestor) else { continue };
            for (attr_name, _) in &ancestor_ctx.attributes {
                if own_names.contains(attr_name) {
                    let attr_token = class.attributes.iter().find(|a| &a.name.value == attr_name);
                    let span = match attr_token {
                        Some(attr) => Span::new(filename.clone(), attr.name.line, attr.name.column),
                        None => Span::unknown(),
                    };
                    diagnostics.error(
                        Stage::Semantic,
                        error_codes::E_ATTRIBUTE_REDEFINES_INHERITED,
                        format!("Class {} redefines inherited attribute {attr_name}", class.name.value),
                        span,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClassContext, OBJECT};
    use cool_ast::{Attribute, Class, Token};

    fn program_with_attrs(attrs: Vec<Attribute>) -> Program {
        Program {
            classes: vec![Class {
                name: Token::new("A", 1, 1),
                superclass: None,
                attributes: attrs,
                methods: vec![],
            }],
        }
    }

    #[test]
    fn rejects_duplicate_attribute_names() {
        let program = program_with_attrs(vec![
            Attribute {
                name: Token::new("x", 1, 1),
                type_: Token::new("Int", 1, 1),
                value: None,
            },
            Attribute {
                name: Token::new("x", 2, 1),
                type_: Token::new("String", 2, 1),
                value: None,
            },
        ]);
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new("A", Some(OBJECT.to_string())));
        let mut diagnostics = DiagnosticEngine::new();
        check_attributes(&program, &mut classes, &None, &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(classes.get("A").unwrap().attributes.len(), 1);
    }

    #[test]
    fn rejects_inherited_attribute_shadowing() {
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        let mut parent = ClassContext::new("P", Some(OBJECT.to_string()));
        parent.attributes.push(("x".to_string(), Ty::class("Int")));
        classes.insert(parent);
        classes.insert(ClassContext::new("A", Some("P".to_string())));
        let program = Program {
            classes: vec![Class {
                name: Token::new("A", 1, 1),
                superclass: Some(Token::new("P", 1, 1)),
                attributes: vec![Attribute {
                    name: Token::new("x", 2, 1),
                    type_: Token::new("Int", 2, 1),
                    value: None,
                }],
                methods: vec![],
            }],
        };
        let mut diagnostics = DiagnosticEngine::new();
        check_attributes(&program, &mut classes, &None, &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 1);
    }
}
