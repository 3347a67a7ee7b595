//! Detects inheritance cycles after parent links are in place.

use crate::context::ClassTable;
use cool_ast::Program;
use cool_diagnostics::{error_codes, DiagnosticEngine, Span, Stage};
use std::collections::HashSet;

pub fn check_cycles(program: &Program, classes: &ClassTable, filename: &Option<String>, diagnostics: &mut DiagnosticEngine) {
    for class in &program.classes {
        let Some(ctx) = classes.get(&class.name.value) else { continue };
        if ctx.parent.is_none() {
            continue; // parent linking already failed; don't pile on
        }
        let mut seen = HashSet::new();
        let mut current = ctx.parent.clone();
        let mut cyclic = false;
        while let Some(name) = current {
            if name == ctx.name {
                cyclic = true;
                break;
            }
            if !seen.insert(name.clone()) {
                break; // cycle elsewhere in the chain; reported when we visit that class
            }
            current = classes.get(&name).and_then(|c| c.parent.clone());
        }
        if cyclic {
            let span = Span::new(filename.clone(), class.name.line, class.name.column);
            diagnostics.error(
                Stage::Semantic,
                error_codes::E_INHERITANCE_CYCLE,
                format!("Inheritance cycle for class {}", class.name.value),
                span,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClassContext, OBJECT};
    use cool_ast::{Class, Token};

    #[test]
    fn detects_a_two_class_cycle() {
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new("A", Some("B".to_string())));
        classes.insert(ClassContext::new("B", Some("A".to_string())));
        let program = Program {
            classes: vec![
                Class {
                    name: Token::new("A", 1, 1),
                    superclass: Some(Token::new("B", 1, 1)),
                    attributes: vec![],
                    methods: vec![],
                },
                Class {
                    name: Token::new("B", 2, 1),
                    superclass: Some(Token::new("A", 2, 1)),
                    attributes: vec![],
                    methods: vec![],
                },
            ],
        };
        let mut diagnostics = DiagnosticEngine::new();
        check_cycles(&program, &classes, &None, &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 2);
    }
}
