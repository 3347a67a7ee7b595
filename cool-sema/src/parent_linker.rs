//! Assigns each user class its parent, rejecting illegal or undefined
//! superclasses. Built-in classes are linked directly by
//! `builtins::install` and never pass through here.

use crate::context::{ClassTable, BOOL, INT, OBJECT, SELF_TYPE_NAME, STRING};
use cool_ast::Program;
use cool_diagnostics::{error_codes, DiagnosticEngine, Span, Stage};

const ILLEGAL_PARENTS: [&str; 4] = [INT, STRING, BOOL, SELF_TYPE_NAME];

pub fn link_parents(program: &Program, classes: &mut ClassTable, filename: &Option<String>, diagnostics: &mut DiagnosticEngine) {
    for class in &program.classes {
        if !classes.contains(&class.name.value) {
            continue; // failed registration; skip without cascading
        }
        let span = Span::new(filename.clone(), class.name.line, class.name.column);
        let parent_name = match &class.superclass {
            Some(tok) => tok.value.clone(),
            None => OBJECT.to_string(),
        };

        if ILLEGAL_PARENTS.contains(&parent_name.as_str()) {
            diagnostics.error(
                Stage::Semantic,
                error_codes::E_CLASS_ILLEGAL_PARENT,
                format!("Class {} has illegal parent {parent_name}", class.name.value),
                span,
            );
            continue;
        }
        if !classes.contains(&parent_name) {
            diagnostics.error(
                Stage::Semantic,
                error_codes::E_CLASS_UNDEFINED_PARENT,
                format!("Class {} has undefined parent {parent_name}", class.name.value),
                span,
            );
            continue;
        }
        if let Some(ctx) = classes.get_mut(&class.name.value) {
            ctx.parent = Some(parent_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ClassContext;
    use cool_ast::{Class, Token};

    fn class_with_parent(name: &str, parent: Option<&str>) -> Class {
        Class {
            name: Token::new(name, 1, 1),
            superclass: parent.map(|p| Token::new(p, 1, 1)),
            attributes: vec![],
            methods: vec![],
        }
    }

    #[test]
    fn rejects_int_as_parent() {
        let program = Program {
            classes: vec![class_with_parent("A", Some(INT))],
        };
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new(INT, Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("A", None));
        let mut diagnostics = DiagnosticEngine::new();
        link_parents(&program, &mut classes, &None, &mut diagnostics);
        assert!(diagnostics.has_errors());
        assert_eq!(classes.get("A").unwrap().parent, None);
    }

    #[test]
    fn defaults_to_object_when_no_superclass_given() {
        let program = Program {
            classes: vec![class_with_parent("A", None)],
        };
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new("A", None));
        let mut diagnostics = DiagnosticEngine::new();
        link_parents(&program, &mut classes, &None, &mut diagnostics);
        assert!(!diagnostics.has_errors());
        assert_eq!(classes.get("A").unwrap().parent.as_deref(), Some(OBJECT));
    }
}
