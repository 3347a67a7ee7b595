//! Registers user classes: rejects `SELF_TYPE` as a class name and
//! rejects redefinitions, else installs an empty class context.

use crate::context::{ClassContext, ClassTable, SELF_TYPE_NAME};
use cool_ast::Program;
use cool_diagnostics::{error_codes, DiagnosticEngine, Span, Stage};

pub fn register_classes(program: &Program, classes: &mut ClassTable, filename: &Option<String>, diagnostics: &mut DiagnosticEngine) {
    for class in &program.classes {
        let span = Span::new(filename.clone(), class.name.line, class.name.column);
        if class.name.value == SELF_TYPE_NAME {
            diagnostics.error(
                Stage::Semantic,
                error_codes::E_CLASS_ILLEGAL_NAME,
                format!("Class has illegal name {SELF_TYPE_NAME}"),
                span,
            );
            continue;
        }
        if classes.contains(&class.name.value) {
            diagnostics.error(
                Stage::Semantic,
                error_codes::E_CLASS_REDEFINED,
                format!("Class {} is redefined", class.name.value),
                span,
            );
            continue;
        }
        let mut ctx = ClassContext::new(class.name.value.clone(), None);
        ctx.line = class.name.line;
        ctx.column = class.name.column;
        classes.insert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::OBJECT;
    use cool_ast::{Class, Token};

    fn class(name: &str) -> Class {
        Class {
            name: Token::new(name, 1, 1),
            superclass: None,
            attributes: vec![],
            methods: vec![],
        }
    }

    #[test]
    fn rejects_self_type_as_class_name() {
        let program = Program {
            classes: vec![class("SELF_TYPE")],
        };
        let mut classes = ClassTable::new();
        classes.insert(crate::context::ClassContext::new(OBJECT, None));
        let mut diagnostics = DiagnosticEngine::new();
        register_classes(&program, &mut classes, &None, &mut diagnostics);
        assert!(diagnostics.has_errors());
        assert!(!classes.contains("SELF_TYPE"));
    }

    #[test]
    fn rejects_duplicate_class_names() {
        let program = Program {
            classes: vec![class("A"), class("A")],
        };
        let mut classes = ClassTable::new();
        let mut diagnostics = DiagnosticEngine::new();
        register_classes(&program, &mut classes, &None, &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(classes.len(), 1);
    }
}
