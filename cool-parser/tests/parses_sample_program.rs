use cool_ast::Expression;

#[test]
fn parses_a_small_program() {
    let source = r#"
        class Main inherits IO {
            x : Int <- 5;
            main() : Object {
                out_string("hello")
            };
        };
    "#;
    let (program, diagnostics) = cool_parser::parse(source, None);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    assert_eq!(program.classes.len(), 1);
    let class = &program.classes[0];
    assert_eq!(class.name.value, "Main");
    assert_eq!(class.superclass.as_ref().map(|t| t.value.as_str()), Some("IO"));
    assert_eq!(class.attributes.len(), 1);
    assert_eq!(class.methods.len(), 1);
    match &class.methods[0].body {
        Expression::Dispatch { method, args } => {
            assert_eq!(method.value, "out_string");
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected a dispatch expression, got {other:?}"),
    }
}

#[test]
fn recovers_past_a_malformed_class() {
    let source = r#"
        class Broken inherits {
        };
        class Ok {
            f() : Int { 1 };
        };
    "#;
    let (program, _diagnostics) = cool_parser::parse(source, None);
    assert!(program.classes.iter().any(|c| c.name.value == "Ok"));
}
