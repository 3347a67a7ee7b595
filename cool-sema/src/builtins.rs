//! Installs `Object`, `IO`, `Int`, `String`, and `Bool` into the class
//! table and method environment before any user class is processed.
//! Thereafter they are indistinguishable from user classes, except
//! that the parent linker refuses to let anything but `Object` sit
//! above them.

use crate::context::{ClassContext, ClassTable, MethodSignature, Ty, BOOL, INT, IO, OBJECT, STRING};
use crate::environment::MethodEnvironment;

pub fn install(classes: &mut ClassTable, methods: &MethodEnvironment) {
    classes.insert(ClassContext::new(OBJECT, None));
    classes.insert(ClassContext::new(IO, Some(OBJECT.to_string())));
    classes.insert(ClassContext::new(INT, Some(OBJECT.to_string())));
    classes.insert(ClassContext::new(STRING, Some(OBJECT.to_string())));
    classes.insert(ClassContext::new(BOOL, Some(OBJECT.to_string())));

    let mut define = |class: &str, sig: MethodSignature| {
        if let Some(ctx) = classes.get_mut(class) {
            ctx.methods.push(sig.name.clone());
        }
        methods.insert(class.to_string(), sig);
    };

    define(
        OBJECT,
        MethodSignature {
            name: "abort".to_string(),
            return_type: Ty::class(OBJECT),
            formals: vec![],
            defining_class: OBJECT.to_string(),
        },
    );
    define(
        OBJECT,
        MethodSignature {
            name: "type_name".to_string(),
            return_type: Ty::class(STRING),
            formals: vec![],
            defining_class: OBJECT.to_string(),
        },
    );
    define(
        OBJECT,
        MethodSignature {
            name: "copy".to_string(),
            return_type: Ty::SelfType,
            formals: vec![],
            defining_class: OBJECT.to_string(),
        },
    );

    define(
        IO,
        MethodSignature {
            name: "out_string".to_string(),
            return_type: Ty::SelfType,
            formals: vec![("x".to_string(), Ty::class(STRING))],
            defining_class: IO.to_string(),
        },
    );
    define(
        IO,
        MethodSignature {
            name: "out_int".to_string(),
            return_type: Ty::SelfType,
            formals: vec![("x".to_string(), Ty::class(INT))],
            defining_class: IO.to_string(),
        },
    );
    define(
        IO,
        MethodSignature {
            name: "in_string".to_string(),
            return_type: Ty::class(STRING),
            formals: vec![],
            defining_class: IO.to_string(),
        },
    );
    define(
        IO,
        MethodSignature {
            name: "in_int".to_string(),
            return_type: Ty::class(INT),
            formals: vec![],
            defining_class: IO.to_string(),
        },
    );

    define(
        STRING,
        MethodSignature {
            name: "length".to_string(),
            return_type: Ty::class(INT),
            formals: vec![],
            defining_class: STRING.to_string(),
        },
    );
    define(
        STRING,
        MethodSignature {
            name: "concat".to_string(),
            return_type: Ty::class(STRING),
            formals: vec![("s".to_string(), Ty::class(STRING))],
            defining_class: STRING.to_string(),
        },
    );
    define(
        STRING,
        MethodSignature {
            name: "substr".to_string(),
            return_type: Ty::class(STRING),
            formals: vec![("i".to_string(), Ty::class(INT)), ("l".to_string(), Ty::class(INT))],
            defining_class: STRING.to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_all_builtin_classes() {
        let mut classes = ClassTable::new();
        let methods = MethodEnvironment::new();
        install(&mut classes, &methods);
        for name in [OBJECT, IO, INT, STRING, BOOL] {
            assert!(classes.contains(name), "{name} should be installed");
        }
        assert!(methods.get(STRING, "concat").is_some());
        assert_eq!(
            methods.get(OBJECT, "copy").expect("copy defined").return_type,
            Ty::SelfType
        );
    }
}
