//! Shared AST node types for the Cool compiler pipeline.
//!
//! Every named construct carries a [`Token`] for diagnostics. Node order
//! (class order, member order within a class) is preserved end to end
//! because later stages report diagnostics in textual order and because
//! attribute declaration order leaks into object layout in codegen.

use serde::{Deserialize, Serialize};

/// A lexeme together with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            value: value.into(),
            line,
            column,
        }
    }

    /// A position-less token, used only for synthesized (built-in) nodes.
    pub fn synthetic(value: impl Into<String>) -> Self {
        Self::new(value, 0, 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: Token,
    pub superclass: Option<Token>,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: Token,
    pub type_: Token,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: Token,
    pub formals: Vec<Formal>,
    pub return_type: Token,
    pub body: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formal {
    pub name: Token,
    pub type_: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetInit {
    pub name: Token,
    pub type_: Token,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBranch {
    pub name: Token,
    pub type_: Token,
    pub body: Box<Expression>,
}

/// The expression grammar. Every variant is checked by exactly one
/// handler in `cool-sema`; the match in the type checker is exhaustive
/// by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Assign(Token, Box<Expression>),
    Dispatch {
        method: Token,
        args: Vec<Expression>,
    },
    StaticDispatch {
        receiver: Box<Expression>,
        static_type: Option<Token>,
        method: Token,
        args: Vec<Expression>,
    },
    If {
        predicate: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    While {
        predicate: Box<Expression>,
        body: Box<Expression>,
    },
    Block(Vec<Expression>),
    Let {
        inits: Vec<LetInit>,
        body: Box<Expression>,
    },
    Case {
        scrutinee: Box<Expression>,
        branches: Vec<CaseBranch>,
    },
    New(Token),
    IsVoid(Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Neg(Box<Expression>),
    Lt(Box<Expression>, Box<Expression>),
    Le(Box<Expression>, Box<Expression>),
    Eq(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Paren(Box<Expression>),
    Ident(Token),
    IntLiteral(Token, i64),
    StringLiteral(Token, String),
    BoolLiteral(Token, bool),
    /// Produced by the parser in place of an expression it could not
    /// parse, so that enclosing constructs still have something to
    /// recurse into. `cool-sema` treats it as an unknown-typed leaf.
    Error(Token),
}

impl Expression {
    /// The token best suited to anchor a diagnostic about this
    /// expression as a whole.
    pub fn anchor(&self) -> &Token {
        match self {
            Expression::Assign(tok, _) => tok,
            Expression::Dispatch { method, .. } => method,
            Expression::StaticDispatch { method, .. } => method,
            Expression::If { predicate, .. } => predicate.anchor(),
            Expression::While { predicate, .. } => predicate.anchor(),
            Expression::Block(exprs) => exprs
                .first()
                .map(Expression::anchor)
                .unwrap_or(&FALLBACK_TOKEN),
            Expression::Let { body, .. } => body.anchor(),
            Expression::Case { scrutinee, .. } => scrutinee.anchor(),
            Expression::New(tok) => tok,
            Expression::IsVoid(e) => e.anchor(),
            Expression::Add(lhs, _)
            | Expression::Sub(lhs, _)
            | Expression::Mul(lhs, _)
            | Expression::Div(lhs, _)
            | Expression::Lt(lhs, _)
            | Expression::Le(lhs, _)
            | Expression::Eq(lhs, _) => lhs.anchor(),
            Expression::Neg(e) => e.anchor(),
            Expression::Not(e) => e.anchor(),
            Expression::Paren(e) => e.anchor(),
            Expression::Ident(tok) => tok,
            Expression::IntLiteral(tok, _) => tok,
            Expression::StringLiteral(tok, _) => tok,
            Expression::BoolLiteral(tok, _) => tok,
            Expression::Error(tok) => tok,
        }
    }
}

// A block can legally be empty only as a parse error recovery artifact;
// `anchor()` still needs a token to hand back in that case.
static FALLBACK_TOKEN: Token = Token {
    value: String::new(),
    line: 0,
    column: 0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_walks_into_nested_expressions() {
        let inner = Expression::Ident(Token::new("x", 3, 5));
        let expr = Expression::Neg(Box::new(inner));
        assert_eq!(expr.anchor().line, 3);
        assert_eq!(expr.anchor().column, 5);
    }

    #[test]
    fn program_round_trips_through_serde() {
        let program = Program {
            classes: vec![Class {
                name: Token::new("Main", 1, 1),
                superclass: None,
                attributes: vec![],
                methods: vec![],
            }],
        };
        let json = serde_json::to_string(&program).expect("serialize");
        let back: Program = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(program, back);
    }
}
