use logos::{Lexer, Logos, Skip};

/// Consumes a `(* ... *)` block comment, honoring nesting, starting
/// just after the opening `(*` has already been matched. Leaves the
/// lexer positioned after the matching close, or reports an error if
/// the source ends first.
fn block_comment(lex: &mut Lexer<TokenKind>) -> Result<Skip, ()> {
    let rest = lex.remainder();
    let mut depth = 1usize;
    let mut idx = 0usize;
    let bytes = rest.as_bytes();
    while idx < bytes.len() {
        if bytes[idx..].starts_with(b"(*") {
            depth += 1;
            idx += 2;
        } else if bytes[idx..].starts_with(b"*)") {
            depth -= 1;
            idx += 2;
            if depth == 0 {
                lex.bump(idx);
                return Ok(Skip);
            }
        } else {
            idx += 1;
        }
    }
    Err(())
}

/// The full Cool token set. Keyword matching is case-insensitive per
/// the Cool grammar; identifiers are classified by leading case into
/// `TypeId` (capitalized) and `ObjectId` (lowercase) so the parser
/// never has to re-inspect the lexeme.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"--[^\n]*")]
pub enum TokenKind {
    #[token("(*", block_comment)]
    BlockComment,

    #[token("class", ignore(case))]
    Class,
    #[token("inherits", ignore(case))]
    Inherits,
    #[token("if", ignore(case))]
    If,
    #[token("then", ignore(case))]
    Then,
    #[token("else", ignore(case))]
    Else,
    #[token("fi", ignore(case))]
    Fi,
    #[token("while", ignore(case))]
    While,
    #[token("loop", ignore(case))]
    Loop,
    #[token("pool", ignore(case))]
    Pool,
    #[token("let", ignore(case))]
    Let,
    #[token("in", ignore(case))]
    In,
    #[token("case", ignore(case))]
    Case,
    #[token("of", ignore(case))]
    Of,
    #[token("esac", ignore(case))]
    Esac,
    #[token("new", ignore(case))]
    New,
    #[token("isvoid", ignore(case))]
    IsVoid,
    #[token("not", ignore(case))]
    Not,

    #[regex(r"t[rR][uU][eE]")]
    True,
    #[regex(r"f[aA][lL][sS][eE]")]
    False,

    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    TypeId,
    #[regex(r"[a-z][A-Za-z0-9_]*")]
    ObjectId,
    #[regex(r"[0-9]+")]
    IntLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("~")]
    Tilde,
    #[token("<-")]
    Assign,
    #[token("=>")]
    DArrow,
    #[token("<=")]
    Le,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,
}
