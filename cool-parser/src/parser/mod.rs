mod expressions;
mod items;
mod types;

use cool_ast::{Expression, Program, Token as AstToken};
use cool_diagnostics::{error_codes, Diagnostic, DiagnosticEngine, Span, Stage};
use cool_lexer::{Lexeme, Lexer, TokenKind};

pub struct Parser<'src> {
    tokens: Vec<Lexeme>,
    pos: usize,
    filename: Option<String>,
    diagnostics: DiagnosticEngine,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, filename: Option<String>) -> Self {
        let (tokens, lexer_diags) = Lexer::new(source, filename.clone()).tokenize();
        let mut diagnostics = DiagnosticEngine::new();
        for diag in lexer_diags {
            diagnostics.emit(diag);
        }
        Self {
            tokens,
            pos: 0,
            filename,
            diagnostics,
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.diagnostics().to_vec()
    }

    pub fn parse_program(&mut self) -> Program {
        let mut classes = Vec::new();
        while self.peek().is_some() {
            match self.parse_class() {
                Some(class) => classes.push(class),
                None => self.synchronize(),
            }
            if self.check(TokenKind::Semi) {
                self.advance();
            }
        }
        Program { classes }
    }

    pub(crate) fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|l| l.kind)
    }

    pub(crate) fn peek_ahead(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|l| l.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn advance(&mut self) -> Option<Lexeme> {
        let current = self.tokens.get(self.pos).cloned();
        if current.is_some() {
            self.pos += 1;
        }
        current
    }

    pub(crate) fn current_span(&self) -> Span {
        match self.peek() {
            Some(lexeme) => Span::new(self.filename.clone(), lexeme.token.line, lexeme.token.column),
            None => Span::new(self.filename.clone(), 0, 0),
        }
    }

    /// Consumes the current token if it matches `kind`, else reports a
    /// syntax error and returns `None` without advancing past garbage.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Lexeme> {
        if self.check(kind) {
            self.advance()
        } else {
            let found = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_else(|| "end of input".to_string());
            let error = crate::ParseError::UnexpectedToken {
                expected: what.to_string(),
                found,
            };
            self.diagnostics.error(
                Stage::Parser,
                error_codes::P_UNEXPECTED_TOKEN,
                error.to_string(),
                self.current_span(),
            );
            None
        }
    }

    pub(crate) fn error_expression(&mut self) -> Expression {
        let span_tok = self
            .peek()
            .map(|l| l.token.clone())
            .unwrap_or_else(|| AstToken::new("", 0, 0));
        Expression::Error(span_tok)
    }
}
