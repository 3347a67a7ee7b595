use crate::Parser;
use cool_lexer::TokenKind;

impl<'src> Parser<'src> {
    /// Skips tokens until the next `;` or `class` keyword (or EOF), so
    /// that one malformed feature or class does not abort the whole
    /// parse. Mirrors the continue-past-error discipline the semantic
    /// analyzer itself follows.
    pub(crate) fn synchronize(&mut self) {
        while let Some(lexeme) = self.peek() {
            match lexeme.kind {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::Class => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
