//! Parser for the tiny language
//!
//! LL(1) recursive descent over the token sequence with a single token of
//! lookahead. `parse_expression` dispatches on a leaf or an opening
//! parenthesis; `parse_form` runs after `(` and dispatches on the keyword
//! that selects the production. No error recovery: the first error aborts
//! the parse.

use crate::{
    ast::*,
    error::{ParseError as Error, Result},
    lexer::Lexer,
    span::Span,
    token::{Keyword, Token, TokenKind},
};
use tracing::debug;

/// Deepest parenthesized nesting accepted on one line. Every later stage
/// recurses over the tree, so the bound keeps them all off the stack limit.
pub const MAX_NESTING: usize = 256;

/// Parser state
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    end_position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over an already tokenized line
    pub fn new(tokens: Vec<Token>) -> Self {
        let end_position = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Parser {
            tokens,
            current: 0,
            end_position,
            depth: 0,
        }
    }

    /// Create a parser by tokenizing `input`
    pub fn from_source(input: &str) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Parser::new(tokens);
        parser.end_position = parser.end_position.max(input.len());
        Ok(parser)
    }

    /// Parse exactly one expression covering the whole token sequence
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_expression()?;

        if let Some(token) = self.current_token() {
            return Err(Error::TrailingInput {
                found: token.kind.to_string(),
                span: token.span,
            });
        }

        debug!(nodes = expr.node_count(), "parsed expression");
        Ok(expr)
    }

    /// expr := name | integer | boolean | "(" form
    fn parse_expression(&mut self) -> Result<Expr> {
        let token = self.advance("an expression")?;
        let span = token.span;

        match token.kind {
            TokenKind::Name(name) => Ok(Expr::var(name, span)),
            TokenKind::Int(value) => Ok(Expr::int(value, span)),
            TokenKind::Bool(value) => Ok(Expr::bool(value, span)),
            TokenKind::Keyword(Keyword::LeftParen) => {
                if self.depth >= MAX_NESTING {
                    return Err(Error::NestingTooDeep {
                        limit: MAX_NESTING,
                        span,
                    });
                }
                self.depth += 1;
                let form = self.parse_form(span);
                self.depth -= 1;
                form
            }
            TokenKind::Keyword(keyword) => Err(Error::unexpected_token(
                "an expression",
                keyword.as_str(),
                span,
            )),
        }
    }

    /// Everything after the opening parenthesis of a compound expression
    fn parse_form(&mut self, open: Span) -> Result<Expr> {
        let token = self.advance("an operator, 'if' or 'let' after '('")?;

        match token.kind {
            TokenKind::Keyword(Keyword::Plus) => self.parse_binary(BinaryOp::Add, open),
            TokenKind::Keyword(Keyword::Minus) => self.parse_binary(BinaryOp::Sub, open),
            TokenKind::Keyword(Keyword::Star) => self.parse_binary(BinaryOp::Mul, open),
            TokenKind::Keyword(Keyword::Slash) => self.parse_binary(BinaryOp::Div, open),
            TokenKind::Keyword(Keyword::Less) => self.parse_binary(BinaryOp::Lt, open),
            TokenKind::Keyword(Keyword::AndAnd) => self.parse_binary(BinaryOp::And, open),
            TokenKind::Keyword(Keyword::OrOr) => self.parse_binary(BinaryOp::Or, open),
            TokenKind::Keyword(Keyword::Bang) => {
                let operand = self.parse_expression()?;
                let close = self.expect(Keyword::RightParen, "')' to close '!'")?;
                Ok(Expr::not(operand, open.merge(close)))
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if(open),
            TokenKind::Keyword(Keyword::Let) => self.parse_let(open),
            other => Err(Error::unexpected_token(
                "an operator, 'if' or 'let' after '('",
                other.to_string(),
                token.span,
            )),
        }
    }

    fn parse_binary(&mut self, op: BinaryOp, open: Span) -> Result<Expr> {
        let left = self.parse_expression()?;
        let right = self.parse_expression()?;
        let close = self.expect(
            Keyword::RightParen,
            &format!("')' to close '{}'", op.symbol()),
        )?;
        Ok(Expr::binary(op, left, right, open.merge(close)))
    }

    /// ( if cond then expr else expr )
    fn parse_if(&mut self, open: Span) -> Result<Expr> {
        let condition = self.parse_expression()?;
        self.expect(Keyword::Then, "'then' after the if condition")?;
        let then_branch = self.parse_expression()?;
        self.expect(Keyword::Else, "'else' after the then branch")?;
        let else_branch = self.parse_expression()?;
        let close = self.expect(Keyword::RightParen, "')' to close 'if'")?;
        Ok(Expr::if_then_else(
            condition,
            then_branch,
            else_branch,
            open.merge(close),
        ))
    }

    /// ( let name = expr in expr )
    fn parse_let(&mut self, open: Span) -> Result<Expr> {
        let name = self.parse_expression()?;
        if name.as_var().is_none() {
            return Err(Error::LetRequiresName {
                found: name.to_string(),
                span: name.span,
            });
        }
        self.expect(Keyword::Equal, "'=' after the let-bound name")?;
        let value = self.parse_expression()?;
        self.expect(Keyword::In, "'in' after the let-bound value")?;
        let body = self.parse_expression()?;
        let close = self.expect(Keyword::RightParen, "')' to close 'let'")?;
        Ok(Expr::let_in(name, value, body, open.merge(close)))
    }

    // Helper methods

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// Consume the current token; running out is an error naming `expected`
    fn advance(&mut self, expected: &str) -> Result<Token> {
        match self.tokens.get(self.current) {
            Some(token) => {
                self.current += 1;
                Ok(token.clone())
            }
            None => Err(Error::unexpected_eof(expected, self.end_position)),
        }
    }

    fn expect(&mut self, keyword: Keyword, expected: &str) -> Result<Span> {
        let token = self.advance(expected)?;
        match token.kind {
            TokenKind::Keyword(found) if found == keyword => Ok(token.span),
            other => Err(Error::unexpected_token(expected, other.to_string(), token.span)),
        }
    }
}

/// Parse a token sequence into a single expression
pub fn parse(tokens: Vec<Token>) -> Result<Expr> {
    Parser::new(tokens).parse()
}
