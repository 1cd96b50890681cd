use super::ast::{BinaryOp, Expression, Program, Statement};
use crate::config::{LanguageConfig, DEFAULT_MAX_NESTING};
use crate::error::{Error, Expected, Result};
use crate::lexer::{LineSource, Scanner, StrSource, Token, TokenKind};

/// Recursive-descent parser for Tiny
///
/// Holds exactly one lookahead token and pulls the next one from the
/// scanner each time a token is consumed. Each grammar production maps to
/// one `parse_*` method; precedence comes from how the methods nest:
///
/// ```text
/// program     -> stmt_seq EOF
/// stmt_seq    -> stmt { ';' stmt }
/// stmt        -> if_stmt | repeat_stmt | assign_stmt | read_stmt | write_stmt
/// if_stmt     -> 'if' expr 'then' stmt_seq [ 'else' stmt_seq ] 'end'
/// repeat_stmt -> 'repeat' stmt_seq 'until' expr
/// assign_stmt -> ID ':=' expr
/// read_stmt   -> 'read' ID
/// write_stmt  -> 'write' expr
/// expr        -> math_expr [ ('<' | '=') math_expr ]
/// math_expr   -> term { ('+' | '-') term }
/// term        -> factor { ('*' | '/') factor }
/// factor      -> new_expr [ '^' factor ]
/// new_expr    -> NUM | ID | '(' math_expr ')'
/// ```
///
/// Nesting (`if`/`repeat` bodies, parentheses, operator chains) is capped at
/// `max_nesting` levels, which also bounds the recursion of every later
/// stage walking the tree.
pub struct Parser<S> {
    scanner: Scanner<S>,
    current: Token,
    max_nesting: usize,
    depth: usize,
}

impl<'a> Parser<StrSource<'a>> {
    /// Creates a parser over a string with the default language
    pub fn from_text(text: &'a str) -> Result<Self> {
        Parser::new(Scanner::from_text(text))
    }

    /// Creates a parser over a string for a specific language configuration
    pub fn from_text_with_config(text: &'a str, config: &LanguageConfig) -> Result<Self> {
        Parser::with_config(StrSource::new(text), config)
    }
}

impl<S: LineSource> Parser<S> {
    /// Creates a parser, priming the lookahead with the first token
    pub fn new(scanner: Scanner<S>) -> Result<Self> {
        Parser::with_limit(scanner, DEFAULT_MAX_NESTING)
    }

    /// Creates a parser over `source` for a specific language configuration
    ///
    /// Rejects a configuration that fails [`LanguageConfig::validate`].
    pub fn with_config(source: S, config: &LanguageConfig) -> Result<Self> {
        let scanner = Scanner::with_config(source, config)?;
        Parser::with_limit(scanner, config.max_nesting)
    }

    fn with_limit(mut scanner: Scanner<S>, max_nesting: usize) -> Result<Self> {
        let current = scanner.next_token()?;
        Ok(Parser {
            scanner,
            current,
            max_nesting,
            depth: 0,
        })
    }

    /// Parses the whole input into a program
    ///
    /// The first grammar violation aborts the parse; no partial tree is
    /// returned.
    pub fn parse_program(&mut self) -> Result<Program> {
        let body = self.parse_stmt_seq()?;
        self.consume(TokenKind::EndFile)?;

        let program = Program { body };
        tracing::debug!(
            statements = program.statement_count(),
            lines = self.scanner.line(),
            "parsed program"
        );
        Ok(program)
    }

    fn parse_stmt_seq(&mut self) -> Result<Vec<Statement>> {
        let mut sequence = vec![self.parse_statement()?];

        while !self.current.kind.ends_sequence() {
            self.consume(TokenKind::SemiColon)?;
            sequence.push(self.parse_statement()?);
        }

        Ok(sequence)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current.kind {
            TokenKind::If => self.parse_if(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Id => self.parse_assign(),
            TokenKind::Read => self.parse_read(),
            TokenKind::Write => self.parse_write(),
            _ => Err(self.unexpected(Expected::Statement)),
        }
    }

    /// Parse `if expr then stmt_seq [else stmt_seq] end`
    fn parse_if(&mut self) -> Result<Statement> {
        self.enter()?;
        let line = self.consume(TokenKind::If)?.line;

        let condition = self.parse_expr()?;
        self.consume(TokenKind::Then)?;
        let then_branch = self.parse_stmt_seq()?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance()?;
            Some(self.parse_stmt_seq()?)
        } else {
            None
        };
        self.consume(TokenKind::End)?;
        self.leave(1);

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            line,
        })
    }

    /// Parse `repeat stmt_seq until expr`
    fn parse_repeat(&mut self) -> Result<Statement> {
        self.enter()?;
        let line = self.consume(TokenKind::Repeat)?.line;

        let body = self.parse_stmt_seq()?;
        self.consume(TokenKind::Until)?;
        let condition = self.parse_expr()?;
        self.leave(1);

        Ok(Statement::Repeat {
            body,
            condition,
            line,
        })
    }

    /// Parse `ID := expr`
    fn parse_assign(&mut self) -> Result<Statement> {
        let target = self.consume(TokenKind::Id)?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expr()?;

        Ok(Statement::Assign {
            name: target.lexeme,
            value,
            line: target.line,
        })
    }

    /// Parse `read ID`
    fn parse_read(&mut self) -> Result<Statement> {
        let line = self.consume(TokenKind::Read)?.line;
        let target = self.consume(TokenKind::Id)?;

        Ok(Statement::Read {
            name: target.lexeme,
            line,
        })
    }

    /// Parse `write expr`
    fn parse_write(&mut self) -> Result<Statement> {
        let line = self.consume(TokenKind::Write)?.line;
        let value = self.parse_expr()?;

        Ok(Statement::Write { value, line })
    }

    /// At most one comparison, never chained
    fn parse_expr(&mut self) -> Result<Expression> {
        let left = self.parse_math_expr()?;

        match self.current_operator() {
            Some(op) if op.is_relational() => {
                let line = self.advance()?.line;
                let right = self.parse_math_expr()?;
                Ok(binary(op, left, right, line))
            }
            _ => Ok(left),
        }
    }

    /// Left-associative chains grow the tree one level per operator
    fn parse_math_expr(&mut self) -> Result<Expression> {
        let mut expr = self.parse_term()?;
        let mut chained = 0;

        while let Some(op @ (BinaryOp::Plus | BinaryOp::Minus)) = self.current_operator() {
            self.enter()?;
            chained += 1;
            let line = self.advance()?.line;
            let right = self.parse_term()?;
            expr = binary(op, expr, right, line);
        }

        self.leave(chained);
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_factor()?;
        let mut chained = 0;

        while let Some(op @ (BinaryOp::Times | BinaryOp::Divide)) = self.current_operator() {
            self.enter()?;
            chained += 1;
            let line = self.advance()?.line;
            let right = self.parse_factor()?;
            expr = binary(op, expr, right, line);
        }

        self.leave(chained);
        Ok(expr)
    }

    /// Exponentiation binds right: `2^3^2` is `2^(3^2)`
    fn parse_factor(&mut self) -> Result<Expression> {
        let base = self.parse_new_expr()?;

        if self.check(TokenKind::Power) {
            self.enter()?;
            let line = self.advance()?.line;
            let exponent = self.parse_factor()?;
            self.leave(1);
            return Ok(binary(BinaryOp::Power, base, exponent, line));
        }

        Ok(base)
    }

    fn parse_new_expr(&mut self) -> Result<Expression> {
        match self.current.kind {
            TokenKind::Num => {
                let token = self.advance()?;
                let value = token.lexeme.parse::<i64>().map_err(|_| Error::InvalidNumber {
                    lexeme: token.lexeme.clone(),
                    line: token.line,
                })?;
                Ok(Expression::Number {
                    value,
                    line: token.line,
                })
            }
            TokenKind::Id => {
                let token = self.advance()?;
                Ok(Expression::Identifier {
                    name: token.lexeme,
                    line: token.line,
                })
            }
            TokenKind::LeftParen => {
                self.enter()?;
                self.advance()?;
                let expr = self.parse_math_expr()?;
                self.consume(TokenKind::RightParen)?;
                self.leave(1);
                Ok(expr)
            }
            _ => Err(self.unexpected(Expected::Factor)),
        }
    }

    // Helper methods

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_nesting {
            return Err(Error::NestingTooDeep {
                limit: self.max_nesting,
                line: self.current.line,
            });
        }
        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn current_operator(&self) -> Option<BinaryOp> {
        BinaryOp::from_token(self.current.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Move to the next token, returning the one just consumed
    fn advance(&mut self) -> Result<Token> {
        let next = self.scanner.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(Expected::Token(kind)))
        }
    }

    /// Error for the current token, escalating lexical-error tokens
    fn unexpected(&self, expected: Expected) -> Error {
        let token = &self.current;
        match token.kind {
            TokenKind::Error if token.lexeme.is_empty() => {
                Error::UnterminatedComment { line: token.line }
            }
            TokenKind::Error => Error::LexicalError {
                lexeme: token.lexeme.clone(),
                line: token.line,
            },
            TokenKind::EndFile => Error::SyntaxError {
                expected,
                found: "end of input".to_string(),
                line: token.line,
            },
            _ => Error::SyntaxError {
                expected,
                found: token.lexeme.clone(),
                line: token.line,
            },
        }
    }
}

fn binary(op: BinaryOp, left: Expression, right: Expression, line: usize) -> Expression {
    Expression::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        ty: op.result_type(),
        line,
    }
}
