use super::source::{LineSource, StrSource};
use super::token::{Token, TokenKind, TokenTable};
use crate::config::{LanguageConfig, DEFAULT_MAX_LEXEME_LEN};
use crate::error::Result;

/// Demand-driven scanner for Tiny source
///
/// Holds one line of input at a time and hands out tokens on request.
/// Unrecognized characters come back as [`TokenKind::Error`] tokens; the
/// scanner does not move past them, so the caller decides what to do.
pub struct Scanner<S> {
    /// Underlying character source
    source: S,
    /// Operator/punctuation table for prefix matching
    table: TokenTable,
    /// Longest identifier or number accepted
    max_lexeme_len: usize,
    /// Current line as characters
    buffer: Vec<char>,
    /// Current position in `buffer`
    current: usize,
    /// Number of lines fetched so far (1-indexed line of `buffer`)
    line: usize,
    /// Set once the iterator has yielded a terminal token
    done: bool,
}

impl<'a> Scanner<StrSource<'a>> {
    /// Creates a scanner over a string with the default language
    pub fn from_text(text: &'a str) -> Self {
        Scanner::new(StrSource::new(text))
    }
}

impl<S: LineSource> Scanner<S> {
    /// Creates a scanner with the default language configuration
    pub fn new(source: S) -> Self {
        Scanner::from_table(source, TokenTable::default(), DEFAULT_MAX_LEXEME_LEN)
    }

    /// Creates a scanner for a specific language configuration
    ///
    /// Rejects a configuration that fails [`LanguageConfig::validate`].
    pub fn with_config(source: S, config: &LanguageConfig) -> Result<Self> {
        let table = TokenTable::new(config)?;
        Ok(Scanner::from_table(source, table, config.max_lexeme_len))
    }

    fn from_table(source: S, table: TokenTable, max_lexeme_len: usize) -> Self {
        Scanner {
            source,
            table,
            max_lexeme_len,
            buffer: Vec::new(),
            current: 0,
            line: 0,
            done: false,
        }
    }

    /// Line number of the most recently fetched line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Produce the next token
    ///
    /// Comments are skipped entirely. After end of input every call returns
    /// an `EndFile` token. The `Err` side only carries source I/O failures.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if !self.skip_whitespace()? {
                return Ok(Token::end_file(self.line));
            }

            let line = self.line;
            let symbol = self
                .table
                .match_prefix(&self.buffer[self.current..])
                .map(|(lexeme, kind)| (lexeme.to_string(), kind));

            if let Some((lexeme, kind)) = symbol {
                self.current += lexeme.chars().count();
                if kind == TokenKind::LeftBrace {
                    if self.skip_comment()? {
                        continue;
                    }
                    return Ok(Token::new(TokenKind::Error, "", self.line));
                }
                return Ok(Token::new(kind, lexeme, line));
            }

            let c = self.buffer[self.current];
            if is_letter_or_underscore(c) {
                return Ok(self.scan_word(line));
            }
            if c.is_ascii_digit() {
                return Ok(self.scan_number(line));
            }

            return Ok(Token::new(TokenKind::Error, c.to_string(), line));
        }
    }

    /// Collect every token up to and including the terminal one
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        self.by_ref().collect()
    }

    fn scan_word(&mut self, line: usize) -> Token {
        let text = self.take_while(is_letter_or_underscore);
        if text.chars().count() > self.max_lexeme_len {
            return Token::new(TokenKind::Error, text, line);
        }
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Id);
        Token::new(kind, text, line)
    }

    fn scan_number(&mut self, line: usize) -> Token {
        let text = self.take_while(|c| c.is_ascii_digit());
        if text.chars().count() > self.max_lexeme_len {
            return Token::new(TokenKind::Error, text, line);
        }
        Token::new(TokenKind::Num, text, line)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.current;
        while self.current < self.buffer.len() && pred(self.buffer[self.current]) {
            self.current += 1;
        }
        self.buffer[start..self.current].iter().collect()
    }

    /// Skip whitespace across lines; false once input is exhausted
    fn skip_whitespace(&mut self) -> Result<bool> {
        loop {
            while self.current < self.buffer.len() && is_whitespace(self.buffer[self.current]) {
                self.current += 1;
            }
            if self.current < self.buffer.len() {
                return Ok(true);
            }
            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    /// Discard input through the closing brace; false if it never comes
    fn skip_comment(&mut self) -> Result<bool> {
        let close: Vec<char> = self
            .table
            .lexeme_of(TokenKind::RightBrace)
            .unwrap_or("}")
            .chars()
            .collect();

        loop {
            if let Some(offset) = self.buffer[self.current..]
                .windows(close.len())
                .position(|window| window == close.as_slice())
            {
                self.current += offset + close.len();
                return Ok(true);
            }
            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    fn next_line(&mut self) -> Result<bool> {
        match self.source.fetch_line()? {
            Some(text) => {
                self.buffer = text.chars().collect();
                self.current = 0;
                self.line += 1;
                Ok(true)
            }
            None => {
                self.buffer.clear();
                self.current = 0;
                Ok(false)
            }
        }
    }
}

/// Yields tokens through the first `EndFile` or `Error` token, then stops
impl<S: LineSource> Iterator for Scanner<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(t) if matches!(t.kind, TokenKind::EndFile | TokenKind::Error) => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(token)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_letter_or_underscore(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::from_text(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = Scanner::from_text("x := 3 + 4").scan_tokens().unwrap();

        assert_eq!(tokens.len(), 6); // x := 3 + 4 EOF
        assert_eq!(tokens[0], Token::new(TokenKind::Id, "x", 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Assign, ":=", 1));
        assert_eq!(tokens[2], Token::new(TokenKind::Num, "3", 1));
        assert_eq!(tokens[3], Token::new(TokenKind::Plus, "+", 1));
        assert_eq!(tokens[4], Token::new(TokenKind::Num, "4", 1));
        assert_eq!(tokens[5].kind, TokenKind::EndFile);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if then else end repeat until read write iffy"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Id,
                TokenKind::EndFile,
            ]
        );
    }

    #[test]
    fn test_digits_split_identifiers() {
        let tokens = Scanner::from_text("x1").scan_tokens().unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Id, "x", 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Num, "1", 1));
    }

    #[test]
    fn test_comment_is_transparent() {
        assert_eq!(
            kinds("x {this is ignored} := 1"),
            vec![TokenKind::Id, TokenKind::Assign, TokenKind::Num, TokenKind::EndFile]
        );
    }

    #[test]
    fn test_unrecognized_character_does_not_advance() {
        let mut scanner = Scanner::from_text("x # y");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Id);
        let error = scanner.next_token().unwrap();
        assert_eq!(error, Token::new(TokenKind::Error, "#", 1));
        assert_eq!(scanner.next_token().unwrap(), error);
    }

    #[test]
    fn test_unterminated_comment() {
        let tokens = Scanner::from_text("x { never\nclosed").scan_tokens().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::new(TokenKind::Error, "", 2));
    }

    #[test]
    fn test_overlong_lexeme() {
        let config = LanguageConfig {
            max_lexeme_len: 3,
            ..Default::default()
        };
        let mut scanner = Scanner::with_config(StrSource::new("abc abcd"), &config).unwrap();
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Id);
        assert_eq!(
            scanner.next_token().unwrap(),
            Token::new(TokenKind::Error, "abcd", 1)
        );
    }

    #[test]
    fn test_with_config_validates() {
        for bad in ["", "a"] {
            let config = LanguageConfig::with_equality_lexeme(bad);
            assert!(matches!(
                Scanner::with_config(StrSource::new("abc := 1"), &config),
                Err(crate::error::Error::Config { .. })
            ));
        }
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut scanner = Scanner::from_text("  \n\t ");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndFile);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndFile);
    }
}
