use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::config::LanguageConfig;
use crate::error::Result;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Source text of the token
    pub lexeme: String,
    /// Line number where the token's first character appears (1-indexed)
    pub line: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// End-of-input marker
    pub fn end_file(line: usize) -> Self {
        Token::new(TokenKind::EndFile, "", line)
    }

    /// True for lexical-error tokens
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

/// `[line] lexeme (Kind)`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.line, self.lexeme, self.kind)
    }
}

/// All possible token types in Tiny
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `end`
    End,
    /// `repeat`
    Repeat,
    /// `until`
    Until,
    /// `read`
    Read,
    /// `write`
    Write,

    // Operators and punctuation
    /// `:=`
    Assign,
    /// `=` (spelling is configurable)
    Equal,
    /// `<`
    LessThan,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Times,
    /// `/`
    Divide,
    /// `^`
    Power,
    /// `;`
    SemiColon,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`, opens a comment
    LeftBrace,
    /// `}`, closes a comment
    RightBrace,

    // Literals
    /// Identifier
    Id,
    /// Numeric literal
    Num,

    // Special
    /// End of input marker
    EndFile,
    /// Lexical error
    Error,
}

impl TokenKind {
    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::End
                | TokenKind::Repeat
                | TokenKind::Until
                | TokenKind::Read
                | TokenKind::Write
        )
    }

    /// Get keyword from string (exact, case-sensitive match)
    pub fn keyword(s: &str) -> Option<TokenKind> {
        RESERVED_WORDS.get(s).copied()
    }

    /// True for the tokens that close a statement sequence
    pub fn ends_sequence(&self) -> bool {
        matches!(
            self,
            TokenKind::EndFile | TokenKind::End | TokenKind::Else | TokenKind::Until
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::If => "If",
            TokenKind::Then => "Then",
            TokenKind::Else => "Else",
            TokenKind::End => "End",
            TokenKind::Repeat => "Repeat",
            TokenKind::Until => "Until",
            TokenKind::Read => "Read",
            TokenKind::Write => "Write",
            TokenKind::Assign => "Assign",
            TokenKind::Equal => "Equal",
            TokenKind::LessThan => "LessThan",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Times => "Times",
            TokenKind::Divide => "Divide",
            TokenKind::Power => "Power",
            TokenKind::SemiColon => "SemiColon",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Id => "ID",
            TokenKind::Num => "Num",
            TokenKind::EndFile => "EndFile",
            TokenKind::Error => "Error",
        };
        f.write_str(name)
    }
}

lazy_static! {
    static ref RESERVED_WORDS: HashMap<&'static str, TokenKind> = {
        let mut words = HashMap::new();
        words.insert("if", TokenKind::If);
        words.insert("then", TokenKind::Then);
        words.insert("else", TokenKind::Else);
        words.insert("end", TokenKind::End);
        words.insert("repeat", TokenKind::Repeat);
        words.insert("until", TokenKind::Until);
        words.insert("read", TokenKind::Read);
        words.insert("write", TokenKind::Write);
        words
    };
}

/// Symbol lexemes whose spelling never changes
pub const FIXED_SYMBOLS: [(&str, TokenKind); 12] = [
    (":=", TokenKind::Assign),
    ("<", TokenKind::LessThan),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Times),
    ("/", TokenKind::Divide),
    ("^", TokenKind::Power),
    (";", TokenKind::SemiColon),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
];

/// Ordered operator/punctuation table used for prefix matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable {
    symbols: Vec<(String, TokenKind)>,
}

impl TokenTable {
    /// Build the table for a language configuration
    ///
    /// Entries are stably sorted longest-first so a multi-character lexeme
    /// always wins over any of its prefixes. Fails if the configuration
    /// does not validate.
    pub fn new(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;
        Ok(TokenTable::build(config))
    }

    fn build(config: &LanguageConfig) -> Self {
        let mut symbols: Vec<(String, TokenKind)> = Vec::with_capacity(FIXED_SYMBOLS.len() + 1);
        symbols.push((FIXED_SYMBOLS[0].0.to_string(), FIXED_SYMBOLS[0].1));
        symbols.push((config.equality_lexeme.clone(), TokenKind::Equal));
        symbols.extend(
            FIXED_SYMBOLS[1..]
                .iter()
                .map(|(lexeme, kind)| (lexeme.to_string(), *kind)),
        );
        symbols.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        TokenTable { symbols }
    }

    /// First symbol whose lexeme is a prefix of `text`
    pub fn match_prefix(&self, text: &[char]) -> Option<(&str, TokenKind)> {
        self.symbols.iter().find_map(|(lexeme, kind)| {
            let mut chars = lexeme.chars();
            let len = lexeme.chars().count();
            if len > 0 && text.len() >= len && text[..len].iter().all(|c| Some(*c) == chars.next()) {
                Some((lexeme.as_str(), *kind))
            } else {
                None
            }
        })
    }

    /// Lexeme registered for a symbolic kind
    pub fn lexeme_of(&self, kind: TokenKind) -> Option<&str> {
        self.symbols
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(lexeme, _)| lexeme.as_str())
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        TokenTable::build(&LanguageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::keyword("until"), Some(TokenKind::Until));
        assert_eq!(TokenKind::keyword("If"), None);
        assert_eq!(TokenKind::keyword("iff"), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::Repeat.is_keyword());
        assert!(!TokenKind::Id.is_keyword());
        assert!(!TokenKind::Assign.is_keyword());
    }

    #[test]
    fn test_assign_matched_before_equal() {
        let table = TokenTable::default();
        assert_eq!(table.match_prefix(&chars(":= 1")), Some((":=", TokenKind::Assign)));
        assert_eq!(table.match_prefix(&chars("=1")), Some(("=", TokenKind::Equal)));
        assert_eq!(table.match_prefix(&chars(":")), None);
    }

    #[test]
    fn test_double_equals_table() {
        let table = TokenTable::new(&LanguageConfig::with_equality_lexeme("==")).unwrap();
        assert_eq!(table.match_prefix(&chars("== 2")), Some(("==", TokenKind::Equal)));
        assert_eq!(table.match_prefix(&chars("= 2")), None);
        assert_eq!(table.lexeme_of(TokenKind::Equal), Some("=="));
    }

    #[test]
    fn test_rejects_unusable_equality_lexemes() {
        for bad in ["", "a"] {
            assert!(
                TokenTable::new(&LanguageConfig::with_equality_lexeme(bad)).is_err(),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_empty_lexeme_never_matches() {
        let table = TokenTable {
            symbols: vec![(String::new(), TokenKind::Equal)],
        };
        assert_eq!(table.match_prefix(&chars("x")), None);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Id, "x", 4);
        assert_eq!(token.to_string(), "[4] x (ID)");
        assert_eq!(Token::end_file(9).to_string(), "[9]  (EndFile)");
    }
}
