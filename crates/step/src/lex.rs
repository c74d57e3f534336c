//! Lexical analysis: source text to a token stream with positions.
//!
//! The scanner walks the source as ASCII bytes, tracking 1-based line and
//! column numbers. Two-character operators are matched greedily before
//! their one-character prefixes, `#` starts a comment running to the end
//! of the line, and string literals may span lines (there are no escape
//! sequences).

use crate::exception_public::{CodeLoc, ErrorKind, Exception};

/// A single token with the source position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub loc: CodeLoc,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    // keywords
    And,
    Or,
    If,
    Else,
    While,
    Return,
    Break,
    Continue,
    Def,
    None,
    // punctuation and operators
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtE,
    GtE,
}

impl TokenKind {
    /// Human-readable description used in parse diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::Float(_) => "number",
            Self::Str(_) => "string",
            Self::Ident(_) => "identifier",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Return => "'return'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Def => "'def'",
            Self::None => "'None'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Assign => "'='",
            Self::Eq => "'=='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::LtE => "'<='",
            Self::GtE => "'>='",
        }
    }
}

/// A lexical error with the position of the offending character.
#[derive(Debug, Clone)]
pub(crate) struct LexError {
    pub msg: String,
    pub loc: CodeLoc,
}

impl LexError {
    fn new(msg: impl Into<String>, loc: CodeLoc) -> Self {
        Self { msg: msg.into(), loc }
    }

    pub fn into_exception(self) -> Exception {
        Exception::new(ErrorKind::Lex, self.msg, Some(self.loc))
    }
}

/// Tokenizes `code`, returning the full token sequence or the first error.
pub(crate) fn lex(code: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(code).run()
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(code: &'a str) -> Self {
        Self {
            src: code.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn loc(&self) -> CodeLoc {
        CodeLoc::new(self.line, self.column)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(byte)
    }

    /// Consumes the next byte when it equals `expected`.
    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(byte) = self.peek() {
            let loc = self.loc();
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'#' => {
                    // comment runs to (but excludes) the next newline
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.pos += 1;
                        self.column += 1;
                    }
                }
                b'"' => tokens.push(Token {
                    kind: self.string(loc)?,
                    loc,
                }),
                b'0'..=b'9' => tokens.push(Token {
                    kind: self.number(loc)?,
                    loc,
                }),
                b'_' | b'a'..=b'z' | b'A'..=b'Z' => tokens.push(Token {
                    kind: self.ident_or_keyword(),
                    loc,
                }),
                _ => tokens.push(Token {
                    kind: self.operator(loc)?,
                    loc,
                }),
            }
        }
        Ok(tokens)
    }

    fn string(&mut self, start: CodeLoc) -> Result<TokenKind, LexError> {
        self.bump(); // opening quote
        let content_start = self.pos;
        loop {
            match self.peek() {
                Some(b'"') => break,
                Some(byte) if byte.is_ascii() => {
                    self.bump();
                }
                Some(_) => {
                    return Err(LexError::new("non-ASCII character in string literal", self.loc()));
                }
                Option::None => return Err(LexError::new("unterminated string literal", start)),
            }
        }
        let content = std::str::from_utf8(&self.src[content_start..self.pos])
            .expect("ASCII bytes are valid UTF-8")
            .to_owned();
        self.bump(); // closing quote
        Ok(TokenKind::Str(content))
    }

    fn number(&mut self, start: CodeLoc) -> Result<TokenKind, LexError> {
        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.bump();
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = std::str::from_utf8(&self.src[digits_start..self.pos]).expect("ASCII bytes are valid UTF-8");
        if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| LexError::new(format!("malformed number '{text}'"), start))?;
            Ok(TokenKind::Float(value))
        } else {
            let value = text
                .parse::<i64>()
                .map_err(|_| LexError::new(format!("integer literal '{text}' is too large"), start))?;
            Ok(TokenKind::Int(value))
        }
    }

    fn ident_or_keyword(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
        {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).expect("ASCII bytes are valid UTF-8");
        match text {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "def" => TokenKind::Def,
            "None" => TokenKind::None,
            _ => TokenKind::Ident(text.to_owned()),
        }
    }

    fn operator(&mut self, loc: CodeLoc) -> Result<TokenKind, LexError> {
        let byte = self.bump().expect("operator byte was peeked");
        let kind = match byte {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            // two-character operators are matched greedily
            b'=' => {
                if self.eat(b'=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            b'<' => {
                if self.eat(b'=') {
                    TokenKind::LtE
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.eat(b'=') {
                    TokenKind::GtE
                } else {
                    TokenKind::Gt
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    TokenKind::NotEq
                } else {
                    return Err(LexError::new("unexpected character '!'", loc));
                }
            }
            _ => {
                let display = if byte.is_ascii_graphic() {
                    format!("unexpected character '{}'", char::from(byte))
                } else {
                    format!("unexpected character (byte 0x{byte:02x})")
                };
                return Err(LexError::new(display, loc));
            }
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(code: &str) -> Vec<TokenKind> {
        lex(code).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            kinds("1 + 2.5"),
            vec![TokenKind::Int(1), TokenKind::Plus, TokenKind::Float(2.5)]
        );
        // a trailing dot still lexes as a float
        assert_eq!(kinds("7."), vec![TokenKind::Float(7.0)]);
    }

    #[test]
    fn greedy_two_char_operators() {
        assert_eq!(
            kinds("<= >= == != < > ="),
            vec![
                TokenKind::LtE,
                TokenKind::GtE,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
            ]
        );
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("while"), vec![TokenKind::While]);
        assert_eq!(kinds("whilex"), vec![TokenKind::Ident("whilex".to_owned())]);
        assert_eq!(kinds("None"), vec![TokenKind::None]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("1 # comment with \" and symbols !@\n2"),
            vec![TokenKind::Int(1), TokenKind::Int(2)]
        );
    }

    #[test]
    fn strings_may_span_lines() {
        assert_eq!(
            kinds("\"a\nb\""),
            vec![TokenKind::Str("a\nb".to_owned())]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = lex("x = 1;\ny = 2;").unwrap();
        assert_eq!(tokens[0].loc, CodeLoc::new(1, 1));
        assert_eq!(tokens[1].loc, CodeLoc::new(1, 3));
        assert_eq!(tokens[4].loc, CodeLoc::new(2, 1));
    }

    #[test]
    fn unterminated_string_reports_opening_quote() {
        let err = lex("x = \"abc").unwrap_err();
        assert_eq!(err.msg, "unterminated string literal");
        assert_eq!(err.loc, CodeLoc::new(1, 5));
    }

    #[test]
    fn bare_dot_is_an_error() {
        let err = lex(".5").unwrap_err();
        assert_eq!(err.msg, "unexpected character '.'");
    }

    #[test]
    fn huge_integer_literal_is_an_error() {
        let err = lex("99999999999999999999").unwrap_err();
        assert!(err.msg.contains("too large"));
    }
}
