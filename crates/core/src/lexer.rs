use crate::error::SourceError;

/// Kind of a lexical token. The grammar matches on kinds only; the
/// token text is carried for the evaluator (names, literals, operators,
/// scope-name lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LParen,
    RParen,
    /// `+=`
    PlusEqual,
    /// `^=` -- transfer to the parent scope
    CaretEqual,
    /// `v=` -- transfer from the parent scope
    VEqual,
    Equal,
    /// One of `+ - * /`
    ArithOp,
    /// A whole `:`-line; the text keeps the `:` and the trailing newline
    ScopeName,
    Name,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Tokenize a program. Comments and whitespace produce no token.
///
/// The scan tries a fixed list of rules at each position and commits to
/// the first that matches. Rule order is load-bearing: the two-character
/// assignment operators come before bare `=`, arithmetic operators come
/// before numeric literals (so `-3` is ArithOp `-` then Number `3`), and
/// `v=` comes before identifiers.
pub fn lex(src: &str, filename: &str) -> Result<Vec<Token>, SourceError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];
        let tok_line = line;

        // Comment: '#' to end of line.
        if c == '#' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
            if pos < chars.len() {
                pos += 1;
                line += 1;
            }
            continue;
        }

        // Delimiters
        let delim = match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        };
        if let Some(kind) = delim {
            tokens.push(Token::new(kind, c, tok_line));
            pos += 1;
            continue;
        }

        // Two-character assignment operators, before bare '=' and before
        // the arithmetic rule can swallow the leading '+'.
        if pos + 1 < chars.len() && chars[pos + 1] == '=' {
            let kind = match c {
                '+' => Some(TokenKind::PlusEqual),
                '^' => Some(TokenKind::CaretEqual),
                'v' => Some(TokenKind::VEqual),
                _ => None,
            };
            if let Some(kind) = kind {
                tokens.push(Token::new(kind, format!("{}=", c), tok_line));
                pos += 2;
                continue;
            }
        }

        if c == '=' {
            tokens.push(Token::new(TokenKind::Equal, c, tok_line));
            pos += 1;
            continue;
        }

        // Arithmetic operator, before the numeric-literal rule.
        if matches!(c, '+' | '-' | '*' | '/') {
            tokens.push(Token::new(TokenKind::ArithOp, c, tok_line));
            pos += 1;
            continue;
        }

        // Scope name: a ':' line, newline included in the payload. A ':'
        // with no terminating newline matches no rule and falls through
        // to the error below.
        if c == ':' {
            if let Some(nl) = chars[pos..].iter().position(|&ch| ch == '\n') {
                let end = pos + nl + 1;
                let text: String = chars[pos..end].iter().collect();
                tokens.push(Token::new(TokenKind::ScopeName, text, tok_line));
                pos = end;
                line += 1;
                continue;
            }
        }

        // Identifier
        if c.is_ascii_alphabetic() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_alphanumeric() {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::Name, text, tok_line));
            continue;
        }

        // Integer literal. The signed arm is shadowed by the arithmetic
        // rule above; the table order is the language's behavior.
        if c.is_ascii_digit()
            || (c == '-' && pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit())
        {
            let start = pos;
            if c == '-' {
                pos += 1;
            }
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::Number, text, tok_line));
            continue;
        }

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
            }
            pos += 1;
            continue;
        }

        return Err(SourceError::lex(
            filename,
            tok_line,
            format!("unexpected character '{}'", c),
        ));
    }

    Ok(tokens)
}
