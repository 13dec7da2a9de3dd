//! Written type mentions and their generic arguments.
//!
//! A [`TypeReference`] is a type as it appears in source, e.g.
//! `Map<String, out List<*>>?`. Names are kept as written; turning them into
//! qualified names is the job of a [`Resolver`](crate::Resolver).

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Variance of a generic argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    /// No projection (`List<String>`).
    Invariant,
    /// Producer projection (`List<out Number>`).
    Covariant,
    /// Consumer projection (`Comparator<in Int>`).
    Contravariant,
    /// Star projection (`List<*>`).
    Star,
}

/// A type as written at a use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// The name as written (`String`, `kotlin.collections.List`).
    pub name: String,
    pub nullable: bool,
    pub arguments: Vec<TypeArgument>,
}

impl TypeReference {
    /// Create a non-nullable reference without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            arguments: Vec::new(),
        }
    }

    /// Mark this reference as nullable (`T?`).
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Append a type argument.
    pub fn with_argument(mut self, argument: TypeArgument) -> Self {
        self.arguments.push(argument);
        self
    }
}

impl FromStr for TypeReference {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// A generic argument slot.
///
/// A star projection carries no type, so it is a separate variant rather
/// than a variance flag on a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    Star,
    Invariant(TypeReference),
    Covariant(TypeReference),
    Contravariant(TypeReference),
}

impl TypeArgument {
    /// Build an argument from a variance and a type. The type is dropped for
    /// [`Variance::Star`].
    pub fn new(variance: Variance, reference: TypeReference) -> Self {
        match variance {
            Variance::Invariant => Self::Invariant(reference),
            Variance::Covariant => Self::Covariant(reference),
            Variance::Contravariant => Self::Contravariant(reference),
            Variance::Star => Self::Star,
        }
    }

    pub fn variance(&self) -> Variance {
        match self {
            Self::Star => Variance::Star,
            Self::Invariant(_) => Variance::Invariant,
            Self::Covariant(_) => Variance::Covariant,
            Self::Contravariant(_) => Variance::Contravariant,
        }
    }

    /// The projected type, `None` for star projections.
    pub fn reference(&self) -> Option<&TypeReference> {
        match self {
            Self::Star => None,
            Self::Invariant(r) | Self::Covariant(r) | Self::Contravariant(r) => Some(r),
        }
    }
}

/// Error produced when a type expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseTypeError {
    pub message: String,
    /// Byte offset into the type expression.
    pub offset: usize,
}

impl ParseTypeError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Open,
    Close,
    Comma,
    Question,
    Star,
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => write!(f, "'{}'", name),
            Token::Open => f.write_str("'<'"),
            Token::Close => f.write_str("'>'"),
            Token::Comma => f.write_str("','"),
            Token::Question => f.write_str("'?'"),
            Token::Star => f.write_str("'*'"),
            Token::End => f.write_str("end of input"),
        }
    }
}

fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, ParseTypeError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '<' => Token::Open,
            '>' => Token::Close,
            ',' => Token::Comma,
            '?' => Token::Question,
            '*' => Token::Star,
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                let mut expect_segment = true;
                while let Some(&(at, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        if expect_segment && c.is_numeric() {
                            return Err(ParseTypeError::new(
                                "name segment cannot start with a digit",
                                at,
                            ));
                        }
                        expect_segment = false;
                    } else if c == '.' && !expect_segment {
                        expect_segment = true;
                    } else {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                if expect_segment {
                    return Err(ParseTypeError::new(
                        "qualified name cannot end with '.'",
                        offset + name.len(),
                    ));
                }
                tokens.push((Token::Name(name), offset));
                continue;
            }
            other => {
                return Err(ParseTypeError::new(
                    format!("unexpected character '{}'", other),
                    offset,
                ));
            }
        };
        tokens.push((token, offset));
        chars.next();
    }

    tokens.push((Token::End, src.len()));
    Ok(tokens)
}

static END: Token = Token::End;

struct Cursor {
    tokens: Vec<(Token, usize)>,
    index: usize,
}

impl Cursor {
    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.tokens
            .get(self.index + n)
            .map(|(token, _)| token)
            .unwrap_or(&END)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.index)
            .or(self.tokens.last())
            .map(|(_, offset)| *offset)
            .unwrap_or(0)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.bump();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseTypeError {
        ParseTypeError::new(
            format!("expected {}, found {}", expected, self.peek()),
            self.offset(),
        )
    }
}

/// A generic type whose argument list is still being read.
struct OpenType {
    variance: Variance,
    name: String,
    arguments: Vec<TypeArgument>,
}

/// Parse a type expression without recursing on nesting depth.
fn parse(src: &str) -> Result<TypeReference, ParseTypeError> {
    let mut cursor = Cursor {
        tokens: tokenize(src)?,
        index: 0,
    };
    let mut open: Vec<OpenType> = Vec::new();

    'types: loop {
        let inside = !open.is_empty();

        let mut finished = match cursor.peek() {
            Token::Star if inside => {
                cursor.bump();
                TypeArgument::Star
            }
            Token::Name(_) => {
                let mut variance = Variance::Invariant;
                if inside && matches!(cursor.peek_nth(1), Token::Name(_)) {
                    variance = match cursor.peek() {
                        Token::Name(n) if n == "out" => Variance::Covariant,
                        Token::Name(n) if n == "in" => Variance::Contravariant,
                        _ => return Err(cursor.unexpected("'out', 'in' or a type name")),
                    };
                    cursor.bump();
                }

                let Token::Name(name) = cursor.bump() else {
                    return Err(cursor.unexpected("a type name"));
                };

                if cursor.eat(&Token::Open) {
                    open.push(OpenType {
                        variance,
                        name,
                        arguments: Vec::new(),
                    });
                    continue 'types;
                }

                let nullable = cursor.eat(&Token::Question);
                TypeArgument::new(
                    variance,
                    TypeReference {
                        name,
                        nullable,
                        arguments: Vec::new(),
                    },
                )
            }
            _ if inside => return Err(cursor.unexpected("a type argument")),
            _ => return Err(cursor.unexpected("a type name")),
        };

        loop {
            match open.last_mut() {
                Some(parent) => parent.arguments.push(finished),
                None => {
                    if *cursor.peek() != Token::End {
                        return Err(cursor.unexpected("end of input"));
                    }
                    return match finished {
                        TypeArgument::Invariant(reference) => Ok(reference),
                        _ => Err(ParseTypeError::new("expected a type name", 0)),
                    };
                }
            }

            match cursor.peek() {
                Token::Comma => {
                    cursor.bump();
                    continue 'types;
                }
                Token::Close => {
                    cursor.bump();
                    let Some(closed) = open.pop() else {
                        return Err(cursor.unexpected("','"));
                    };
                    let nullable = cursor.eat(&Token::Question);
                    finished = TypeArgument::new(
                        closed.variance,
                        TypeReference {
                            name: closed.name,
                            nullable,
                            arguments: closed.arguments,
                        },
                    );
                }
                _ => return Err(cursor.unexpected("',' or '>'")),
            }
        }
    }
}
