//! Parsing of annotation-style descriptor strings.
//!
//! Accepted forms: `Any`, `int`, `float`, `str`, `bool`, `None`, `Quantity`, `Unit`, `Callable`, class names,
//! `list[T]`, `tuple[A, B]`, `tuple[()]`, `dict[K, V]`, `set[T]`, `Callable[[A, B], R]`, `Optional[T]`,
//! `Union[A, B]` and `A | B`. Capitalised container names (`List`, `Dict`, ...) and a `typing.` prefix are accepted.
//! Any other `Name[...]` becomes [`TypeDescriptor::Generic`].

use super::descriptor::{PlainType, TypeDescriptor};
use crate::error::TypeCheckError;
use std::str::FromStr;

/// Deepest bracket nesting a descriptor string may use.
pub(crate) const MAX_DEPTH: usize = 128;

impl FromStr for TypeDescriptor {
    type Err = TypeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            tokens: tokenize(s)?,
            pos: 0,
            depth: 0,
            source: s,
        };
        let descriptor = parser.union()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(descriptor)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Name(String),
    Open,
    Close,
    LParen,
    RParen,
    Comma,
    Pipe,
}

fn tokenize(s: &str) -> Result<Vec<Token>, TypeCheckError> {
    let mut tokens = Vec::new();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '[' => Token::Open,
            ']' => Token::Close,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '|' => Token::Pipe,
            c if c.is_alphanumeric() || c == '_' => {
                let mut name = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '.' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Name(name)
            }
            other => {
                return Err(TypeCheckError::InvalidDescriptor(format!(
                    "unexpected `{other}` at offset {i} in `{s}`"
                )))
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, msg: &str) -> TypeCheckError {
        TypeCheckError::InvalidDescriptor(format!("{msg} (token {}) in `{}`", self.pos, self.source))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), TypeCheckError> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    // union := primary ('|' primary)*
    fn union(&mut self) -> Result<TypeDescriptor, TypeCheckError> {
        let mut alternatives = vec![self.primary()?];
        while self.eat(&Token::Pipe) {
            alternatives.push(self.primary()?);
        }
        Ok(TypeDescriptor::union(alternatives))
    }

    // list := union (',' union)*
    fn list(&mut self, close: &Token) -> Result<Vec<TypeDescriptor>, TypeCheckError> {
        let mut items = Vec::new();
        if self.peek() == Some(close) {
            return Ok(items);
        }
        loop {
            items.push(self.union()?);
            if !self.eat(&Token::Comma) {
                return Ok(items);
            }
        }
    }

    fn primary(&mut self) -> Result<TypeDescriptor, TypeCheckError> {
        let name = match self.peek() {
            Some(Token::Name(name)) => name.clone(),
            _ => return Err(self.error("expected a type name")),
        };
        self.pos += 1;
        let name = name.strip_prefix("typing.").unwrap_or(&name).to_owned();

        if !self.eat(&Token::Open) {
            return self.bare(&name);
        }
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let descriptor = match name.as_str() {
            "Callable" => self.callable_args()?,
            "tuple" | "Tuple" => {
                if self.eat(&Token::LParen) {
                    self.expect(Token::RParen, "`)` in `tuple[()]`")?;
                    TypeDescriptor::Tuple(Vec::new())
                } else {
                    TypeDescriptor::Tuple(self.list(&Token::Close)?)
                }
            }
            _ => {
                let args = self.list(&Token::Close)?;
                self.parameterised(name, args)?
            }
        };
        self.expect(Token::Close, "`]`")?;
        self.depth -= 1;
        Ok(descriptor)
    }

    fn bare(&self, name: &str) -> Result<TypeDescriptor, TypeCheckError> {
        Ok(match name {
            "Any" => TypeDescriptor::Any,
            "int" => TypeDescriptor::int(),
            "float" => TypeDescriptor::float(),
            "str" => TypeDescriptor::str(),
            "bool" => TypeDescriptor::bool(),
            "None" | "NoneType" => TypeDescriptor::none(),
            "Quantity" => TypeDescriptor::quantity(),
            "Unit" => TypeDescriptor::unit(),
            "Callable" | "function" => TypeDescriptor::Plain(PlainType::Function),
            "list" | "List" => TypeDescriptor::list(TypeDescriptor::Any),
            "set" | "Set" => TypeDescriptor::set(TypeDescriptor::Any),
            "dict" | "Dict" => TypeDescriptor::dict(TypeDescriptor::Any, TypeDescriptor::Any),
            "tuple" | "Tuple" => return Err(self.error("`tuple` needs element types")),
            other if other.starts_with(|c: char| c.is_ascii_digit()) => {
                return Err(self.error("type names cannot start with a digit"))
            }
            other => TypeDescriptor::class(other.to_owned()),
        })
    }

    fn parameterised(
        &self,
        name: String,
        mut args: Vec<TypeDescriptor>,
    ) -> Result<TypeDescriptor, TypeCheckError> {
        let arity = |args: &[TypeDescriptor], n: usize| -> Result<(), TypeCheckError> {
            if args.len() == n {
                Ok(())
            } else {
                Err(self.error(&format!(
                    "`{name}` takes {n} type argument(s), got {}",
                    args.len()
                )))
            }
        };
        Ok(match name.as_str() {
            "list" | "List" => {
                arity(&args, 1)?;
                TypeDescriptor::list(args.remove(0))
            }
            "set" | "Set" => {
                arity(&args, 1)?;
                TypeDescriptor::set(args.remove(0))
            }
            "dict" | "Dict" => {
                arity(&args, 2)?;
                let value = args.remove(1);
                TypeDescriptor::dict(args.remove(0), value)
            }
            "Optional" => {
                arity(&args, 1)?;
                TypeDescriptor::optional(args.remove(0))
            }
            "Union" => {
                if args.is_empty() {
                    return Err(self.error("`Union` needs at least one type argument"));
                }
                TypeDescriptor::union(args)
            }
            _ => TypeDescriptor::Generic { name, args },
        })
    }

    // Callable '[' '[' list ']' ',' union ']'
    fn callable_args(&mut self) -> Result<TypeDescriptor, TypeCheckError> {
        self.expect(Token::Open, "`[` opening the parameter list")?;
        let params = self.list(&Token::Close)?;
        self.expect(Token::Close, "`]` closing the parameter list")?;
        self.expect(Token::Comma, "`,` before the return type")?;
        let ret = self.union()?;
        Ok(TypeDescriptor::callable(params, ret))
    }
}
