//! Unit-symbol factor algebra.
//!
//! Symbols such as `kg·m/s^2` are kept as ordered `(atom, exponent)` lists so that combining units produces readable
//! composite symbols (`m/s` × `s` = `m`). Only exponent arithmetic is performed; atoms are never rewritten.

use crate::error::{UnitError, UnitResult};

/// Ordered list of symbol atoms with nonzero exponents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Factors(Vec<(String, i32)>);

impl Factors {
    pub(crate) fn atom(symbol: &str) -> Self {
        if symbol.is_empty() {
            Factors::default()
        } else {
            Factors(vec![(symbol.to_owned(), 1)])
        }
    }

    /// Parses a symbol, falling back to a single opaque atom if it is not a valid expression.
    pub(crate) fn of_symbol(symbol: &str) -> Self {
        Self::parse(symbol).unwrap_or_else(|_| Self::atom(symbol))
    }

    /// Parses a unit expression (`kg·m/s^2`, `1/(m*s)`, `km^-1`).
    pub(crate) fn parse(expr: &str) -> UnitResult<Self> {
        let mut parser = Parser {
            chars: expr.chars().collect(),
            pos: 0,
            source: expr,
        };
        let factors = parser.expr()?;
        parser.skip_ws();
        if parser.pos != parser.chars.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(factors)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(a, e)| (a.as_str(), *e))
    }

    pub(crate) fn mul(mut self, other: &Factors) -> Self {
        for (atom, e) in other.iter() {
            self.push(atom, e);
        }
        self
    }

    pub(crate) fn div(mut self, other: &Factors) -> Self {
        for (atom, e) in other.iter() {
            self.push(atom, -e);
        }
        self
    }

    pub(crate) fn pow(self, n: i32) -> Self {
        if n == 0 {
            return Factors::default();
        }
        Factors(
            self.0
                .into_iter()
                .map(|(a, e)| (a, e.saturating_mul(n)))
                .collect(),
        )
    }

    /// Divides every exponent by `n`, or `None` if that would leave a fraction.
    pub(crate) fn root(self, n: i32) -> Option<Self> {
        if n == 0 || self.0.iter().any(|(_, e)| e % n != 0) {
            return None;
        }
        Some(Factors(self.0.into_iter().map(|(a, e)| (a, e / n)).collect()))
    }

    fn push(&mut self, atom: &str, e: i32) {
        if let Some(i) = self.0.iter().position(|(a, _)| a == atom) {
            self.0[i].1 = self.0[i].1.saturating_add(e);
            if self.0[i].1 == 0 {
                self.0.remove(i);
            }
        } else if e != 0 {
            self.0.push((atom.to_owned(), e));
        }
    }

    /// Canonical text form: `a·b^2/(c·d)`, `1/s`, or `""` when empty.
    pub(crate) fn format(&self) -> String {
        let num: Vec<String> = self
            .0
            .iter()
            .filter(|(_, e)| *e > 0)
            .map(|(a, e)| power(a, *e))
            .collect();
        let den: Vec<String> = self
            .0
            .iter()
            .filter(|(_, e)| *e < 0)
            .map(|(a, e)| power(a, -*e))
            .collect();

        let mut out = if num.is_empty() {
            if den.is_empty() {
                return String::new();
            }
            "1".to_owned()
        } else {
            num.join("·")
        };
        match den.len() {
            0 => {}
            1 => {
                out.push('/');
                out.push_str(&den[0]);
            }
            _ => {
                out.push_str("/(");
                out.push_str(&den.join("·"));
                out.push(')');
            }
        }
        out
    }

    /// LaTeX form, e.g. `\mathrm{m}\,\mathrm{s}^{-2}`.
    pub(crate) fn latex(&self) -> String {
        self.0
            .iter()
            .map(|(a, e)| {
                if *e == 1 {
                    format!("\\mathrm{{{a}}}")
                } else {
                    format!("\\mathrm{{{a}}}^{{{e}}}")
                }
            })
            .collect::<Vec<_>>()
            .join("\\,")
    }
}

fn power(atom: &str, e: i32) -> String {
    if e == 1 {
        atom.to_owned()
    } else {
        format!("{atom}^{e}")
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '·' | '*' | '/' | '^' | '(' | ')') || c.is_whitespace()
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, msg: &str) -> UnitError {
        UnitError::InvalidExpression(format!("{msg} at offset {} in `{}`", self.pos, self.source))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    // expr := term (('·' | '*' | '/') term)*
    fn expr(&mut self) -> UnitResult<Factors> {
        let mut acc = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('·') | Some('*') => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    acc = acc.mul(&rhs);
                }
                Some('/') => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    acc = acc.div(&rhs);
                }
                _ => return Ok(acc),
            }
        }
    }

    // term := primary ('^' int)?
    fn term(&mut self) -> UnitResult<Factors> {
        let base = self.primary()?;
        self.skip_ws();
        if self.peek() == Some('^') {
            self.pos += 1;
            let n = self.integer()?;
            return Ok(base.pow(n));
        }
        Ok(base)
    }

    // primary := '(' expr ')' | '1' | atom
    fn primary(&mut self) -> UnitResult<Factors> {
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.expr()?;
                self.skip_ws();
                if self.peek() != Some(')') {
                    return Err(self.error("expected `)`"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(c) if !is_operator(c) => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !is_operator(c)) {
                    self.pos += 1;
                }
                let atom: String = self.chars[start..self.pos].iter().collect();
                if atom == "1" {
                    Ok(Factors::default())
                } else if atom.starts_with(|c: char| c.is_ascii_digit()) {
                    Err(self.error("numeric factors are not units"))
                } else {
                    Ok(Factors::atom(&atom))
                }
            }
            _ => Err(self.error("expected a unit symbol")),
        }
    }

    fn integer(&mut self) -> UnitResult<i32> {
        self.skip_ws();
        let parenthesized = self.peek() == Some('(');
        if parenthesized {
            self.pos += 1;
        }
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let n = text
            .parse::<i32>()
            .map_err(|_| self.error("expected an integer exponent"))?;
        if parenthesized {
            if self.peek() != Some(')') {
                return Err(self.error("expected `)`"));
            }
            self.pos += 1;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(expr: &str) -> String {
        Factors::parse(expr).unwrap().format()
    }

    #[test]
    fn parses_and_formats_compound_symbols() {
        assert_eq!(fmt("m/s^2"), "m/s^2");
        assert_eq!(fmt("kg*m/s/s"), "kg·m/s^2");
        assert_eq!(fmt("kg / (m · s^2)"), "kg/(m·s^2)");
        assert_eq!(fmt("1/s"), "1/s");
        assert_eq!(fmt("s^-1"), "1/s");
        assert_eq!(fmt("m^(-2)"), "1/m^2");
    }

    #[test]
    fn cancelling_atoms_disappear() {
        assert_eq!(fmt("m/s*s"), "m");
        assert_eq!(fmt("m/m"), "");
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(Factors::parse("m/").is_err());
        assert!(Factors::parse("(m").is_err());
        assert!(Factors::parse("m^x").is_err());
        assert!(Factors::parse("3 m").is_err());
        assert!(Factors::parse("").is_err());
    }

    #[test]
    fn opaque_symbols_fall_back_to_one_atom() {
        let f = Factors::of_symbol("m/");
        assert_eq!(f.iter().collect::<Vec<_>>(), vec![("m/", 1)]);
    }

    #[test]
    fn latex_lists_every_factor() {
        assert_eq!(
            Factors::parse("m/s^2").unwrap().latex(),
            "\\mathrm{m}\\,\\mathrm{s}^{-2}"
        );
    }

    #[test]
    fn root_halves_exponents() {
        let f = Factors::parse("m^2/s^4").unwrap().root(2).unwrap();
        assert_eq!(f.format(), "m/s^2");
        assert!(Factors::parse("m/s").unwrap().root(2).is_none());
    }
}
