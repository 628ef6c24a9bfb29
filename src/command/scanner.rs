//! Token scanner for a single command line.
//!
//! Recognises the three field shapes used by the command grammar:
//! points `(x,y)`, colours `(r,g,b)` and bare integers. Whitespace is allowed
//! between fields and after commas, but not directly inside the parentheses.

/// A cursor over the remainder of a line.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { rest: source }
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// Skip any whitespace.
    pub fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Consume a `(x,y)` pair.
    pub fn point(&mut self) -> Option<(i64, i64)> {
        self.expect('(')?;
        let x = self.integer()?;
        self.expect(',')?;
        self.skip_whitespace();
        let y = self.integer()?;
        self.expect(')')?;
        Some((x, y))
    }

    /// Consume a `(r,g,b)` triple.
    pub fn triple(&mut self) -> Option<(i64, i64, i64)> {
        self.expect('(')?;
        let r = self.integer()?;
        self.expect(',')?;
        self.skip_whitespace();
        let g = self.integer()?;
        self.expect(',')?;
        self.skip_whitespace();
        let b = self.integer()?;
        self.expect(')')?;
        Some((r, g, b))
    }

    /// Consume an integer with an optional leading `-`.
    ///
    /// Returns None if no digits follow or the value overflows.
    pub fn integer(&mut self) -> Option<i64> {
        let negative = self.rest.starts_with('-');
        let body = if negative { &self.rest[1..] } else { self.rest };

        let digits = body.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }

        let magnitude: i64 = body[..digits].parse().ok()?;
        self.rest = &body[digits..];
        Some(if negative { -magnitude } else { magnitude })
    }

    fn expect(&mut self, c: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(c)?;
        Some(())
    }
}
