//! A lexer for streaming tokens out of a command line.

/// Marker character that starts a cluster of flags.
pub const MARKER: char = '-';

/// Defines a `Token` that has been read from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token<'a> {
    /// Cluster of short flags. Only store the flag characters, not the marker (e.g. `vx` for
    /// `-vx`).
    Cluster(&'a str),

    /// Value (i.e. everything that does not start with the marker).
    Value(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a raw argument as a cluster or a value.
    #[inline(always)]
    pub fn classify(arg: &'a str) -> Self {
        match arg.strip_prefix(MARKER) {
            Some(flags) => Token::Cluster(flags),
            None => Token::Value(arg),
        }
    }
}

/// Defines a stream of tokens over the command line input.
///
/// The stream owns the only cursor over the input. Consumers may borrow the remaining
/// arguments with [`Tokens::rest`] and report back how many they used with
/// [`Tokens::advance`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    argv: &'a [&'a str],
    cursor: usize,
}

impl<'a> Tokens<'a> {
    /// Create a new token stream from the command line input.
    pub fn new(argv: &'a [&'a str]) -> Self {
        Tokens { argv, cursor: 0 }
    }

    /// Look at the next token without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<Token<'a>> {
        self.argv.get(self.cursor).copied().map(Token::classify)
    }

    /// Retrieve the arguments that have not been consumed yet.
    #[inline(always)]
    pub fn rest(&self) -> &'a [&'a str] {
        &self.argv[self.cursor..]
    }

    /// Move the cursor forward, stopping at the end of the input.
    #[inline(always)]
    pub fn advance(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_add(count).min(self.argv.len());
    }

    /// Index of the next unconsumed argument.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.peek()?;
        self.advance(1);
        Some(token)
    }
}
