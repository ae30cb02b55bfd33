//! A parser for collecting flag values from a command line, driven by a schema.

use heapless::LinearMap;

use crate::lexer::{Token, Tokens};
use crate::marshaler::{Marshaler, Value};
use crate::schema::{self, Kind, Table};

/// Defines the possible errors that may occur while compiling a schema, parsing arguments or
/// reading their values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<'a> {
    /// The schema declares a flag that is not an alphabetic character.
    #[error("invalid argument name `{0}`")]
    InvalidArgumentName(char),

    /// The schema declares a flag with an unknown type suffix.
    #[error("argument `{id}` has invalid format `{tail}`")]
    InvalidArgumentFormat {
        /// Flag.
        id: char,
        /// Unknown suffix.
        tail: &'a str,
    },

    /// The command line contains a flag that is not declared in the schema.
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(char),

    /// The flag expects a value but the command line ends right after it.
    #[error("missing value for argument `{0}`")]
    MissingValue(char),

    /// The value cannot be parsed as a number.
    #[error("argument `{id}` expects a number, found `{value}`")]
    InvalidFormat {
        /// Flag.
        id: char,
        /// Raw value.
        value: &'a str,
    },

    /// The value is not a `key=value` pair.
    #[error("argument `{id}` expects a key=value pair, found `{value}`")]
    MalformedMap {
        /// Flag.
        id: char,
        /// Raw value.
        value: &'a str,
    },

    /// The value is read with another type than the one declared in the schema.
    #[error("argument `{id}` is declared as {declared}, not {requested}")]
    TypeMismatch {
        /// Flag.
        id: char,
        /// Kind declared in the schema.
        declared: Kind,
        /// Kind requested by the caller.
        requested: Kind,
    },

    /// The flag occurs more often than a list or a map can hold.
    #[error("too many values for argument `{0}`")]
    TooManyValues(char),

    /// Insufficient space for the schema entries.
    #[error("out of parser memory space")]
    OutOfMemory,
}

/// Scan the flag clusters at the front of the token stream and hand over each flag to its
/// marshaler.
///
/// Scanning stops at the first value token, which is left unconsumed in the stream. Flags of a
/// cluster are handled in order, each one reading its value from the next arguments.
pub fn scan<'a, const FLAGS: usize, const VALUES: usize>(
    tokens: &mut Tokens<'a>,
    table: &mut Table<'a, FLAGS, VALUES>,
) -> Result<(), Error<'a>> {
    while let Some(Token::Cluster(flags)) = tokens.peek() {
        tokens.advance(1);

        for id in flags.chars() {
            let marshaler = table.get_mut(&id).ok_or(Error::UnexpectedArgument(id))?;

            let used = marshaler.set(tokens.rest()).map_err(|fault| fault.at(id))?;
            trace!("argument {} consumed {} value(s)", id, used);

            tokens.advance(used);
        }
    }

    Ok(())
}

/// Defines the result of argument parsing. This is a simple key-value store that offers a
/// typed look-up over the flags declared in the schema.
///
/// `FLAGS` bounds the number of schema entries and `VALUES` the number of occurrences held by a
/// list or map flag.
#[derive(Debug)]
pub struct Args<'a, const FLAGS: usize = 16, const VALUES: usize = 8> {
    table: Table<'a, FLAGS, VALUES>,
    argv: &'a [&'a str],
    next: usize,
}

impl<'a, const FLAGS: usize, const VALUES: usize> Args<'a, FLAGS, VALUES> {
    /// Compile the schema and parse the command line input against it.
    ///
    /// Any error aborts the whole parsing.
    pub fn parse(schema: &'a str, argv: &'a [&'a str]) -> Result<Self, Error<'a>> {
        let mut table = schema::compile(schema)?;

        let mut tokens = Tokens::new(argv);
        scan(&mut tokens, &mut table)?;

        let next = tokens.position();
        debug!("parsed {} argument(s), next at {}", argv.len(), next);

        Ok(Args { table, argv, next })
    }

    /// Check if the flag has been found on the command line.
    #[inline(always)]
    pub fn has(&self, id: char) -> bool {
        self.table.get(&id).is_some_and(Marshaler::is_present)
    }

    /// Kind declared in the schema for the flag, if any.
    #[inline(always)]
    pub fn kind(&self, id: char) -> Option<Kind> {
        self.table.get(&id).map(Marshaler::kind)
    }

    /// Index of the first argument that has not been consumed.
    #[inline(always)]
    pub fn next_argument(&self) -> usize {
        self.next
    }

    /// Arguments following the flags (e.g. positional arguments).
    #[inline(always)]
    pub fn remaining(&self) -> &'a [&'a str] {
        &self.argv[self.next..]
    }

    /// Get the value of a boolean flag.
    pub fn get_bool(&self, id: char) -> Result<bool, Error<'a>> {
        match self.lookup(id)? {
            Value::Boolean(value) => Ok(*value),
            other => Err(mismatch(id, other, Kind::Boolean)),
        }
    }

    /// Get the value of a string flag.
    pub fn get_str(&self, id: char) -> Result<&'a str, Error<'a>> {
        match self.lookup(id)? {
            Value::Str(value) => Ok(*value),
            other => Err(mismatch(id, other, Kind::Str)),
        }
    }

    /// Get the value of an integer flag.
    pub fn get_int(&self, id: char) -> Result<i32, Error<'a>> {
        match self.lookup(id)? {
            Value::Integer(value) => Ok(*value),
            other => Err(mismatch(id, other, Kind::Integer)),
        }
    }

    /// Get the value of a double flag.
    pub fn get_double(&self, id: char) -> Result<f64, Error<'a>> {
        match self.lookup(id)? {
            Value::Double(value) => Ok(*value),
            other => Err(mismatch(id, other, Kind::Double)),
        }
    }

    /// Get the values of a string list flag, in order of occurrence.
    pub fn get_str_list(&self, id: char) -> Result<&[&'a str], Error<'a>> {
        match self.lookup(id)? {
            Value::StrList(values) => Ok(values.as_slice()),
            other => Err(mismatch(id, other, Kind::StrList)),
        }
    }

    /// Get the pairs of a string map flag.
    pub fn get_str_map(&self, id: char) -> Result<&LinearMap<&'a str, &'a str, VALUES>, Error<'a>> {
        match self.lookup(id)? {
            Value::StrMap(pairs) => Ok(pairs),
            other => Err(mismatch(id, other, Kind::StrMap)),
        }
    }

    fn lookup(&self, id: char) -> Result<&Value<'a, VALUES>, Error<'a>> {
        self.table
            .get(&id)
            .map(Marshaler::value)
            .ok_or(Error::UnexpectedArgument(id))
    }
}

fn mismatch<'a, const VALUES: usize>(
    id: char,
    value: &Value<'_, VALUES>,
    requested: Kind,
) -> Error<'a> {
    Error::TypeMismatch {
        id,
        declared: value.kind(),
        requested,
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::{assert_that, eq};

    use super::*;

    fn parse<'a>(schema: &'a str, argv: &'a [&'a str]) -> Result<Args<'a, 8, 4>, Error<'a>> {
        Args::parse(schema, argv)
    }

    #[test]
    fn it_should_parse_boolean_flag() {
        let args = parse("x", &["-x"]).unwrap();

        assert_that!(args.has('x'), eq(true));
        assert_that!(args.get_bool('x'), eq(&Ok(true)));
    }

    #[test]
    fn it_should_default_absent_boolean_flag() {
        let args = parse("x", &[]).unwrap();

        assert_that!(args.has('x'), eq(false));
        assert_that!(args.get_bool('x'), eq(&Ok(false)));
    }

    #[test]
    fn it_should_parse_integer_flag() {
        let args = parse("p#", &["-p", "8080"]).unwrap();

        assert_that!(args.get_int('p'), eq(&Ok(8080)));
        assert_that!(args.next_argument(), eq(2));
    }

    #[test]
    fn it_should_parse_missing_value() {
        assert_that!(parse("p#", &["-p"]).err(), eq(&Some(Error::MissingValue('p'))));
    }

    #[test]
    fn it_should_parse_invalid_value() {
        assert_that!(
            parse("p#", &["-p", "abc"]).err(),
            eq(&Some(Error::InvalidFormat { id: 'p', value: "abc" }))
        );
    }

    #[test]
    fn it_should_parse_unexpected_argument() {
        assert_that!(parse("x", &["-y"]).err(), eq(&Some(Error::UnexpectedArgument('y'))));
    }

    #[test]
    fn it_should_propagate_schema_error() {
        assert_that!(parse("x,*", &["-x"]).err(), eq(&Some(Error::InvalidArgumentName('*'))));
    }

    #[test]
    fn it_should_stop_at_first_value() {
        let args = parse("x,y", &["-x", "foo", "-y"]).unwrap();

        assert_that!(args.next_argument(), eq(1));
        assert_that!(args.remaining(), eq(&["foo", "-y"][..]));
        assert_that!(args.has('y'), eq(false));
    }

    #[test]
    fn it_should_consume_values_in_cluster_order() {
        let args = parse("v,s*,p#", &["-vsp", "name", "42", "file"]).unwrap();

        assert_that!(args.get_bool('v'), eq(&Ok(true)));
        assert_that!(args.get_str('s'), eq(&Ok("name")));
        assert_that!(args.get_int('p'), eq(&Ok(42)));
        assert_that!(args.remaining(), eq(&["file"][..]));
    }

    #[test]
    fn it_should_read_value_starting_with_marker() {
        let args = parse("p#,x", &["-p", "-3", "-x"]).unwrap();

        assert_that!(args.get_int('p'), eq(&Ok(-3)));
        assert_that!(args.has('x'), eq(true));
    }

    #[test]
    fn it_should_ignore_lonely_marker() {
        let args = parse("x", &["-", "-x"]).unwrap();

        assert_that!(args.has('x'), eq(true));
        assert_that!(args.next_argument(), eq(2));
    }

    #[test]
    fn it_should_collect_list_in_order() {
        let args = parse("d[*]", &["-d", "a", "-d", "b"]).unwrap();

        assert_that!(args.get_str_list('d'), eq(&Ok(&["a", "b"][..])));
    }

    #[test]
    fn it_should_collect_map_pairs() {
        let args = parse("f&", &["-f", "k1=v1", "-f", "k2=v2", "-f", "k1=v3"]).unwrap();
        let pairs = args.get_str_map('f').unwrap();

        assert_that!(pairs.len(), eq(2));
        assert_that!(pairs.get("k1").copied(), eq(Some("v3")));
        assert_that!(pairs.get("k2").copied(), eq(Some("v2")));
    }

    #[test]
    fn it_should_report_too_many_values() {
        let result: Result<Args<'_, 1, 1>, _> = Args::parse("d[*]", &["-d", "a", "-d", "b"]);

        assert_that!(result.err(), eq(&Some(Error::TooManyValues('d'))));
    }

    #[test]
    fn it_should_report_type_mismatch() {
        let args = parse("p#", &["-p", "1"]).unwrap();

        assert_that!(
            args.get_str('p'),
            eq(&Err(Error::TypeMismatch {
                id: 'p',
                declared: Kind::Integer,
                requested: Kind::Str,
            }))
        );
    }

    #[test]
    fn it_should_report_undeclared_flag_on_read() {
        let args = parse("p#", &[]).unwrap();

        assert_that!(args.get_int('q'), eq(&Err(Error::UnexpectedArgument('q'))));
        assert_that!(args.kind('q').is_none(), eq(true));
        assert_that!(args.has('q'), eq(false));
    }

    #[test]
    fn it_should_keep_presence_of_falsy_values() {
        let args = parse("s*,p#", &["-s", "", "-p", "0"]).unwrap();

        assert_that!(args.has('s'), eq(true));
        assert_that!(args.has('p'), eq(true));
        assert_that!(args.get_int('p'), eq(&Ok(0)));
    }

    #[test]
    fn it_should_handle_edge_values() {
        let argv = &["-sp", "-", "+5", "-f", "=v", "-f", "k=", "rest"];
        let args = parse("s*, ,p#,f&", argv).unwrap();

        assert_that!(args.get_str('s'), eq(&Ok("-")));
        assert_that!(args.get_int('p'), eq(&Ok(5)));

        let pairs = args.get_str_map('f').unwrap();
        assert_that!(pairs.get("").copied(), eq(Some("v")));
        assert_that!(pairs.get("k").copied(), eq(Some("")));

        assert_that!(args.next_argument(), eq(7));
    }

    #[test]
    fn it_should_stop_at_leading_empty_argument() {
        let args = parse("x", &["", "-x"]).unwrap();

        assert_that!(args.next_argument(), eq(0));
        assert_that!(args.has('x'), eq(false));
    }

    #[test]
    fn it_should_replace_key_when_map_is_full() {
        let result: Result<Args<'_, 1, 1>, _> =
            Args::parse("f&", &["-f", "k=v1", "-f", "k=v2"]);
        let args = result.unwrap();

        assert_that!(args.get_str_map('f').unwrap().get("k").copied(), eq(Some("v2")));
    }
}
