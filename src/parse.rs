//! Parsing interface for Nickel.
//!
//! Provides utility functions as well as primitives for parsing Nickel.
//!
//! ```
//! assert![nickel::parse::parse_string("[+ 1 2] [list a [b] c]").is_ok()];
//! ```
use std::fs;

use crate::data_structures::{Error, Node, ParseState};

// //////////////////////////////////////////////////////////

/// Parse a file into a program `Node`
///
/// Utility function to easily parse the file at `filename`.
pub fn parse_file(filename: &str) -> Result<Node, Error> {
	let contents =
		fs::read_to_string(filename).map_err(|_| Error::UnableToOpen(filename.into()))?;
	parse_string(&contents)
}

// //////////////////////////////////////////////////////////

/// Parse a string into a program `Node`
///
/// The result is a `Node::Program` holding every top-level expression in
/// order.
///
/// ```
/// assert![nickel::parse::parse_string("[+ 1 2 3] [list a b c]").is_ok()];
/// ```
pub fn parse_string(source: &str) -> Result<Node, Error> {
	let mut state = ParseState::from(source);
	let mut children = Vec::new();
	loop {
		let node = parse_node(&mut state)?;
		if let Node::Invalid = node {
			break;
		}
		children.push(node);
	}
	Ok(Node::Program(children))
}

// //////////////////////////////////////////////////////////
// Internal                                                //
// //////////////////////////////////////////////////////////

/// The C-locale `isspace` set
fn is_space(byte: u8) -> bool {
	matches![byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r']
}

fn current_byte(state: &ParseState) -> Option<u8> {
	state.source.as_bytes().get(state.cursor).cloned()
}

fn byte_at(state: &ParseState, offset: usize) -> Option<u8> {
	state.source.as_bytes().get(state.cursor + offset).cloned()
}

/// Skip whitespace runs and `;`-to-newline comments, counting lines
///
/// Idempotent; runs until the first byte that is neither skippable
/// whitespace nor part of a comment.
fn skip_whitespace_and_comments(state: &mut ParseState) {
	loop {
		while let Some(byte) = current_byte(state) {
			if !is_space(byte) {
				break;
			}
			if byte == b'\n' {
				state.line += 1;
			}
			state.cursor += 1;
		}
		if current_byte(state) == Some(b';') {
			while let Some(byte) = current_byte(state) {
				if byte == b'\n' {
					break;
				}
				state.cursor += 1;
			}
		} else {
			break;
		}
	}
}

/// Parse the next node, or `Node::Invalid` when the input is exhausted
fn parse_node(state: &mut ParseState) -> Result<Node, Error> {
	skip_whitespace_and_comments(state);
	let byte = match current_byte(state) {
		Some(byte) => byte,
		None => return Ok(Node::Invalid),
	};
	if byte.is_ascii_digit()
		|| (byte == b'-' && byte_at(state, 1).map_or(false, |next| next.is_ascii_digit()))
	{
		parse_integer(state)
	} else if byte == b'[' {
		parse_list(state)
	} else if byte == b'"' {
		parse_string_literal(state)
	} else if byte != b']' {
		Ok(parse_name(state))
	} else {
		Err(Error::UnexpectedCharacter {
			line: state.line,
			character: ']',
		})
	}
}

/// Consume the longest signed decimal integer at the cursor
fn parse_integer(state: &mut ParseState) -> Result<Node, Error> {
	let start = state.cursor;
	let mut end = start;
	let bytes = state.source.as_bytes();
	if bytes.get(end) == Some(&b'-') {
		end += 1;
	}
	while let Some(byte) = bytes.get(end) {
		if byte.is_ascii_digit() {
			end += 1;
		} else {
			break;
		}
	}
	let digits = &state.source[start..end];
	if digits.is_empty() || digits == "-" {
		return Err(Error::BadInteger(state.line));
	}
	state.cursor = end;
	// Overflowing literals saturate, as the host's strtoll does.
	let value = match digits.parse::<i64>() {
		Ok(value) => value,
		Err(_) if digits.starts_with('-') => i64::MIN,
		Err(_) => i64::MAX,
	};
	Ok(Node::Integer(value))
}

/// Parse a bracketed list of nodes
fn parse_list(state: &mut ParseState) -> Result<Node, Error> {
	state.cursor += 1;
	let mut children = Vec::new();
	loop {
		skip_whitespace_and_comments(state);
		match current_byte(state) {
			Some(b']') => {
				state.cursor += 1;
				return Ok(Node::List(children));
			}
			Some(_) => {
				children.push(parse_node(state)?);
			}
			None => {
				return Err(Error::UnterminatedList(state.line));
			}
		}
	}
}

/// Parse a double-quoted string literal
///
/// The literal runs to the first `"` whose predecessor byte is not `\`.
/// Escape sequences are materialised afterwards, over the raw span.
fn parse_string_literal(state: &mut ParseState) -> Result<Node, Error> {
	state.cursor += 1;
	let start = state.cursor;
	let bytes = state.source.as_bytes();
	let mut offset = 0;
	while let Some(&byte) = bytes.get(start + offset) {
		if byte == b'"' && (offset == 0 || bytes[start + offset - 1] != b'\\') {
			break;
		}
		offset += 1;
	}
	if bytes.get(start + offset) != Some(&b'"') {
		return Err(Error::UnterminatedString(state.line));
	}
	let raw = &state.source[start..start + offset];
	state.cursor = start + offset + 1;
	Ok(Node::String(materialize_escapes(raw)))
}

/// Resolve backslash escapes in the raw span of a string literal
///
/// `\n \r \t \0 \" \\` map to their characters; any other `\x` is preserved
/// verbatim as both characters.
fn materialize_escapes(raw: &str) -> String {
	let mut string = String::with_capacity(raw.len());
	let mut characters = raw.chars();
	while let Some(character) = characters.next() {
		if character != '\\' {
			string.push(character);
			continue;
		}
		match characters.next() {
			Some('n') => string.push('\n'),
			Some('r') => string.push('\r'),
			Some('t') => string.push('\t'),
			Some('0') => string.push('\0'),
			Some('"') => string.push('"'),
			Some('\\') => string.push('\\'),
			Some(other) => {
				string.push('\\');
				string.push(other);
			}
			None => string.push('\\'),
		}
	}
	string
}

/// Consume a name token, up to the next whitespace or `]`
fn parse_name(state: &mut ParseState) -> Node {
	let start = state.cursor;
	let mut end = start;
	let bytes = state.source.as_bytes();
	while let Some(&byte) = bytes.get(end) {
		if is_space(byte) || byte == b']' {
			break;
		}
		end += 1;
	}
	state.cursor = end;
	Node::Name(state.source[start..end].into())
}

// //////////////////////////////////////////////////////////
// Tests                                                   //
// //////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
	use super::*;
	macro_rules! assert_oks {
		( $f:expr, $( $x:expr ),*, ) => { assert_oks![$f, $( $x ),*]; };
		( $f:expr, $( $x:expr ),* ) => { { $( assert![$f($x).is_ok()]; )* } };
	}
	macro_rules! assert_errs {
		( $f:expr, $( $x:expr ),*, ) => { assert_errs![$f, $( $x ),*]; };
		( $f:expr, $( $x:expr ),* ) => { { $( assert![$f($x).is_err()]; )* } };
	}

	fn first(source: &str) -> Node {
		match parse_string(source) {
			Ok(Node::Program(children)) => children.into_iter().next().unwrap(),
			other => panic!["expected a program but got {:?}", other],
		}
	}

	#[test]
	fn assert_expressions_ok() {
		assert_oks![
			parse_string,
			"",
			" ",
			"  ",
			"7",
			"-7",
			"name",
			"-name",
			".",
			",",
			"'",
			"a b c",
			"[]",
			"[ ]",
			"[test]",
			" [test]",
			"[test] ",
			" [test] ",
			"[test1 [test2]]",
			"[test1 [test2 test3 test4] test5] test6",
			"\"\"",
			"\"o\"",
			"\"say \\\"hi\\\"\"",
			"; only a comment",
			"; comment\n42",
			"[+ 1 ; comment inside\n 2]",
		];
	}

	#[test]
	fn assert_expressions_err() {
		assert_errs![
			parse_string,
			"[",
			"]",
			"[test",
			"test]",
			"[test1 [test2]",
			"[[[[[[[[]]]]]]]",
			"[[[[[[]]]]]]]",
			"\"",
			"\"no closing quote",
			"\"escaped at the end\\\"",
		];
	}

	#[test]
	fn integers() {
		assert_eq![first("42"), Node::Integer(42)];
		assert_eq![first("-42"), Node::Integer(-42)];
		assert_eq![first("0"), Node::Integer(0)];
	}

	#[test]
	fn integer_saturates_on_overflow() {
		assert_eq![first("99999999999999999999"), Node::Integer(i64::MAX)];
		assert_eq![first("-99999999999999999999"), Node::Integer(i64::MIN)];
	}

	#[test]
	fn printed_integers_reparse_to_the_same_node() {
		for value in [0i64, 7, -7, i64::MAX, i64::MIN] {
			let printed = format!["{}", Node::Integer(value)];
			assert_eq![first(&printed), Node::Integer(value)];
		}
	}

	#[test]
	fn integer_stops_at_the_first_non_digit() {
		assert_eq![
			parse_string("2x").unwrap(),
			Node::Program(vec![Node::Integer(2), Node::Name("x".into())])
		];
	}

	#[test]
	fn names() {
		assert_eq![first("car"), Node::Name("car".into())];
		assert_eq![first(":1"), Node::Name(":1".into())];
		assert_eq![first("-"), Node::Name("-".into())];
		assert_eq![first("--1"), Node::Name("--1".into())];
		assert_eq![first("a-b"), Node::Name("a-b".into())];
	}

	#[test]
	fn name_ends_at_closing_bracket() {
		assert_eq![
			first("[f a]"),
			Node::List(vec![Node::Name("f".into()), Node::Name("a".into())])
		];
	}

	#[test]
	fn lists() {
		assert_eq![first("[]"), Node::List(vec![])];
		assert_eq![
			first("[+ 1 [list]]"),
			Node::List(vec![
				Node::Name("+".into()),
				Node::Integer(1),
				Node::List(vec![Node::Name("list".into())]),
			])
		];
	}

	#[test]
	fn strings_and_escapes() {
		assert_eq![first("\"hello\""), Node::String("hello".into())];
		assert_eq![first("\"a\\nb\""), Node::String("a\nb".into())];
		assert_eq![first("\"a\\tb\\rc\""), Node::String("a\tb\rc".into())];
		assert_eq![first("\"nul\\0byte\""), Node::String("nul\0byte".into())];
		assert_eq![first("\"say \\\"hi\\\"\""), Node::String("say \"hi\"".into())];
		assert_eq![first("\"back\\\\slash\""), Node::String("back\\slash".into())];
	}

	#[test]
	fn unknown_escapes_are_preserved() {
		assert_eq![first("\"a\\qb\""), Node::String("a\\qb".into())];
	}

	#[test]
	fn comments_are_skipped() {
		assert_eq![
			parse_string("; leading\n1 ; trailing\n; another\n2").unwrap(),
			Node::Program(vec![Node::Integer(1), Node::Integer(2)])
		];
	}

	#[test]
	fn errors_carry_line_numbers() {
		assert_eq![
			parse_string("\n\n]"),
			Err(Error::UnexpectedCharacter {
				line: 3,
				character: ']',
			})
		];
		assert_eq![parse_string("[1 2\n"), Err(Error::UnterminatedList(2))];
		assert_eq![
			parse_string("\n\"open"),
			Err(Error::UnterminatedString(2))
		];
	}

	#[test]
	fn file_that_does_not_exist() {
		assert_eq![
			parse_file("no/such/file.nkl"),
			Err(Error::UnableToOpen("no/such/file.nkl".into()))
		];
	}
}
