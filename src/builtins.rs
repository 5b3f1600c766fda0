//! Builtins for Nickel
//!
//! Builtins are the functions available to every program without any
//! `define`. Each builtin is a transfer function of the form
//! `fn(evaluated: &[Node]) -> Result<Node, Error>`, where element 0 of the
//! slice is the evaluated function-name node and the remaining elements are
//! the evaluated arguments in order.
//!
//! A builtin validates its own argument contract through `check` before
//! touching the payloads, and returns a freshly owned node. To add a builtin
//! you write the transfer function here and list it in
//! `create_builtin_function_table`.

// //////////////////////////////////////////////////////////
// std imports
// //////////////////////////////////////////////////////////
use std::collections::HashMap;

// //////////////////////////////////////////////////////////
// Internal data structures used by Nickel
// //////////////////////////////////////////////////////////
use crate::data_structures::{Error, Kind, Node, Transfer};

// //////////////////////////////////////////////////////////
// External libraries
// //////////////////////////////////////////////////////////
use rand::Rng;

// //////////////////////////////////////////////////////////
// Builtin Function Table
// //////////////////////////////////////////////////////////

/// Create the builtin function table.
///
/// The table maps every builtin name to its transfer function. The
/// evaluator consults this table after special forms and before the
/// user-defined function table, so a `define` can never shadow a builtin.
pub fn create_builtin_function_table() -> HashMap<&'static str, Transfer> {
	construct_builtins! {
		// Numerics
		"+" => plus,
		"-" => subtract,
		"*" => multiply,
		"/" => divide,
		"%" => modulo,
		"==" => equal,
		"!=" => not_equal,
		"<" => less_than,
		"<=" => less_than_or_equal,
		">" => greater_than,
		">=" => greater_than_or_equal,
		// Lists
		"list" => list,
		"len" => list_length,
		"append" => append,
		"car" => car,
		"cdr" => cdr,
		// Miscellaneous
		"rand" => random,
		"print" => print,
		"fmt" => fmt,
		"pfmt" => pfmt,
	}
}

// //////////////////////////////////////////////////////////
// Argument contract checking
// //////////////////////////////////////////////////////////

/// Name of the function being applied, for diagnostics
fn application_name(evaluated: &[Node]) -> &str {
	if let Some(&Node::Name(ref name)) = evaluated.first() {
		name
	} else {
		""
	}
}

/// Check the application of a builtin against its contract.
///
/// `arity` is the exact number of expected arguments and `kinds` the
/// expected kind of each, with `Kind::Any` accepting every kind. For
/// example `+` expects two integers and is checked with
/// `check(evaluated, 2, &[Kind::Integer, Kind::Integer])`.
fn check(evaluated: &[Node], arity: usize, kinds: &[Kind]) -> Result<(), Error> {
	let count = evaluated.len() - 1;
	if count != arity {
		return Err(Error::Arity {
			name: application_name(evaluated).into(),
			expected: arity,
			actual: count,
		});
	}
	for (index, kind) in kinds.iter().enumerate() {
		if *kind != Kind::Any && evaluated[index + 1].kind() != *kind {
			return Err(Error::IncorrectKind {
				name: application_name(evaluated).into(),
				argument: index + 1,
			});
		}
	}
	Ok(())
}

// //////////////////////////////////////////////////////////
// Numerics
// //////////////////////////////////////////////////////////

arithmetic_builtin![plus, wrapping_add];
arithmetic_builtin![subtract, wrapping_sub];
arithmetic_builtin![multiply, wrapping_mul];

comparison_builtin![equal, ==];
comparison_builtin![not_equal, !=];
comparison_builtin![less_than, <];
comparison_builtin![less_than_or_equal, <=];
comparison_builtin![greater_than, >];
comparison_builtin![greater_than_or_equal, >=];

/// Integer division, reporting a zero divisor
fn divide(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 2, &[Kind::Integer, Kind::Integer])?;
	match (&evaluated[1], &evaluated[2]) {
		(&Node::Integer(_), &Node::Integer(0)) => Err(Error::DivisionByZero {
			name: application_name(evaluated).into(),
		}),
		(&Node::Integer(lhs), &Node::Integer(rhs)) => Ok(Node::Integer(lhs.wrapping_div(rhs))),
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

/// Integer remainder, reporting a zero divisor
fn modulo(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 2, &[Kind::Integer, Kind::Integer])?;
	match (&evaluated[1], &evaluated[2]) {
		(&Node::Integer(_), &Node::Integer(0)) => Err(Error::DivisionByZero {
			name: application_name(evaluated).into(),
		}),
		(&Node::Integer(lhs), &Node::Integer(rhs)) => Ok(Node::Integer(lhs.wrapping_rem(rhs))),
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

// //////////////////////////////////////////////////////////
// Lists
// //////////////////////////////////////////////////////////

/// Build a fresh list from the evaluated arguments
fn list(evaluated: &[Node]) -> Result<Node, Error> {
	Ok(Node::List(evaluated[1..].to_vec()))
}

/// Number of children in a list
fn list_length(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 1, &[Kind::List])?;
	match evaluated[1] {
		Node::List(ref children) => Ok(Node::Integer(children.len() as i64)),
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

/// Concatenate two lists into a fresh list
fn append(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 2, &[Kind::List, Kind::List])?;
	match (&evaluated[1], &evaluated[2]) {
		(&Node::List(ref former), &Node::List(ref latter)) => {
			let mut children = former.clone();
			children.extend(latter.iter().cloned());
			Ok(Node::List(children))
		}
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

/// First child of a non-empty list
fn car(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 1, &[Kind::List])?;
	match evaluated[1] {
		Node::List(ref children) => match children.first() {
			Some(head) => Ok(head.clone()),
			None => Err(Error::CarOfEmptyList),
		},
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

/// All-but-the-first children as a fresh list; empty input yields empty
fn cdr(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 1, &[Kind::List])?;
	match evaluated[1] {
		Node::List(ref children) => {
			let rest = children.iter().skip(1).cloned().collect();
			Ok(Node::List(rest))
		}
		_ => Err(Error::IncorrectKind {
			name: application_name(evaluated).into(),
			argument: 1,
		}),
	}
}

// //////////////////////////////////////////////////////////
// Miscellaneous
// //////////////////////////////////////////////////////////

/// A pseudo-random non-negative integer
fn random(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 0, &[])?;
	let mut rng = rand::thread_rng();
	Ok(Node::Integer(rng.gen_range(0..i64::MAX)))
}

/// Print the argument with a trailing newline; returns a copy of it
fn print(evaluated: &[Node]) -> Result<Node, Error> {
	check(evaluated, 1, &[Kind::Any])?;
	println!["{}", evaluated[1]];
	Ok(evaluated[1].clone())
}

/// Expand a format string against the remaining arguments
fn fmt(evaluated: &[Node]) -> Result<Node, Error> {
	Ok(Node::String(do_fmt(evaluated)?))
}

/// Like `fmt`, but also writes the expansion to standard output
fn pfmt(evaluated: &[Node]) -> Result<Node, Error> {
	let formatted = do_fmt(evaluated)?;
	print!["{}", formatted];
	Ok(Node::String(formatted))
}

// //////////////////////////////////////////////////////////
// Format engine
// //////////////////////////////////////////////////////////

/// Expand the format string in `evaluated[1]` against `evaluated[2..]`.
///
/// An unescaped `{` opens a directive running to the next `}`; `\{` emits a
/// literal brace (the backslash already copied to the output is removed). A
/// directive containing `*` consumes an extra integer argument as its
/// width. An unterminated directive discards the rest of the format. Every
/// other character is copied verbatim.
fn do_fmt(evaluated: &[Node]) -> Result<String, Error> {
	let name = application_name(evaluated);
	let format = match evaluated.get(1) {
		Some(&Node::String(ref format)) => format,
		Some(_) => return Err(Error::FormatNotString(name.into())),
		None => return Err(Error::FormatArity(name.into())),
	};

	let mut output = String::with_capacity(format.len());
	let mut characters = format.chars();
	let mut node_index = 2;
	let mut last = '\0';
	while let Some(character) = characters.next() {
		if character != '{' {
			output.push(character);
			last = character;
			continue;
		}
		if last == '\\' {
			output.pop();
			output.push('{');
			last = '{';
			continue;
		}

		let mut body = String::new();
		let mut terminated = false;
		for inner in characters.by_ref() {
			if inner == '}' {
				terminated = true;
				break;
			}
			body.push(inner);
		}
		if !terminated {
			// An unterminated directive discards the rest of the format.
			break;
		}

		let variable_width = body.contains('*');
		let last_needed = node_index + variable_width as usize;
		if evaluated.len() <= last_needed {
			return Err(Error::FormatMissingArgument);
		}
		let width_argument = if variable_width {
			let width = integer_payload(&evaluated[node_index]);
			node_index += 1;
			Some(width)
		} else {
			None
		};
		let argument = &evaluated[node_index];
		node_index += 1;

		output.push_str(&expand_directive(&body, width_argument, argument));
		last = '}';
	}
	Ok(output)
}

/// Integer payload of a node; any other kind counts as 0
fn integer_payload(node: &Node) -> i64 {
	if let Node::Integer(value) = *node {
		value
	} else {
		0
	}
}

/// Expand one directive body against its argument.
///
/// The body is read as a printf-style directive: optional `-` and `0`
/// flags, an optional decimal width (overridden by a `*` width argument,
/// where a negative width means left alignment), and a final conversion
/// character. A body that does not end in an alphabetic character is
/// treated as string-valued: the argument is rendered with the node
/// printer. Conversions `d` and `x` use an integer argument's payload and
/// `s` a string argument's payload; a mismatched kind falls back to the
/// node printer.
fn expand_directive(body: &str, width_argument: Option<i64>, argument: &Node) -> String {
	let mut characters = body.chars().peekable();
	let mut left_align = false;
	let mut zero_pad = false;
	while let Some(&character) = characters.peek() {
		match character {
			'-' => left_align = true,
			'0' => zero_pad = true,
			'+' | ' ' | '#' => {}
			_ => break,
		}
		characters.next();
	}
	let mut width = 0;
	while let Some(digit) = characters.peek().and_then(|character| character.to_digit(10)) {
		width = width * 10 + digit as usize;
		characters.next();
	}
	if let Some(width_argument) = width_argument {
		if width_argument < 0 {
			left_align = true;
			width = width_argument.unsigned_abs() as usize;
		} else {
			width = width_argument as usize;
		}
	}

	let conversion = match body.chars().last() {
		Some(character) if character.is_ascii_alphabetic() => Some(character),
		_ => None,
	};
	let text = match (conversion, argument) {
		(Some('d'), &Node::Integer(value)) => value.to_string(),
		(Some('x'), &Node::Integer(value)) => format!["{:x}", value],
		(Some('s'), &Node::String(ref value)) => value.clone(),
		_ => argument.to_string(),
	};

	if text.len() >= width {
		return text;
	}
	let padding = width - text.len();
	let mut padded = String::with_capacity(width);
	if left_align {
		padded.push_str(&text);
		padded.extend(std::iter::repeat(' ').take(padding));
	} else if zero_pad && matches![conversion, Some('d') | Some('x')] {
		// Sign-aware zero padding, as printf does it.
		if let Some(rest) = text.strip_prefix('-') {
			padded.push('-');
			padded.extend(std::iter::repeat('0').take(padding));
			padded.push_str(rest);
		} else {
			padded.extend(std::iter::repeat('0').take(padding));
			padded.push_str(&text);
		}
	} else {
		padded.extend(std::iter::repeat(' ').take(padding));
		padded.push_str(&text);
	}
	padded
}
