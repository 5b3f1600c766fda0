//! Data structures used by the Nickel library

use std::collections::HashMap;

use thiserror::Error;

/// The universal tagged value of the interpreter
///
/// Every parsed or evaluated entity is a `Node`. A node owns its payload
/// outright, so `clone` is a deep copy and dropping a node frees the entire
/// subtree. The evaluator relies on this: whenever it plucks a node out of
/// the parse tree, the function table, or the argument stack, it clones the
/// node before handing it to a caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
	/// Sentinel meaning "no node produced"; never observable to programs
	Invalid,
	/// The root produced by the parser; an ordered sequence of expressions
	Program(Vec<Node>),
	/// The sole compound value, also the syntactic form for applications
	List(Vec<Node>),
	/// Signed 64-bit integers; booleans use 0 and non-0
	Integer(i64),
	/// Byte strings, escape-processed at parse time
	String(String),
	/// An identifier, or a positional argument reference when it starts with `:`
	Name(String),
}

/// Kind discriminant of a `Node`, used by the dynamic type checker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
	Invalid,
	Program,
	List,
	Integer,
	String,
	Name,
	/// Matches every kind in a builtin's argument contract
	Any,
}

impl Node {
	pub fn kind(&self) -> Kind {
		match *self {
			Node::Invalid => Kind::Invalid,
			Node::Program(..) => Kind::Program,
			Node::List(..) => Kind::List,
			Node::Integer(..) => Kind::Integer,
			Node::String(..) => Kind::String,
			Node::Name(..) => Kind::Name,
		}
	}
}

/// A program is an ordered sequence of `Node`
pub type Program = Vec<Node>;

/// Denotes a builtin "transfer function" mapping evaluated nodes to a result
///
/// Element 0 of the slice is the evaluated function-name node; elements 1..
/// are the evaluated arguments in order.
pub type Transfer = fn(evaluated: &[Node]) -> Result<Node, Error>;

/// Environment used by the implementation
pub struct Env {
	/// Builtin functions, looked up before user definitions
	pub builtins: HashMap<&'static str, Transfer>,
	/// Maps user function names to their body expressions
	pub functions: HashMap<String, Program>,
	/// Stack of evaluated-argument frames for active user function calls
	///
	/// Element 0 of each frame is the function-name node itself; element i
	/// (i >= 1) is the i-th argument. A frame is pushed on entry to a user
	/// function application and popped on exit.
	pub args: Vec<Vec<Node>>,
	/// Register holding the result of the last top-level computation
	pub result: Node,
}

impl Env {
	pub fn set_result(&mut self, value: Node) {
		self.result = value;
	}
	pub fn get_result(&self) -> &Node {
		&self.result
	}
}

/// State used by the parser internally
pub struct ParseState<'a> {
	/// The entire source text being read
	pub source: &'a str,
	/// Byte offset of the next unread byte
	pub cursor: usize,
	/// Current line number, starts at 1
	pub line: usize,
}

impl<'a> ParseState<'a> {
	pub fn from(source: &'a str) -> ParseState<'a> {
		ParseState {
			source,
			cursor: 0,
			line: 1,
		}
	}
}

/// Any error the interpreter can produce
///
/// Every error is fatal: the library propagates it outward with `?` and the
/// binary prints the single diagnostic line and exits. Syntax errors carry
/// the line on which they were detected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
	#[error("unable to open '{0}'")]
	UnableToOpen(String),
	#[error("line {0}: bad integer")]
	BadInteger(usize),
	#[error("line {0}: expected closing ']'")]
	UnterminatedList(usize),
	#[error("line {0}: expected closing '\"'")]
	UnterminatedString(usize),
	#[error("line {line}: unexpected character '{character}'")]
	UnexpectedCharacter { line: usize, character: char },
	#[error("encountered an invalid node")]
	InvalidNode,
	#[error("no function to apply in empty list\n  did you mean to create an empty list? [list]")]
	EmptyApplication,
	#[error("expected function name as first element in list-function application")]
	NotAFunctionName,
	#[error("in application of function '{name}': expected {expected} arguments, but got {actual}")]
	Arity {
		name: String,
		expected: usize,
		actual: usize,
	},
	#[error("in application of function '{name}': incorrect type (argument {argument})")]
	IncorrectKind { name: String, argument: usize },
	#[error("in application of function '{name}': division by zero")]
	DivisionByZero { name: String },
	#[error("if expects a condition and at least a true expression")]
	IfArity,
	#[error("if condition must evaluate to an integer")]
	IfCondition,
	#[error("define expects a name and at least one expression")]
	DefineArity,
	#[error("define expects a name as its first argument")]
	DefineName,
	#[error("argument references are only valid within a function")]
	ArgumentOutsideFunction,
	#[error("unable to parse argument index from '{0}'")]
	BadArgumentIndex(String),
	#[error("argument reference invalid ({0})")]
	ArgumentReferenceInvalid(i64),
	#[error("car expects a non-empty list")]
	CarOfEmptyList,
	#[error("{0} expects at least one argument")]
	FormatArity(String),
	#[error("first argument to {0} must be a string")]
	FormatNotString(String),
	#[error("format missing argument")]
	FormatMissingArgument,
	#[error("unknown function '{0}'")]
	UnknownFunction(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deep_copy() {
		let node = Node::List(vec![
			Node::Integer(1),
			Node::List(vec![Node::Name("x".into())]),
			Node::String("y".into()),
		]);
		let copy = node.clone();
		drop(node);
		assert_eq![
			copy,
			Node::List(vec![
				Node::Integer(1),
				Node::List(vec![Node::Name("x".into())]),
				Node::String("y".into()),
			])
		];
	}

	#[test]
	fn test_kind() {
		assert_eq![Node::Integer(0).kind(), Kind::Integer];
		assert_eq![Node::List(vec![]).kind(), Kind::List];
		assert_eq![Node::Name(":1".into()).kind(), Kind::Name];
		assert![Node::String("".into()).kind() != Kind::Name];
	}

	#[test]
	fn test_error_messages() {
		assert_eq![format!["{}", Error::BadInteger(3)], "line 3: bad integer"];
		assert_eq![
			format![
				"{}",
				Error::Arity {
					name: "+".into(),
					expected: 2,
					actual: 1,
				}
			],
			"in application of function '+': expected 2 arguments, but got 1"
		];
		assert_eq![
			format!["{}", Error::UnknownFunction("foo".into())],
			"unknown function 'foo'"
		];
	}
}
