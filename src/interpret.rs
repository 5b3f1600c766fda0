//! Evaluation of Nickel programs.
//!
//! ```
//! let program = nickel::parse::parse_string("[+ 1 2] [* 3 4]").unwrap();
//! let env = nickel::interpret::interpret(program).unwrap();
//! assert_eq![*env.get_result(), nickel::data_structures::Node::Integer(12)];
//! ```
use std::collections::HashMap;

use crate::builtins::create_builtin_function_table;
use crate::data_structures::{Env, Error, Node, Program};
use crate::VEC_CAPACITY;

/// Evaluate a node in a given environment, producing a freshly owned node.
///
/// Lists are applications; integers and strings evaluate to copies of
/// themselves; a name starting with `:` resolves a positional argument
/// against the top argument-stack frame, and any other name evaluates to a
/// copy of itself so that names can be passed around as values.
///
/// A program node evaluates each of its children in order and yields
/// `Node::Invalid`; the value of the last child is left in the environment's
/// result register for embedders to inspect.
///
/// ```
/// let program = nickel::parse::parse_string("[len [list 1 2 3]]").unwrap();
/// let mut env = nickel::interpret::initialize_environment_with_builtins();
/// nickel::interpret::eval(&program, &mut env).unwrap();
/// assert_eq![*env.get_result(), nickel::data_structures::Node::Integer(3)];
/// ```
pub fn eval(node: &Node, env: &mut Env) -> Result<Node, Error> {
	match *node {
		Node::Invalid => Err(Error::InvalidNode),
		Node::Program(ref children) => {
			for child in children {
				let value = eval(child, env)?;
				env.set_result(value);
			}
			Ok(Node::Invalid)
		}
		Node::List(ref children) => apply(children, env),
		Node::Integer(..) | Node::String(..) => Ok(node.clone()),
		Node::Name(ref name) => {
			if name.starts_with(':') {
				resolve_argument_reference(name, env)
			} else {
				Ok(node.clone())
			}
		}
	}
}

/// Initializes an environment with the builtin function table.
///
/// ```
/// let _: nickel::data_structures::Env =
/// 	nickel::interpret::initialize_environment_with_builtins();
/// ```
pub fn initialize_environment_with_builtins() -> Env {
	Env {
		builtins: create_builtin_function_table(),
		functions: HashMap::new(),
		args: Vec::with_capacity(VEC_CAPACITY),
		result: Node::Invalid,
	}
}

/// Sets up a standard environment and evaluates the program.
///
/// The returned environment carries the value of the last top-level
/// expression in its result register.
///
/// ```
/// let program = nickel::parse::parse_string("
/// [define factorial [if [<= :1 1] 1 [* :1 [factorial [- :1 1]]]]]
/// [factorial 5]").unwrap();
/// let env = nickel::interpret::interpret(program).unwrap();
/// assert_eq![*env.get_result(), nickel::data_structures::Node::Integer(120)];
/// ```
pub fn interpret(program: Node) -> Result<Env, Error> {
	let mut env = initialize_environment_with_builtins();
	eval(&program, &mut env)?;
	Ok(env)
}

// //////////////////////////////////////////////////////////
// Internal                                                //
// //////////////////////////////////////////////////////////

/// Apply a function to arguments.
///
/// The head of the list is evaluated first and must be a name. Special
/// forms receive the unevaluated children; everything else gets its
/// arguments evaluated strictly, left to right, before dispatch to the
/// builtin table, then the user function table.
fn apply(children: &[Node], env: &mut Env) -> Result<Node, Error> {
	let first = match children.first() {
		Some(first) => eval(first, env)?,
		None => return Err(Error::EmptyApplication),
	};
	let name = match first {
		Node::Name(ref name) => name.clone(),
		_ => return Err(Error::NotAFunctionName),
	};

	// Special forms are dispatched before argument evaluation.
	if name == "if" {
		return interpret_if(children, env);
	} else if name == "define" {
		return interpret_define(children, env);
	}

	let mut evaluated = Vec::with_capacity(children.len());
	evaluated.push(first);
	for child in &children[1..] {
		evaluated.push(eval(child, env)?);
	}

	if let Some(&transfer) = env.builtins.get(name.as_str()) {
		return transfer(&evaluated);
	}

	// The body is deep-copied so that a function redefining itself cannot
	// tear out the expressions we are still walking.
	let body: Program = match env.functions.get(&name) {
		Some(body) => body.clone(),
		None => return Err(Error::UnknownFunction(name)),
	};
	env.args.push(evaluated);
	let mut result = Ok(Node::Integer(0));
	for expression in &body {
		result = eval(expression, env);
		if result.is_err() {
			break;
		}
	}
	env.args.pop();
	result
}

/// Interpret the `if` special form.
///
/// Only the selected branch is evaluated, unlike normal application in
/// which all argument expressions are evaluated first. A missing else
/// branch yields integer 0.
fn interpret_if(children: &[Node], env: &mut Env) -> Result<Node, Error> {
	if children.len() < 3 {
		return Err(Error::IfArity);
	}
	let condition = match eval(&children[1], env)? {
		Node::Integer(value) => value,
		_ => return Err(Error::IfCondition),
	};
	if condition != 0 {
		eval(&children[2], env)
	} else if children.len() >= 4 {
		eval(&children[3], env)
	} else {
		Ok(Node::Integer(0))
	}
}

/// Interpret the `define` special form.
///
/// Installs deep copies of the body expressions under the given name,
/// replacing any previous definition, and returns the name node as a value.
fn interpret_define(children: &[Node], env: &mut Env) -> Result<Node, Error> {
	if children.len() < 3 {
		return Err(Error::DefineArity);
	}
	let name = match children[1] {
		Node::Name(ref name) => name.clone(),
		_ => return Err(Error::DefineName),
	};
	env.functions.insert(name, children[2..].to_vec());
	Ok(children[1].clone())
}

/// Resolve a `:N` name against the top argument-stack frame.
///
/// Index 0 is the function-name node itself; index i (i >= 1) the i-th
/// argument. Negative indices and indices beyond the frame are rejected.
fn resolve_argument_reference(name: &str, env: &Env) -> Result<Node, Error> {
	let frame = match env.args.last() {
		Some(frame) => frame,
		None => return Err(Error::ArgumentOutsideFunction),
	};
	let index = match name[1..].parse::<i64>() {
		Ok(index) => index,
		Err(_) => return Err(Error::BadArgumentIndex(name.into())),
	};
	if index < 0 || index as usize >= frame.len() {
		return Err(Error::ArgumentReferenceInvalid(index));
	}
	Ok(frame[index as usize].clone())
}
