//! The Nickel programming language implemented in Rust.
//!
//! This implementation provides parsing and evaluation utilities of the Nickel programming
//! language. Nickel is a tiny bracket-syntax LISP built as an instructional aid: a
//! recursive-descent parser turns source text into a tree of tagged nodes, and a tree-walking
//! evaluator interprets that tree with dynamic type checking, user-definable functions, and
//! positional argument binding through a call stack.
//!
//! The language deliberately stays small. There is no lexical scoping and there are no
//! closures; a function body refers to its arguments positionally (`:1`, `:2`, ...), and `:0`
//! names the function itself. Every value is a self-contained tree, so the interpreter clones
//! instead of sharing. This trades allocation for the complete absence of aliasing, which is
//! what lets a running function redefine itself without pulling the body out from under the
//! evaluator.
//!
//! Here is the iconic `hello world` in Nickel:
//!
//! ```text
//! [print "Hello world!"]
//! ```
//! No LISP is complete without the definition of the recursive factorial function.
//!
//! ```text
//! [define factorial [if [<= :1 1]
//!                       1
//!                       [* :1 [factorial [- :1 1]]]]]
//! [print [factorial 5]]
//! ```
//! Example: using this library to interpret Nickel:
//!
//! ```
//! let program = nickel::parse::parse_string("
//! [define factorial [if [<= :1 1]
//!                       1
//!                       [* :1 [factorial [- :1 1]]]]]
//! [factorial 5]").unwrap();
//! let env = nickel::interpret::interpret(program).unwrap();
//! match *env.get_result() {
//! 	nickel::data_structures::Node::Integer(value) => {
//! 		assert_eq![value, 120];
//! 	}
//! 	_ => {
//! 		panic!["Expected Integer but got a different data type"];
//! 	}
//! }
//! ```
//!
//! Note that the environment keeps the value of the last top-level expression in its result
//! register, which is how the example above gets at the result of `factorial`.

#[macro_use]
mod macros;

pub mod builtins;
pub mod data_structures;
pub mod interpret;
pub mod parse;
pub mod utilities;

const VEC_CAPACITY: usize = 10;
