//! Utilities used by the implementation.

use std::fmt;

use crate::data_structures::Node;

// //////////////////////////////////////////////////////////
// Impls
// //////////////////////////////////////////////////////////

/// Display for Node.
///
/// This is the printer used by `print` and by the format engine's
/// stringification rule. Programs render one child per line; lists render
/// space-delimited inside brackets; integers render in decimal; strings
/// render as their raw bytes; names render as `<name NAME>` so that an
/// evaluated name is recognisable in output even though the printed form is
/// not source syntax.
impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Node::Invalid => Ok(()),
			Node::Program(ref children) => {
				for child in children {
					writeln![f, "{}", child]?;
				}
				Ok(())
			}
			Node::List(ref children) => {
				write![f, "[ "]?;
				for child in children {
					write![f, "{} ", child]?;
				}
				write![f, "]"]
			}
			Node::Integer(value) => write![f, "{}", value],
			Node::String(ref string) => write![f, "{}", string],
			Node::Name(ref name) => write![f, "<name {}>", name],
		}
	}
}
