/// Macro to construct the builtin function table
macro_rules! construct_builtins {
	($($name:expr => $transfer:ident),*,) => {
		{
			let table: HashMap<&'static str, Transfer> = [
				$(($name, $transfer as Transfer)),*
			].iter().cloned().collect();
			table
		}
	};
}

/// Stamp out a two-integer arithmetic builtin from a wrapping method
macro_rules! arithmetic_builtin {
	($i:ident, $method:ident) => {
		fn $i(evaluated: &[Node]) -> Result<Node, Error> {
			check(evaluated, 2, &[Kind::Integer, Kind::Integer])?;
			match (&evaluated[1], &evaluated[2]) {
				(&Node::Integer(lhs), &Node::Integer(rhs)) => {
					Ok(Node::Integer(lhs.$method(rhs)))
				}
				_ => Err(Error::IncorrectKind {
					name: application_name(evaluated).into(),
					argument: 1,
				}),
			}
		}
	};
}

/// Stamp out a two-integer comparison builtin returning 1 or 0
macro_rules! comparison_builtin {
	($i:ident, $op:tt) => {
		fn $i(evaluated: &[Node]) -> Result<Node, Error> {
			check(evaluated, 2, &[Kind::Integer, Kind::Integer])?;
			match (&evaluated[1], &evaluated[2]) {
				(&Node::Integer(lhs), &Node::Integer(rhs)) => {
					Ok(Node::Integer((lhs $op rhs) as i64))
				}
				_ => Err(Error::IncorrectKind {
					name: application_name(evaluated).into(),
					argument: 1,
				}),
			}
		}
	};
}
