use nickel::data_structures::Node;
use nickel::interpret::interpret;
use nickel::parse::parse_file;

#[test]
fn main() {
	integer("print-add.nkl", 5);
	integer("square.nkl", 49);
	integer("factorial.nkl", 120);
	integer("comments.nkl", 11);
	integer("redefine.nkl", 99);

	string("branch.nkl", "yes");
	string("format-items.nkl", "3 items\n");

	printed("append.nkl", "[ 1 2 3 4 ]");

	error("divide-by-zero.nkl");
	error("unknown-function.nkl");
	error("car-empty.nkl");
	error("argument-out-of-range.nkl");
	error("unterminated.nkl");
}

// //////////////////////////////////////////////////////////
// Utility functions
// //////////////////////////////////////////////////////////

fn file2result(filename: &str) -> Node {
	let program = parse_file(&(String::from("tests/") + filename))
		.ok()
		.unwrap();
	let env = interpret(program).ok().unwrap();
	env.get_result().clone()
}

fn integer(filename: &str, value: i64) {
	assert_eq![file2result(filename), Node::Integer(value)];
}

fn string(filename: &str, value: &str) {
	assert_eq![file2result(filename), Node::String(value.into())];
}

fn printed(filename: &str, value: &str) {
	assert_eq![format!["{}", file2result(filename)], value];
}

fn error(filename: &str) {
	let outcome = parse_file(&(String::from("tests/") + filename)).and_then(interpret);
	assert![outcome.is_err()];
}
