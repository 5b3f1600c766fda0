use std::{env, process};

use nickel::data_structures::Error;
use nickel::interpret::interpret;
use nickel::parse::parse_file;

fn run(path: &str) -> Result<(), Error> {
	let program = parse_file(path)?;
	interpret(program)?;
	Ok(())
}

fn main() {
	let mut arguments = env::args();
	let binary = arguments.next().unwrap_or_else(|| "nickel".into());
	let path = match (arguments.next(), arguments.next()) {
		(Some(path), None) => path,
		_ => {
			println!["Nickel: error: USAGE: {} FILE", binary];
			process::exit(1);
		}
	};
	if let Err(error) = run(&path) {
		println!["Nickel: error: {}", error];
		process::exit(1);
	}
}
