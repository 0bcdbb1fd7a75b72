use std::path::PathBuf;

use fern_core::{parser::prelude::parse_program, utils::prelude::Error};

use crate::cli::{print_error, read_line};

pub fn start() -> std::io::Result<()> {
	while let Some(input) = read_line()? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let parsed = parse_program(&input);

				if parsed.has_errors() {
					print_error(&Error::Parse {
						path: PathBuf::from("rppl"),
						src: input,
						errors: parsed.errors
					});
				} else {
					println!("{}", parsed.program);
				}
			}
		}
	}

	Ok(())
}
