use fern_core::lexer::prelude::tokenize;

use crate::cli::read_line;

pub fn start() -> std::io::Result<()> {
	while let Some(input) = read_line()? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let lexed = tokenize(&input);

				for token in &lexed.tokens {
					println!("{token}");
				}

				if lexed.has_error {
					println!("Lexical Error: input contains unrecognized bytes");
				}
			}
		}
	}

	Ok(())
}
