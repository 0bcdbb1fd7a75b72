use std::path::PathBuf;

use fern_core::{
    environment::prelude::Environment,
    eval::Evaluator,
    pipeline::run_source
};

use crate::cli::{print_error, read_line};

pub fn start() -> std::io::Result<()> {
    ctrlc::set_handler(|| {
        println!();
        std::process::exit(0);
    })
    .map_err(std::io::Error::other)?;

    let env = Environment::new();
    let evaluator = Evaluator::console();

    while let Some(input) = read_line()? {
        match input.as_str() {
            "" => {},
            ".exit" => return Ok(()),
            _ => match run_source(PathBuf::from("repl"), input, &env, &evaluator) {
                Ok(result) if result.is_null() => {},
                Ok(result) => println!("{result}"),
                Err(err) => print_error(&err)
            }
        }
    }

    Ok(())
}
