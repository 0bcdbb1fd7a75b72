
use std::path::{Path, PathBuf};

use crate::{
    environment::prelude::{Env, Object},
    eval::Evaluator,
    lexer::prelude::tokenize,
    parser::prelude::{Parser, Program},
    utils::prelude::Error
};

pub fn read_source(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|err| Error::StdIo {
        path: path.to_path_buf(),
        err: err.kind()
    })
}

/// Tokenizes and parses `src`, refusing to continue past either stage
/// when it reported errors.
pub fn check(path: PathBuf, src: String) -> Result<Program, Error> {
    let lexed = tokenize(&src);

    tracing::debug!(tokens = lexed.tokens.len(), has_error = lexed.has_error, "tokenized");

    if lexed.has_error {
        let errors = lexed.errors();
        return Err(Error::Lex { path, src, errors });
    }

    let parsed = Parser::new(lexed.tokens.into_iter()).parse();

    if parsed.has_errors() {
        return Err(Error::Parse { path, src, errors: parsed.errors });
    }

    Ok(parsed.program)
}

pub fn run_source(
    path: PathBuf,
    src: String,
    env: &Env,
    evaluator: &Evaluator
) -> Result<Object, Error> {
    let program = check(path, src)?;

    let result = evaluator.eval_program(&program, env);

    tracing::debug!(kind = %result.kind(), "evaluated");

    Ok(result)
}

pub fn run_file(path: PathBuf, env: &Env, evaluator: &Evaluator) -> Result<Object, Error> {
    let src = read_source(&path)?;

    run_source(path, src, env, evaluator)
}
