use crate::{
    environment::prelude::{Builtin, Object, NULL},
    utils::prelude::OutputIO
};

pub static BUILTINS: [Builtin; 5] = [
    Builtin { name: "len", func: len },
    Builtin { name: "print", func: print },
    Builtin { name: "read", func: read },
    Builtin { name: "write", func: write },
    Builtin { name: "panic", func: panic },
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter()
        .find(|builtin| builtin.name == name)
        .copied()
}

pub fn wrong_arguments(expected: usize, got: usize) -> Object {
    Object::error(format!("wrong number of arguments: expected {expected}, got {got}"))
}

fn join(args: &[Object]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn len(_output: &dyn OutputIO, args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arguments(1, args.len());
    }

    match &args[0] {
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        Object::String(value) => Object::Integer(value.len() as i64),
        _ => Object::Integer(0)
    }
}

fn print(output: &dyn OutputIO, args: Vec<Object>) -> Object {
    output.write_line(&join(&args));

    NULL
}

fn read(_output: &dyn OutputIO, args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arguments(1, args.len());
    }

    let path = match &args[0] {
        Object::String(path) => path,
        _ => return Object::error("filename must be a string")
    };

    match std::fs::read_to_string(path) {
        Ok(contents) => Object::String(contents),
        Err(err) => Object::error(format!("could not open file: {err}"))
    }
}

fn write(_output: &dyn OutputIO, args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arguments(2, args.len());
    }

    let (path, data) = match (&args[0], &args[1]) {
        (Object::String(path), Object::String(data)) => (path, data),
        (Object::String(_), _) => return Object::error("data must be a string"),
        _ => return Object::error("filename must be a string")
    };

    match std::fs::write(path, data) {
        Ok(()) => NULL,
        Err(err) => Object::error(format!("could not write to file: {err}"))
    }
}

fn panic(output: &dyn OutputIO, args: Vec<Object>) -> Object {
    let message = join(&args);

    output.write_line(&message);
    output.halt(1);

    Object::error(format!("panic: {message}"))
}
