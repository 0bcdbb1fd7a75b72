use std::sync::{Arc, RwLock};

/// Sink for program output produced by native functions.
pub trait OutputIO {
    fn write_line(&self, line: &str);

    /// Asks the host to stop the process with `code`.
    fn halt(&self, code: i32);
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput;

impl OutputIO for ConsoleOutput {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }

    fn halt(&self, code: i32) {
        tracing::debug!(code, "halting on request");
        std::process::exit(code);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NullOutput;

impl OutputIO for NullOutput {
    fn write_line(&self, _line: &str) {}

    fn halt(&self, _code: i32) {}
}

/// Records everything written, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct VectorOutput {
    pub lines: Arc<RwLock<Vec<String>>>,
    pub halted: Arc<RwLock<Option<i32>>>,
}

impl VectorOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        let mut lines = self.lines.write().expect("Vector lock poisoned");
        std::mem::take(&mut *lines)
    }

    pub fn halted(&self) -> Option<i32> {
        *self.halted.read().expect("Halt lock poisoned")
    }
}

impl OutputIO for VectorOutput {
    fn write_line(&self, line: &str) {
        let mut lines = self.lines.write().expect("Vector lock poisoned");

        lines.push(line.to_string());
    }

    fn halt(&self, code: i32) {
        let mut halted = self.halted.write().expect("Halt lock poisoned");

        *halted = Some(code);
    }
}
