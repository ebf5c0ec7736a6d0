//! The `console` host object

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::HostObject;
use crate::Value;

const METHODS: &[&str] = &["log", "info", "debug", "warn", "error"];

/// Where console output goes.
#[derive(Debug, Clone)]
pub enum ConsoleOutput {
    /// Process stdout (`warn`/`error` go to stderr)
    Stdout,

    /// In-memory line buffer
    Buffer(Rc<RefCell<Vec<String>>>),
}

/// The `console` global.
///
/// Arguments are joined with a space. Strings print as-is; every other
/// value prints in its inspected form (`[1, 2]`, `{ a: 1 }`).
#[derive(Debug, Clone)]
pub struct Console {
    output: ConsoleOutput,
}

impl Console {
    /// A console writing to the process streams.
    pub fn stdout() -> Self {
        Self {
            output: ConsoleOutput::Stdout,
        }
    }

    /// A console capturing lines in memory.
    pub fn buffered() -> Self {
        Self {
            output: ConsoleOutput::Buffer(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    /// Shared handle to the captured lines (empty for stdout consoles).
    pub fn lines(&self) -> Rc<RefCell<Vec<String>>> {
        match &self.output {
            ConsoleOutput::Buffer(lines) => Rc::clone(lines),
            ConsoleOutput::Stdout => Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn write(&self, method: &str, line: String) {
        match &self.output {
            ConsoleOutput::Buffer(lines) => lines.borrow_mut().push(line),
            ConsoleOutput::Stdout => match method {
                "warn" | "error" => eprintln!("{}", line),
                _ => println!("{}", line),
            },
        }
    }
}

/// Render console arguments into one line.
pub fn render_line(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.to_string(),
            other => other.inspect(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl HostObject for Console {
    fn type_name(&self) -> &str {
        "console"
    }

    fn has_method(&self, name: &str) -> bool {
        METHODS.contains(&name)
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, String> {
        if !self.has_method(method) {
            return Err(format!("console.{} is not a function", method));
        }
        self.write(method, render_line(args));
        Ok(Value::Null)
    }
}
