//! # Ruby → JS Compilation
//!
//! The playground runs user Ruby by compiling it to JavaScript with an
//! external compiler (Opal). Compilation must never take the page down: a
//! syntax error becomes a JS comment block, so the preview always gets
//! *some* script and the message is visible in the compiled pane.

use std::fmt;
use std::process::Command;
use std::time::Instant;

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compile error: {}", self.message)
    }
}

impl std::error::Error for CompileError {}

pub trait RubyCompiler {
    fn compile(&self, source: &str) -> Result<String, CompileError>;
}

impl<F> RubyCompiler for F
where
    F: Fn(&str) -> Result<String, CompileError>,
{
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        self(source)
    }
}

/// Runs an external compiler, passing the source as the last argument and
/// reading JavaScript from stdout.
#[derive(Debug, Clone)]
pub struct OpalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl OpalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for OpalCommand {
    fn default() -> Self {
        Self::new("opal", vec!["-c".to_string(), "-e".to_string()])
    }
}

impl RubyCompiler for OpalCommand {
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .output()
            .map_err(|e| CompileError::new(format!("failed to run {}: {e}", self.program)))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(CompileError::new(stderr.trim()))
        }
    }
}

/// Compiles `source`, turning any error into a comment block.
pub fn compile_js(compiler: &dyn RubyCompiler, source: &str) -> String {
    let start = Instant::now();
    let js = match compiler.compile(source) {
        Ok(js) => js,
        Err(e) => error_comment(&e.message),
    };
    debug!(
        "Compiled (or errored) in {}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    js
}

fn error_comment(message: &str) -> String {
    // A literal "*/" in the message would end the comment early.
    format!("/*\n{}\n*/\n", message.replace("*/", "* /"))
}

/// Remembers the last compiled source so unchanged Ruby isn't recompiled on
/// every render pass.
#[derive(Debug, Default)]
pub struct JsCache {
    source: Option<String>,
    output: String,
}

impl JsCache {
    pub fn get(&mut self, compiler: &dyn RubyCompiler, source: &str) -> &str {
        if self.source.as_deref() != Some(source) {
            self.output = compile_js(compiler, source);
            self.source = Some(source.to_string());
        }
        &self.output
    }
}
