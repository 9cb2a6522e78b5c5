//! Stencil CLI
//!
//! Renders a template file to stdout.

use std::io::Write;

use rustc_hash::FxHashMap;
use stencil_eval::{execute, ExecutionSink, SinkError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        std::process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let path = &args[1];
    let mut parameters = FxHashMap::default();
    for arg in &args[2..] {
        let Some((name, value)) = arg.split_once('=') else {
            eprintln!("error: expected name=value, got '{arg}'");
            std::process::exit(1);
        };
        parameters.insert(name.to_string(), value.to_string());
    }

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read {path}: {e}");
            std::process::exit(1);
        }
    };

    let document = match stencil_parse::parse(&source) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("error: {path}: {e}");
            std::process::exit(1);
        }
    };

    let mut sink = StdoutSink::new(parameters);
    if let Err(e) = execute(&document, &mut sink) {
        eprintln!("error: {path}: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Stencil template engine");
    println!();
    println!("Usage: stencil <template> [name=value ...]");
    println!();
    println!("Arguments:");
    println!("  <template>     Template file to render");
    println!("  name=value     Request parameters visible to @paramGet");
    println!();
    println!("Examples:");
    println!("  stencil page.smscr");
    println!("  stencil zbrajanje.smscr a=4 b=2");
}

/// Sink that streams to stdout, with parameters held in memory.
struct StdoutSink {
    out: std::io::Stdout,
    parameters: FxHashMap<String, String>,
    persistent: FxHashMap<String, String>,
    temporary: FxHashMap<String, String>,
}

impl StdoutSink {
    fn new(parameters: FxHashMap<String, String>) -> Self {
        StdoutSink {
            out: std::io::stdout(),
            parameters,
            persistent: FxHashMap::default(),
            temporary: FxHashMap::default(),
        }
    }
}

impl ExecutionSink for StdoutSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.write_bytes(text.as_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.out.lock().write_all(bytes).map_err(SinkError::from)
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn persistent_parameter(&self, name: &str) -> Option<String> {
        self.persistent.get(name).cloned()
    }

    fn set_persistent_parameter(&mut self, name: &str, value: &str) {
        self.persistent.insert(name.to_string(), value.to_string());
    }

    fn remove_persistent_parameter(&mut self, name: &str) {
        self.persistent.remove(name);
    }

    fn temporary_parameter(&self, name: &str) -> Option<String> {
        self.temporary.get(name).cloned()
    }

    fn set_temporary_parameter(&mut self, name: &str, value: &str) {
        self.temporary.insert(name.to_string(), value.to_string());
    }

    fn remove_temporary_parameter(&mut self, name: &str) {
        self.temporary.remove(name);
    }

    fn set_mime_type(&mut self, mime_type: &str) {
        tracing::debug!(mime_type, "mime type set");
    }
}
