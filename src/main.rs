//! Metamark CLI
//!
//! Usage:
//!   metamark [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --schema <FILE>  Key schema declaring allowed annotation keys (TOML)
//!   -k, --key <KEY>      Allow an extra annotation key (repeatable)
//!   -q, --quiet          Check only; do not list dispatched annotations
//!   -h, --help           Print help

use std::cell::RefCell;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;

use metamark::{KeySchema, RichTextBuilder, RichTextProcessor};

#[derive(Parser)]
#[command(name = "metamark")]
#[command(about = "Check rich-text templates with inline {@key payload} annotations")]
struct Cli {
    /// Input template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Key schema declaring allowed annotation keys (TOML format)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Allow an extra annotation key on top of the schema
    #[arg(short, long = "key")]
    keys: Vec<String>,

    /// Check only; do not list dispatched annotations
    #[arg(short, long)]
    quiet: bool,
}

/// Records every dispatch for one key into a shared log
struct LoggingProcessor {
    key: String,
    log: Rc<RefCell<Vec<(String, String)>>>,
}

impl RichTextProcessor for LoggingProcessor {
    fn key(&self) -> &str {
        &self.key
    }

    fn process(&mut self, payload: &str) {
        self.log
            .borrow_mut()
            .push((self.key.clone(), payload.to_string()));
    }
}

fn main() {
    let cli = Cli::parse();

    // If no input, no keys, and stdin is a terminal (interactive), show intro
    if cli.input.is_none() && cli.schema.is_none() && cli.keys.is_empty() && io::stdin().is_terminal()
    {
        print_intro();
        return;
    }

    // Load the key schema
    let mut schema = match &cli.schema {
        Some(path) => match KeySchema::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading schema '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => KeySchema::default(),
    };
    for key in &cli.keys {
        schema.add_key(key);
    }

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    // One logging processor per declared key, all feeding a shared log
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut builder = RichTextBuilder::new();
    for key in schema.keys() {
        let processor = LoggingProcessor {
            key: key.to_string(),
            log: Rc::clone(&log),
        };
        if let Err(e) = builder.register_processor(Box::new(processor)) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match builder.set_text(&source) {
        Ok(()) => {
            if !cli.quiet {
                for (key, payload) in log.borrow().iter() {
                    if payload.is_empty() {
                        println!("{}", key);
                    } else {
                        println!("{}\t{}", key, payload);
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Metamark - check rich-text templates with inline meta-annotations

USAGE:
    metamark [OPTIONS] [FILE]
    echo '<template>' | metamark --key link

An annotation looks like {{@key payload}}: the key names a registered
processor and the payload (optional, verbatim up to the closing brace)
is handed to it. Every key in the template must be declared, either in
a TOML schema file or with --key.

OPTIONS:
    -s, --schema <FILE>  Key schema declaring allowed keys (TOML)
    -k, --key <KEY>      Allow an extra key (repeatable)
    -q, --quiet          Check only; suppress the dispatch listing
    -h, --help           Print help

SCHEMA FORMAT:
    [metadata]
    name = "my-template-keys"

    [keys]
    link = "clickable hyperlink"
    bold = "bold text run"

QUICK START:
    echo 'Click {{@link settings}} to open.' | metamark --key link

This prints one line per dispatched annotation and exits non-zero on a
malformed or undeclared annotation."#
    );
}
