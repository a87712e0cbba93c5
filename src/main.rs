mod config;

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use config::Config;
use minish::words::split_words;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_filter);

    minish::prepare().context("failed to install signal policy")?;

    let mut editor = DefaultEditor::new()?;
    let mut result: i32 = 0;

    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                let words = split_words(&line);
                let Some(first) = words.first() else {
                    continue;
                };
                let _ = editor.add_history_entry(line.as_str());

                if first == "exit" {
                    result = words.get(1).and_then(|code| code.parse().ok()).unwrap_or(0);
                    break;
                }
                if !minish::process_arglist(&words) {
                    break;
                }
            }
            // Ctrl-C at the prompt only discards the line.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read input"),
        }
    }

    minish::finalize()?;
    std::process::exit(result & 255);
}

fn init_tracing(directives: &str) {
    let filter = directives.parse::<Targets>().unwrap_or_else(|err| {
        eprintln!("warning: invalid MINISH_LOG ({err}); falling back to warn");
        Targets::new().with_default(LevelFilter::WARN)
    });

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        eprintln!("warning: failed to initialize tracing.");
    }
}
