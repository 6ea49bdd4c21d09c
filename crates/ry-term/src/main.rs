//! # ry
//!
//! A small modal text editor for the terminal.
//!
//! Each file named on the command line is opened in its own buffer, or a scratch buffer is
//! created if there are none. Keys are dispatched through the modes set up by [bindings] and the
//! configuration file, and the editor is redrawn after every key. Control-q quits.
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{poll, read, Event};

use ry::buffer::Buffer;
use ry::editor::Editor;

mod bindings;
mod config;
mod errors;
mod input;
mod loader;
mod render;
mod terminal;

use self::config::Config;
use self::errors::TermResult;
use self::loader::FsLoader;
use self::render::{render, text_rows};
use self::terminal::{CrosstermSurface, Surface};

/// The buffer opened when no files are given.
const SCRATCH: &str = "*scratch*";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "ry", version)]
#[command(about = "A small modal text editor")]
struct Args {
    /// Files to open
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Configuration file to use instead of the default one
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// File to write logs to
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_tracing(log: Option<&Path>, verbose: bool) {
    use std::fs::OpenOptions;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // The terminal belongs to the editor, so only log when given somewhere else to write.
    let Some(path) = log else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("ry: unable to open log file {}: {}", path.display(), e);
            return;
        },
    };

    let filter = EnvFilter::try_from_env("RY_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ry=trace,ry_term=trace,info")
        } else {
            EnvFilter::new("ry=debug,ry_term=debug,warn")
        }
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry().with(filter).with(file_layer).init();

    tracing::info!(path = %path.display(), "tracing initialized");
}

fn setup(args: &Args) -> TermResult<Editor> {
    let mut editor = Editor::new(bindings::default_modes()?);

    Config::find(args.config.as_deref())?.apply(&mut editor)?;

    if args.files.is_empty() {
        editor.buffers.add(Buffer::new(SCRATCH, "", vec![String::new()]));
        editor.set_buffer(SCRATCH)?;
    } else {
        let loader = FsLoader::new();
        let mut first = None;

        for path in args.files.iter() {
            let name = editor.open_buffer(&loader, path);
            first.get_or_insert(name);
        }

        if let Some(name) = first {
            editor.set_buffer(&name)?;
        }
    }

    Ok(editor)
}

fn run(mut editor: Editor) -> TermResult<()> {
    let mut surface = CrosstermSurface::new()?;

    while editor.is_running() {
        let (_, rows) = surface.size();

        editor.scroll(text_rows(rows));
        render(&editor, &mut surface)?;

        if !poll(Duration::from_millis(500))? {
            continue;
        }

        match read()? {
            Event::Key(ke) => {
                let Some(name) = input::raw_name(&ke) else {
                    continue;
                };

                if let Err(e) = editor.handle_raw(&name) {
                    tracing::warn!(key = %name, err = %e, "action failed");
                    editor.messenger.error(e.to_string());
                }
            },
            Event::Resize(columns, rows) => {
                surface.resize(columns, rows);
            },
            Event::Mouse(_) | Event::Paste(_) | Event::FocusGained | Event::FocusLost => {
                // Do nothing for now.
            },
        }
    }

    tracing::info!("exiting");

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_tracing(args.log.as_deref(), args.verbose);

    let res = setup(&args).and_then(run);

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(err = %e, "fatal error");
            eprintln!("ry: {}", e);
            ExitCode::FAILURE
        },
    }
}
