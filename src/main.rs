//! Terminal shell and entry point.
//!
//! A thin runtime around the library: it reads command lines from stdin, feeds
//! them through [`parse_command`] and [`handle_event`], executes the returned
//! actions and redraws the screen.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │   stdin thread   │        │  worker thread   │  ← blocking HTTP
//! └──────────────────┘        └──────────────────┘
//!          │ Input::Line               │ Input::Worker
//!          └────────────┬──────────────┘
//!                       ▼
//!             ┌──────────────────┐
//!             │   Shell (main)   │  ← AppState, rendering
//!             └──────────────────┘
//! ```
//!
//! Both producers feed a single channel, so all state changes happen on the main
//! thread in arrival order.
//!
//! # Usage
//!
//! ```text
//! movieflix [--config <path>] [--set key=value]... [--ephemeral] [--width <cols>]
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use movieflix::api::HttpApi;
use movieflix::app::Notification;
use movieflix::storage::MemoryStorage;
use movieflix::ui::{render, render_notification};
use movieflix::worker::{self, WorkerHandle, WorkerResponse};
use movieflix::{handle_event, parse_command, Action, AppState, Config, Event};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};

#[derive(Parser, Debug)]
#[command(name = "movieflix")]
#[command(version, about = "Terminal client for the MovieFlix catalog", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a configuration key, e.g. `--set theme=light`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Render width in columns
    #[arg(long, default_value_t = 80)]
    width: usize,
}

/// Everything the main loop reacts to.
enum Input {
    Line(String),
    Eof,
    Worker(WorkerResponse),
}

struct Shell {
    app: AppState,
    worker: WorkerHandle,
    export_dir: PathBuf,
    width: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut overrides = BTreeMap::new();
    for entry in &cli.overrides {
        let Some((key, value)) = entry.split_once('=') else {
            eprintln!("invalid --set `{entry}`, expected KEY=VALUE");
            return ExitCode::from(2);
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }

    let config = match Config::load(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    movieflix::observability::init_tracing(&config);

    match run(&config, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell exited with error");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, cli: &Cli) -> movieflix::Result<()> {
    let span = tracing::debug_span!("shell_start", ephemeral = cli.ephemeral);
    let guard = span.entered();

    let app = if cli.ephemeral {
        movieflix::initialize_with_storage(config, Box::new(MemoryStorage::new()))?
    } else {
        movieflix::initialize(config)?
    };

    let (tx, rx) = mpsc::channel::<Input>();

    let api = HttpApi::new(&config.api_base_url, config.request_timeout());
    let responses = tx.clone();
    let worker = worker::spawn(api, move |response| {
        responses.send(Input::Worker(response)).is_ok()
    })?;

    spawn_stdin_reader(tx)?;
    drop(guard);

    let mut shell = Shell {
        app,
        worker,
        export_dir: config.export_dir.clone(),
        width: cli.width,
    };

    shell.redraw();
    prompt();
    for input in &rx {
        if !shell.process(input) {
            break;
        }
        prompt();
    }

    drop(rx);
    shell.worker.shutdown()
}

fn spawn_stdin_reader(tx: Sender<Input>) -> io::Result<()> {
    std::thread::Builder::new()
        .name("movieflix-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(Input::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(Input::Eof);
        })?;
    Ok(())
}

impl Shell {
    /// Handles one input. Returns `false` once the shell should exit.
    fn process(&mut self, input: Input) -> bool {
        let events = match input {
            Input::Line(line) => match parse_command(&line) {
                Ok(events) => events,
                Err(e) => {
                    self.notify(&Notification::error(e.to_string()));
                    return true;
                }
            },
            Input::Eof => vec![Event::Quit],
            Input::Worker(response) => vec![Event::WorkerResponse(response)],
        };

        let mut should_render = false;
        for event in &events {
            let span = tracing::debug_span!("shell_event", event_type = event.name());
            let _guard = span.entered();

            match handle_event(&mut self.app, event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                    should_render |= render;
                    for action in actions {
                        if !self.execute_action(action) {
                            return false;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    self.notify(&Notification::error(e.to_string()));
                }
            }
        }

        if should_render {
            self.redraw();
        }
        true
    }

    /// Returns `false` for [`Action::Quit`].
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: Action) -> bool {
        match action {
            Action::PostToWorker(message) => {
                if let Err(e) = self.worker.post(message) {
                    self.notify(&Notification::error(e.to_string()));
                }
            }
            Action::Notify(notification) => self.notify(&notification),
            Action::SaveFile {
                file_name,
                mime_type,
                contents,
            } => {
                let path = self.export_dir.join(&file_name);
                let written = std::fs::create_dir_all(&self.export_dir)
                    .and_then(|()| std::fs::write(&path, contents.as_bytes()));
                match written {
                    Ok(()) => {
                        tracing::debug!(path = ?path, mime_type, bytes = contents.len(), "file saved");
                        self.notify(&Notification::success(format!("Saved {}", path.display())));
                    }
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "failed to save file");
                        self.notify(&Notification::error(format!("Could not save {file_name}: {e}")));
                    }
                }
            }
            Action::Quit => return false,
        }
        true
    }

    fn notify(&self, notification: &Notification) {
        print!("{}", render_notification(notification, &self.app.theme));
    }

    fn redraw(&self) {
        render(&self.app, self.width);
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
