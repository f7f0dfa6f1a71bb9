//! Pipe a command's output into a log pane
//!
//! A launcher window owns a log pane. A worker runs an external command and
//! forwards each output line to the GUI thread, where it is appended to the
//! pane. When the command exits the worker labels the pane with the exit
//! status and closes the launcher, which takes the pane with it.
//!
//! ```text
//! cargo run -p guictx-pipe -- ls -la /
//! ```
//!
//! With no arguments, `PIPE_COMMAND` (default `ls -la`) is run.

use guictx::{env_get_str, Context, ContextError, ContextResult, Window};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

/// Window plus its text buffer; GUI thread only
struct LogPane {
    window: Window,
    label: Mutex<String>,
    lines: Mutex<Vec<String>>,
}

impl LogPane {
    fn new(parent: &Window, label: &str) -> ContextResult<Self> {
        Ok(Self {
            window: Window::new(parent, "log")?,
            label: Mutex::new(label.to_owned()),
            lines: Mutex::new(Vec::new()),
        })
    }

    fn write(&self, line: String) {
        println!("[{}] {}", self.window.title(), line);
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    fn set_label(&self, label: String) {
        if let Ok(mut current) = self.label.lock() {
            *current = label;
        }
    }

    fn summary(&self) -> (String, usize) {
        let label = self.label.lock().map(|l| l.clone()).unwrap_or_default();
        let lines = self.lines.lock().map(|l| l.len()).unwrap_or(0);
        (label, lines)
    }
}

fn command_line() -> Vec<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return args;
    }
    env_get_str("PIPE_COMMAND", "ls -la")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Worker body: run `argv`, stream stdout to the pane, report the exit
fn run_command(argv: Vec<String>, pane: Arc<LogPane>, launcher: Arc<Window>) -> ContextResult<()> {
    let outcome = Command::new(&argv[0])
        .args(&argv[1..])
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn();

    let label = match outcome {
        Err(e) => format!("{}: {}", argv[0], e),
        Ok(mut child) => {
            if let Some(stdout) = child.stdout.take() {
                for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                    let pane = Arc::clone(&pane);
                    guictx::enqueue(move || pane.write(line))?;
                }
            }
            match child.wait() {
                Ok(status) => format!("{} exited with {}", argv[0], status),
                Err(e) => format!("{}: wait failed: {}", argv[0], e),
            }
        }
    };

    guictx::enqueue(move || {
        pane.set_label(label);
        let (label, lines) = pane.summary();
        tracing::info!(lines, "{}", label);
        if let Err(e) = launcher.close() {
            tracing::error!("close failed: {}", e);
        }
    })
}

fn main() -> ContextResult<()> {
    guictx::init_logging();

    let argv = command_line();
    if argv.is_empty() {
        return Err(ContextError::InvalidConfig("empty command"));
    }

    let context = Context::new()?;
    let launcher = Arc::new(Window::new(&context, "launcher")?);
    let pane = Arc::new(LogPane::new(&launcher, &argv.join(" "))?);

    let worker = {
        let (pane, launcher) = (Arc::clone(&pane), Arc::clone(&launcher));
        guictx::spawn_worker(move || {
            if let Err(e) = run_command(argv, pane, launcher) {
                tracing::error!("worker failed: {}", e);
            }
        })?
    };

    context.start()?;
    if worker.join().is_err() {
        tracing::error!("worker panicked");
    }

    let (label, lines) = pane.summary();
    println!("\n{} ({} lines captured)", label, lines);
    Ok(())
}
