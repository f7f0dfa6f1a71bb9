//! Basic guictx example
//!
//! One window, a few workers doing slow work. Workers report progress through
//! the task queue; the progress table is only touched on the GUI thread. The
//! last report closes the window, and the loop exits at the next liveness
//! check.
//!
//! # Environment Variables
//!
//! - `GUICTX_LOG=debug` - Log filter (e.g. `info`, `debug`, `guictx_runtime=trace`)
//! - `GUICTX_DEBUG=1` - Log every drain and liveness tick
//! - `BASIC_WORKERS=4` - Number of workers
//! - `BASIC_STEPS=5` - Steps per worker

use guictx::{env_get, Context, ContextResult, Window};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// GUICTX_LOG=debug cargo run -p guictx-basic
fn main() -> ContextResult<()> {
    println!("=== guictx Basic Example ===\n");
    guictx::init_logging();

    let workers: usize = env_get("BASIC_WORKERS", 4).max(1);
    let steps: u32 = env_get("BASIC_STEPS", 5);

    let context = Context::new()?;
    let window = Arc::new(Window::new(&context, "progress")?);

    // Only ever locked on the GUI thread.
    let progress = Arc::new(Mutex::new(vec![0u32; workers]));
    let started = Instant::now();

    for n in 0..workers {
        let progress = Arc::clone(&progress);
        let window = Arc::clone(&window);
        guictx::spawn_worker(move || {
            for step in 1..=steps {
                std::thread::sleep(Duration::from_millis(40 + 15 * n as u64));

                let progress = Arc::clone(&progress);
                let window = Arc::clone(&window);
                let report = guictx::enqueue(move || {
                    let Ok(mut table) = progress.lock() else {
                        return;
                    };
                    table[n] = step;
                    println!("[{}] worker {} step {}/{}  {:?}", window.title(), n, step, steps, table);

                    if table.iter().all(|&done| done == steps) {
                        tracing::info!("all workers finished, closing window");
                        if let Err(e) = window.close() {
                            tracing::error!("close failed: {}", e);
                        }
                    }
                });
                if let Err(e) = report {
                    tracing::error!(worker = n, "report failed: {}", e);
                    return;
                }
            }
        })?;
    }

    // Timer scheduled before start, replayed once the loop runs.
    context.schedule_ms(100, || println!("[timer] loop is up"))?;

    context.start()?;

    let stats = context.stats();
    println!("\nLoop exited after {:?}", started.elapsed());
    println!(
        "tasks run: {}, drain ticks: {}, liveness checks: {}",
        stats.tasks_run, stats.drain_ticks, stats.liveness_checks
    );
    println!("\n=== Example Complete ===");
    Ok(())
}
