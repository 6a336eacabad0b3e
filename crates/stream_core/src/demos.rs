//! Console demos: task builders, executor contexts, and timing contrasts.
//!
//! Each demo logs what ran where via `tracing` and returns a value the caller
//! (or a test) can inspect. They simulate I/O with fixed delays returning
//! hardcoded strings; nothing here touches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::time::{Duration, Instant};
use tracing::info;

use crate::StreamLabModel;

pub const NETWORK_CALL_DELAY: Duration = Duration::from_secs(1);
pub const COUNT_STRESS_WRITERS: u64 = 100;
pub const OPERATOR_COLLECTIONS: usize = 4;

async fn simulated_network_call(label: &str, reply: &str) -> String {
    info!(
        call = label,
        thread = ?std::thread::current().name(),
        "simulated network call executing"
    );
    tokio::time::sleep(NETWORK_CALL_DELAY).await;
    reply.to_string()
}

/// Awaits two simulated calls one after the other. Elapsed time is the sum of
/// the delays.
pub async fn sequential() -> Duration {
    info!(thread = ?std::thread::current().name(), "sequential demo start");
    let started = Instant::now();

    let first = simulated_network_call("first", "Hello").await;
    let second = simulated_network_call("second", "World").await;

    let elapsed = started.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        "sequential demo done: {first} {second}"
    );
    elapsed
}

/// Spawns both calls eagerly and awaits them together. Elapsed time is the
/// longest single delay.
pub async fn concurrent() -> Duration {
    info!(thread = ?std::thread::current().name(), "concurrent demo start");
    let started = Instant::now();

    let first = tokio::spawn(simulated_network_call("first", "Hello"));
    let second = tokio::spawn(simulated_network_call("second", "World"));
    let (first, second) = tokio::join!(first, second);
    let first = first.unwrap_or_else(|_| "<first task panicked>".to_string());
    let second = second.unwrap_or_else(|_| "<second task panicked>".to_string());

    let elapsed = started.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        "concurrent demo done: {first} {second}"
    );
    elapsed
}

/// Builds both call futures up front; neither runs until awaited. Returns the
/// combined reply.
pub async fn lazy() -> String {
    let first = simulated_network_call("first", "Hello");
    let second = simulated_network_call("second", "World");
    info!("futures built; neither call has started yet");

    let combined = format!("{} {}", first.await, second.await);
    info!("lazy demo done: {combined}");
    combined
}

/// Runs one closure on a runtime worker, one on the blocking pool, and one on
/// a dedicated OS thread, logging each thread's name.
pub async fn contexts() -> Result<()> {
    info!(thread = ?std::thread::current().name(), "contexts demo entry");

    let worker = tokio::spawn(async {
        info!(thread = ?std::thread::current().name(), "task on runtime worker");
    });
    let blocking = tokio::task::spawn_blocking(|| {
        info!(thread = ?std::thread::current().name(), "task on blocking pool");
    });

    let dedicated = std::thread::Builder::new()
        .name("dedicated-demo".to_string())
        .spawn(|| {
            info!(thread = ?std::thread::current().name(), "task on dedicated thread");
        })
        .context("failed to spawn dedicated demo thread")?;

    worker.await.context("runtime worker task panicked")?;
    blocking.await.context("blocking pool task panicked")?;
    if dedicated.join().is_err() {
        anyhow::bail!("dedicated demo thread panicked");
    }

    info!(thread = ?std::thread::current().name(), "contexts demo exit");
    Ok(())
}

/// Cold operator pipelines run nothing until collected, and re-run for each
/// collector: building the same mapped stream four times executes the
/// operator four times, once per collection. Returns the execution count.
pub async fn operators() -> usize {
    let executions = Arc::new(AtomicUsize::new(0));

    for collector in 0..OPERATOR_COLLECTIONS {
        let executions = Arc::clone(&executions);
        let results: Vec<String> = futures::stream::iter([()])
            .then(move |_| {
                let executions = Arc::clone(&executions);
                async move {
                    executions.fetch_add(1, Ordering::SeqCst);
                    "Result".to_string()
                }
            })
            .collect()
            .await;
        info!(collector, ?results, "collected operator pipeline");
    }

    let total = executions.load(Ordering::SeqCst);
    info!(total, "operators demo done");
    total
}

/// The counter stress loop: `writers` tasks each store their index into the
/// count channel, then idle briefly. Returns the value left standing once all
/// writers finish; which write lands last is scheduler-dependent.
pub async fn count_stress(model: Arc<StreamLabModel>, writers: u64) -> u64 {
    info!(writers, "count stress demo start");

    let mut tasks = Vec::with_capacity(writers as usize);
    for index in 1..=writers {
        let model = Arc::clone(&model);
        tasks.push(tokio::spawn(async move {
            info!(
                index,
                thread = ?std::thread::current().name(),
                "count writer running"
            );
            model.set_count(index);
            tokio::time::sleep(NETWORK_CALL_DELAY).await;
        }));
    }
    for task in tasks {
        let _ = task.await;
    }

    let final_count = *model.subscribe_count().borrow();
    info!(final_count, "count stress demo done");
    final_count
}
