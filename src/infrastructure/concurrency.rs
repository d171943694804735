/// Concurrency management for ava2jest.
/// Sizes the rayon pool that converts files in parallel.

use anyhow::Result;

/// Number of workers to use when the caller does not ask for a size:
/// one per core, minimum 1.
pub fn default_workers() -> usize {
    std::cmp::max(1, num_cpus::get())
}

/// Build a dedicated pool for one batch run.
///
/// Each worker converts whole files; nothing is shared between workers except
/// the static rule tables.
pub fn build_pool(jobs: Option<usize>) -> Result<rayon::ThreadPool> {
    let workers = jobs.filter(|&n| n > 0).unwrap_or_else(default_workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ava2jest-worker-{}", i))
        .build()?;

    tracing::debug!(
        workers,
        cores = num_cpus::get(),
        "initialized conversion thread pool"
    );

    Ok(pool)
}
