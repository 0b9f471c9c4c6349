//! Concurrency helper: limit the number of monthly files handled in parallel.

use rayon::prelude::*;

/// At most `limit` items in flight; `limit <= 1` runs sequentially in order.
pub fn for_each_file_limited<T, E, F>(items: &[T], limit: usize, f: F) -> Result<(), E>
where
    T: Sync,
    E: Send,
    F: Sync + Fn(&T) -> Result<(), E>,
{
    if limit <= 1 {
        for item in items {
            f(item)?;
        }
        return Ok(());
    }
    for chunk in items.chunks(limit) {
        chunk.par_iter().try_for_each(|item| f(item))?;
    }
    Ok(())
}
