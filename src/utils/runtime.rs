use anyhow::Result;

/// Everything in the tracker runs to completion on one thread, there is never more than one
/// mutator.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
