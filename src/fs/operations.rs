use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

/// Reads the whole file while holding a shared lock, so a concurrent writer can't hand out half
/// of a blob.
pub async fn read_locked(file: &mut File) -> Result<Vec<u8>, io::Error> {
    file.lock_shared()?;
    let mut buffer = Vec::new();
    let result = file.read_to_end(&mut buffer).await;
    file.unlock_async().await?;
    result.map(|_| buffer)
}

/// Replaces everything in the file with `content` while holding an exclusive lock.
pub async fn replace_locked(file: &mut File, content: &[u8]) -> Result<(), io::Error> {
    // Semi-safe acquire-release for a file
    file.lock_exclusive()?;
    let result = replace(file, content).await;
    file.unlock_async().await?;
    result
}

async fn replace(file: &mut File, content: &[u8]) -> Result<(), io::Error> {
    file.rewind().await?;
    file.set_len(0).await?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_data().await
}
