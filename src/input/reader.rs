use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

/// Largest selection accepted, in bytes.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Reads the text to translate from a file or stdin.
///
/// Empty input is returned as-is; rejecting it is up to the coordinator.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(|| Self::read_from(io::stdin().lock()), Self::read_file)
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(too_large(size));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    /// Reads until EOF, stopping as soon as the size limit is exceeded.
    pub fn read_from<R: Read>(source: R) -> Result<String> {
        let mut buffer = Vec::new();
        source
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(too_large(buffer.len()));
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn too_large(size: usize) -> String {
    format!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Select a smaller block of text.",
        size as f64 / 1024.0 / 1024.0
    )
}
