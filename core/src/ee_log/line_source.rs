use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use super::LogLine;

#[derive(Debug, Error)]
pub enum LineSourceError {
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is shorter than what was already read (rotated or truncated).
    #[error(
        "log file {} shrank to {length} bytes, below read position {position}",
        .path.display()
    )]
    Truncated {
        path: PathBuf,
        position: u64,
        length: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Line(LogLine),
    /// No complete line is available yet.
    Pending,
}

/// Follows a single growing text file line by line.
///
/// A line is only handed out once its terminating newline has been written;
/// bytes of a half-written line are held back until the rest arrives.
pub struct LineSource {
    path: PathBuf,
    reader: BufReader<File>,
    position: u64,
    partial: Vec<u8>,
    line_number: u64,
}

impl LineSource {
    /// Open positioned at the current end of file. Existing content is skipped.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LineSourceError> {
        Self::open_at(path.as_ref(), SeekFrom::End(0)).await
    }

    /// Open positioned at the start of the file, for replaying a finished log.
    pub async fn open_from_start(path: impl AsRef<Path>) -> Result<Self, LineSourceError> {
        Self::open_at(path.as_ref(), SeekFrom::Start(0)).await
    }

    async fn open_at(path: &Path, from: SeekFrom) -> Result<Self, LineSourceError> {
        let file = File::open(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => LineSourceError::NotFound(path.to_path_buf()),
            _ => io_error(path, e),
        })?;
        let mut reader = BufReader::new(file);
        let position = reader.seek(from).await.map_err(|e| io_error(path, e))?;

        tracing::debug!(path = %path.display(), position, "Opened log source");

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            position,
            partial: Vec::new(),
            line_number: 0,
        })
    }

    /// Re-open the same path at its current end, discarding any held-back bytes.
    ///
    /// Used by callers that decide to recover from [`LineSourceError::Truncated`].
    pub async fn reopen(&mut self) -> Result<(), LineSourceError> {
        let path = self.path.clone();
        let line_number = self.line_number;
        *self = Self::open(&path).await?;
        self.line_number = line_number;
        Ok(())
    }

    /// Read the next complete line, or report that none is available yet.
    pub async fn next_line(&mut self) -> Result<ReadOutcome, LineSourceError> {
        let read = self
            .reader
            .read_until(b'\n', &mut self.partial)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        if read == 0 {
            self.check_not_truncated().await?;
            return Ok(ReadOutcome::Pending);
        }
        self.position += read as u64;

        if self.partial.last() != Some(&b'\n') {
            // Writer is mid-line; keep the bytes for the next call
            return Ok(ReadOutcome::Pending);
        }

        Ok(ReadOutcome::Line(self.take_line()))
    }

    /// Hand out a trailing line that never received its newline.
    ///
    /// Only meaningful once the writer is known to be done, e.g. at the end of
    /// a replay.
    pub fn take_partial(&mut self) -> Option<LogLine> {
        if self.partial.is_empty() {
            return None;
        }
        Some(self.take_line())
    }

    fn take_line(&mut self) -> LogLine {
        let bytes = std::mem::take(&mut self.partial);
        let text = String::from_utf8_lossy(&bytes);
        self.line_number += 1;
        LogLine::new(self.line_number, text.trim_end_matches(['\r', '\n']))
    }

    async fn check_not_truncated(&self) -> Result<(), LineSourceError> {
        let length = self
            .reader
            .get_ref()
            .metadata()
            .await
            .map_err(|e| io_error(&self.path, e))?
            .len();

        if length < self.position {
            return Err(LineSourceError::Truncated {
                path: self.path.clone(),
                position: self.position,
                length,
            });
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of everything consumed so far, including held-back bytes.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn lines_read(&self) -> u64 {
        self.line_number
    }
}

fn io_error(path: &Path, source: std::io::Error) -> LineSourceError {
    LineSourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn append(file: &mut NamedTempFile, data: &[u8]) {
        file.write_all(data).unwrap();
        file.flush().unwrap();
    }

    async fn expect_line(source: &mut LineSource) -> LogLine {
        match source.next_line().await.unwrap() {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Pending => panic!("expected a line"),
        }
    }

    #[tokio::test]
    async fn test_open_skips_existing_content() {
        let mut file = NamedTempFile::new().unwrap();
        append(&mut file, b"1.0 old line\n2.0 older line\n");

        let mut source = LineSource::open(file.path()).await.unwrap();
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);

        append(&mut file, b"3.0 new line\n");
        let line = expect_line(&mut source).await;
        assert_eq!(line.text, "3.0 new line");
        assert_eq!(line.line_number, 1);
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);
    }

    #[tokio::test]
    async fn test_open_from_start_reads_history() {
        let mut file = NamedTempFile::new().unwrap();
        append(&mut file, b"1.0 first\r\n2.0 second\n");

        let mut source = LineSource::open_from_start(file.path()).await.unwrap();
        assert_eq!(expect_line(&mut source).await.text, "1.0 first");
        assert_eq!(expect_line(&mut source).await.text, "2.0 second");
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);
        assert_eq!(source.lines_read(), 2);
    }

    #[tokio::test]
    async fn test_partial_line_is_held_back() {
        let mut file = NamedTempFile::new().unwrap();
        let mut source = LineSource::open(file.path()).await.unwrap();

        append(&mut file, b"10.5 AI [Info]: OnAgent");
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);

        append(&mut file, b"Created /Npc/Lancer1\n");
        let line = expect_line(&mut source).await;
        assert_eq!(line.text, "10.5 AI [Info]: OnAgentCreated /Npc/Lancer1");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let mut file = NamedTempFile::new().unwrap();
        let mut source = LineSource::open(file.path()).await.unwrap();

        append(&mut file, b"1.0 bad \xff byte\n2.0 next\n");
        assert_eq!(expect_line(&mut source).await.text, "1.0 bad \u{FFFD} byte");
        assert_eq!(expect_line(&mut source).await.text, "2.0 next");
    }

    #[tokio::test]
    async fn test_truncation_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        append(&mut file, b"1.0 some content that will vanish\n");
        let mut source = LineSource::open(file.path()).await.unwrap();

        file.as_file().set_len(0).unwrap();
        let err = source.next_line().await.unwrap_err();
        assert!(matches!(err, LineSourceError::Truncated { length: 0, .. }));

        source.reopen().await.unwrap();
        assert_eq!(source.position(), 0);
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);
    }

    #[tokio::test]
    async fn test_take_partial() {
        let mut file = NamedTempFile::new().unwrap();
        append(&mut file, b"1.0 done\n2.0 unterminated");

        let mut source = LineSource::open_from_start(file.path()).await.unwrap();
        assert_eq!(expect_line(&mut source).await.text, "1.0 done");
        assert_eq!(source.next_line().await.unwrap(), ReadOutcome::Pending);
        assert_eq!(source.take_partial().unwrap().text, "2.0 unterminated");
        assert!(source.take_partial().is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineSource::open(dir.path().join("EE.log")).await.err().unwrap();
        assert!(matches!(err, LineSourceError::NotFound(_)));
    }
}
