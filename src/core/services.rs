//! External collaborators threaded into the root pane at construction.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::LaunchOptions;
use crate::core::content::SharedContent;
use crate::core::controller::ControllerFactory;
use crate::core::geometry::Position;
use crate::logging::LogBuffer;

/// Loads and creates content models.
pub trait BufferManager {
    fn load(&mut self, path: &Path) -> SharedContent;
    fn read_stream(&mut self, reader: &mut dyn Read) -> SharedContent;
    fn create_empty(&mut self) -> SharedContent;
}

/// Persisted per-file cursor positions.
pub trait HistoryStore {
    fn cursor_position(&self, path: &str) -> Option<Position>;
}

/// Where the root pane's initial content model comes from.
pub enum ContentSource {
    Path(PathBuf),
    Stream(Box<dyn Read>),
    Empty,
}

impl ContentSource {
    /// Pick exactly one source: the first file, else the stream when requested, else empty.
    pub fn from_launch(launch: &LaunchOptions, stream: impl FnOnce() -> Box<dyn Read>) -> Self {
        if let Some(path) = launch.files.first() {
            Self::Path(path.clone())
        } else if launch.read_stdin {
            Self::Stream(stream())
        } else {
            Self::Empty
        }
    }

    pub(crate) fn open(self, buffers: &mut dyn BufferManager) -> SharedContent {
        match self {
            Self::Path(path) => buffers.load(&path),
            Self::Stream(mut reader) => buffers.read_stream(reader.as_mut()),
            Self::Empty => buffers.create_empty(),
        }
    }
}

impl std::fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// Explicit context for the root pane, in place of process-wide singletons.
pub struct Services {
    pub buffers: Box<dyn BufferManager>,
    pub history: Box<dyn HistoryStore>,
    pub controllers: Box<dyn ControllerFactory>,
    pub log: LogBuffer,
}

#[cfg(test)]
mod tests {
    use super::ContentSource;
    use crate::config::LaunchOptions;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn stream() -> Box<dyn std::io::Read> {
        Box::new(Cursor::new(Vec::new()))
    }

    #[test]
    fn first_file_wins_over_stdin() {
        let launch = LaunchOptions {
            files: vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
            read_stdin: true,
        };
        match ContentSource::from_launch(&launch, stream) {
            ContentSource::Path(path) => assert_eq!(path, PathBuf::from("a.txt")),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn stdin_beats_empty() {
        let launch = LaunchOptions {
            files: Vec::new(),
            read_stdin: true,
        };
        assert!(matches!(
            ContentSource::from_launch(&launch, stream),
            ContentSource::Stream(_)
        ));
    }

    #[test]
    fn falls_back_to_empty() {
        let launch = LaunchOptions::default();
        assert!(matches!(
            ContentSource::from_launch(&launch, stream),
            ContentSource::Empty
        ));
    }
}
