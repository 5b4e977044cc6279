//! Test doubles for the `ToolLocator`, `CommandRunner` and `Fetcher` seams.
//!
//! File: cli/src/common/testing.rs
//!
//! Compiled only for unit tests. Command logic is exercised against these
//! fakes so tests never depend on what is installed on the machine running
//! them, and never touch the network.
//!
use crate::common::network::Fetcher;
use crate::common::process::{CommandRunner, Invocation};
use crate::common::system::ToolLocator;
use crate::core::error::{CarbonError, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Resolves only the names it was given, each to a path equal to its name.
#[derive(Debug, Default)]
pub struct FakeLocator {
    installed: HashSet<String>,
}

impl FakeLocator {
    pub fn with_tools(names: &[&str]) -> Self {
        Self {
            installed: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl ToolLocator for FakeLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.installed.contains(name).then(|| PathBuf::from(name))
    }
}

type StatusFn = Box<dyn Fn(&Invocation) -> i32>;

/// Records every invocation and answers with a configurable exit status.
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    status_for: StatusFn,
}

impl RecordingRunner {
    /// Every command exits with status 0.
    pub fn succeeding() -> Self {
        Self::with_status(|_| 0)
    }

    pub fn with_status(status_for: impl Fn(&Invocation) -> i32 + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            status_for: Box::new(status_for),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Invocations whose program is `program`.
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.program == Path::new(program))
            .cloned()
            .collect()
    }

    fn record(&self, invocation: &Invocation) -> i32 {
        self.calls.borrow_mut().push(invocation.clone());
        (self.status_for)(invocation)
    }
}

impl CommandRunner for RecordingRunner {
    fn run_quiet(&self, invocation: &Invocation) -> bool {
        self.record(invocation) == 0
    }

    fn run_status(&self, invocation: &Invocation) -> Result<i32> {
        Ok(self.record(invocation))
    }
}

/// Serves a fixed payload for every URL, or fails every download when it has none.
#[derive(Default)]
pub struct FakeFetcher {
    payload: Option<Vec<u8>>,
    urls: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn serving(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
            urls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        self.urls.borrow_mut().push(url.to_string());
        match &self.payload {
            Some(bytes) => {
                std::fs::write(dest, bytes)?;
                Ok(bytes.len() as u64)
            }
            None => Err(CarbonError::Download {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            }
            .into()),
        }
    }
}

/// Builds an in-memory zip archive from `(name, content)` pairs.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = ::zip::ZipWriter::new(&mut cursor);
        for (name, content) in entries {
            writer
                .start_file(*name, ::zip::write::SimpleFileOptions::default())
                .expect("start zip entry");
            writer.write_all(content.as_bytes()).expect("write zip entry");
        }
        writer.finish().expect("finish zip");
    }
    cursor.into_inner()
}
