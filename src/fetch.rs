//! Download a URL to a local file with coarse progress reporting.
//!
//! One unconditional GET, no retry, no resume, no timeout. The body is copied
//! in [`CHUNK_SIZE`] reads; after each read the running percentage is checked
//! against the next progress threshold (a multiple of `step`), and a
//! [`FetchEvent::Progress`] is emitted when it is reached:
//!
//! ```text
//! Downloading: data/weights.npz Bytes: 100000
//!       8192  [8.19%]
//!      16384  [16.38%]
//!        ...
//!     100000  [100.00%]
//! ```
//!
//! A read that crosses several thresholds at once emits a single event, so
//! lines are monotonic and no threshold is reported twice.
//!
//! The size comes from `Content-Length`. Without it no percentage can be
//! computed and the fetch fails before the destination file is created.
//! A transfer that breaks mid-way fails with [`FetchError::Interrupted`] and
//! leaves the partial file in place.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Bytes requested per read from the response body.
pub const CHUNK_SIZE: usize = 8192;

/// Default percentage step between progress events.
pub const DEFAULT_STEP: u32 = 5;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Progress step must be between 1 and 100, got {0}")]
    InvalidStep(u32),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned {0} for {1}")]
    Status(StatusCode, String),
    #[error("Response for {0} has no Content-Length, cannot report progress")]
    MissingSizeHeader(String),
    #[error("Transfer interrupted after {bytes_written} of {expected} bytes: {source}")]
    Interrupted {
        bytes_written: u64,
        expected: u64,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress notifications emitted during a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// Response accepted, destination about to be written.
    Started { destination: PathBuf, total_bytes: u64 },
    /// A progress threshold was reached.
    Progress(Progress),
    /// The body ended; `bytes` were written.
    Finished { bytes: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Bytes written so far.
    pub bytes: u64,
    /// `bytes * 100 / total`.
    pub percent: f64,
    /// Highest threshold reached by this read.
    pub threshold: u32,
}

/// Outcome of a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchSummary {
    pub bytes: u64,
    /// The declared `Content-Length`. Not checked against `bytes`.
    pub expected: u64,
}

/// Tracks the next threshold for one transfer.
#[derive(Debug)]
pub struct ProgressTracker {
    total: u64,
    step: u32,
    next_threshold: u32,
}

impl ProgressTracker {
    pub fn new(total: u64, step: u32) -> Self {
        Self {
            total,
            step,
            next_threshold: step,
        }
    }

    /// Record the running byte count; returns an event when one or more
    /// thresholds were reached since the last call.
    pub fn record(&mut self, bytes: u64) -> Option<Progress> {
        if self.total == 0 || self.step == 0 || !self.reached(bytes, self.next_threshold) {
            return None;
        }

        let mut threshold = self.next_threshold;
        while self.next_threshold <= 100 && self.reached(bytes, self.next_threshold) {
            threshold = self.next_threshold;
            self.next_threshold += self.step;
        }

        Some(Progress {
            bytes,
            percent: bytes as f64 * 100.0 / self.total as f64,
            threshold,
        })
    }

    fn reached(&self, bytes: u64, threshold: u32) -> bool {
        threshold <= 100 && u128::from(bytes) * 100 >= u128::from(threshold) * u128::from(self.total)
    }
}

/// Fetch `url` into `destination`. The call blocks until the body ends or
/// the connection fails; no timeout is set.
pub fn fetch(
    url: &str,
    destination: &Path,
    step: u32,
    on_event: impl FnMut(&FetchEvent),
) -> Result<FetchSummary, FetchError> {
    let client = Client::builder().timeout(None::<Duration>).build()?;
    fetch_with_client(&client, url, destination, step, on_event)
}

/// Fetch `url` into `destination` using the caller's client.
pub fn fetch_with_client(
    client: &Client,
    url: &str,
    destination: &Path,
    step: u32,
    mut on_event: impl FnMut(&FetchEvent),
) -> Result<FetchSummary, FetchError> {
    if !(1..=100).contains(&step) {
        return Err(FetchError::InvalidStep(step));
    }

    let mut response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status, url.to_string()));
    }
    let total = response
        .content_length()
        .ok_or_else(|| FetchError::MissingSizeHeader(url.to_string()))?;

    on_event(&FetchEvent::Started {
        destination: destination.to_path_buf(),
        total_bytes: total,
    });

    let mut file = File::create(destination)?;
    let bytes = copy_with_progress(&mut response, &mut file, total, step, &mut on_event)?;

    on_event(&FetchEvent::Finished { bytes });
    Ok(FetchSummary {
        bytes,
        expected: total,
    })
}

/// Copy `reader` into `writer` in [`CHUNK_SIZE`] reads, emitting
/// [`FetchEvent::Progress`] as thresholds are reached. Returns bytes copied.
pub fn copy_with_progress<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    total: u64,
    step: u32,
    on_event: &mut impl FnMut(&FetchEvent),
) -> Result<u64, FetchError> {
    let mut tracker = ProgressTracker::new(total, step);
    let mut buf = [0u8; CHUNK_SIZE];
    let mut transferred: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FetchError::Interrupted {
                    bytes_written: transferred,
                    expected: total,
                    source,
                });
            }
        };
        writer.write_all(&buf[..n])?;
        transferred += n as u64;

        if let Some(progress) = tracker.record(transferred) {
            on_event(&FetchEvent::Progress(progress));
        }
    }

    writer.flush()?;
    Ok(transferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn thresholds(events: &[FetchEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                FetchEvent::Progress(p) => Some(p.threshold),
                _ => None,
            })
            .collect()
    }

    fn copy(data: &[u8], total: u64, step: u32) -> (Vec<u8>, Vec<FetchEvent>) {
        let mut events = Vec::new();
        let mut out = Vec::new();
        copy_with_progress(
            &mut Cursor::new(data),
            &mut out,
            total,
            step,
            &mut |e: &FetchEvent| events.push(e.clone()),
        )
        .unwrap();
        (out, events)
    }

    #[test]
    fn hundred_thousand_bytes_default_step() {
        let data = vec![7u8; 100_000];
        let (out, events) = copy(&data, 100_000, DEFAULT_STEP);

        assert_eq!(out.len(), 100_000);
        assert_eq!(
            thresholds(&events),
            vec![5, 15, 20, 30, 40, 45, 55, 65, 70, 80, 90, 95, 100]
        );
        match events.last() {
            Some(FetchEvent::Progress(p)) => {
                assert_eq!(p.bytes, 100_000);
                assert_eq!(p.percent, 100.0);
            }
            other => panic!("expected final progress event, got {other:?}"),
        }
    }

    #[test]
    fn every_threshold_once_with_small_chunks() {
        let mut tracker = ProgressTracker::new(100_000, 5);
        let reported: Vec<u32> = (1..=100u64)
            .filter_map(|i| tracker.record(i * 1000))
            .map(|p| p.threshold)
            .collect();
        let expected: Vec<u32> = (1..=20).map(|i| i * 5).collect();
        assert_eq!(reported, expected);
    }

    #[test]
    fn progress_is_monotonic() {
        let data = vec![0u8; 54_321];
        let (_, events) = copy(&data, 54_321, 3);
        let bytes: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                FetchEvent::Progress(p) => Some(p.bytes),
                _ => None,
            })
            .collect();
        assert!(bytes.windows(2).all(|w| w[0] < w[1]));
        let ts = thresholds(&events);
        assert!(ts.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*ts.last().unwrap(), 99);
    }

    #[test]
    fn large_step_single_event() {
        let data = vec![0u8; 10_000];
        let (_, events) = copy(&data, 10_000, 100);
        assert_eq!(thresholds(&events), vec![100]);
    }

    #[test]
    fn zero_total_emits_nothing() {
        let (out, events) = copy(&[], 0, 5);
        assert!(out.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn overlong_body_stops_at_hundred() {
        let data = vec![0u8; 30_000];
        let (out, events) = copy(&data, 10_000, 50);
        assert_eq!(out.len(), 30_000);
        assert_eq!(thresholds(&events), vec![50, 100]);
    }

    #[test]
    fn tracker_below_first_threshold() {
        let mut tracker = ProgressTracker::new(1000, 5);
        assert_eq!(tracker.record(49), None);
        let p = tracker.record(50).unwrap();
        assert_eq!(p.threshold, 5);
        assert_eq!(tracker.record(50), None);
    }

    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::new(
                    ErrorKind::ConnectionReset,
                    "connection reset",
                ));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn mid_transfer_failure_reports_written_bytes() {
        let mut reader = FailingReader { remaining: 20_000 };
        let mut out = Vec::new();
        let result = copy_with_progress(&mut reader, &mut out, 50_000, 5, &mut |_: &FetchEvent| {});

        match result {
            Err(FetchError::Interrupted {
                bytes_written,
                expected,
                ..
            }) => {
                assert_eq!(bytes_written, 20_000);
                assert_eq!(expected, 50_000);
            }
            other => panic!("expected Interrupted, got {other:?}"),
        }
        assert_eq!(out.len(), 20_000);
    }

    #[test]
    fn invalid_step_rejected_before_request() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("out.bin");
        for step in [0, 101] {
            let result = fetch("http://127.0.0.1:9/never", &dest, step, |_| {});
            assert!(matches!(result, Err(FetchError::InvalidStep(s)) if s == step));
        }
        assert!(!dest.exists());
    }
}
