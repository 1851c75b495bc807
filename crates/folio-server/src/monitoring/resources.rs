//! Resource monitoring.

use serde::Serialize;
use std::io;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Memory usage of this process, in whole megabytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessMemory {
    /// Resident set size.
    pub used: u64,
    /// Virtual memory size.
    pub total: u64,
    /// File-backed resident memory.
    pub external: u64,
    /// Resident set size, reported separately by the metrics endpoint.
    pub rss: u64,
}

impl ProcessMemory {
    /// Sample the current process.
    #[cfg(target_os = "linux")]
    pub fn sample() -> io::Result<Self> {
        let status = std::fs::read_to_string("/proc/self/status")?;
        Ok(Self::from_status(&status))
    }

    /// Sample the current process. Zeros where `/proc` is unavailable.
    #[cfg(not(target_os = "linux"))]
    pub fn sample() -> io::Result<Self> {
        Ok(Self::default())
    }

    /// Parse the contents of `/proc/<pid>/status`.
    pub fn from_status(status: &str) -> Self {
        let mut memory = Self::default();

        for line in status.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let Some(kb) = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok())
            else {
                continue;
            };
            let mb = round_mb(kb * 1024);

            match key {
                "VmRSS" => {
                    memory.used = mb;
                    memory.rss = mb;
                }
                "VmSize" => memory.total = mb,
                "RssFile" => memory.external = mb,
                _ => {}
            }
        }

        memory
    }
}

fn round_mb(bytes: u64) -> u64 {
    (bytes + BYTES_PER_MB / 2) / BYTES_PER_MB
}
