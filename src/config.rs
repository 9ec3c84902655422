use crate::error::HuffError;
use std::str::FromStr;

/// Inputs at least this large are counted in parallel shards.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024 * 1024; // 1 MiB

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct HuffConfig {
    pub threads: usize,
    pub parallel_threshold: usize,
    pub report: ReportFormat,
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            report: ReportFormat::Text,
        }
    }
}

impl HuffConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = report;
        self
    }

    pub fn validate(&self) -> Result<(), HuffError> {
        if self.threads == 0 {
            return Err(HuffError::ConfigError("thread count must be at least 1".to_string()));
        }
        if self.parallel_threshold == 0 {
            return Err(HuffError::ConfigError("parallel threshold must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Whether an input of `len` bytes should be counted on the thread pool.
    pub fn counts_in_parallel(&self, len: usize) -> bool {
        self.threads > 1 && len >= self.parallel_threshold
    }
}

impl FromStr for ReportFormat {
    type Err = HuffError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(HuffError::ConfigError(format!("Invalid report format: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!(matches!("xml".parse::<ReportFormat>(), Err(HuffError::ConfigError(_))));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = HuffConfig::default().with_threads(0);
        assert!(matches!(config.validate(), Err(HuffError::ConfigError(_))));
    }

    #[test]
    fn test_parallel_gate() {
        let config = HuffConfig { threads: 4, parallel_threshold: 100, report: ReportFormat::Text };
        assert!(!config.counts_in_parallel(99));
        assert!(config.counts_in_parallel(100));
        assert!(!config.clone().with_threads(1).counts_in_parallel(1000));
    }
}
