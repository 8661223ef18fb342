//! Full-tree scan
//!
//! Every (file, permutation) run is independent, so files are processed in
//! parallel with rayon. Each worker folds into its own [`Aggregator`] and the
//! partials are merged in file order, which gives the same result as a
//! sequential scan.

use bindscan_core::config::ScanConfig;
use bindscan_core::{Error, Result};
use bindscan_parser::{PermutationRunner, Preprocessor};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

use crate::aggregate::{AggregatedEntry, Aggregator};
use crate::discovery::{FileDiscovery, ShaderFile};

/// Result of a scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Number of shader files scanned
    pub files: usize,
    /// Sorted report rows
    pub entries: Vec<AggregatedEntry>,
}

/// Runs discovered files through every permutation
pub struct Scanner<'a> {
    preprocessor: &'a dyn Preprocessor,
    link_base: String,
    jobs: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(preprocessor: &'a dyn Preprocessor, link_base: impl Into<String>) -> Self {
        Self {
            preprocessor,
            link_base: link_base.into(),
            jobs: None,
        }
    }

    /// Limit worker threads; `Some(1)` scans on the calling thread
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Aggregate bindings for `files`
    pub fn scan_files(&self, files: &[ShaderFile]) -> Result<Aggregator> {
        match self.jobs {
            Some(1) => Ok(self.scan_sequential(files)),
            jobs => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs.unwrap_or(0))
                    .build()
                    .map_err(|e| Error::Other(format!("failed to start worker pool: {e}")))?;
                Ok(pool.install(|| self.scan_parallel(files)))
            }
        }
    }

    fn scan_sequential(&self, files: &[ShaderFile]) -> Aggregator {
        let runner = PermutationRunner::new(self.preprocessor);
        let mut aggregator = Aggregator::new(self.link_base.clone());
        for file in files {
            self.scan_file(&runner, file, &mut aggregator);
        }
        aggregator
    }

    fn scan_parallel(&self, files: &[ShaderFile]) -> Aggregator {
        let total = files.len();
        let processed = AtomicUsize::new(0);

        files
            .par_iter()
            .fold(
                || Aggregator::new(self.link_base.clone()),
                |mut aggregator, file| {
                    let runner = PermutationRunner::new(self.preprocessor);
                    self.scan_file(&runner, file, &mut aggregator);

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    if current % 50 == 0 || current == total {
                        info!("Scanned {}/{} files", current, total);
                    }
                    aggregator
                },
            )
            .reduce(
                || Aggregator::new(self.link_base.clone()),
                |mut left, right| {
                    left.merge(right);
                    left
                },
            )
    }

    fn scan_file(&self, runner: &PermutationRunner<'_>, file: &ShaderFile, aggregator: &mut Aggregator) {
        let observations = runner.run_all(&file.path, &file.relative);
        debug!("{} ({}): {} observations", file.relative, file.feature, observations.len());
        for observation in &observations {
            aggregator.observe(observation, &file.feature);
        }
    }
}

/// Discover, scan and sort according to `config`
pub fn scan(config: &ScanConfig, preprocessor: &dyn Preprocessor) -> Result<ScanReport> {
    let discovery = FileDiscovery::with_excludes(&config.root, &config.exclude)?;
    let files = discovery.discover()?;

    let aggregator = Scanner::new(preprocessor, config.link_base.clone())
        .with_jobs(config.jobs)
        .scan_files(&files)?;
    if aggregator.is_empty() && !files.is_empty() {
        warn!("No bindings found in {} shader files", files.len());
    } else {
        info!("Aggregated {} bindings from {} files", aggregator.len(), files.len());
    }

    Ok(ScanReport {
        files: files.len(),
        entries: aggregator.into_sorted(),
    })
}
