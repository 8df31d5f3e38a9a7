//! Benchmark harness comparing the multiplication algorithms.
//!
//! For every configured size the harness generates two random square inputs,
//! times each algorithm over a fixed number of repetitions (after one untimed
//! warm-up run), validates every result against the naive product and samples
//! the process resident set size after each run.
//!
//! The harness is silent; the binary in `main.rs` does all the printing.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{validation_error, Result};
use crate::matrix::Matrix;
use crate::naive::{multiply_naive, multiply_naive_ikj};
use crate::strassen::{multiply_strassen_with, StrassenConfig};
use crate::utils::{approx_equal, generate_random, generate_random_seeded};
use crate::{CUTOFF, EPSILON, PARALLEL_DEPTH};

/// Matrix sizes benchmarked when none are given.
pub const DEFAULT_SIZES: [usize; 4] = [128, 256, 512, 1024];

/// Timed repetitions per algorithm and size.
pub const DEFAULT_REPETITIONS: usize = 3;

pub const USAGE: &str = "\
Usage: strassen [OPTIONS]

Options:
  --sizes N[,N...]        matrix sizes to benchmark (default: 128,256,512,1024)
  --reps N                timed repetitions per algorithm (default: 3)
  --epsilon E             absolute tolerance for validation (default: 1e-9)
  --seed S                seed for reproducible inputs (default: random)
  --cutoff C              strassen base-case cutoff (default: 64)
  --parallel-depth D      levels forked by parallel strassen (default: 2)
  --csv PATH              also write results as CSV to PATH
  -h, --help              print this help";

/// Harness configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub repetitions: usize,
    pub epsilon: f64,
    /// `None` draws inputs from the thread-local RNG.
    pub seed: Option<u64>,
    pub cutoff: usize,
    pub parallel_depth: usize,
    pub csv_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            repetitions: DEFAULT_REPETITIONS,
            epsilon: EPSILON,
            seed: None,
            cutoff: CUTOFF,
            parallel_depth: PARALLEL_DEPTH,
            csv_path: None,
        }
    }
}

impl BenchConfig {
    /// Parses command-line arguments (without the program name) on top of
    /// [`BenchConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ValidationError`](crate::MatrixError::ValidationError)
    /// for unknown flags, missing or malformed values, and any configuration
    /// rejected by [`BenchConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use strassen::harness::BenchConfig;
    ///
    /// let config = BenchConfig::from_args(["--sizes", "64,128", "--reps", "5"]).unwrap();
    /// assert_eq!(config.sizes, vec![64, 128]);
    /// assert_eq!(config.repetitions, 5);
    /// ```
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = BenchConfig::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let flag = flag.as_ref();
            let mut value = || {
                args.next()
                    .map(|v| v.as_ref().to_string())
                    .ok_or_else(|| validation_error(format!("missing value for {}", flag)))
            };

            match flag {
                "--sizes" => config.sizes = parse_sizes(&value()?)?,
                "--reps" => config.repetitions = parse_number(flag, &value()?)?,
                "--epsilon" => config.epsilon = parse_number(flag, &value()?)?,
                "--seed" => config.seed = Some(parse_number(flag, &value()?)?),
                "--cutoff" => config.cutoff = parse_number(flag, &value()?)?,
                "--parallel-depth" => config.parallel_depth = parse_number(flag, &value()?)?,
                "--csv" => config.csv_path = Some(PathBuf::from(value()?)),
                other => return Err(validation_error(format!("unknown argument '{}'", other))),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can be run.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(validation_error("at least one size is required"));
        }
        if self.sizes.contains(&0) {
            return Err(validation_error("sizes must be at least 1"));
        }
        if self.repetitions == 0 {
            return Err(validation_error("repetitions must be at least 1"));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(validation_error(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.cutoff == 0 {
            return Err(validation_error("cutoff must be at least 1"));
        }
        Ok(())
    }

    fn strassen_config(&self) -> StrassenConfig {
        StrassenConfig::with_cutoff(self.cutoff)
    }
}

fn parse_sizes(value: &str) -> Result<Vec<usize>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_number("--sizes", s))
        .collect()
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| validation_error(format!("invalid value '{}' for {}", value, flag)))
}

/// The algorithms the harness compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Naive,
    CacheOptimized,
    Strassen,
    ParallelStrassen,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Naive,
        Algorithm::CacheOptimized,
        Algorithm::Strassen,
        Algorithm::ParallelStrassen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Naive => "Naive (i-j-k)",
            Algorithm::CacheOptimized => "Naive (i-k-j)",
            Algorithm::Strassen => "Strassen",
            Algorithm::ParallelStrassen => "Strassen (parallel)",
        }
    }

    /// Whether the algorithm accepts an `n x n` input.
    pub fn supports(&self, n: usize) -> bool {
        match self {
            Algorithm::Naive | Algorithm::CacheOptimized => true,
            Algorithm::Strassen | Algorithm::ParallelStrassen => n.is_power_of_two(),
        }
    }
}

/// Outcome of validating one algorithm's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The naive product every other result is compared against.
    Reference,
    Correct,
    Incorrect,
    /// The algorithm does not accept this size.
    NotApplicable,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Reference => "reference",
            Verdict::Correct => "correct",
            Verdict::Incorrect => "INCORRECT",
            Verdict::NotApplicable => "n/a",
        }
    }
}

/// One row of the benchmark report.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    pub size: usize,
    pub algorithm: Algorithm,
    /// Mean wall time of the timed runs; `None` when not applicable.
    pub mean: Option<Duration>,
    /// Largest resident set size sampled after a timed run, in KiB.
    pub resident_kb: Option<u64>,
    pub verdict: Verdict,
}

impl BenchRecord {
    pub fn mean_ms(&self) -> Option<f64> {
        self.mean.map(|d| d.as_secs_f64() * 1000.0)
    }
}

/// Runs `f` once untimed, then `repetitions` timed runs.
///
/// Returns the mean duration of the timed runs, the peak resident set size
/// sampled after each of them, and the result of the last run. The first error
/// aborts the measurement.
pub fn time_repeated<F>(repetitions: usize, mut f: F) -> Result<(Duration, Option<u64>, Matrix)>
where
    F: FnMut() -> Result<Matrix>,
{
    let mut result = f()?;
    let mut total = Duration::ZERO;
    let mut peak: Option<u64> = None;

    for _ in 0..repetitions {
        let start = Instant::now();
        result = f()?;
        total += start.elapsed();

        if let Some(kb) = resident_kb() {
            peak = Some(peak.map_or(kb, |p| p.max(kb)));
        }
    }

    let mean = total / repetitions.max(1) as u32;
    Ok((mean, peak, result))
}

/// Runs the whole benchmark. See [`run_with`].
pub fn run(config: &BenchConfig) -> Result<Vec<BenchRecord>> {
    run_with(config, |_| {})
}

/// Runs the whole benchmark, calling `on_record` as soon as each record is ready.
///
/// # Errors
///
/// Returns the first configuration or multiplication error. Validation
/// failures are not errors; they are reported as [`Verdict::Incorrect`].
pub fn run_with<F>(config: &BenchConfig, mut on_record: F) -> Result<Vec<BenchRecord>>
where
    F: FnMut(&BenchRecord),
{
    config.validate()?;

    let sequential = config.strassen_config();
    let parallel = sequential.parallel(config.parallel_depth);
    let mut records = Vec::with_capacity(config.sizes.len() * Algorithm::ALL.len());

    for (idx, &size) in config.sizes.iter().enumerate() {
        let (a, b) = match config.seed {
            Some(seed) => {
                let base = seed.wrapping_add(2 * idx as u64);
                (
                    generate_random_seeded(size, size, base),
                    generate_random_seeded(size, size, base.wrapping_add(1)),
                )
            }
            None => (generate_random(size, size), generate_random(size, size)),
        };

        let (mean, resident_kb, reference) =
            time_repeated(config.repetitions, || multiply_naive(&a, &b))?;
        let record = BenchRecord {
            size,
            algorithm: Algorithm::Naive,
            mean: Some(mean),
            resident_kb,
            verdict: Verdict::Reference,
        };
        on_record(&record);
        records.push(record);

        for algorithm in [
            Algorithm::CacheOptimized,
            Algorithm::Strassen,
            Algorithm::ParallelStrassen,
        ] {
            let record = if algorithm.supports(size) {
                let (mean, resident_kb, product) = time_repeated(config.repetitions, || match algorithm {
                    Algorithm::Strassen => multiply_strassen_with(&a, &b, &sequential),
                    Algorithm::ParallelStrassen => multiply_strassen_with(&a, &b, &parallel),
                    _ => multiply_naive_ikj(&a, &b),
                })?;
                let verdict = if approx_equal(&product, &reference, config.epsilon) {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                };
                BenchRecord {
                    size,
                    algorithm,
                    mean: Some(mean),
                    resident_kb,
                    verdict,
                }
            } else {
                BenchRecord {
                    size,
                    algorithm,
                    mean: None,
                    resident_kb: None,
                    verdict: Verdict::NotApplicable,
                }
            };
            on_record(&record);
            records.push(record);
        }
    }

    Ok(records)
}

/// Column header matching [`format_record`].
pub fn table_header() -> String {
    format!(
        "{:<8} {:<22} {:>12} {:>14}  {}",
        "Size", "Algorithm", "Time (ms)", "Memory (MB)", "Check"
    )
}

/// One aligned table line.
pub fn format_record(record: &BenchRecord) -> String {
    let time = record
        .mean_ms()
        .map_or_else(|| "n/a".to_string(), |ms| format!("{:.2}", ms));
    let memory = record
        .resident_kb
        .map_or_else(|| "n/a".to_string(), |kb| format!("{:.2}", kb as f64 / 1024.0));

    format!(
        "{:<8} {:<22} {:>12} {:>14}  {}",
        record.size,
        record.algorithm.name(),
        time,
        memory,
        record.verdict.label()
    )
}

/// Renders all records as a table, with a blank line between sizes.
pub fn render_table(records: &[BenchRecord]) -> String {
    let mut out = String::new();
    let header = table_header();
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    let mut previous_size = None;
    for record in records {
        if previous_size.is_some() && previous_size != Some(record.size) {
            out.push('\n');
        }
        previous_size = Some(record.size);
        let _ = writeln!(out, "{}", format_record(record));
    }
    out
}

/// Renders records as CSV with the header `n,algorithm,time_ms,mem_kb,check`.
/// Missing measurements are left empty.
pub fn to_csv(records: &[BenchRecord]) -> String {
    let mut out = String::from("n,algorithm,time_ms,mem_kb,check\n");
    for record in records {
        let time = record.mean_ms().map(|ms| format!("{:.4}", ms)).unwrap_or_default();
        let memory = record.resident_kb.map(|kb| kb.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            record.size,
            record.algorithm.name(),
            time,
            memory,
            record.verdict.label()
        );
    }
    out
}

/// Writes [`to_csv`] output to `path`.
pub fn write_csv(path: &Path, records: &[BenchRecord]) -> std::io::Result<()> {
    fs::write(path, to_csv(records))
}

/// Current resident set size of this process in KiB, read from
/// `/proc/self/status`.
#[cfg(target_os = "linux")]
pub fn resident_kb() -> Option<u64> {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_resident_kb(&status))
}

/// Resident set size sampling is only implemented on Linux.
#[cfg(not(target_os = "linux"))]
pub fn resident_kb() -> Option<u64> {
    None
}

/// Extracts the `VmRSS:` value (in kB) from a `/proc/<pid>/status` dump.
pub fn parse_resident_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
}
