//! Tuning knobs, errors and a sorter with its own worker pool.

use crate::algo;
use crate::core::{BytesSortable, NumberSortable, Split, StringSortable};
use log::debug;
use thiserror::Error;

/// Buckets at or below this size are insertion sorted.
pub const DEFAULT_INSERTION_THRESHOLD: usize = 32;

/// Buckets at or above this size become their own parallel task.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 14;

/// Errors raised while setting up a [`Sorter`].
///
/// Sorting itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// `Options::threads` was `Some(0)`.
    #[error("a sorter needs at least one worker thread")]
    NoThreads,
    /// rayon could not start the worker pool.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Tuning for a single sort.
///
/// None of these settings affect the result, only how it is computed.
///
/// # Examples
///
/// ```
/// use keysort::{sort_by_number_with, Options, Uint64Slice};
///
/// let options = Options::default().parallel(false).insertion_threshold(16);
/// let mut data = vec![3u64, 1, 2];
/// sort_by_number_with(Uint64Slice(&mut data), &options);
///
/// assert_eq!(data, vec![1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Buckets with at most this many elements are insertion sorted.
    pub insertion_threshold: usize,
    /// Buckets with at least this many elements become their own task.
    pub parallel_threshold: usize,
    /// Run large sorts on the rayon pool. `false` keeps everything on the
    /// calling thread.
    pub parallel: bool,
    /// Worker count for a [`Sorter`]'s pool. `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            insertion_threshold: DEFAULT_INSERTION_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            parallel: true,
            threads: None,
        }
    }
}

impl Options {
    /// Sets [`Options::insertion_threshold`].
    pub fn insertion_threshold(mut self, threshold: usize) -> Self {
        self.insertion_threshold = threshold;
        self
    }

    /// Sets [`Options::parallel_threshold`].
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets [`Options::parallel`].
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets [`Options::threads`].
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Sorts with fixed [`Options`] on a dedicated, bounded rayon pool.
///
/// The free functions such as [`crate::sort_by_number`] run on rayon's global
/// pool. A `Sorter` keeps sorting work off it.
///
/// # Examples
///
/// ```
/// use keysort::{Options, Sorter, StringSlice};
///
/// let sorter = Sorter::new(Options::default().threads(2)).unwrap();
/// let mut data = vec!["pear", "fig", "apple"];
/// sorter.sort_by_string(StringSlice(&mut data));
///
/// assert_eq!(data, vec!["apple", "fig", "pear"]);
/// ```
#[derive(Debug)]
pub struct Sorter {
    options: Options,
    pool: Option<rayon::ThreadPool>,
}

impl Sorter {
    /// Creates a sorter, building a worker pool when `options.threads` is set.
    pub fn new(options: Options) -> Result<Self> {
        let pool = match options.threads {
            Some(0) => return Err(Error::NoThreads),
            Some(threads) => {
                debug!("building sort pool with {} threads", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("keysort-{i}"))
                    .build()?;
                Some(pool)
            }
            None => None,
        };
        Ok(Self { options, pool })
    }

    /// Returns the options every sort on this sorter uses.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Like [`crate::sort_by_number`], on this sorter's pool and options.
    pub fn sort_by_number<S: NumberSortable + Split + Send>(&self, data: S) {
        self.run(|| algo::sort_by_number_with(data, &self.options));
    }

    /// Like [`crate::sort_by_string`], on this sorter's pool and options.
    pub fn sort_by_string<S: StringSortable + Split + Send>(&self, data: S) {
        self.run(|| algo::sort_by_string_with(data, &self.options));
    }

    /// Like [`crate::sort_by_bytes`], on this sorter's pool and options.
    pub fn sort_by_bytes<S: BytesSortable + Split + Send>(&self, data: S) {
        self.run(|| algo::sort_by_bytes_with(data, &self.options));
    }

    fn run<F: FnOnce() + Send>(&self, op: F) {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self {
            options: Options::default(),
            pool: None,
        }
    }
}
