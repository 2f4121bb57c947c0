//! Run observers.
//!
//! Strategies report every processed page and every recovered error to a [Reporter].
//! [Progress] is the default one: it counts, logs progress every now and then,
//! and produces an [ExtractionSummary] at the end of the run.
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{error, info};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Error;
use crate::filtering::Rejection;

use super::PageOutcome;

/// Receives one call per page and one call per recovered error.
///
/// Implementations are shared between workers.
pub trait Reporter: Sync {
    fn page(&self, outcome: &PageOutcome);
    fn error(&self, error: &Error);
}

/// Rejections per rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCounts([usize; 13]);

impl RuleCounts {
    pub fn add(&mut self, rejection: Rejection) {
        self.0[rejection.rule() - 1] += 1;
    }

    pub fn get(&self, rejection: Rejection) -> usize {
        self.0[rejection.rule() - 1]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Serialized as a `rule name -> count` map, in rule order.
impl Serialize for RuleCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Rejection::ALL.len()))?;
        for rejection in Rejection::ALL {
            map.serialize_entry(rejection.name(), &self.get(rejection))?;
        }
        map.end()
    }
}

/// Ratio in percents, 0 when there is nothing to divide.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// End-of-run counts of an extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub pages: usize,
    pub excluded: usize,
    pub kept: usize,
    pub rejected: usize,
    pub rejections: RuleCounts,
    pub errors: usize,
    pub kept_percent: f64,
}

impl fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} pages ({} excluded), {} errors",
            self.pages, self.excluded, self.errors
        )?;
        write!(
            f,
            "{} sentences kept, {} rejected ({:.2}% kept)",
            self.kept, self.rejected, self.kept_percent
        )?;
        for rejection in Rejection::ALL {
            let count = self.rejections.get(rejection);
            if count > 0 {
                write!(f, "\n  {}: {}", rejection, count)?;
            }
        }
        Ok(())
    }
}

/// Counting [Reporter].
///
/// Each counter has its own lock, held for the update only.
#[derive(Debug, Default)]
pub struct Progress {
    log_every: usize,
    pages: Mutex<usize>,
    excluded: Mutex<usize>,
    kept: Mutex<usize>,
    rejected: Mutex<usize>,
    rules: Mutex<RuleCounts>,
    errors: Mutex<usize>,
}

fn lock<T>(counter: &Mutex<T>) -> MutexGuard<'_, T> {
    counter.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Progress {
    /// Log an info line every `log_every` pages. `0` disables logging.
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every,
            ..Default::default()
        }
    }

    pub fn kept(&self) -> usize {
        *lock(&self.kept)
    }

    pub fn errors(&self) -> usize {
        *lock(&self.errors)
    }

    pub fn summary(&self) -> ExtractionSummary {
        let kept = *lock(&self.kept);
        let rejected = *lock(&self.rejected);
        ExtractionSummary {
            pages: *lock(&self.pages),
            excluded: *lock(&self.excluded),
            kept,
            rejected,
            rejections: *lock(&self.rules),
            errors: *lock(&self.errors),
            kept_percent: percent(kept, kept + rejected),
        }
    }
}

impl Reporter for Progress {
    fn page(&self, outcome: &PageOutcome) {
        let pages = {
            let mut pages = lock(&self.pages);
            *pages += 1;
            *pages
        };

        match outcome {
            PageOutcome::Excluded => *lock(&self.excluded) += 1,
            PageOutcome::Processed { kept, rejected } => {
                *lock(&self.kept) += kept.len();
                if !rejected.is_empty() {
                    *lock(&self.rejected) += rejected.len();
                    let mut rules = lock(&self.rules);
                    for rejection in rejected {
                        rules.add(*rejection);
                    }
                }
            }
        }

        if self.log_every > 0 && pages % self.log_every == 0 {
            info!("{} pages processed, {} sentences kept", pages, self.kept());
        }
    }

    fn error(&self, e: &Error) {
        error!("{}", e);
        *lock(&self.errors) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{Progress, Reporter};
    use crate::error::Error;
    use crate::filtering::Rejection;
    use crate::pipelines::PageOutcome;

    #[test]
    fn counts() {
        let p = Progress::new(0);
        p.page(&PageOutcome::Excluded);
        p.page(&PageOutcome::Processed {
            kept: vec!["a".to_string(), "b".to_string()],
            rejected: vec![Rejection::TooShort, Rejection::NoVerb, Rejection::TooShort],
        });
        p.error(&Error::Truncated("x".to_string()));

        let s = p.summary();
        assert_eq!(s.pages, 2);
        assert_eq!(s.excluded, 1);
        assert_eq!(s.kept, 2);
        assert_eq!(s.rejected, 3);
        assert_eq!(s.rejections.get(Rejection::TooShort), 2);
        assert_eq!(s.rejections.get(Rejection::NoVerb), 1);
        assert_eq!(s.rejections.total(), 3);
        assert_eq!(s.errors, 1);
        assert!((s.kept_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn concurrent_updates() {
        let p = Progress::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        p.page(&PageOutcome::Processed {
                            kept: vec!["a".to_string()],
                            rejected: vec![],
                        });
                    }
                });
            }
        });
        assert_eq!(p.summary().pages, 800);
        assert_eq!(p.kept(), 800);
    }

    #[test]
    fn json_summary() {
        let p = Progress::new(0);
        p.page(&PageOutcome::Processed {
            kept: vec![],
            rejected: vec![Rejection::Unbalanced],
        });
        let json = serde_json::to_value(p.summary()).unwrap();
        assert_eq!(json["rejections"]["unbalanced"], 1);
        assert_eq!(json["rejections"]["too_short"], 0);
        assert_eq!(json["pages"], 1);
    }
}
