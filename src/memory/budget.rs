//! # Memory Budget Implementation
//!
//! This module implements hard-limit byte accounting for column slot arrays.
//! A `MemoryBudget` is shared by reference between any
//! number of columns (through `BudgetedAllocator`) and refuses a charge that
//! would push total usage past the limit.
//!
//! ## Design Principles
//!
//! 1. **Hard Limits**: Charges that would exceed the budget fail immediately
//! 2. **Lock-free**: All counters are atomics, so a budget may be shared
//!    across threads even though columns themselves are single-threaded
//! 3. **Exact accounting**: Charges are the allocator layout sizes, so a
//!    release always matches its charge
//!
//! ## Memory Accounting
//!
//! Tracked memory includes:
//! - Slot arrays (8 bytes per reserved slot)
//! - Every intermediate array during reallocation (old and new arrays are
//!   briefly live together)
//!
//! Untracked:
//! - Out-of-line text, which belongs to its `TextArena`
//! - Column headers themselves

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use eyre::{bail, Result};
use sysinfo::System;

pub use crate::config::{DEFAULT_BUDGET_PERCENT, MIN_BUDGET_FLOOR};

static SYSTEM_TOTAL_MEMORY: OnceLock<usize> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct BudgetStats {
    pub total_limit: usize,
    pub total_used: usize,
    pub peak_used: usize,
    pub allocations: usize,
}

impl BudgetStats {
    pub fn available(&self) -> usize {
        self.total_limit.saturating_sub(self.total_used)
    }

    pub fn utilization_percent(&self) -> f64 {
        if self.total_limit == 0 {
            return 0.0;
        }
        (self.total_used as f64 / self.total_limit as f64) * 100.0
    }
}

impl std::fmt::Display for BudgetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "used:{}/{},peak:{},allocations:{}",
            self.total_used, self.total_limit, self.peak_used, self.allocations
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryError {
    pub requested: usize,
    pub available: usize,
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "memory budget exceeded: requested {} bytes but only {} available",
            self.requested, self.available
        )
    }
}

impl std::error::Error for MemoryError {}

#[derive(Debug)]
pub struct MemoryBudget {
    total_limit: AtomicUsize,
    used: AtomicUsize,
    peak: AtomicUsize,
    allocations: AtomicUsize,
}

impl MemoryBudget {
    pub fn auto_detect() -> Self {
        let total_memory = *SYSTEM_TOTAL_MEMORY.get_or_init(|| {
            let mut sys = System::new();
            sys.refresh_memory();
            sys.total_memory() as usize
        });

        let budget = (total_memory / 100).saturating_mul(DEFAULT_BUDGET_PERCENT);
        Self::with_limit(budget)
    }

    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(MIN_BUDGET_FLOOR);

        Self {
            total_limit: AtomicUsize::new(limit),
            used: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            allocations: AtomicUsize::new(0),
        }
    }

    pub fn total_limit(&self) -> usize {
        self.total_limit.load(Ordering::Acquire)
    }

    pub fn total_used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    pub fn peak_used(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    pub fn available(&self) -> usize {
        self.total_limit().saturating_sub(self.total_used())
    }

    pub fn can_allocate(&self, bytes: usize) -> bool {
        self.available() >= bytes
    }

    pub fn allocate(&self, bytes: usize) -> Result<()> {
        if bytes == 0 {
            return Ok(());
        }

        let total_limit = self.total_limit();

        loop {
            let current = self.used.load(Ordering::Acquire);
            let new_used = match current.checked_add(bytes) {
                Some(n) if n <= total_limit => n,
                _ => bail!(MemoryError {
                    requested: bytes,
                    available: total_limit.saturating_sub(current),
                }),
            };

            match self.used.compare_exchange_weak(
                current,
                new_used,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.peak.fetch_max(new_used, Ordering::AcqRel);
                    self.allocations.fetch_add(1, Ordering::Relaxed);
                    return Ok(());
                }
                Err(_) => continue,
            }
        }
    }

    pub fn release(&self, bytes: usize) {
        if bytes == 0 {
            return;
        }

        loop {
            let current = self.used.load(Ordering::Acquire);
            let new_value = current.saturating_sub(bytes);

            match self.used.compare_exchange_weak(
                current,
                new_value,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(_) => continue,
            }
        }
    }

    pub fn try_allocate(&self, bytes: usize) -> bool {
        self.allocate(bytes).is_ok()
    }

    pub fn stats(&self) -> BudgetStats {
        BudgetStats {
            total_limit: self.total_limit(),
            total_used: self.total_used(),
            peak_used: self.peak_used(),
            allocations: self.allocations.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.used.store(0, Ordering::Release);
        self.peak.store(0, Ordering::Release);
        self.allocations.store(0, Ordering::Release);
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::auto_detect()
    }
}
