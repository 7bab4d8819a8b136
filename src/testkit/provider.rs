//! Scripted provider mocks.
//!
//! Responses are keyed by contract address (security) or series id
//! (history). Unknown keys yield "no data". Every mock carries a
//! [`CallProbe`] that counts calls and records the highest number of calls
//! that were in flight at the same time.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ReturnSeries, SecurityAssessment};
use crate::error::ProviderError;
use crate::port::outbound::{HistoryProvider, SecurityProvider};

#[derive(Debug, Default)]
struct ProbeState {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

/// Shared call counter and concurrency high-water mark.
#[derive(Debug, Clone, Default)]
pub struct CallProbe {
    state: Arc<ProbeState>,
}

impl CallProbe {
    /// Total calls started.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously running calls observed.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.state.high_water.load(Ordering::SeqCst)
    }

    fn enter(&self) -> InFlight {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.high_water.fetch_max(now, Ordering::SeqCst);
        InFlight {
            state: Arc::clone(&self.state),
        }
    }
}

/// Marks one call as in flight until dropped.
struct InFlight {
    state: Arc<ProbeState>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scripted [`SecurityProvider`].
#[derive(Debug, Default)]
pub struct ScriptedSecurity {
    responses: HashMap<String, SecurityAssessment>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    delay: Option<Duration>,
    probe: CallProbe,
}

impl ScriptedSecurity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `address` with `assessment`.
    #[must_use]
    pub fn with(mut self, address: &str, assessment: SecurityAssessment) -> Self {
        self.responses.insert(address.to_string(), assessment);
        self
    }

    /// Fail calls for `address` with HTTP 503.
    #[must_use]
    pub fn failing(mut self, address: &str) -> Self {
        self.failing.insert(address.to_string());
        self
    }

    /// Panic inside calls for `address`.
    #[must_use]
    pub fn panicking(mut self, address: &str) -> Self {
        self.panicking.insert(address.to_string());
        self
    }

    /// Sleep for `delay` inside every call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle on this mock's call statistics.
    #[must_use]
    pub fn probe(&self) -> CallProbe {
        self.probe.clone()
    }
}

#[async_trait]
impl SecurityProvider for ScriptedSecurity {
    fn name(&self) -> &'static str {
        "scripted-security"
    }

    async fn assess(
        &self,
        _chain: &str,
        address: &str,
    ) -> Result<Option<SecurityAssessment>, ProviderError> {
        let _guard = self.probe.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panicking.contains(address) {
            panic!("scripted security panic for {address}");
        }
        if self.failing.contains(address) {
            return Err(ProviderError::Status {
                provider: "scripted-security",
                status: 503,
            });
        }
        Ok(self.responses.get(address).cloned())
    }
}

/// Scripted [`HistoryProvider`].
#[derive(Debug, Default)]
pub struct ScriptedHistory {
    responses: HashMap<String, ReturnSeries>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    probe: CallProbe,
}

impl ScriptedHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `series_id` with `series`.
    #[must_use]
    pub fn with(mut self, series_id: &str, series: ReturnSeries) -> Self {
        self.responses.insert(series_id.to_string(), series);
        self
    }

    /// Fail calls for `series_id` with a malformed-payload error.
    #[must_use]
    pub fn failing(mut self, series_id: &str) -> Self {
        self.failing.insert(series_id.to_string());
        self
    }

    /// Sleep for `delay` inside every call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle on this mock's call statistics.
    #[must_use]
    pub fn probe(&self) -> CallProbe {
        self.probe.clone()
    }
}

#[async_trait]
impl HistoryProvider for ScriptedHistory {
    fn name(&self) -> &'static str {
        "scripted-history"
    }

    async fn series(
        &self,
        series_id: &str,
        _currency: &str,
        _lookback_days: u32,
    ) -> Result<ReturnSeries, ProviderError> {
        let _guard = self.probe.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(series_id) {
            return Err(ProviderError::Malformed {
                provider: "scripted-history",
                reason: "truncated payload".to_string(),
            });
        }
        Ok(self.responses.get(series_id).cloned().unwrap_or_default())
    }
}
