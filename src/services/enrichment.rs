//! Age, gender and nationality lookups for new people.

use crate::clients::EnrichClient;
use crate::models::person::Enrichment;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Source of derived person attributes, looked up by first name.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn age(&self, name: &str) -> Result<i32>;

    async fn gender(&self, name: &str) -> Result<String>;

    async fn nationality(&self, name: &str) -> Result<String>;
}

#[async_trait]
impl Enricher for EnrichClient {
    async fn age(&self, name: &str) -> Result<i32> {
        self.agify.age(name).await
    }

    async fn gender(&self, name: &str) -> Result<String> {
        self.genderize.gender(name).await
    }

    async fn nationality(&self, name: &str) -> Result<String> {
        self.nationalize.nationality(name).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    Concurrent,
    Sequential,
}

impl FanOut {
    #[must_use]
    pub const fn from_flag(concurrent: bool) -> Self {
        if concurrent {
            Self::Concurrent
        } else {
            Self::Sequential
        }
    }
}

fn settle<T>(lookup: &'static str, name: &str, result: Result<T>) -> Option<T> {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!("enrichment_lookups_total", "lookup" => lookup, "outcome" => outcome)
        .increment(1);

    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(lookup, name, error = %e, "Enrichment lookup failed");
            None
        }
    }
}

/// Runs the three lookups. A failed lookup leaves its field empty and never
/// fails the whole enrichment.
pub async fn enrich(enricher: &dyn Enricher, name: &str, fan_out: FanOut) -> Enrichment {
    if name.trim().is_empty() {
        return Enrichment::default();
    }

    let (age, gender, nationality) = match fan_out {
        FanOut::Concurrent => {
            tokio::join!(
                enricher.age(name),
                enricher.gender(name),
                enricher.nationality(name)
            )
        }
        FanOut::Sequential => (
            enricher.age(name).await,
            enricher.gender(name).await,
            enricher.nationality(name).await,
        ),
    };

    Enrichment {
        age: settle("age", name, age),
        gender: settle("gender", name, gender),
        nationality: settle("nationality", name, nationality),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fixed answers; `None` makes that lookup fail.
    pub struct FakeEnricher {
        pub age: Option<i32>,
        pub gender: Option<&'static str>,
        pub nationality: Option<&'static str>,
        pub delay: Duration,
        pub calls: AtomicUsize,
    }

    impl FakeEnricher {
        pub const fn new(
            age: Option<i32>,
            gender: Option<&'static str>,
            nationality: Option<&'static str>,
        ) -> Self {
            Self {
                age,
                gender,
                nationality,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        async fn answer<T: Clone>(&self, value: Option<T>, lookup: &str) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            value.ok_or_else(|| anyhow::anyhow!("{lookup} service unavailable"))
        }
    }

    #[async_trait]
    impl Enricher for FakeEnricher {
        async fn age(&self, _name: &str) -> Result<i32> {
            self.answer(self.age, "agify").await
        }

        async fn gender(&self, _name: &str) -> Result<String> {
            self.answer(self.gender.map(str::to_string), "genderize").await
        }

        async fn nationality(&self, _name: &str) -> Result<String> {
            self.answer(self.nationality.map(str::to_string), "nationalize")
                .await
        }
    }

    #[tokio::test]
    async fn test_enrich_fills_all_fields() {
        let fake = FakeEnricher::new(Some(1), Some(""), Some(""));

        let enrichment = enrich(&fake, "Leo", FanOut::Concurrent).await;

        assert_eq!(
            enrichment,
            Enrichment {
                age: Some(1),
                gender: Some(String::new()),
                nationality: Some(String::new()),
            }
        );
    }

    #[tokio::test]
    async fn test_one_failed_lookup_keeps_the_others() {
        for fan_out in [FanOut::Concurrent, FanOut::Sequential] {
            let fake = FakeEnricher::new(Some(33), None, Some("KR"));

            let enrichment = enrich(&fake, "Leo", fan_out).await;

            assert_eq!(enrichment.age, Some(33));
            assert_eq!(enrichment.gender, None);
            assert_eq!(enrichment.nationality.as_deref(), Some("KR"));
        }
    }

    #[tokio::test]
    async fn test_empty_name_skips_lookups() {
        let fake = FakeEnricher::new(Some(1), Some("male"), Some("US"));

        let enrichment = enrich(&fake, "  ", FanOut::Concurrent).await;

        assert_eq!(enrichment, Enrichment::default());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_overlap() {
        let mut fake = FakeEnricher::new(Some(1), Some("male"), Some("US"));
        fake.delay = Duration::from_millis(150);

        let started = tokio::time::Instant::now();
        enrich(&fake, "Leo", FanOut::Sequential).await;
        assert!(started.elapsed() >= Duration::from_millis(450));

        let started = tokio::time::Instant::now();
        enrich(&fake, "Leo", FanOut::Concurrent).await;
        assert!(started.elapsed() < Duration::from_millis(450));
    }
}
