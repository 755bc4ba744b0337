use std::time::Duration;
use tracing::info;

/// Sleep schedule between requests. A rate-limit hint replaces the base
/// delay for the next wait only.
#[derive(Debug, Clone)]
pub struct Pacer {
    base: Duration,
    pending: Option<Duration>,
}

impl Pacer {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            pending: None,
        }
    }

    pub fn rate_limited(&mut self, delay: Duration) {
        self.pending = Some(delay);
    }

    pub fn next_delay(&mut self) -> Duration {
        self.pending.take().unwrap_or(self.base)
    }

    pub async fn wait(&mut self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        if delay != self.base {
            info!("Waiting for {} seconds (rate limit)...", delay.as_secs());
        }
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_applies_once_then_base_resumes() {
        let mut pacer = Pacer::new(Duration::ZERO);
        assert_eq!(pacer.next_delay(), Duration::ZERO);

        pacer.rate_limited(Duration::from_secs(3));
        assert_eq!(pacer.next_delay(), Duration::from_secs(3));
        assert_eq!(pacer.next_delay(), Duration::ZERO);
    }

    #[test]
    fn latest_hint_wins() {
        let mut pacer = Pacer::new(Duration::from_secs(6));
        pacer.rate_limited(Duration::from_secs(4));
        pacer.rate_limited(Duration::from_secs(2));
        assert_eq!(pacer.next_delay(), Duration::from_secs(2));
        assert_eq!(pacer.next_delay(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_the_hint() {
        let mut pacer = Pacer::new(Duration::ZERO);
        pacer.rate_limited(Duration::from_secs(2));

        let start = tokio::time::Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
