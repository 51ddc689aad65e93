//! Background eviction of entries that expired long ago.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::audit_event::{Level, Package};
use crate::domain::audit_logger::AuditLogger;
use crate::domain::repositories::EntryRepository;

/// Removes entries whose expiry is older than `retention` and returns how many went.
///
/// Entries that are expired but still inside the retention window stay
/// available for stats. A retention reaching past the earliest representable
/// instant evicts nothing.
pub fn sweep_expired<R: EntryRepository + ?Sized>(repository: &R, retention: Duration) -> usize {
    let Some(cutoff) = Utc::now().checked_sub_signed(retention) else {
        warn!("Retention of {} min is out of range, skipping sweep", retention.num_minutes());
        return 0;
    };
    repository.remove_expired_before(cutoff)
}

/// Runs [`sweep_expired`] every `interval` until the task is aborted.
pub async fn run_entry_reaper<R: EntryRepository + ?Sized>(
    repository: Arc<R>,
    retention: Duration,
    interval: std::time::Duration,
    audit: AuditLogger,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Entry reaper started (retention: {} min, interval: {:?})",
        retention.num_minutes(),
        interval
    );

    loop {
        ticker.tick().await;

        let removed = sweep_expired(repository.as_ref(), retention);
        if removed > 0 {
            info!("Reaper evicted {} expired entries", removed);
            audit.backend(
                Level::Info,
                Package::CronJob,
                format!("Evicted {removed} expired entries"),
            );
        } else {
            debug!("Reaper found nothing to evict");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockEntryRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_sweep_uses_retention_cutoff() {
        let mut mock_repo = MockEntryRepository::new();
        let retention = Duration::minutes(60);
        let before = Utc::now() - retention;

        mock_repo
            .expect_remove_expired_before()
            .withf(move |cutoff| *cutoff >= before && *cutoff <= Utc::now() - retention)
            .times(1)
            .returning(|_| 3);

        assert_eq!(sweep_expired(&mock_repo, retention), 3);
    }

    #[test]
    fn test_sweep_with_unrepresentable_retention_is_noop() {
        let mut mock_repo = MockEntryRepository::new();
        mock_repo.expect_remove_expired_before().times(0);

        assert_eq!(sweep_expired(&mock_repo, Duration::MAX), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_ticks_repeatedly() {
        let sweeps = Arc::new(AtomicUsize::new(0));
        let counter = sweeps.clone();

        let mut mock_repo = MockEntryRepository::new();
        mock_repo
            .expect_remove_expired_before()
            .returning(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                0
            });

        let (audit, _rx) = AuditLogger::channel(8);
        let handle = tokio::spawn(run_entry_reaper(
            Arc::new(mock_repo),
            Duration::minutes(5),
            std::time::Duration::from_secs(10),
            audit,
        ));

        tokio::time::sleep(std::time::Duration::from_secs(25)).await;
        handle.abort();
        let _ = handle.await;

        assert!(sweeps.load(Ordering::SeqCst) >= 2);
    }
}
