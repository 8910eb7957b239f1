use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use stockroom_infra::{
    activity_log::{ActivityLog, BoundedActivityLog},
    record_store::InMemoryRecordStore,
    service::LedgerService,
};
use stockroom_ledger::ActivityEntry;

/// API-local activity log that retains entries and broadcasts each append
/// to SSE subscribers.
#[derive(Debug)]
pub struct RealtimeActivityLog {
    inner: BoundedActivityLog,
    realtime_tx: broadcast::Sender<ActivityEntry>,
}

impl RealtimeActivityLog {
    pub fn new(realtime_tx: broadcast::Sender<ActivityEntry>) -> Self {
        Self {
            inner: BoundedActivityLog::default(),
            realtime_tx,
        }
    }
}

impl ActivityLog for RealtimeActivityLog {
    fn append(&self, entry: ActivityEntry) {
        self.inner.append(entry.clone());

        // Notify live subscribers (lossy; no backpressure on the ledger).
        let _ = self.realtime_tx.send(entry);
    }

    fn recent(&self) -> Vec<ActivityEntry> {
        self.inner.recent()
    }
}

type ApiLedger = LedgerService<Arc<InMemoryRecordStore>, Arc<RealtimeActivityLog>>;

pub struct AppServices {
    ledger: ApiLedger,
    realtime_tx: broadcast::Sender<ActivityEntry>,
}

impl AppServices {
    pub fn ledger(&self) -> &ApiLedger {
        &self.ledger
    }

    pub fn realtime_tx(&self) -> &broadcast::Sender<ActivityEntry> {
        &self.realtime_tx
    }
}

/// Wire up the shared service graph used by every route.
pub fn build_services() -> AppServices {
    let (realtime_tx, _) = broadcast::channel(256);

    let store = Arc::new(InMemoryRecordStore::new());
    let log = Arc::new(RealtimeActivityLog::new(realtime_tx.clone()));

    AppServices {
        ledger: LedgerService::new(store, log),
        realtime_tx,
    }
}

/// Build the SSE stream of activity entries (used by `/activity/stream`).
pub fn activity_sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.realtime_tx().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|entry| match entry {
        Ok(entry) => {
            let data = serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default()
                .event(entry.action.action_type())
                .data(data)))
        }
        // Lagged receivers skip dropped entries rather than erroring out.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
