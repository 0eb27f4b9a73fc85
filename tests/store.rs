#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pirscreen::db::motions::{EventStore, SqliteEventStore, StoreError};
    use pirscreen::libs::event::{MotionEvent, MotionEventKind};
    use pirscreen::libs::recorder::EventRecorder;
    use rusqlite::Connection;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Fresh event store file in a temporary directory.
    struct StoreTestContext {
        temp_dir: TempDir,
        store: SqliteEventStore,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = SqliteEventStore::new(temp_dir.path().join("motion.db"));
            StoreTestContext { temp_dir, store }
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_append_writes_one_row_per_event(ctx: &mut StoreTestContext) {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        let idle = MotionEvent::at("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_secs_f64(600.5), at);
        let back = MotionEvent::at("HDMIPi", MotionEventKind::MotionAfterInactivity, Duration::from_secs(1800), at);

        ctx.store.append(&idle).unwrap();
        ctx.store.append(&back).unwrap();

        let rows = ctx.store.recent(10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event, "MOTION_AFTER_INACTIVITY", "newest row first");
        assert_eq!(rows[1].event, "NO_MOTION_FOR");
        assert_eq!(rows[1].name, "HDMIPi");
        assert!((rows[1].value - 600.5).abs() < 1e-9);
        assert_eq!(rows[1].created_at_utc, at.naive_utc());
        assert_eq!(rows[1].created_at, idle.local_time().naive_local());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_recent_honours_limit(ctx: &mut StoreTestContext) {
        for minutes in 11..16 {
            let event = MotionEvent::new("RaspberryPi", MotionEventKind::NoMotionFor, Duration::from_secs(minutes * 60));
            ctx.store.append(&event).unwrap();
        }

        let rows = ctx.store.recent(3).unwrap();
        assert_eq!(rows.len(), 3);
        assert!((rows[0].value - 900.0).abs() < 1e-9);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_recent_on_empty_store(ctx: &mut StoreTestContext) {
        assert!(ctx.store.recent(20).unwrap().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_unreachable_store_is_connection_failure(ctx: &mut StoreTestContext) {
        let store = SqliteEventStore::new(ctx.temp_dir.path().join("unmounted").join("share").join("motion.db"));
        let event = MotionEvent::new("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_secs(601));

        assert!(matches!(store.append(&event), Err(StoreError::ConnectionFailed(_))));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_incompatible_table_is_write_failure(ctx: &mut StoreTestContext) {
        let conn = Connection::open(ctx.store.path()).unwrap();
        conn.execute("CREATE TABLE motion (id INTEGER PRIMARY KEY)", []).unwrap();
        conn.close().unwrap();

        let event = MotionEvent::new("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_secs(601));

        assert!(matches!(ctx.store.append(&event), Err(StoreError::WriteFailed(_))));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_recorder_reports_delivery(ctx: &mut StoreTestContext) {
        let recorder = EventRecorder::new(Box::new(ctx.store.clone()));
        let event = MotionEvent::new("HDMIPi", MotionEventKind::MotionAfterInactivity, Duration::from_secs(700));

        assert!(recorder.record(event));
        assert_eq!(ctx.store.recent(1).unwrap().len(), 1);

        let lost = EventRecorder::new(Box::new(SqliteEventStore::new(ctx.temp_dir.path().join("missing").join("motion.db"))));
        let event = MotionEvent::new("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_secs(700));
        assert!(!lost.record(event), "a failed write is dropped, not retried");
    }

    #[test]
    fn test_event_display_row() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        let event = MotionEvent::at("HDMIPi", MotionEventKind::NoMotionFor, Duration::from_millis(600_250), at);

        let text = event.to_string();
        assert!(text.starts_with("(HDMIPi, NO_MOTION_FOR, 600.250, "));
        assert!(text.ends_with("2024-03-01 06:30:00)"));
    }
}
