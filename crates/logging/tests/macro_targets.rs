//! Checks that each trace macro lands on its subsystem's target.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use logging::Subsystem;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Records the target and level of every event.
#[derive(Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<(String, Level)>>>,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        self.seen
            .lock()
            .unwrap()
            .push((meta.target().to_owned(), *meta.level()));
    }
}

#[test]
fn macros_use_subsystem_targets() {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());

    tracing::subscriber::with_default(subscriber, || {
        logging::trace_packet!(id = 1, "decoded");
        logging::trace_handle!(handle = "0", "allocated");
        logging::trace_conn!("frame sent");
        logging::trace_path!("clamped {}", "../x");
    });

    let seen = recorder.seen.lock().unwrap().clone();
    let targets: Vec<Option<Subsystem>> = seen
        .iter()
        .map(|(target, _)| Subsystem::from_target(target))
        .collect();
    assert_eq!(
        targets,
        Subsystem::ALL.iter().copied().map(Some).collect::<Vec<_>>()
    );
    assert!(seen.iter().all(|(_, level)| *level == Level::DEBUG));
}
