use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_created: AtomicU64,
    series_instances: AtomicU64,
    responses_recorded: AtomicU64,
    results_recorded: AtomicU64,
    result_conflicts: AtomicU64,
    window_rejections: AtomicU64,
}

impl Metrics {
    pub fn record_events_created(&self, count: usize) {
        self.events_created.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Counts only events minted by series expansion; those are also
    /// part of `events_created`.
    pub fn record_series_instances(&self, count: usize) {
        self.series_instances
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_response(&self) {
        self.responses_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_match_result(&self) {
        self.results_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_result_conflict(&self) {
        self.result_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_rejection(&self) {
        self.window_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let events = self.events_created.load(Ordering::Relaxed);
        let series = self.series_instances.load(Ordering::Relaxed);
        let responses = self.responses_recorded.load(Ordering::Relaxed);
        let results = self.results_recorded.load(Ordering::Relaxed);
        let conflicts = self.result_conflicts.load(Ordering::Relaxed);
        let rejections = self.window_rejections.load(Ordering::Relaxed);

        format!(
            "# TYPE matchday_events_created_total counter\n\
matchday_events_created_total {}\n\
# TYPE matchday_series_events_created_total counter\n\
matchday_series_events_created_total {}\n\
# TYPE matchday_event_responses_total counter\n\
matchday_event_responses_total {}\n\
# TYPE matchday_match_results_total counter\n\
matchday_match_results_total {}\n\
# TYPE matchday_match_result_conflicts_total counter\n\
matchday_match_result_conflicts_total {}\n\
# TYPE matchday_response_window_rejections_total counter\n\
matchday_response_window_rejections_total {}\n",
            events, series, responses, results, conflicts, rejections
        )
    }
}
