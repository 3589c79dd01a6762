//! Visit timing metrics

/// Timing milestones of a frame visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMetric {
    VisitStart,
    RequestStart,
    RequestEnd,
    VisitEnd,
}

impl TimingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VisitStart => "visitStart",
            Self::RequestStart => "requestStart",
            Self::RequestEnd => "requestEnd",
            Self::VisitEnd => "visitEnd",
        }
    }
}

/// Insertion-ordered metric/timestamp pairs, reset at the start of
/// each visit.
#[derive(Debug, Clone, Default)]
pub struct TimingMetrics {
    entries: Vec<(TimingMetric, u64)>,
}

impl TimingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metric at the current time
    pub fn record(&mut self, metric: TimingMetric) {
        self.entries.push((metric, now_ms()));
    }

    /// Timestamp of the first recording of a metric
    pub fn get(&self, metric: TimingMetric) -> Option<u64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, at)| *at)
    }

    pub fn contains(&self, metric: TimingMetric) -> bool {
        self.get(metric).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimingMetric, u64)> + '_ {
        self.entries.iter().copied()
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
