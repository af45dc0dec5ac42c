use serde::Serialize;
use std::sync::Mutex;

/// ローカルメトリクス収集器
pub struct Metrics {
    counters: Mutex<MetricsCounters>,
    latencies: Mutex<Vec<LatencyRecord>>,
}

#[derive(Debug, Default)]
struct MetricsCounters {
    catalog_loads: u64,
    catalog_failures: u64,
    rewrites_requested: u64,
    rewrites_succeeded: u64,
    rewrites_failed: u64,
    copies_delivered: u64,
    files_imported: u64,
    files_exported: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyRecord {
    pub phase: String,
    pub duration_ms: u64,
    pub timestamp: String,
}

/// メトリクスサマリー（UIに返す用）
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub catalog_loads: u64,
    pub catalog_failures: u64,
    pub rewrites_requested: u64,
    pub rewrites_succeeded: u64,
    pub rewrites_failed: u64,
    pub copies_delivered: u64,
    pub files_imported: u64,
    pub files_exported: u64,
    pub avg_latency_ms: AvgLatency,
    pub recent_latencies: Vec<LatencyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvgLatency {
    pub catalog: Option<f64>,
    pub rewrite: Option<f64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(MetricsCounters::default()),
            latencies: Mutex::new(Vec::new()),
        }
    }

    pub fn inc_catalog_loads(&self) {
        self.counters.lock().unwrap().catalog_loads += 1;
    }

    pub fn inc_catalog_failures(&self) {
        self.counters.lock().unwrap().catalog_failures += 1;
    }

    pub fn inc_rewrites_requested(&self) {
        self.counters.lock().unwrap().rewrites_requested += 1;
    }

    pub fn inc_rewrites_succeeded(&self) {
        self.counters.lock().unwrap().rewrites_succeeded += 1;
    }

    pub fn inc_rewrites_failed(&self) {
        self.counters.lock().unwrap().rewrites_failed += 1;
    }

    pub fn inc_copies_delivered(&self) {
        self.counters.lock().unwrap().copies_delivered += 1;
    }

    pub fn inc_files_imported(&self) {
        self.counters.lock().unwrap().files_imported += 1;
    }

    pub fn inc_files_exported(&self) {
        self.counters.lock().unwrap().files_exported += 1;
    }

    pub fn record_latency(&self, phase: &str, duration_ms: u64) {
        let record = LatencyRecord {
            phase: phase.to_string(),
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let mut latencies = self.latencies.lock().unwrap();
        latencies.push(record);
        // 最新1000件のみ保持
        if latencies.len() > 1000 {
            let excess = latencies.len() - 1000;
            latencies.drain(0..excess);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let c = self.counters.lock().unwrap();
        let latencies = self.latencies.lock().unwrap();

        let avg = |phase: &str| -> Option<f64> {
            let vals: Vec<f64> = latencies
                .iter()
                .filter(|r| r.phase == phase)
                .map(|r| r.duration_ms as f64)
                .collect();
            if vals.is_empty() {
                None
            } else {
                Some(vals.iter().sum::<f64>() / vals.len() as f64)
            }
        };

        let recent: Vec<LatencyRecord> = latencies.iter().rev().take(20).cloned().collect();

        MetricsSummary {
            catalog_loads: c.catalog_loads,
            catalog_failures: c.catalog_failures,
            rewrites_requested: c.rewrites_requested,
            rewrites_succeeded: c.rewrites_succeeded,
            rewrites_failed: c.rewrites_failed,
            copies_delivered: c.copies_delivered,
            files_imported: c.files_imported,
            files_exported: c.files_exported,
            avg_latency_ms: AvgLatency {
                catalog: avg("catalog"),
                rewrite: avg("rewrite"),
            },
            recent_latencies: recent,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let m = Metrics::new();
        m.inc_rewrites_requested();
        m.inc_rewrites_requested();
        m.inc_rewrites_succeeded();
        m.inc_rewrites_failed();
        m.inc_copies_delivered();

        let s = m.summary();
        assert_eq!(s.rewrites_requested, 2);
        assert_eq!(s.rewrites_succeeded, 1);
        assert_eq!(s.rewrites_failed, 1);
        assert_eq!(s.copies_delivered, 1);
        assert_eq!(s.files_imported, 0);
    }

    #[test]
    fn test_latency_recording() {
        let m = Metrics::new();
        m.record_latency("rewrite", 120);
        m.record_latency("rewrite", 80);
        m.record_latency("catalog", 200);

        let s = m.summary();
        assert!((s.avg_latency_ms.rewrite.unwrap() - 100.0).abs() < f64::EPSILON);
        assert!((s.avg_latency_ms.catalog.unwrap() - 200.0).abs() < f64::EPSILON);
        assert_eq!(s.recent_latencies.len(), 3);
    }

    #[test]
    fn test_latency_cap() {
        let m = Metrics::new();
        for i in 0..1100 {
            m.record_latency("rewrite", i);
        }
        let latencies = m.latencies.lock().unwrap();
        assert_eq!(latencies.len(), 1000);
    }
}
