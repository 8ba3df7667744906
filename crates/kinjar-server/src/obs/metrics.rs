//! Minimal metrics registry for the server.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Only counters are needed: every measured event is a tally.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format, series sorted by labels.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (labels, val) in rows {
            if labels.is_empty() {
                let _ = writeln!(out, "{name} {val}");
            } else {
                let _ = writeln!(out, "{name}{{{labels}}} {val}");
            }
        }
    }
}

fn key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct KinjarMetrics {
    /// outcome = root | family | foreign
    pub host_resolutions: CounterVec,
    pub posts_served: CounterVec,
    /// Posts removed by the visibility filter.
    pub posts_hidden: CounterVec,
    /// decision = approved | rejected | conflict
    pub signup_decisions: CounterVec,
    pub api_errors: CounterVec,
    draining: AtomicBool,
}

impl KinjarMetrics {
    /// Mark draining state.
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.host_resolutions.render("kinjar_host_resolutions_total", &mut out);
        self.posts_served.render("kinjar_posts_served_total", &mut out);
        self.posts_hidden.render("kinjar_posts_hidden_total", &mut out);
        self.signup_decisions.render("kinjar_signup_decisions_total", &mut out);
        self.api_errors.render("kinjar_api_errors_total", &mut out);
        let _ = writeln!(
            out,
            "# TYPE kinjar_draining gauge\nkinjar_draining {}",
            u8::from(self.is_draining())
        );
        out
    }
}
