//! Broadcast run statistics.

use std::time::Duration;

use contracts::{AggregateStats, DispatchOutcome, DispatchStatus};

/// Statistics from one broadcast run
#[derive(Debug, Clone, Default)]
pub struct BroadcastStats {
    /// The aggregate that was broadcast
    pub stats: AggregateStats,

    /// One outcome per destination, in configuration order
    pub outcomes: Vec<DispatchOutcome>,

    /// Whether dispatch was skipped by the zero-shard guard
    pub skipped: bool,

    /// Total duration of the run
    pub duration: Duration,
}

impl BroadcastStats {
    /// Destinations that answered with a 2xx status
    pub fn delivered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Destinations that answered with a non-2xx status
    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DispatchStatus::Responded { .. }) && !o.is_success())
            .count()
    }

    /// Destinations whose request never produced a response
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DispatchStatus::Failed { .. }))
            .count()
    }

    /// Destinations that did not accept the aggregate
    pub fn unsuccessful_count(&self) -> usize {
        self.outcomes.len() - self.delivered_count()
    }

    /// True when every destination accepted the aggregate
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_success())
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Broadcast Statistics                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Aggregate");
        println!("   ├─ Shards: {}", self.stats.shard_count);
        println!("   ├─ Servers: {}", self.stats.server_count);
        println!("   └─ Duration: {:.2}s", self.duration.as_secs_f64());

        if self.skipped {
            println!("\n📤 Destinations");
            println!("   └─ (dispatch skipped: zero-shard aggregate)");
            println!();
            return;
        }

        println!("\n📤 Destinations ({})", self.outcomes.len());
        for (i, outcome) in self.outcomes.iter().enumerate() {
            let is_last = i == self.outcomes.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            let marker = if outcome.is_success() { "✓" } else { "✗" };
            println!(
                "   {} {} {} ({}): {}",
                prefix, marker, outcome.destination, outcome.url, outcome.status
            );
        }

        println!(
            "\nSummary: {} delivered, {} rejected, {} failed",
            self.delivered_count(),
            self.rejected_count(),
            self.failed_count()
        );
        println!();
    }
}
