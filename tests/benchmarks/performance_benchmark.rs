//! Throughput of the pure parts of the client:
//! - security key canonicalization and comparison
//! - list-or-object response normalization
//! - envelope parsing for a typical quote reply
//! - a full request cycle over a canned transport

use opthouse_client::optionshouse::{AccountPositions, OptionsHouseClient, OptionsHouseConfig, QuoteList, Reply};
use opthouse_client::ApiResponse;
use opthouse_core::prelude::*;
use opthouse_tests::canned::CannedTransport;
use std::collections::HashMap;
use tracing::info;

const POSITIONS_LIST: &str = r#"{"EZMessage":{"action":"account.positions","data":{"timeStamp":"1300000000000","unified":[
    {"securityKey":"IBM:::S","qty":100,"price":"160.5","mktVal":"16050"},
    {"securityKey":"IBM:20110716:1600000:C","qty":"2","multiplier":100,"price":"3.10"},
    {"securityKey":"MSFT:::S","qty":300,"price":"25.10"}]}}}"#;

const POSITIONS_SINGLE: &str = r#"{"EZMessage":{"action":"account.positions","data":{"timeStamp":"1300000000000","unified":
    {"securityKey":"IBM:::S","qty":100,"price":"160.5","mktVal":"16050"}}}}"#;

const QUOTES: &str = r#"{"EZMessage":{"action":"view.quote.list","data":{"session":"regular","quote":[
    {"key":"IBM:::S","last":"160.25","bid":160.2,"ask":160.3,"volume":"1200000"},
    {"key":"IBM:20110716:1600000:C","delta":"0.52","gamma":"0.04","oi":450}]}}}"#;

/// Benchmark result statistics
#[derive(Debug, Clone)]
pub struct BenchmarkStats {
    pub name: String,
    pub iterations: u64,
    pub total_time_nanos: u64,
    pub avg_time_nanos: u64,
    pub min_time_nanos: u64,
    pub max_time_nanos: u64,
    pub p50_nanos: u64,
    pub p95_nanos: u64,
    pub p99_nanos: u64,
    pub throughput_ops_per_sec: f64,
}

impl BenchmarkStats {
    pub fn from_samples(name: String, mut samples: Vec<u64>) -> Self {
        if samples.is_empty() {
            return Self::empty(name);
        }

        samples.sort_unstable();

        let iterations = samples.len() as u64;
        let total_time_nanos: u64 = samples.iter().sum();
        let avg_time_nanos = total_time_nanos / iterations;

        let throughput_ops_per_sec = if avg_time_nanos > 0 {
            1_000_000_000.0 / avg_time_nanos as f64
        } else {
            0.0
        };

        Self {
            name,
            iterations,
            total_time_nanos,
            avg_time_nanos,
            min_time_nanos: samples[0],
            max_time_nanos: samples[samples.len() - 1],
            p50_nanos: samples[samples.len() / 2],
            p95_nanos: samples[(samples.len() * 95) / 100],
            p99_nanos: samples[(samples.len() * 99) / 100],
            throughput_ops_per_sec,
        }
    }

    fn empty(name: String) -> Self {
        Self {
            name,
            iterations: 0,
            total_time_nanos: 0,
            avg_time_nanos: 0,
            min_time_nanos: 0,
            max_time_nanos: 0,
            p50_nanos: 0,
            p95_nanos: 0,
            p99_nanos: 0,
            throughput_ops_per_sec: 0.0,
        }
    }

    pub fn print_summary(&self) {
        info!("📊 Benchmark: {}", self.name);
        info!("   Iterations: {}", self.iterations);
        info!("   Avg Time: {}ns", self.avg_time_nanos);
        info!("   Min Time: {}ns", self.min_time_nanos);
        info!("   Max Time: {}ns", self.max_time_nanos);
        info!("   P50: {}ns", self.p50_nanos);
        info!("   P95: {}ns", self.p95_nanos);
        info!("   P99: {}ns", self.p99_nanos);
        info!("   Throughput: {:.0} ops/sec", self.throughput_ops_per_sec);
    }
}

/// Time `op` once per iteration
fn sample<T>(iterations: usize, mut op: impl FnMut() -> T) -> Vec<u64> {
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = nanos();
        std::hint::black_box(op());
        samples.push(nanos() - start);
    }
    samples
}

pub struct PerformanceBenchmark {
    results: HashMap<String, BenchmarkStats>,
}

impl PerformanceBenchmark {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
        }
    }

    fn record(&mut self, key: &str, name: &str, samples: Vec<u64>) {
        let stats = BenchmarkStats::from_samples(name.to_string(), samples);
        stats.print_summary();
        self.results.insert(key.to_string(), stats);
    }

    pub async fn run_all(&mut self) {
        info!("🚀 Starting OptionsHouse client benchmark suite");

        self.benchmark_codec();
        self.benchmark_normalizer();
        self.benchmark_envelope();
        self.benchmark_request_cycle().await;

        self.print_summary();
    }

    fn benchmark_codec(&mut self) {
        const ITERATIONS: usize = 100_000;
        info!("🔑 Benchmarking key codec...");

        self.record("to_key_ticker", "to_key (ticker)", sample(ITERATIONS, || to_key(" ibm ")));
        self.record(
            "to_key_option",
            "to_key (option key)",
            sample(ITERATIONS, || to_key("ibm:20110716:1600000:c")),
        );
        self.record(
            "keys_equal",
            "keys_equal",
            sample(ITERATIONS, || keys_equal("IBM:20110716:1600000:C", "ibm:20110716:1600000:c")),
        );
        self.record(
            "security_key_parse",
            "SecurityKey::parse + strike_price",
            sample(ITERATIONS, || SecurityKey::parse("IBM:20110716:1600000:C").strike_price()),
        );
    }

    fn benchmark_normalizer(&mut self) {
        const ITERATIONS: usize = 20_000;
        info!("🧩 Benchmarking shape normalizer...");

        self.record(
            "positions_strict",
            "Positions (list, strict path)",
            sample(ITERATIONS, || AccountPositions::from_json(POSITIONS_LIST).map(|p| p.len())),
        );
        self.record(
            "positions_fallback",
            "Positions (bare object, fallback path)",
            sample(ITERATIONS, || AccountPositions::from_json(POSITIONS_SINGLE).map(|p| p.len())),
        );
    }

    fn benchmark_envelope(&mut self) {
        const ITERATIONS: usize = 20_000;
        info!("📦 Benchmarking envelope parsing...");

        self.record(
            "quote_reply",
            "Reply<QuoteList>",
            sample(ITERATIONS, || Reply::<QuoteList>::from_json(QUOTES).map(|r| r.quotes.len())),
        );
    }

    async fn benchmark_request_cycle(&mut self) {
        const ITERATIONS: usize = 5_000;
        info!("🔁 Benchmarking request cycle over a canned transport...");

        let config = OptionsHouseConfig::default().with_timing(false);
        let client = OptionsHouseClient::with_transport(config, CannedTransport::new());
        client.set_auth_token("bench");

        let mut samples = Vec::with_capacity(ITERATIONS);
        for _ in 0..ITERATIONS {
            client.transport().push_reply(POSITIONS_LIST);
            let start = nanos();
            let positions = client.account_positions("1001").await;
            samples.push(nanos() - start);
            std::hint::black_box(positions.map(|p| p.len()).unwrap_or(0));
        }
        self.record("positions_cycle", "account_positions round trip", samples);
    }

    fn print_summary(&self) {
        info!("🏁 Summary");
        let mut names: Vec<_> = self.results.values().collect();
        names.sort_by_key(|s| s.avg_time_nanos);
        for stats in names {
            info!("   {:<40} {:>8}ns avg", stats.name, stats.avg_time_nanos);
        }
    }
}

impl Default for PerformanceBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

#[monoio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut benchmark = PerformanceBenchmark::new();
    benchmark.run_all().await;

    info!("✅ Benchmark suite completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_samples("Test".to_string(), vec![100, 200, 150, 300, 250]);

        assert_eq!(stats.iterations, 5);
        assert_eq!(stats.min_time_nanos, 100);
        assert_eq!(stats.max_time_nanos, 300);
        assert_eq!(stats.avg_time_nanos, 200);
        assert_eq!(stats.p50_nanos, 200);
    }

    #[test]
    fn test_empty_benchmark_stats() {
        let stats = BenchmarkStats::from_samples("Empty".to_string(), vec![]);
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.throughput_ops_per_sec, 0.0);
    }

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(AccountPositions::from_json(POSITIONS_LIST).unwrap().len(), 3);
        assert_eq!(AccountPositions::from_json(POSITIONS_SINGLE).unwrap().len(), 1);
        assert_eq!(Reply::<QuoteList>::from_json(QUOTES).unwrap().quotes.len(), 2);
    }
}
