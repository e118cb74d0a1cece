//! JSON export for sweep results.
//!
//! The document carries a hardware header and the declared peaks so a saved
//! report is self-describing.

use std::fs;
use std::path::Path;

use serde::Serialize;

use gemm_primitives::{HardwareInfo, ReferencePeaks};

use crate::sweep::SweepRecord;

#[derive(Serialize)]
struct JsonReport {
    hardware: HardwareHeader,
    peaks: PeaksHeader,
    timestamp: String,
    results: Vec<JsonRecord>,
}

#[derive(Serialize)]
struct HardwareHeader {
    chip: String,
    known_bandwidth_gbs: Option<f64>,
}

#[derive(Serialize)]
struct PeaksHeader {
    flops: f64,
    bytes_per_sec: f64,
}

#[derive(Serialize)]
struct JsonRecord {
    mode: String,
    index: usize,
    m: usize,
    n: usize,
    k: usize,
    warmup_calls: u32,
    timed_calls: u32,
    total_seconds: f64,
    gflops: f64,
    gflops_percent_of_peak: f64,
    gbps: f64,
    gbps_percent_of_peak: f64,
    bound_by: String,
    bound_percent: f64,
    cv_percent: f64,
}

impl From<&SweepRecord> for JsonRecord {
    fn from(rec: &SweepRecord) -> Self {
        let c = &rec.classification;
        Self {
            mode: rec.config.mode_label().to_string(),
            index: rec.index,
            m: rec.config.m,
            n: rec.config.n,
            k: rec.config.k,
            warmup_calls: rec.plan.warmup_calls,
            timed_calls: rec.plan.timed_calls,
            total_seconds: rec.total_seconds,
            gflops: rec.metrics.flops_per_second * 1e-9,
            gflops_percent_of_peak: c.flops_percent_of_peak,
            gbps: rec.metrics.bytes_per_second * 1e-9,
            gbps_percent_of_peak: c.bandwidth_percent_of_peak,
            bound_by: c.bound_by.label().to_string(),
            bound_percent: c.bound_percent,
            cv_percent: rec.call_stats.cv_percent,
        }
    }
}

/// Write sweep results to a JSON file.
pub fn write_json(
    path: &str,
    records: &[SweepRecord],
    hardware: &HardwareInfo,
    peaks: &ReferencePeaks,
) -> Result<(), String> {
    let report = JsonReport {
        hardware: HardwareHeader {
            chip: hardware.chip_name.clone(),
            known_bandwidth_gbs: hardware.known_bandwidth_gbs,
        },
        peaks: PeaksHeader {
            flops: peaks.flops,
            bytes_per_sec: peaks.bytes_per_sec,
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
        results: records.iter().map(JsonRecord::from).collect(),
    };

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization failed: {}", e))?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }

    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

    println!("JSON results written to: {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use gemm_primitives::GemmConfig;

    use super::*;
    use crate::classify::{BoundBy, Classification};
    use crate::metrics::Metrics;
    use crate::planner::IterationPlan;
    use crate::stats::sample_stats;

    fn record() -> SweepRecord {
        SweepRecord {
            index: 1,
            config: GemmConfig {
                m: 1024,
                n: 1024,
                k: 1024,
                transpose_left: false,
                transpose_right: false,
            },
            plan: IterationPlan {
                warmup_calls: 2,
                timed_calls: 12,
            },
            call_stats: sample_stats(&[0.004; 12]),
            total_seconds: 0.048,
            metrics: Metrics {
                flops_per_second: 500e9,
                bytes_per_second: 60e9,
            },
            classification: Classification {
                flops_percent_of_peak: 50.0,
                bandwidth_percent_of_peak: 30.0,
                bound_by: BoundBy::Compute,
                bound_percent: 50.0,
            },
        }
    }

    fn hardware() -> HardwareInfo {
        HardwareInfo {
            chip_name: "Apple M4 Pro".to_string(),
            known_bandwidth_gbs: Some(273.0),
        }
    }

    fn peaks() -> ReferencePeaks {
        ReferencePeaks {
            flops: 1000e9,
            bytes_per_sec: 200e9,
        }
    }

    #[test]
    fn writes_parseable_json_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let path_str = path.to_str().unwrap();

        write_json(path_str, &[record()], &hardware(), &peaks()).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["hardware"]["chip"], "Apple M4 Pro");
        assert_eq!(parsed["peaks"]["flops"], 1000e9);
        assert_eq!(parsed["results"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["results"][0]["mode"], "NN");
        assert_eq!(parsed["results"][0]["bound_by"], "gflops");
        assert_eq!(parsed["results"][0]["timed_calls"], 12);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("results.json");
        write_json(path.to_str().unwrap(), &[record()], &hardware(), &peaks()).unwrap();
        assert!(path.exists());
    }
}
