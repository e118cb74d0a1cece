//! Apple Silicon chip detection and known peak-bandwidth lookup.
//!
//! Informational only: the sweep always classifies against the peaks the
//! user declares on the command line. The known bandwidth is shown in the
//! startup banner and the JSON header so a report is self-describing.

#[cfg(target_os = "macos")]
use objc2::runtime::ProtocolObject;
#[cfg(target_os = "macos")]
use objc2_metal::MTLDevice;

/// Hardware information for the current GPU.
#[derive(Debug, Clone)]
pub struct HardwareInfo {
    /// Chip name (e.g., "Apple M4 Pro").
    pub chip_name: String,
    /// Theoretical peak memory bandwidth in GB/s, if the chip is known.
    pub known_bandwidth_gbs: Option<f64>,
}

impl HardwareInfo {
    /// Detect hardware from a Metal device.
    #[cfg(target_os = "macos")]
    pub fn detect(device: &ProtocolObject<dyn MTLDevice>) -> Self {
        let chip_name = device.name().to_string();
        let known_bandwidth_gbs = lookup_bandwidth(&chip_name);

        Self {
            chip_name,
            known_bandwidth_gbs,
        }
    }
}

/// Known theoretical peak memory bandwidth (GB/s) by chip name.
pub fn lookup_bandwidth(chip_name: &str) -> Option<f64> {
    let name = chip_name.to_lowercase();

    let gbs = if name.contains("m4 max") {
        546.0
    } else if name.contains("m4 pro") {
        273.0
    } else if name.contains("m4") {
        120.0
    } else if name.contains("m3 max") {
        400.0
    } else if name.contains("m3 pro") {
        200.0
    } else if name.contains("m3") {
        100.0
    } else if name.contains("m2 ultra") {
        800.0
    } else if name.contains("m2 max") {
        400.0
    } else if name.contains("m2 pro") {
        200.0
    } else if name.contains("m2") {
        100.0
    } else if name.contains("m1 ultra") {
        800.0
    } else if name.contains("m1 max") {
        400.0
    } else if name.contains("m1 pro") {
        200.0
    } else if name.contains("m1") {
        68.25
    } else {
        return None;
    };

    Some(gbs)
}
