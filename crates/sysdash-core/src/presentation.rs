// ── Presentation helpers ──
//
// Pure mappings from held values to labels and tones. Screens pick
// colours for each `Tone`; nothing here knows about a terminal.

use serde::Serialize;

/// Semantic colour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    Excellent,
    Good,
    Fair,
    Warning,
    Critical,
    Muted,
    /// Gaming-mode RGB accent.
    Accent,
}

// ── Network ──────────────────────────────────────────────────────────

/// Signal strength to a quality label.
pub fn signal_quality(signal: f64) -> (&'static str, Tone) {
    if signal.abs() < f64::EPSILON {
        ("Not tested", Tone::Muted)
    } else if signal >= 95.0 {
        ("Excellent", Tone::Excellent)
    } else if signal >= 85.0 {
        ("Very Good", Tone::Excellent)
    } else if signal >= 70.0 {
        ("Good", Tone::Good)
    } else if signal >= 60.0 {
        ("Fair", Tone::Fair)
    } else if signal >= 45.0 {
        ("Poor", Tone::Warning)
    } else if signal >= 30.0 {
        ("Weak", Tone::Warning)
    } else {
        ("Very Weak", Tone::Critical)
    }
}

/// Connection type header and the wired/wireless caption under it.
pub fn connection_labels(connection_type: &str) -> (&'static str, &'static str) {
    match connection_type {
        "Wi-Fi" => ("Wi-Fi", "Wireless Connection"),
        "Ethernet" => ("Ethernet", "Wired Connection"),
        _ => ("Unknown", "Wireless Connection"),
    }
}

/// One decimal place, as shown next to Mbps values.
pub fn format_speed(speed: f64) -> String {
    format!("{speed:.1}")
}

/// Icon class for a connected device, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum DeviceKind {
    Router,
    Mobile,
    ThisDevice,
    Laptop,
}

impl DeviceKind {
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("router") {
            Self::Router
        } else if ["phone", "mobile", "android", "iphone"]
            .iter()
            .any(|k| name.contains(k))
        {
            Self::Mobile
        } else if name.contains("this device") {
            Self::ThisDevice
        } else {
            Self::Laptop
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Router => "📶",
            Self::Mobile => "📱",
            Self::ThisDevice => "🖥",
            Self::Laptop => "💻",
        }
    }
}

// ── Battery ──────────────────────────────────────────────────────────

pub fn battery_tone(level: f64, gaming_mode: bool) -> Tone {
    if gaming_mode {
        Tone::Accent
    } else if level > 60.0 {
        Tone::Good
    } else if level > 20.0 {
        Tone::Warning
    } else {
        Tone::Critical
    }
}

pub fn battery_headline(is_charging: bool) -> &'static str {
    if is_charging { "CHARGING" } else { "UNPLUGGED" }
}

/// Rough time estimate shown under the battery gauge.
pub fn battery_status_line(level: f64, is_charging: bool) -> String {
    if is_charging {
        format!(
            "Approximately {} minutes until fully charged",
            whole(100.0 - level)
        )
    } else {
        format!("Approximately {} minutes remaining", whole(level * 5.0))
    }
}

pub fn charging_status_label(charging: bool) -> &'static str {
    if charging { "Charging" } else { "Not Charging" }
}

/// Watts with one decimal, or a dash when unknown.
pub fn format_watts(watts: Option<f64>) -> String {
    watts.map_or_else(|| "—".to_owned(), |w| format!("{w:.1} W"))
}

// ── Temperature ──────────────────────────────────────────────────────

/// The GPU reading is derived from the CPU reading.
pub fn gpu_temperature(cpu_temperature: f64) -> f64 {
    (cpu_temperature * 0.9).floor()
}

pub const GPU_CLOCK_MHZ: u32 = 1250;
pub const VRAM_CLOCK_MHZ: u32 = 6000;

pub fn temperature_tone(celsius: f64) -> Tone {
    if celsius >= 80.0 {
        Tone::Critical
    } else if celsius >= 65.0 {
        Tone::Warning
    } else {
        Tone::Good
    }
}

// ── Static hardware cards ────────────────────────────────────────────

/// `(label, value)` rows of the System Specs card.
pub const SYSTEM_SPECS: [(&str, &str); 4] = [
    ("CPU", "AMD Ryzen 7 5800X"),
    ("GPU", "NVIDIA RTX 3070"),
    ("RAM", "32 GB DDR4"),
    ("Fan Speed", "1200 RPM"),
];

/// A storage volume on the Storage Info card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageVolume {
    pub label: &'static str,
    pub used: &'static str,
    pub total: &'static str,
    pub percent: u16,
}

pub const STORAGE_VOLUMES: [StorageVolume; 2] = [
    StorageVolume {
        label: "SSD",
        used: "650GB",
        total: "1TB",
        percent: 65,
    },
    StorageVolume {
        label: "HDD",
        used: "1.2TB",
        total: "3TB",
        percent: 40,
    },
];

pub const STORAGE_EXTRAS: [(&str, &str); 2] = [("Network", "1 Gbps"), ("Power Plan", "Performance")];

// Battery levels are percentages, far inside i64.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn whole(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_quality_thresholds() {
        assert_eq!(signal_quality(0.0).0, "Not tested");
        assert_eq!(signal_quality(95.0).0, "Excellent");
        assert_eq!(signal_quality(94.9).0, "Very Good");
        assert_eq!(signal_quality(85.0).0, "Very Good");
        assert_eq!(signal_quality(70.0).0, "Good");
        assert_eq!(signal_quality(60.0).0, "Fair");
        assert_eq!(signal_quality(45.0).0, "Poor");
        assert_eq!(signal_quality(30.0).0, "Weak");
        assert_eq!(signal_quality(29.0), ("Very Weak", Tone::Critical));
    }

    #[test]
    fn device_kind_from_name() {
        assert_eq!(DeviceKind::from_name("TP-Link Router"), DeviceKind::Router);
        assert_eq!(DeviceKind::from_name("Pixel (Android)"), DeviceKind::Mobile);
        assert_eq!(DeviceKind::from_name("Alex's iPhone"), DeviceKind::Mobile);
        assert_eq!(DeviceKind::from_name("This Device"), DeviceKind::ThisDevice);
        assert_eq!(DeviceKind::from_name("DESKTOP-42"), DeviceKind::Laptop);
    }

    #[test]
    fn battery_tone_prefers_gaming_accent() {
        assert_eq!(battery_tone(10.0, true), Tone::Accent);
        assert_eq!(battery_tone(61.0, false), Tone::Good);
        assert_eq!(battery_tone(60.0, false), Tone::Warning);
        assert_eq!(battery_tone(21.0, false), Tone::Warning);
        assert_eq!(battery_tone(20.0, false), Tone::Critical);
    }

    #[test]
    fn battery_status_lines() {
        assert_eq!(
            battery_status_line(75.0, true),
            "Approximately 25 minutes until fully charged"
        );
        assert_eq!(
            battery_status_line(75.0, false),
            "Approximately 375 minutes remaining"
        );
        assert_eq!(battery_headline(true), "CHARGING");
        assert_eq!(battery_headline(false), "UNPLUGGED");
    }

    #[test]
    fn gpu_temperature_is_floored_ninety_percent() {
        assert!((gpu_temperature(50.0) - 45.0).abs() < f64::EPSILON);
        assert!((gpu_temperature(57.0) - 51.0).abs() < f64::EPSILON);
    }

    #[test]
    fn speed_and_connection_formatting() {
        assert_eq!(format_speed(123.456), "123.5");
        assert_eq!(format_speed(0.0), "0.0");
        assert_eq!(connection_labels("Ethernet"), ("Ethernet", "Wired Connection"));
        assert_eq!(connection_labels("LTE").0, "Unknown");
        assert_eq!(format_watts(None), "—");
        assert_eq!(format_watts(Some(18.44)), "18.4 W");
    }
}
