//! Live sensor readings for each zone of the factory.

use std::collections::BTreeMap;

/// Sensor values and active alerts for one zone.
///
/// Sensor names vary per zone (`temperature`, `power_kw`,
/// `output_bottles_per_min`, ...), so they are kept as an ordered map.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneReading {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sensors: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alerts: Vec<String>,
}

impl ZoneReading {
    /// Create an empty reading for a zone.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a sensor value.
    pub fn sensor(mut self, name: impl Into<String>, value: f64) -> Self {
        self.sensors.insert(name.into(), value);
        self
    }

    /// Add an active alert.
    pub fn alert(mut self, alert: impl Into<String>) -> Self {
        self.alerts.push(alert.into());
        self
    }
}

/// Plant-wide figures aggregated by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadingsSummary {
    pub total_power_kw: f64,
    pub active_alerts: u32,
    /// Overall efficiency in percent.
    pub overall_efficiency: f64,
    pub production_rate_bottles_per_hour: f64,
}

/// Readings as returned by `GET /demo/bottle/readings`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Readings {
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<ZoneReading>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: ReadingsSummary,
}

impl Readings {
    /// Get the reading for a zone.
    pub fn zone(&self, id: &str) -> Option<&ZoneReading> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Total number of alerts across all zones.
    ///
    /// Counted from the zones themselves; may differ from
    /// `summary.active_alerts` if the backend aggregates differently.
    pub fn alert_count(&self) -> usize {
        self.zones.iter().map(|z| z.alerts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_reading_builder() {
        let reading = ZoneReading::new("A")
            .sensor("temperature", 71.5)
            .sensor("power_kw", 12.0)
            .alert("Overheating");
        assert_eq!(reading.sensors.len(), 2);
        assert_eq!(reading.alerts, vec!["Overheating".to_string()]);
    }

    #[test]
    fn test_alert_count() {
        let readings = Readings {
            zones: vec![
                ZoneReading::new("A").alert("x").alert("y"),
                ZoneReading::new("B"),
                ZoneReading::new("C").alert("z"),
            ],
            ..Default::default()
        };
        assert_eq!(readings.alert_count(), 3);
        assert!(readings.zone("B").is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_readings() {
        let json = r#"{
            "timestamp": "2025-01-01T10:00:00Z",
            "zones": [
                { "id": "A", "sensors": { "temperature": 72.1, "power_kw": 15 }, "alerts": [] },
                { "id": "B", "sensors": {} }
            ],
            "summary": {
                "total_power_kw": 120.5,
                "active_alerts": 2,
                "overall_efficiency": 87.3,
                "production_rate_bottles_per_hour": 5400
            }
        }"#;
        let readings: Readings = serde_json::from_str(json).unwrap();
        assert_eq!(readings.zones.len(), 2);
        assert_eq!(readings.zones[0].sensors["power_kw"], 15.0);
        assert!(readings.zones[1].alerts.is_empty());
        assert_eq!(readings.summary.active_alerts, 2);
    }
}
