//! Factory layout - the static floor plan of the simulated plant.

/// A named physical area of the factory with a fixed layout rectangle.
///
/// Position and size are percentages of the factory floor, so `x = 10.0`
/// means the zone starts at 10% of the floor width.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Zone {
    /// Create a zone from its id, label and layout rectangle.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            w,
            h,
        }
    }
}

/// Factory layout as returned by `GET /demo/bottle/factory`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Factory {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<Zone>,
}

impl Factory {
    /// Create a builder for a factory layout.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> FactoryBuilder {
        FactoryBuilder::new(id, name)
    }

    /// Iterate over the ids of all zones, in layout order.
    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(|z| z.id.as_str())
    }

    /// Look up a zone by id.
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }
}

/// Builder for [`Factory`], mostly used by tests and fixtures.
#[derive(Debug)]
pub struct FactoryBuilder {
    factory: Factory,
}

impl FactoryBuilder {
    /// Create a new builder.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            factory: Factory {
                id: id.into(),
                name: name.into(),
                width: 100.0,
                height: 100.0,
                ..Default::default()
            },
        }
    }

    /// Set the location line.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.factory.location = location.into();
        self
    }

    /// Set the free-form description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.factory.description = description.into();
        self
    }

    /// Append a zone to the layout.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.factory.zones.push(zone);
        self
    }

    /// Build the factory.
    pub fn build(self) -> Factory {
        self.factory
    }
}
