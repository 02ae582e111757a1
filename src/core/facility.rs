//! Facilities: one stream per importance level

use super::color::ColorSet;
use super::globals;
use super::importance::{Importance, IMPORTANCE_COUNT};
use super::prefix::{DefaultPrefix, Prefix};
use super::properties::{MessageProperties, StreamId};
use super::stream::Stream;
use crate::dest::Destination;
use std::ops::Index;
use std::sync::Arc;

/// A named group of streams, one per importance level, all routed to a
/// shared destination.
#[derive(Clone)]
pub struct Facility {
    name: String,
    streams: [Stream; IMPORTANCE_COUNT],
}

impl Facility {
    /// A facility over the process default destination (stderr, colored
    /// when stderr is a terminal).
    pub fn new(name: impl Into<String>) -> Self {
        FacilityBuilder::new(name).build()
    }

    /// A facility over an explicit destination.
    pub fn with_destination(name: impl Into<String>, destination: Destination) -> Self {
        FacilityBuilder::new(name).destination(destination).build()
    }

    pub fn builder(name: impl Into<String>) -> FacilityBuilder {
        FacilityBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self, importance: Importance) -> &Stream {
        &self.streams[importance.index()]
    }

    pub fn debug(&self) -> &Stream {
        self.stream(Importance::Debug)
    }

    pub fn trace(&self) -> &Stream {
        self.stream(Importance::Trace)
    }

    pub fn where_(&self) -> &Stream {
        self.stream(Importance::Where)
    }

    pub fn info(&self) -> &Stream {
        self.stream(Importance::Info)
    }

    pub fn warn(&self) -> &Stream {
        self.stream(Importance::Warn)
    }

    pub fn error(&self) -> &Stream {
        self.stream(Importance::Error)
    }

    pub fn fatal(&self) -> &Stream {
        self.stream(Importance::Fatal)
    }

    /// True when `other` is a clone of this facility (shares its streams).
    pub fn same_facility(&self, other: &Facility) -> bool {
        self.streams[0].same_stream(&other.streams[0])
    }
}

impl Index<Importance> for Facility {
    type Output = Stream;

    fn index(&self, importance: Importance) -> &Stream {
        self.stream(importance)
    }
}

impl std::fmt::Debug for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facility").field("name", &self.name).finish()
    }
}

/// Configures and builds a [`Facility`].
pub struct FacilityBuilder {
    name: String,
    destination: Option<Destination>,
    prefix: Option<Arc<dyn Prefix>>,
    colors: ColorSet,
    use_color: Option<bool>,
    enabled: bool,
}

impl FacilityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: None,
            prefix: None,
            colors: ColorSet::full_color(),
            use_color: None,
            enabled: true,
        }
    }

    #[must_use]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: Arc<dyn Prefix>) -> Self {
        self.prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: ColorSet) -> Self {
        self.colors = colors;
        self
    }

    /// Force color escapes on or off. Unset defaults to whether stderr is
    /// a terminal.
    #[must_use]
    pub fn use_color(mut self, on: bool) -> Self {
        self.use_color = Some(on);
        self
    }

    /// Initial enabled state for every stream.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn build(self) -> Facility {
        let destination = self
            .destination
            .unwrap_or_else(globals::default_destination);
        let prefix = self
            .prefix
            .unwrap_or_else(|| Arc::new(DefaultPrefix::new()));
        let use_color = self.use_color.unwrap_or_else(globals::default_use_color);

        let streams = Importance::ALL.map(|importance| {
            let props = MessageProperties::new()
                .with_facility_name(self.name.clone())
                .with_importance(importance)
                .with_color(self.colors.get(importance))
                .with_use_color(use_color)
                .with_stream_id(StreamId::next());
            Stream::new(props, Arc::clone(&prefix), destination.clone(), self.enabled)
        });

        Facility {
            name: self.name,
            streams,
        }
    }
}
