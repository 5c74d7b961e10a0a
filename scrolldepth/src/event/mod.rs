//! Tracking event records.
//!
//! Every threshold crossing produces a [`TrackerEvent`] that is handed to
//! the configured sink. The serialized form matches the analytics data-layer
//! record the downstream collector expects: an `event` kind tag, a fixed
//! `eventCategory`, an action, a label, and either a fixed value of 1 with
//! the non-interaction flag (distance events) or an elapsed duration in
//! milliseconds (timing events).

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Category carried by every emitted record.
pub const EVENT_CATEGORY: &str = "Scroll Depth";

/// Kind tag for distance (threshold-crossing) records.
pub const DISTANCE_EVENT: &str = "ScrollDistance";

/// Kind tag for timing records.
pub const TIMING_EVENT: &str = "ScrollTiming";

/// What kind of threshold produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthAction {
    /// One of the standard percentage marks (25/50/75/100%).
    Percentage,
    /// An individually tracked element.
    Elements,
    /// A new deepest-pixel maximum.
    PixelDepth,
}

impl DepthAction {
    /// String form used in emitted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthAction::Percentage => "Percentage",
            DepthAction::Elements => "Elements",
            DepthAction::PixelDepth => "Pixel Depth",
        }
    }
}

impl fmt::Display for DepthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One record passed to the event sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A threshold was crossed for the first time this session.
    Distance {
        /// Which kind of threshold fired.
        action: DepthAction,
        /// Mark name ("50%"), element identifier, or bucketed pixel value.
        label: String,
        /// Always 1; present for downstream value aggregation.
        value: u32,
        /// Whether the event should not affect bounce-rate interpretation.
        non_interaction: bool,
    },

    /// Elapsed time from session start to a threshold crossing.
    Timing {
        /// Which kind of threshold fired.
        action: DepthAction,
        /// Same label as the accompanying distance event.
        label: String,
        /// Milliseconds since session start.
        elapsed_ms: u64,
    },
}

impl TrackerEvent {
    /// Build a distance record with the fixed value of 1.
    pub fn distance(action: DepthAction, label: impl Into<String>, non_interaction: bool) -> Self {
        TrackerEvent::Distance {
            action,
            label: label.into(),
            value: 1,
            non_interaction,
        }
    }

    /// Build a timing record.
    pub fn timing(action: DepthAction, label: impl Into<String>, elapsed_ms: u64) -> Self {
        TrackerEvent::Timing {
            action,
            label: label.into(),
            elapsed_ms,
        }
    }

    /// The action of this record.
    pub fn action(&self) -> DepthAction {
        match self {
            TrackerEvent::Distance { action, .. } | TrackerEvent::Timing { action, .. } => *action,
        }
    }

    /// The label of this record.
    pub fn label(&self) -> &str {
        match self {
            TrackerEvent::Distance { label, .. } | TrackerEvent::Timing { label, .. } => label,
        }
    }

    /// Whether this is a distance (as opposed to timing) record.
    pub fn is_distance(&self) -> bool {
        matches!(self, TrackerEvent::Distance { .. })
    }
}

impl Serialize for TrackerEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TrackerEvent::Distance {
                action,
                label,
                value,
                non_interaction,
            } => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("event", DISTANCE_EVENT)?;
                map.serialize_entry("eventCategory", EVENT_CATEGORY)?;
                map.serialize_entry("eventAction", action.as_str())?;
                map.serialize_entry("eventLabel", label)?;
                map.serialize_entry("eventValue", value)?;
                map.serialize_entry("eventNonInteraction", non_interaction)?;
                map.end()
            }
            TrackerEvent::Timing {
                action,
                label,
                elapsed_ms,
            } => {
                let mut map = serializer.serialize_map(Some(5))?;
                map.serialize_entry("event", TIMING_EVENT)?;
                map.serialize_entry("eventCategory", EVENT_CATEGORY)?;
                map.serialize_entry("eventAction", action.as_str())?;
                map.serialize_entry("eventLabel", label)?;
                map.serialize_entry("eventTiming", elapsed_ms)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_action_strings() {
        assert_eq!(DepthAction::Percentage.as_str(), "Percentage");
        assert_eq!(DepthAction::Elements.as_str(), "Elements");
        assert_eq!(DepthAction::PixelDepth.as_str(), "Pixel Depth");
        assert_eq!(format!("{}", DepthAction::PixelDepth), "Pixel Depth");
    }

    #[test]
    fn test_distance_constructor_fixes_value() {
        let event = TrackerEvent::distance(DepthAction::Percentage, "50%", true);
        match event {
            TrackerEvent::Distance { value, .. } => assert_eq!(value, 1),
            _ => panic!("expected distance event"),
        }
    }

    #[test]
    fn test_accessors() {
        let event = TrackerEvent::distance(DepthAction::Elements, "#footer", false);
        assert_eq!(event.action(), DepthAction::Elements);
        assert_eq!(event.label(), "#footer");
        assert!(event.is_distance());

        let timing = TrackerEvent::timing(DepthAction::Percentage, "25%", 1200);
        assert!(!timing.is_distance());
        assert_eq!(timing.label(), "25%");
    }

    #[test]
    fn test_distance_serializes_to_data_layer_shape() {
        let event = TrackerEvent::distance(DepthAction::Percentage, "25%", true);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "ScrollDistance");
        assert_eq!(json["eventCategory"], "Scroll Depth");
        assert_eq!(json["eventAction"], "Percentage");
        assert_eq!(json["eventLabel"], "25%");
        assert_eq!(json["eventValue"], 1);
        assert_eq!(json["eventNonInteraction"], true);
    }

    #[test]
    fn test_timing_serializes_to_data_layer_shape() {
        let event = TrackerEvent::timing(DepthAction::Elements, "#cta", 3500);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "ScrollTiming");
        assert_eq!(json["eventCategory"], "Scroll Depth");
        assert_eq!(json["eventAction"], "Elements");
        assert_eq!(json["eventLabel"], "#cta");
        assert_eq!(json["eventTiming"], 3500);
        assert!(json.get("eventValue").is_none());
    }
}
