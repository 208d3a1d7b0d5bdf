//! Analytics events fired on user interactions.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::entities::TextSize;

/// Where an appointment button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentSource {
    Hero,
    Cta,
}

/// Named tracking call with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView { path: String },
    AppointmentClick { source: AppointmentSource },
    PhoneClick { phone: String },
    ServiceClick { service: String },
    LocationClick { location: String },
    EmergencyClick,
    ScrollDepth { percent: u8 },
    TextSizeChange { size: TextSize },
    TestimonialView { index: usize, total: usize },
}

impl AnalyticsEvent {
    /// Event name as reported to the analytics sink.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PageView { .. } => "page_view",
            Self::AppointmentClick { .. } => "appointment_click",
            Self::PhoneClick { .. } => "phone_click",
            Self::ServiceClick { .. } => "service_click",
            Self::LocationClick { .. } => "location_click",
            Self::EmergencyClick => "emergency_click",
            Self::ScrollDepth { .. } => "scroll_depth",
            Self::TextSizeChange { .. } => "text_size_change",
            Self::TestimonialView { .. } => "testimonial_view",
        }
    }

    /// Event fields without the name.
    #[must_use]
    pub fn metadata(&self) -> Map<String, Value> {
        let mut map = match json!(self) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.remove("event");
        map
    }
}
