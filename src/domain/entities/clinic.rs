//! Clinic content: services, benefits, locations and the page copy.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::testimonial::Testimonial;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d]").expect("Invalid regex"));

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicService {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicBenefit {
    pub title: String,
    pub description: String,
    /// Small print under the description, e.g. "Since 1989".
    #[serde(default)]
    pub stat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicLocation {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub hours: String,
}

impl ClinicLocation {
    #[must_use]
    pub fn tel_uri(&self) -> String {
        tel_uri(&self.phone)
    }

    /// Map search link for the "Get Directions" action.
    #[must_use]
    pub fn directions_url(&self) -> String {
        let query = format!("{}, {}", self.address, self.city);
        format!("{DIRECTIONS_BASE_URL}{}", encode_query(&query))
    }
}

/// `tel:` link containing only the digits of a display number.
#[must_use]
pub fn tel_uri(phone: &str) -> String {
    format!("tel:{}", NON_DIGITS.replace_all(phone, ""))
}

fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            ' ' => out.push('+'),
            other => {
                let mut buf = [0u8; 4];
                for byte in other.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}

/// Everything the landing page displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicContent {
    pub name: String,
    pub tagline: String,
    pub hero_heading: String,
    pub hero_body: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub main_phone: String,
    pub emergency_phone: String,
    #[serde(default)]
    pub services: Vec<ClinicService>,
    #[serde(default)]
    pub benefits: Vec<ClinicBenefit>,
    #[serde(default)]
    pub locations: Vec<ClinicLocation>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}
