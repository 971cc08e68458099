//! Nearby institution lookup and geo helpers.

use serde::{Deserialize, Serialize};

use crate::catalog::career_label;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    pub maps_url: String,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Institution {
    /// An institution with known coordinates, linked to its map pin.
    pub fn at(name: &str, address: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            lat: Some(lat),
            lng: Some(lng),
            distance_km: None,
            maps_url: maps_place_url(lat, lng),
            courses: Vec::new(),
            description: String::new(),
        }
    }

    /// Fills `distance_km` from `origin` when both ends have coordinates.
    pub fn with_distance_from(mut self, origin: Option<(f64, f64)>) -> Self {
        if let (Some((lat1, lng1)), Some(lat2), Some(lng2)) = (origin, self.lat, self.lng) {
            self.distance_km = Some(round2(haversine_km(lat1, lng1, lat2, lng2)));
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionsRequest {
    pub location: String,
    #[serde(default)]
    pub careers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionsResponse {
    pub location_resolved: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub institutes: Vec<Institution>,
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn maps_place_url(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps?q={},{}", lat, lng)
}

pub fn maps_search_url(query: &str) -> String {
    format!("https://www.google.com/maps/search/{}", quote_plus(query))
}

/// Form-style URL encoding: spaces become `+`, unreserved bytes pass through.
fn quote_plus(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Placeholder institutes, one per career, searchable on a map.
pub fn search_institutes(location: &str, careers: &[String]) -> InstitutionsResponse {
    let location = location.trim();
    let institutes = careers
        .iter()
        .map(|code| {
            let label = career_label(code);
            Institution {
                name: format!("{} Center - {}", label, location),
                address: format!("Near {}", location),
                lat: None,
                lng: None,
                distance_km: None,
                maps_url: maps_search_url(&format!("{} {}", label, location)),
                courses: vec![label],
                description: "Fallback generated".to_string(),
            }
        })
        .collect::<Vec<_>>();

    log::info!(
        "[ROADMAP] {} placeholder institutes for '{}'",
        institutes.len(),
        location
    );

    InstitutionsResponse {
        location_resolved: location.to_string(),
        lat: None,
        lng: None,
        institutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_is_zero_for_same_point() {
        assert!(haversine_km(12.97, 77.59, 12.97, 77.59).abs() < 1e-9);
    }

    #[test]
    fn haversine_matches_known_distance() {
        // MG Road to BTM Layout, Bengaluru
        let d = haversine_km(12.97, 77.59, 12.91, 77.60);
        assert!((d - 6.76).abs() < 0.05, "got {d}");
    }

    #[test]
    fn fallback_institutes_use_career_labels() {
        let response = search_institutes(" Mysuru ", &["ml_engineer".to_string()]);
        assert_eq!(response.location_resolved, "Mysuru");
        let inst = &response.institutes[0];
        assert_eq!(inst.name, "Machine Learning Engineer Center - Mysuru");
        assert_eq!(inst.address, "Near Mysuru");
        assert_eq!(
            inst.maps_url,
            "https://www.google.com/maps/search/Machine+Learning+Engineer+Mysuru"
        );
        assert_eq!(inst.courses, vec!["Machine Learning Engineer"]);
    }

    #[test]
    fn distance_needs_both_coordinates() {
        let inst = Institution::at("ABC Institute", "MG Road", 12.97, 77.59);
        assert_eq!(inst.maps_url, "https://www.google.com/maps?q=12.97,77.59");
        assert!(inst.clone().with_distance_from(None).distance_km.is_none());
        assert_eq!(
            inst.with_distance_from(Some((12.97, 77.59))).distance_km,
            Some(0.0)
        );
    }
}
