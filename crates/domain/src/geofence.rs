// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Municipal boundary admission check.
//!
//! A [`ServiceArea`] is a single static polygon. Membership uses the
//! even-odd rule: a horizontal ray cast from the point toggles the result
//! each time it crosses an edge. The test performs no range clamping;
//! coordinates must be validated before they get here.

use crate::error::DomainError;
use crate::types::Coordinates;
use serde::{Deserialize, Serialize};

/// A polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Built-in boundary of the City of Turin, clockwise from the north.
const TURIN_BOUNDARY: [(f64, f64); 12] = [
    (45.1400, 7.6600),
    (45.1340, 7.7050),
    (45.1150, 7.7400),
    (45.0950, 7.7730),
    (45.0600, 7.7650),
    (45.0300, 7.7400),
    (45.0070, 7.6900),
    (45.0100, 7.6300),
    (45.0350, 7.5950),
    (45.0700, 7.5780),
    (45.1050, 7.5900),
    (45.1300, 7.6200),
];

/// The area in which reports may be filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    vertices: Vec<GeoPoint>,
}

impl ServiceArea {
    /// Builds a service area from an ordered vertex list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBoundary` if fewer than three vertices
    /// are given or any vertex is not a finite number.
    pub fn new(vertices: Vec<GeoPoint>) -> Result<Self, DomainError> {
        if vertices.len() < 3 {
            return Err(DomainError::InvalidBoundary(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices
            .iter()
            .find(|v| !v.latitude.is_finite() || !v.longitude.is_finite())
        {
            return Err(DomainError::InvalidBoundary(format!(
                "vertex ({}, {}) is not finite",
                bad.latitude, bad.longitude
            )));
        }
        Ok(Self { vertices })
    }

    /// The municipal boundary shipped with the application.
    #[must_use]
    pub fn turin() -> Self {
        Self {
            vertices: TURIN_BOUNDARY
                .iter()
                .map(|(latitude, longitude)| GeoPoint::new(*latitude, *longitude))
                .collect(),
        }
    }

    /// Loads a boundary from a JSON array of `{ "latitude", "longitude" }`
    /// objects.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBoundary` if the document does not parse
    /// or the polygon is unusable.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let vertices: Vec<GeoPoint> = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidBoundary(e.to_string()))?;
        Self::new(vertices)
    }

    #[must_use]
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Even-odd point-in-polygon test over edges `(i, i - 1)`, wrapping.
    #[must_use]
    pub fn is_within_service_area(&self, latitude: f64, longitude: f64) -> bool {
        let count = self.vertices.len();
        let mut inside = false;
        let mut j = count - 1;
        for i in 0..count {
            let (xi, yi) = (self.vertices[i].longitude, self.vertices[i].latitude);
            let (xj, yj) = (self.vertices[j].longitude, self.vertices[j].latitude);
            if (yi > latitude) != (yj > latitude)
                && longitude < (xj - xi) * (latitude - yi) / (yj - yi) + xi
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    #[must_use]
    pub fn contains(&self, coordinates: &Coordinates) -> bool {
        self.is_within_service_area(coordinates.latitude, coordinates.longitude)
    }

    /// Fails with `DomainError::OutsideServiceArea` when the point is outside.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check(&self, coordinates: &Coordinates) -> Result<(), DomainError> {
        if self.contains(coordinates) {
            Ok(())
        } else {
            Err(DomainError::OutsideServiceArea {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            })
        }
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::turin()
    }
}
