// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report categories and the category-specific technical roles.
//!
//! The category → role mapping is a fixed table owned by [`TechnicalRole`].
//! Each role lists the categories it covers; the inverse lookup scans the
//! table, so covering a category with several offices only requires editing
//! `TechnicalRole::categories`.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of issue categories a citizen can file a report under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportCategory {
    WaterSupply,
    ArchitecturalBarriers,
    SewerSystem,
    PublicLighting,
    Waste,
    RoadSignsTrafficLights,
    RoadsUrbanFurnishings,
    PublicGreenAreasPlaygrounds,
    BicycleLanes,
    PublicTransportStops,
    GraffitiVandalism,
    Other,
}

impl ReportCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 12] = [
        Self::WaterSupply,
        Self::ArchitecturalBarriers,
        Self::SewerSystem,
        Self::PublicLighting,
        Self::Waste,
        Self::RoadSignsTrafficLights,
        Self::RoadsUrbanFurnishings,
        Self::PublicGreenAreasPlaygrounds,
        Self::BicycleLanes,
        Self::PublicTransportStops,
        Self::GraffitiVandalism,
        Self::Other,
    ];

    /// Returns the persisted / wire representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaterSupply => "WATER_SUPPLY",
            Self::ArchitecturalBarriers => "ARCHITECTURAL_BARRIERS",
            Self::SewerSystem => "SEWER_SYSTEM",
            Self::PublicLighting => "PUBLIC_LIGHTING",
            Self::Waste => "WASTE",
            Self::RoadSignsTrafficLights => "ROAD_SIGNS_TRAFFIC_LIGHTS",
            Self::RoadsUrbanFurnishings => "ROADS_URBAN_FURNISHINGS",
            Self::PublicGreenAreasPlaygrounds => "PUBLIC_GREEN_AREAS_PLAYGROUNDS",
            Self::BicycleLanes => "BICYCLE_LANES",
            Self::PublicTransportStops => "PUBLIC_TRANSPORT_STOPS",
            Self::GraffitiVandalism => "GRAFFITI_VANDALISM",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for ReportCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category-specific technical offices of the municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechnicalRole {
    WaterSupplyOfficer,
    AccessibilityOfficer,
    SewerageOfficer,
    PublicLightingOfficer,
    WasteManagementOfficer,
    TrafficSignalsOfficer,
    RoadMaintenanceOfficer,
    ParksOfficer,
    CyclingInfrastructureOfficer,
    PublicTransportOfficer,
    UrbanDecorumOfficer,
    GeneralServicesOfficer,
}

impl TechnicalRole {
    /// Every technical role.
    pub const ALL: [Self; 12] = [
        Self::WaterSupplyOfficer,
        Self::AccessibilityOfficer,
        Self::SewerageOfficer,
        Self::PublicLightingOfficer,
        Self::WasteManagementOfficer,
        Self::TrafficSignalsOfficer,
        Self::RoadMaintenanceOfficer,
        Self::ParksOfficer,
        Self::CyclingInfrastructureOfficer,
        Self::PublicTransportOfficer,
        Self::UrbanDecorumOfficer,
        Self::GeneralServicesOfficer,
    ];

    /// Returns the persisted / wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaterSupplyOfficer => "WATER_SUPPLY_OFFICER",
            Self::AccessibilityOfficer => "ACCESSIBILITY_OFFICER",
            Self::SewerageOfficer => "SEWERAGE_OFFICER",
            Self::PublicLightingOfficer => "PUBLIC_LIGHTING_OFFICER",
            Self::WasteManagementOfficer => "WASTE_MANAGEMENT_OFFICER",
            Self::TrafficSignalsOfficer => "TRAFFIC_SIGNALS_OFFICER",
            Self::RoadMaintenanceOfficer => "ROAD_MAINTENANCE_OFFICER",
            Self::ParksOfficer => "PARKS_OFFICER",
            Self::CyclingInfrastructureOfficer => "CYCLING_INFRASTRUCTURE_OFFICER",
            Self::PublicTransportOfficer => "PUBLIC_TRANSPORT_OFFICER",
            Self::UrbanDecorumOfficer => "URBAN_DECORUM_OFFICER",
            Self::GeneralServicesOfficer => "GENERAL_SERVICES_OFFICER",
        }
    }

    /// The categories this office is responsible for.
    #[must_use]
    pub const fn categories(&self) -> &'static [ReportCategory] {
        match self {
            Self::WaterSupplyOfficer => &[ReportCategory::WaterSupply],
            Self::AccessibilityOfficer => &[ReportCategory::ArchitecturalBarriers],
            Self::SewerageOfficer => &[ReportCategory::SewerSystem],
            Self::PublicLightingOfficer => &[ReportCategory::PublicLighting],
            Self::WasteManagementOfficer => &[ReportCategory::Waste],
            Self::TrafficSignalsOfficer => &[ReportCategory::RoadSignsTrafficLights],
            Self::RoadMaintenanceOfficer => &[ReportCategory::RoadsUrbanFurnishings],
            Self::ParksOfficer => &[ReportCategory::PublicGreenAreasPlaygrounds],
            Self::CyclingInfrastructureOfficer => &[ReportCategory::BicycleLanes],
            Self::PublicTransportOfficer => &[ReportCategory::PublicTransportStops],
            Self::UrbanDecorumOfficer => &[ReportCategory::GraffitiVandalism],
            Self::GeneralServicesOfficer => &[ReportCategory::Other],
        }
    }

    /// Returns true if this office handles reports of `category`.
    #[must_use]
    pub fn covers(&self, category: ReportCategory) -> bool {
        self.categories().contains(&category)
    }
}

impl FromStr for TechnicalRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}

impl std::fmt::Display for TechnicalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns every technical role whose mapping includes `category`.
#[must_use]
pub fn technical_roles_for(category: ReportCategory) -> Vec<TechnicalRole> {
    TechnicalRole::ALL
        .into_iter()
        .filter(|role| role.covers(category))
        .collect()
}
