//! Functional road classes, priorities and fork discovery

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MAX_FORK_PRIORITY_GAP;
use crate::error::GuidanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FunctionalRoadClass {
    #[default]
    Unknown = 0,
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    Service,
    LivingStreet,
    LowPriorityRoad,
}

impl FunctionalRoadClass {
    pub const ALL: [FunctionalRoadClass; 16] = [
        FunctionalRoadClass::Unknown,
        FunctionalRoadClass::Motorway,
        FunctionalRoadClass::MotorwayLink,
        FunctionalRoadClass::Trunk,
        FunctionalRoadClass::TrunkLink,
        FunctionalRoadClass::Primary,
        FunctionalRoadClass::PrimaryLink,
        FunctionalRoadClass::Secondary,
        FunctionalRoadClass::SecondaryLink,
        FunctionalRoadClass::Tertiary,
        FunctionalRoadClass::TertiaryLink,
        FunctionalRoadClass::Unclassified,
        FunctionalRoadClass::Residential,
        FunctionalRoadClass::Service,
        FunctionalRoadClass::LivingStreet,
        FunctionalRoadClass::LowPriorityRoad,
    ];

    /// Priority used for fork discovery. Lower is more important; classes
    /// outside the main hierarchy share the background value 10.
    pub fn priority(self) -> u32 {
        match self {
            FunctionalRoadClass::Unknown => 10,
            FunctionalRoadClass::Motorway => 0,
            FunctionalRoadClass::MotorwayLink => 10,
            FunctionalRoadClass::Trunk => 2,
            FunctionalRoadClass::TrunkLink => 10,
            FunctionalRoadClass::Primary => 4,
            FunctionalRoadClass::PrimaryLink => 10,
            FunctionalRoadClass::Secondary => 6,
            FunctionalRoadClass::SecondaryLink => 10,
            FunctionalRoadClass::Tertiary => 8,
            FunctionalRoadClass::TertiaryLink => 10,
            FunctionalRoadClass::Unclassified => 11,
            FunctionalRoadClass::Residential => 10,
            FunctionalRoadClass::Service => 12,
            FunctionalRoadClass::LivingStreet => 10,
            FunctionalRoadClass::LowPriorityRoad => 14,
        }
    }

    pub fn is_low_priority(self) -> bool {
        matches!(self, FunctionalRoadClass::LowPriorityRoad | FunctionalRoadClass::Service)
    }

    /// Map an OSM `highway=*` value. Unrecognized values map to `Unknown`.
    pub fn from_highway_tag(highway: &str) -> Self {
        highway.parse().unwrap_or(FunctionalRoadClass::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FunctionalRoadClass::Unknown => "unknown",
            FunctionalRoadClass::Motorway => "motorway",
            FunctionalRoadClass::MotorwayLink => "motorway_link",
            FunctionalRoadClass::Trunk => "trunk",
            FunctionalRoadClass::TrunkLink => "trunk_link",
            FunctionalRoadClass::Primary => "primary",
            FunctionalRoadClass::PrimaryLink => "primary_link",
            FunctionalRoadClass::Secondary => "secondary",
            FunctionalRoadClass::SecondaryLink => "secondary_link",
            FunctionalRoadClass::Tertiary => "tertiary",
            FunctionalRoadClass::TertiaryLink => "tertiary_link",
            FunctionalRoadClass::Unclassified => "unclassified",
            FunctionalRoadClass::Residential => "residential",
            FunctionalRoadClass::Service => "service",
            FunctionalRoadClass::LivingStreet => "living_street",
            FunctionalRoadClass::LowPriorityRoad => "low_priority_road",
        }
    }
}

impl FromStr for FunctionalRoadClass {
    type Err = GuidanceError;

    fn from_str(highway: &str) -> Result<Self, Self::Err> {
        let class = match highway {
            "motorway" => FunctionalRoadClass::Motorway,
            "motorway_link" => FunctionalRoadClass::MotorwayLink,
            "trunk" => FunctionalRoadClass::Trunk,
            "trunk_link" => FunctionalRoadClass::TrunkLink,
            "primary" => FunctionalRoadClass::Primary,
            "primary_link" => FunctionalRoadClass::PrimaryLink,
            "secondary" => FunctionalRoadClass::Secondary,
            "secondary_link" => FunctionalRoadClass::SecondaryLink,
            "tertiary" => FunctionalRoadClass::Tertiary,
            "tertiary_link" => FunctionalRoadClass::TertiaryLink,
            "unclassified" => FunctionalRoadClass::Unclassified,
            "residential" => FunctionalRoadClass::Residential,
            "service" => FunctionalRoadClass::Service,
            "living_street" => FunctionalRoadClass::LivingStreet,

            // Tracks, paths and pedestrian infrastructure
            "track" | "path" | "footway" | "cycleway" | "pedestrian" | "steps" | "bridleway"
            | "low_priority_road" => FunctionalRoadClass::LowPriorityRoad,

            "unknown" => FunctionalRoadClass::Unknown,
            other => return Err(GuidanceError::UnknownRoadClass(other.to_string())),
        };
        Ok(class)
    }
}

impl fmt::Display for FunctionalRoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn priority(road_class: FunctionalRoadClass) -> u32 {
    road_class.priority()
}

pub fn is_low_priority_road_class(road_class: FunctionalRoadClass) -> bool {
    road_class.is_low_priority()
}

/// Forks require similar road categories: priorities at most
/// `MAX_FORK_PRIORITY_GAP` apart.
pub fn can_be_seen_as_fork(first: FunctionalRoadClass, second: FunctionalRoadClass) -> bool {
    can_be_seen_as_fork_within(first, second, MAX_FORK_PRIORITY_GAP)
}

pub fn can_be_seen_as_fork_within(
    first: FunctionalRoadClass,
    second: FunctionalRoadClass,
    max_priority_gap: u32,
) -> bool {
    first.priority().abs_diff(second.priority()) <= max_priority_gap
}
