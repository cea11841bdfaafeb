//! # Butterfly-guidance
//!
//! Turn guidance toolkit for the butterfly-osm extraction pipeline.
//!
//! For every junction the pipeline samples a representative coordinate on
//! each incident road, turns bearings into turn angles and direction
//! modifiers, and disambiguates the resulting candidate instructions:
//!
//! - **geometry**: representative coordinates along compressed edges
//! - **modifier**: circular algebra over the eight direction modifiers
//! - **angle**: discrete angles, classification and confidence
//! - **instruction**: turn types, predicates and conflict resolution
//! - **road_class**: road priorities and fork discovery
//! - **names**: name change significance
//! - **junction**: all of the above applied to one junction
//!
//! ```rust
//! use butterfly_guidance::{turn_direction, turn_confidence, DirectionModifier, TurnInstruction, TurnType};
//!
//! let modifier = turn_direction(95.0);
//! assert_eq!(modifier, DirectionModifier::Right);
//!
//! let confidence = turn_confidence(95.0, TurnInstruction::new(TurnType::Turn, modifier));
//! assert!(confidence > 0.9);
//! ```

pub mod angle;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod instruction;
pub mod junction;
pub mod modifier;
pub mod names;
pub mod road_class;

pub use angle::{
    angle_from_discrete_angle, angular_deviation, angular_penalty, discretize_angle, turn_confidence,
    turn_direction, DiscreteAngle,
};
pub use config::GuidanceConfig;
pub use coordinate::Coordinate;
pub use error::{GuidanceError, Result};
pub use geometry::{
    representative_coordinate, CompressedEdgeContainer, CompressedGeometry, EdgeId, GeometrySampler,
    NodeCoordinates, NodeId,
};
pub use instruction::{
    can_be_suppressed, is_basic, is_conflict, resolve, resolve_in_place, resolve_transitive,
    resolve_transitive_in_place, TurnInstruction, TurnType,
};
pub use junction::{turn_angle, ConnectedRoad, IncidentRoad, JunctionAnalyzer};
pub use modifier::{is_distinct, is_slight_modifier, DirectionModifier};
pub use names::requires_name_announced;
pub use road_class::{can_be_seen_as_fork, is_low_priority_road_class, priority, FunctionalRoadClass};
