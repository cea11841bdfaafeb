//! Turn angles: discretization, classification and confidence
//!
//! Angles are measured at the junction as the change of direction, where
//! 180° means going straight, (0, 180) are right turns, (180, 360) are
//! left turns and 0/360 is a U-turn.

use serde::{Deserialize, Serialize};

use crate::config::DISCRETE_ANGLE_STEP_SIZE;
use crate::instruction::TurnInstruction;
use crate::modifier::DirectionModifier;

/// An angle quantized into 256 buckets of 360/256 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct DiscreteAngle(pub u8);

impl DiscreteAngle {
    pub fn from_degrees(angle: f64) -> Self {
        discretize_angle(angle)
    }

    pub fn to_degrees(self) -> f64 {
        angle_from_discrete_angle(self)
    }
}

impl From<DiscreteAngle> for u8 {
    fn from(angle: DiscreteAngle) -> Self {
        angle.0
    }
}

/// Bucket an angle in [0, 360]. 360 itself saturates into the last bucket.
pub fn discretize_angle(angle: f64) -> DiscreteAngle {
    debug_assert!((0.0..=360.0).contains(&angle), "angle {angle} out of range");
    DiscreteAngle((angle / DISCRETE_ANGLE_STEP_SIZE) as u8)
}

pub fn angle_from_discrete_angle(angle: DiscreteAngle) -> f64 {
    angle.0 as f64 * DISCRETE_ANGLE_STEP_SIZE
}

/// Shortest circular distance between two angles, in [0, 180]
pub fn angular_deviation(angle: f64, from: f64) -> f64 {
    let deviation = (angle - from).abs();
    deviation.min(360.0 - deviation)
}

/// Deviation of `angle` from the ideal center of `modifier`
pub fn angular_penalty(angle: f64, modifier: DirectionModifier) -> f64 {
    angular_deviation(modifier.ideal_angle(), angle)
}

/// Maximum expected deviation from the ideal center per modifier
fn deviation_tolerance(modifier: DirectionModifier) -> f64 {
    match modifier {
        DirectionModifier::UTurn => 0.0,
        DirectionModifier::SharpRight => 45.0,
        DirectionModifier::Right => 50.0,
        DirectionModifier::SlightRight => 30.0,
        DirectionModifier::Straight => 20.0,
        DirectionModifier::SlightLeft => 30.0,
        DirectionModifier::Left => 50.0,
        DirectionModifier::SharpLeft => 45.0,
    }
}

/// How well `angle` matches the modifier of `instruction`.
///
/// 1.0 at the ideal center, falling off quadratically. Not clamped: angles
/// further away than the tolerance produce negative values.
pub fn turn_confidence(angle: f64, instruction: TurnInstruction) -> f64 {
    // no graded model for U-turns and non-basic types (roundabouts, forks, ...)
    if !instruction.turn_type.is_basic() || instruction.direction_modifier == DirectionModifier::UTurn {
        return 1.0;
    }

    let difference = angular_penalty(angle, instruction.direction_modifier);
    let max_deviation = deviation_tolerance(instruction.direction_modifier);
    1.0 - (difference / max_deviation) * (difference / max_deviation)
}

/// Translate an angle into its human-friendly direction.
///
/// The slight/straight bands overlap (165-170 and 190-195); the first
/// matching band wins.
pub fn turn_direction(angle: f64) -> DirectionModifier {
    if angle > 0.0 && angle < 60.0 {
        return DirectionModifier::SharpRight;
    }
    if (60.0..140.0).contains(&angle) {
        return DirectionModifier::Right;
    }
    if (140.0..170.0).contains(&angle) {
        return DirectionModifier::SlightRight;
    }
    if (165.0..=195.0).contains(&angle) {
        return DirectionModifier::Straight;
    }
    if angle > 190.0 && angle <= 220.0 {
        return DirectionModifier::SlightLeft;
    }
    if angle > 220.0 && angle <= 300.0 {
        return DirectionModifier::Left;
    }
    if angle > 300.0 && angle < 360.0 {
        return DirectionModifier::SharpLeft;
    }
    DirectionModifier::UTurn
}
