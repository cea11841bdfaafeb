//! Direction modifiers and their circular algebra
//!
//! The eight modifiers sit on a circle ordered by turn angle, starting at
//! the U-turn (0°) and sweeping through the right turns, straight (180°)
//! and the left turns. Shifting clockwise moves towards the sharper right
//! side (lower index), counter-clockwise towards the sharper left side
//! (higher index). Shifts never move into or out of `UTurn` and `Straight`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NUM_DIRECTION_MODIFIERS;
use crate::error::GuidanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DirectionModifier {
    UTurn = 0,
    SharpRight = 1,
    Right = 2,
    SlightRight = 3,
    Straight = 4,
    SlightLeft = 5,
    Left = 6,
    SharpLeft = 7,
}

impl DirectionModifier {
    pub const ALL: [DirectionModifier; NUM_DIRECTION_MODIFIERS as usize] = [
        DirectionModifier::UTurn,
        DirectionModifier::SharpRight,
        DirectionModifier::Right,
        DirectionModifier::SlightRight,
        DirectionModifier::Straight,
        DirectionModifier::SlightLeft,
        DirectionModifier::Left,
        DirectionModifier::SharpLeft,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    fn from_index(index: u8) -> Self {
        Self::ALL[(index % NUM_DIRECTION_MODIFIERS) as usize]
    }

    /// Ideal center angle used for confidence scoring
    pub fn ideal_angle(self) -> f64 {
        match self {
            DirectionModifier::UTurn => 0.0,
            DirectionModifier::SharpRight => 45.0,
            DirectionModifier::Right => 90.0,
            DirectionModifier::SlightRight => 135.0,
            DirectionModifier::Straight => 180.0,
            DirectionModifier::SlightLeft => 225.0,
            DirectionModifier::Left => 270.0,
            DirectionModifier::SharpLeft => 315.0,
        }
    }

    pub fn is_shiftable_ccw(self) -> bool {
        match self {
            DirectionModifier::SharpRight
            | DirectionModifier::Right
            | DirectionModifier::SlightLeft
            | DirectionModifier::Left => true,
            DirectionModifier::UTurn
            | DirectionModifier::SlightRight
            | DirectionModifier::Straight
            | DirectionModifier::SharpLeft => false,
        }
    }

    pub fn is_shiftable_cw(self) -> bool {
        match self {
            DirectionModifier::Right
            | DirectionModifier::SlightRight
            | DirectionModifier::Left
            | DirectionModifier::SharpLeft => true,
            DirectionModifier::UTurn
            | DirectionModifier::SharpRight
            | DirectionModifier::Straight
            | DirectionModifier::SlightLeft => false,
        }
    }

    /// One step counter-clockwise, regardless of shiftability
    pub fn forced_shift_ccw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// One step clockwise, regardless of shiftability
    pub fn forced_shift_cw(self) -> Self {
        Self::from_index(self.index() + NUM_DIRECTION_MODIFIERS - 1)
    }

    pub fn shift_ccw(self) -> Self {
        if self.is_shiftable_ccw() {
            self.forced_shift_ccw()
        } else {
            self
        }
    }

    pub fn shift_cw(self) -> Self {
        if self.is_shiftable_cw() {
            self.forced_shift_cw()
        } else {
            self
        }
    }

    /// Swap left and right
    pub fn mirror(self) -> Self {
        match self {
            DirectionModifier::UTurn => DirectionModifier::UTurn,
            DirectionModifier::SharpRight => DirectionModifier::SharpLeft,
            DirectionModifier::Right => DirectionModifier::Left,
            DirectionModifier::SlightRight => DirectionModifier::SlightLeft,
            DirectionModifier::Straight => DirectionModifier::Straight,
            DirectionModifier::SlightLeft => DirectionModifier::SlightRight,
            DirectionModifier::Left => DirectionModifier::Right,
            DirectionModifier::SharpLeft => DirectionModifier::SharpRight,
        }
    }

    pub fn is_slight(self) -> bool {
        matches!(
            self,
            DirectionModifier::Straight | DirectionModifier::SlightRight | DirectionModifier::SlightLeft
        )
    }

    pub fn is_sharp(self) -> bool {
        matches!(self, DirectionModifier::SharpRight | DirectionModifier::SharpLeft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectionModifier::UTurn => "uturn",
            DirectionModifier::SharpRight => "sharp right",
            DirectionModifier::Right => "right",
            DirectionModifier::SlightRight => "slight right",
            DirectionModifier::Straight => "straight",
            DirectionModifier::SlightLeft => "slight left",
            DirectionModifier::Left => "left",
            DirectionModifier::SharpLeft => "sharp left",
        }
    }
}

impl fmt::Display for DirectionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for DirectionModifier {
    type Error = GuidanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(GuidanceError::InvalidDirectionModifier(value))
    }
}

/// Adjacent modifiers are too similar to tell apart reliably
pub fn is_distinct(first: DirectionModifier, second: DirectionModifier) -> bool {
    if first.forced_shift_ccw() == second {
        return false;
    }
    if second.forced_shift_ccw() == first {
        return false;
    }
    true
}

pub fn is_slight_modifier(modifier: DirectionModifier) -> bool {
    modifier.is_slight()
}
