//! Turn types, turn instructions and conflict resolution
//!
//! A junction with several similar exits can produce candidates that share
//! a direction modifier. `resolve` and `resolve_transitive` nudge a
//! candidate one step around the modifier circle so neighbouring exits end
//! up with different announcements. Both are pure: they return the moved
//! instruction instead of mutating in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GuidanceError;
use crate::modifier::DirectionModifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TurnType {
    Invalid = 0,
    NoTurn = 1,
    Suppressed = 2,
    NewName = 3,
    Continue = 4,
    Turn = 5,
    Merge = 6,
    OnRamp = 7,
    OffRamp = 8,
    Fork = 9,
    EndOfRoad = 10,
    Notification = 11,
    EnterRoundabout = 12,
    EnterAndExitRoundabout = 13,
    EnterRotary = 14,
    EnterAndExitRotary = 15,
    ExitRoundabout = 16,
    ExitRotary = 17,
    StayOnRoundabout = 18,
}

impl TurnType {
    pub const ALL: [TurnType; 19] = [
        TurnType::Invalid,
        TurnType::NoTurn,
        TurnType::Suppressed,
        TurnType::NewName,
        TurnType::Continue,
        TurnType::Turn,
        TurnType::Merge,
        TurnType::OnRamp,
        TurnType::OffRamp,
        TurnType::Fork,
        TurnType::EndOfRoad,
        TurnType::Notification,
        TurnType::EnterRoundabout,
        TurnType::EnterAndExitRoundabout,
        TurnType::EnterRotary,
        TurnType::EnterAndExitRotary,
        TurnType::ExitRoundabout,
        TurnType::ExitRotary,
        TurnType::StayOnRoundabout,
    ];

    /// Plain turns whose modifier is derived purely from the turn angle
    pub fn is_basic(self) -> bool {
        matches!(self, TurnType::Turn | TurnType::EndOfRoad)
    }

    /// Hint that the instruction may be dropped from the final output when
    /// it is unambiguous
    pub fn can_be_suppressed(self) -> bool {
        self == TurnType::Turn
    }

    pub fn is_roundabout(self) -> bool {
        matches!(
            self,
            TurnType::EnterRoundabout
                | TurnType::EnterAndExitRoundabout
                | TurnType::EnterRotary
                | TurnType::EnterAndExitRotary
                | TurnType::ExitRoundabout
                | TurnType::ExitRotary
                | TurnType::StayOnRoundabout
        )
    }
}

impl TryFrom<u8> for TurnType {
    type Error = GuidanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(GuidanceError::InvalidTurnType(value))
    }
}

/// A (turn type, direction modifier) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnInstruction {
    pub turn_type: TurnType,
    pub direction_modifier: DirectionModifier,
}

impl TurnInstruction {
    pub const INVALID: TurnInstruction = TurnInstruction {
        turn_type: TurnType::Invalid,
        direction_modifier: DirectionModifier::UTurn,
    };

    pub const NO_TURN: TurnInstruction = TurnInstruction {
        turn_type: TurnType::NoTurn,
        direction_modifier: DirectionModifier::UTurn,
    };

    pub const fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        Self {
            turn_type,
            direction_modifier,
        }
    }

    pub const fn suppressed(direction_modifier: DirectionModifier) -> Self {
        Self::new(TurnType::Suppressed, direction_modifier)
    }

    pub fn with_modifier(self, direction_modifier: DirectionModifier) -> Self {
        Self {
            direction_modifier,
            ..self
        }
    }

    pub fn is_uturn(self) -> bool {
        self.turn_type.is_basic() && self.direction_modifier == DirectionModifier::UTurn
    }

    pub fn is_slight_turn(self) -> bool {
        (self.turn_type.is_basic() || self.turn_type == TurnType::NoTurn)
            && self.direction_modifier.is_slight()
    }

    pub fn is_sharp_turn(self) -> bool {
        self.turn_type.is_basic() && self.direction_modifier.is_sharp()
    }

    pub fn is_straight(self) -> bool {
        (self.turn_type.is_basic() || self.turn_type == TurnType::NoTurn)
            && self.direction_modifier == DirectionModifier::Straight
    }
}

impl fmt::Display for TurnInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.turn_type, self.direction_modifier)
    }
}

pub fn is_basic(turn_type: TurnType) -> bool {
    turn_type.is_basic()
}

pub fn can_be_suppressed(turn_type: TurnType) -> bool {
    turn_type.can_be_suppressed()
}

/// Two instructions collide if they are identical, or if both go straight
/// regardless of their types.
pub fn is_conflict(first: TurnInstruction, second: TurnInstruction) -> bool {
    (first.turn_type == second.turn_type && first.direction_modifier == second.direction_modifier)
        || (first.is_straight() && second.is_straight())
}

/// Try to move `to_resolve` one step around the circle, away from a
/// collision. Fails if the modifier cannot shift in that direction or if it
/// would land on `neighbor`'s modifier.
pub fn resolve(
    to_resolve: TurnInstruction,
    neighbor: TurnInstruction,
    resolve_cw: bool,
) -> Option<TurnInstruction> {
    let current = to_resolve.direction_modifier;
    let shifted = if resolve_cw {
        current.shift_cw()
    } else {
        current.shift_ccw()
    };

    if shifted == neighbor.direction_modifier || shifted == current {
        return None;
    }
    Some(to_resolve.with_modifier(shifted))
}

/// Resolve `second` against `third`; on success `first` is pushed one
/// forced step in the same rotation so the three keep their order.
///
/// Returns the new `(first, second)`.
pub fn resolve_transitive(
    first: TurnInstruction,
    second: TurnInstruction,
    third: TurnInstruction,
    resolve_cw: bool,
) -> Option<(TurnInstruction, TurnInstruction)> {
    let second = resolve(second, third, resolve_cw)?;
    let modifier = first.direction_modifier;
    let shifted = if resolve_cw {
        modifier.forced_shift_cw()
    } else {
        modifier.forced_shift_ccw()
    };
    Some((first.with_modifier(shifted), second))
}

/// In-place form of [`resolve`] for loop-style callers
pub fn resolve_in_place(to_resolve: &mut TurnInstruction, neighbor: TurnInstruction, resolve_cw: bool) -> bool {
    match resolve(*to_resolve, neighbor, resolve_cw) {
        Some(resolved) => {
            *to_resolve = resolved;
            true
        }
        None => false,
    }
}

/// In-place form of [`resolve_transitive`]
pub fn resolve_transitive_in_place(
    first: &mut TurnInstruction,
    second: &mut TurnInstruction,
    third: TurnInstruction,
    resolve_cw: bool,
) -> bool {
    match resolve_transitive(*first, *second, third, resolve_cw) {
        Some((new_first, new_second)) => {
            *first = new_first;
            *second = new_second;
            true
        }
        None => false,
    }
}
