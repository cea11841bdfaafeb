//! Per-junction turn analysis
//!
//! Ties the toolkit together for one junction: sample a representative
//! coordinate on every incident road, turn bearings into turn angles and
//! direction modifiers, then disambiguate colliding candidates, detect forks
//! and suppress obvious continuations.

use serde::Serialize;

use crate::angle::{turn_confidence, turn_direction};
use crate::config::GuidanceConfig;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::geometry::{CompressedGeometry, EdgeId, GeometrySampler, NodeCoordinates, NodeId};
use crate::instruction::{is_conflict, resolve, resolve_transitive, TurnInstruction, TurnType};
use crate::modifier::DirectionModifier;
use crate::names::requires_name_announced;
use crate::road_class::{can_be_seen_as_fork_within, FunctionalRoadClass};

/// A road touching the junction, with its endpoints in stored order
#[derive(Debug, Clone)]
pub struct IncidentRoad {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub road_class: FunctionalRoadClass,
    pub name: String,
}

/// A candidate exit of the junction with its turn instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedRoad {
    pub edge: EdgeId,
    /// Turn angle, 180 = straight
    pub angle: f64,
    pub instruction: TurnInstruction,
    pub confidence: f64,
    pub road_class: FunctionalRoadClass,
    pub name: String,
}

/// Turn angle between the direction of travel arriving at the junction and
/// the direction leaving it: 180 straight, < 180 right, > 180 left, 0 U-turn.
pub fn turn_angle(entry_bearing: f64, exit_bearing: f64) -> f64 {
    let angle = (entry_bearing - exit_bearing + 180.0).rem_euclid(360.0);
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

pub struct JunctionAnalyzer<'a, G: ?Sized, C: ?Sized> {
    sampler: GeometrySampler<'a, G, C>,
    max_fork_priority_gap: u32,
}

impl<'a, G, C> JunctionAnalyzer<'a, G, C>
where
    G: CompressedGeometry + ?Sized,
    C: NodeCoordinates + ?Sized,
{
    pub fn new(geometries: &'a G, coordinates: &'a C, config: &GuidanceConfig) -> Self {
        Self {
            sampler: GeometrySampler::with_config(geometries, coordinates, config),
            max_fork_priority_gap: config.max_fork_priority_gap,
        }
    }

    fn sample_away_from(&self, via: NodeId, road: &IncidentRoad) -> Result<Coordinate> {
        debug_assert!(
            road.from == via || road.to == via,
            "edge {} does not touch node {via}",
            road.edge
        );
        self.sampler
            .representative_coordinate(road.from, road.to, road.edge, road.to == via)
    }

    /// Bearing of travel when arriving at `via` over `incoming`
    pub fn entry_bearing(&self, via: NodeId, incoming: &IncidentRoad) -> Result<f64> {
        let via_coordinate = self.sampler.coordinate(via)?;
        Ok(self.sample_away_from(via, incoming)?.bearing_to(&via_coordinate))
    }

    /// Bearing of travel when leaving `via` over `road`
    pub fn exit_bearing(&self, via: NodeId, road: &IncidentRoad) -> Result<f64> {
        let via_coordinate = self.sampler.coordinate(via)?;
        Ok(via_coordinate.bearing_to(&self.sample_away_from(via, road)?))
    }

    /// Candidate instructions for every exit, sorted by turn angle
    pub fn analyze(
        &self,
        via: NodeId,
        incoming: &IncidentRoad,
        exits: &[IncidentRoad],
    ) -> Result<Vec<ConnectedRoad>> {
        let entry_bearing = self.entry_bearing(via, incoming)?;

        let mut roads = exits
            .iter()
            .map(|road| {
                let angle = turn_angle(entry_bearing, self.exit_bearing(via, road)?);
                Ok(ConnectedRoad {
                    edge: road.edge,
                    angle,
                    instruction: TurnInstruction::new(TurnType::Turn, turn_direction(angle)),
                    confidence: 1.0,
                    road_class: road.road_class,
                    name: road.name.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        roads.sort_by(|a, b| a.angle.total_cmp(&b.angle));

        let unresolved = resolve_conflicts(&mut roads);
        let has_fork = assign_forks(&mut roads, self.max_fork_priority_gap);
        if !has_fork {
            suppress_obvious(&incoming.name, &mut roads);
        }
        for road in roads.iter_mut() {
            road.confidence = turn_confidence(road.angle, road.instruction);
        }

        tracing::trace!(via, n_exits = roads.len(), unresolved, has_fork, "analyzed junction");
        Ok(roads)
    }
}

/// Sweep neighbouring roads (sorted by angle) and shift colliding
/// instructions apart. Returns the number of conflicts left in place.
pub fn resolve_conflicts(roads: &mut [ConnectedRoad]) -> usize {
    let mut unresolved = 0;

    for i in 1..roads.len() {
        let lower = roads[i - 1].instruction;
        let upper = roads[i].instruction;
        if !is_conflict(lower, upper) {
            continue;
        }

        // Without a further neighbour only shiftability limits the move.
        let beyond_lower = i.checked_sub(2).map_or(lower, |j| roads[j].instruction);
        if let Some(moved) = resolve(lower, beyond_lower, true) {
            roads[i - 1].instruction = moved;
            continue;
        }

        let beyond_upper = roads.get(i + 1).map_or(upper, |road| road.instruction);
        if let Some(moved) = resolve(upper, beyond_upper, false) {
            roads[i].instruction = moved;
            continue;
        }

        if i >= 2 {
            if let Some((first, second)) = resolve_transitive(roads[i - 2].instruction, lower, upper, true) {
                roads[i - 2].instruction = first;
                roads[i - 1].instruction = second;
                continue;
            }
        }

        if i + 1 < roads.len() {
            if let Some((first, second)) = resolve_transitive(roads[i + 1].instruction, upper, lower, false) {
                roads[i + 1].instruction = first;
                roads[i].instruction = second;
                continue;
            }
        }

        unresolved += 1;
        tracing::debug!(
            lower_angle = roads[i - 1].angle,
            upper_angle = roads[i].angle,
            modifier = %lower.direction_modifier,
            "unresolved turn conflict"
        );
    }

    unresolved
}

/// Two neighbouring slight turns onto roads of comparable rank become a
/// fork. Returns whether a fork was assigned.
pub fn assign_forks(roads: &mut [ConnectedRoad], max_priority_gap: u32) -> bool {
    let slight: Vec<usize> = roads
        .iter()
        .enumerate()
        .filter(|(_, road)| road.instruction.is_slight_turn())
        .map(|(index, _)| index)
        .collect();

    let &[right, left] = slight.as_slice() else {
        return false;
    };
    if left != right + 1 {
        return false;
    }

    let (right_class, left_class) = (roads[right].road_class, roads[left].road_class);
    if !can_be_seen_as_fork_within(right_class, left_class, max_priority_gap) {
        return false;
    }
    // service roads branching off a main road are turns, not forks
    if right_class.is_low_priority() != left_class.is_low_priority() {
        return false;
    }

    roads[right].instruction = TurnInstruction::new(TurnType::Fork, DirectionModifier::SlightRight);
    roads[left].instruction = TurnInstruction::new(TurnType::Fork, DirectionModifier::SlightLeft);
    true
}

/// If exactly one road continues (roughly) straight, going straight needs no
/// turn instruction: it is suppressed, or announced as a new name when the
/// name changes significantly.
pub fn suppress_obvious(incoming_name: &str, roads: &mut [ConnectedRoad]) {
    let mut slight = roads
        .iter()
        .enumerate()
        .filter(|(_, road)| road.instruction.is_slight_turn());
    let candidate = match (slight.next(), slight.next()) {
        (Some((index, _)), None) => index,
        _ => return,
    };

    let road = &mut roads[candidate];
    if !road.instruction.is_straight() || !road.instruction.turn_type.can_be_suppressed() {
        return;
    }

    road.instruction = if requires_name_announced(incoming_name, &road.name) {
        TurnInstruction::new(TurnType::NewName, DirectionModifier::Straight)
    } else {
        TurnInstruction::suppressed(DirectionModifier::Straight)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CompressedEdgeContainer;
    use DirectionModifier::*;

    const ARM: f64 = 0.0005;

    fn at_bearing(bearing_deg: f64) -> Coordinate {
        let b = bearing_deg.to_radians();
        Coordinate::from_degrees(ARM * b.sin(), ARM * b.cos())
    }

    fn road(edge: EdgeId, from: NodeId, to: NodeId, road_class: FunctionalRoadClass, name: &str) -> IncidentRoad {
        IncidentRoad {
            edge,
            from,
            to,
            road_class,
            name: name.to_string(),
        }
    }

    fn connected(angle: f64, instruction: TurnInstruction) -> ConnectedRoad {
        ConnectedRoad {
            edge: 0,
            angle,
            instruction,
            confidence: 1.0,
            road_class: FunctionalRoadClass::Residential,
            name: String::new(),
        }
    }

    fn turn(modifier: DirectionModifier) -> TurnInstruction {
        TurnInstruction::new(TurnType::Turn, modifier)
    }

    #[test]
    fn test_turn_angle() {
        assert_eq!(turn_angle(0.0, 0.0), 180.0);
        assert_eq!(turn_angle(0.0, 90.0), 90.0);
        assert_eq!(turn_angle(0.0, 270.0), 270.0);
        assert_eq!(turn_angle(0.0, 180.0), 0.0);
        assert_eq!(turn_angle(350.0, 10.0), 160.0);
        assert_eq!(turn_angle(10.0, 350.0), 200.0);
    }

    #[test]
    fn test_four_way_intersection() {
        // 0 = via, 1 = south (incoming), 2 = north, 3 = east, 4 = west
        let coordinates = vec![
            Coordinate::from_degrees(0.0, 0.0),
            at_bearing(180.0),
            at_bearing(0.0),
            at_bearing(90.0),
            at_bearing(270.0),
        ];
        let geometries = CompressedEdgeContainer::new();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(10, 1, 0, FunctionalRoadClass::Primary, "Main St");
        let exits = vec![
            road(11, 0, 2, FunctionalRoadClass::Primary, "Main St"),
            road(12, 0, 3, FunctionalRoadClass::Residential, "Oak St"),
            road(13, 4, 0, FunctionalRoadClass::Residential, "Elm St"),
        ];

        let roads = analyzer.analyze(0, &incoming, &exits).unwrap();
        let edges: Vec<_> = roads.iter().map(|r| r.edge).collect();
        assert_eq!(edges, vec![12, 11, 13]);

        assert_eq!(roads[0].instruction, turn(Right));
        assert_eq!(roads[1].instruction, TurnInstruction::suppressed(Straight));
        assert_eq!(roads[2].instruction, turn(Left));
        assert!((roads[0].angle - 90.0).abs() < 1e-6);
        assert!((roads[2].angle - 270.0).abs() < 1e-6);
        for r in &roads {
            assert!((r.confidence - 1.0).abs() < 1e-6, "{:?}", r);
        }
    }

    #[test]
    fn test_new_name_when_straight_changes_name() {
        let coordinates = vec![Coordinate::from_degrees(0.0, 0.0), at_bearing(180.0), at_bearing(0.0)];
        let geometries = CompressedEdgeContainer::new();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(1, 1, 0, FunctionalRoadClass::Secondary, "Main St");
        let exits = vec![road(2, 0, 2, FunctionalRoadClass::Secondary, "Oak St")];
        let roads = analyzer.analyze(0, &incoming, &exits).unwrap();
        assert_eq!(roads[0].instruction, TurnInstruction::new(TurnType::NewName, Straight));
    }

    #[test]
    fn test_colliding_right_turns_are_separated() {
        let coordinates = vec![
            Coordinate::from_degrees(0.0, 0.0),
            at_bearing(180.0),
            at_bearing(80.0),
            at_bearing(100.0),
        ];
        let geometries = CompressedEdgeContainer::new();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(1, 1, 0, FunctionalRoadClass::Tertiary, "");
        let exits = vec![
            road(2, 0, 2, FunctionalRoadClass::Tertiary, ""),
            road(3, 0, 3, FunctionalRoadClass::Tertiary, ""),
        ];
        let roads = analyzer.analyze(0, &incoming, &exits).unwrap();

        assert_eq!(roads[0].edge, 3);
        assert_eq!(roads[0].instruction, turn(SharpRight));
        assert_eq!(roads[1].edge, 2);
        assert_eq!(roads[1].instruction, turn(Right));
        // moved away from its natural band, so less confident
        assert!(roads[0].confidence < 1.0);
    }

    #[test]
    fn test_fork_between_similar_roads() {
        let coordinates = vec![
            Coordinate::from_degrees(0.0, 0.0),
            at_bearing(180.0),
            at_bearing(20.0),
            at_bearing(340.0),
        ];
        let geometries = CompressedEdgeContainer::new();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(1, 1, 0, FunctionalRoadClass::Primary, "N4");
        let exits = vec![
            road(2, 0, 2, FunctionalRoadClass::Primary, "N4"),
            road(3, 0, 3, FunctionalRoadClass::Primary, "N25"),
        ];
        let roads = analyzer.analyze(0, &incoming, &exits).unwrap();

        assert_eq!(roads[0].instruction, TurnInstruction::new(TurnType::Fork, SlightRight));
        assert_eq!(roads[1].instruction, TurnInstruction::new(TurnType::Fork, SlightLeft));
        assert_eq!(roads[0].confidence, 1.0);
    }

    #[test]
    fn test_no_fork_onto_service_road() {
        let coordinates = vec![
            Coordinate::from_degrees(0.0, 0.0),
            at_bearing(180.0),
            at_bearing(20.0),
            at_bearing(340.0),
        ];
        let geometries = CompressedEdgeContainer::new();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(1, 1, 0, FunctionalRoadClass::Primary, "N4");
        let exits = vec![
            road(2, 0, 2, FunctionalRoadClass::Primary, "N4"),
            road(3, 0, 3, FunctionalRoadClass::Service, ""),
        ];
        let roads = analyzer.analyze(0, &incoming, &exits).unwrap();

        assert_eq!(roads[0].instruction, turn(SlightRight));
        assert_eq!(roads[1].instruction, turn(SlightLeft));
    }

    #[test]
    fn test_compressed_exit_uses_sampled_direction() {
        // The exit leaves north for 12m, then bends east. Stored from the far
        // end (6) towards the junction (0) with intermediate node 5.
        let north_12m = 12.0 / 111_194.93;
        let mut coordinates = vec![Coordinate::default(); 7];
        coordinates[0] = Coordinate::from_degrees(0.0, 0.0);
        coordinates[1] = at_bearing(180.0);
        coordinates[5] = Coordinate::from_degrees(0.0, north_12m);
        coordinates[6] = Coordinate::from_degrees(ARM, north_12m);

        let mut geometries = CompressedEdgeContainer::new();
        geometries.add_bucket(2, vec![5]).unwrap();
        let analyzer = JunctionAnalyzer::new(&geometries, coordinates.as_slice(), &GuidanceConfig::default());

        let incoming = road(1, 1, 0, FunctionalRoadClass::Residential, "Elm St");
        let exit = road(2, 6, 0, FunctionalRoadClass::Residential, "Elm St");
        assert!(analyzer.exit_bearing(0, &exit).unwrap().abs() < 1e-3);

        let roads = analyzer.analyze(0, &incoming, &[exit]).unwrap();
        assert!((roads[0].angle - 180.0).abs() < 1e-3);
        assert_eq!(roads[0].instruction, TurnInstruction::suppressed(Straight));
    }

    #[test]
    fn test_resolve_conflicts_single_shifts() {
        let mut roads = vec![
            connected(100.0, turn(Right)),
            connected(120.0, turn(Right)),
            connected(130.0, turn(Right)),
        ];
        let unresolved = resolve_conflicts(&mut roads);
        assert_eq!(unresolved, 0);
        let modifiers: Vec<_> = roads.iter().map(|r| r.instruction.direction_modifier).collect();
        assert_eq!(modifiers, vec![SharpRight, Right, SlightRight]);
    }

    #[test]
    fn test_resolve_conflicts_transitive() {
        // both Right turns are boxed in by their neighbours, so the lower one
        // moves cw and pushes the SharpRight ahead of it
        let mut roads = vec![
            connected(30.0, turn(SharpRight)),
            connected(100.0, turn(Right)),
            connected(120.0, turn(Right)),
            connected(150.0, turn(SlightRight)),
        ];
        let unresolved = resolve_conflicts(&mut roads);
        assert_eq!(unresolved, 0);
        let modifiers: Vec<_> = roads.iter().map(|r| r.instruction.direction_modifier).collect();
        assert_eq!(modifiers, vec![UTurn, SharpRight, Right, SlightRight]);
    }

    #[test]
    fn test_resolve_conflicts_leaves_double_straight() {
        let mut roads = vec![connected(175.0, turn(Straight)), connected(185.0, turn(Straight))];
        assert_eq!(resolve_conflicts(&mut roads), 1);
        assert_eq!(roads[0].instruction, turn(Straight));
        assert_eq!(roads[1].instruction, turn(Straight));
    }

    #[test]
    fn test_suppress_requires_single_slight_road() {
        let mut roads = vec![connected(170.0, turn(Straight)), connected(200.0, turn(SlightLeft))];
        suppress_obvious("", &mut roads);
        assert_eq!(roads[0].instruction, turn(Straight));
    }
}
