//! Representative coordinates along compressed edge geometry
//!
//! The bearing of a road at a junction is not taken from the first polyline
//! segment (too noisy around the junction) but from a point a fixed distance
//! along the road. Edges that went through graph compression carry their
//! intermediate nodes in a bucket; uncompressed edges are a straight segment
//! between their two endpoints.

use std::collections::HashMap;

use crate::config::{GuidanceConfig, DESIRED_SEGMENT_LENGTH};
use crate::coordinate::Coordinate;
use crate::error::{GuidanceError, Result};

pub type NodeId = u32;
pub type EdgeId = u32;

/// Read access to the intermediate nodes of compressed edges
pub trait CompressedGeometry {
    /// Intermediate nodes of `edge` in stored (forward) order, `None` for an
    /// uncompressed edge. A present bucket is never empty.
    fn bucket(&self, edge: EdgeId) -> Option<&[NodeId]>;

    fn has_entry(&self, edge: EdgeId) -> bool {
        self.bucket(edge).is_some()
    }
}

/// Read access to node coordinates
pub trait NodeCoordinates {
    fn coordinate_of(&self, node: NodeId) -> Option<Coordinate>;
}

impl NodeCoordinates for [Coordinate] {
    fn coordinate_of(&self, node: NodeId) -> Option<Coordinate> {
        self.get(node as usize).copied()
    }
}

impl NodeCoordinates for HashMap<NodeId, Coordinate> {
    fn coordinate_of(&self, node: NodeId) -> Option<Coordinate> {
        self.get(&node).copied()
    }
}

/// In-memory compressed geometry store keyed by edge id
#[derive(Debug, Clone, Default)]
pub struct CompressedEdgeContainer {
    buckets: HashMap<EdgeId, Vec<NodeId>>,
}

impl CompressedEdgeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the intermediate nodes of `edge`, replacing any previous bucket.
    pub fn add_bucket(&mut self, edge: EdgeId, nodes: Vec<NodeId>) -> Result<()> {
        if nodes.is_empty() {
            return Err(GuidanceError::EmptyGeometry(edge));
        }
        self.buckets.insert(edge, nodes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl CompressedGeometry for CompressedEdgeContainer {
    fn bucket(&self, edge: EdgeId) -> Option<&[NodeId]> {
        self.buckets.get(&edge).map(Vec::as_slice)
    }
}

/// Samples representative coordinates for edges leaving a junction
pub struct GeometrySampler<'a, G: ?Sized, C: ?Sized> {
    geometries: &'a G,
    coordinates: &'a C,
    desired_length_m: f64,
}

impl<'a, G, C> GeometrySampler<'a, G, C>
where
    G: CompressedGeometry + ?Sized,
    C: NodeCoordinates + ?Sized,
{
    pub fn new(geometries: &'a G, coordinates: &'a C) -> Self {
        Self {
            geometries,
            coordinates,
            desired_length_m: DESIRED_SEGMENT_LENGTH,
        }
    }

    pub fn with_config(geometries: &'a G, coordinates: &'a C, config: &GuidanceConfig) -> Self {
        Self {
            geometries,
            coordinates,
            desired_length_m: config.desired_segment_length_m,
        }
    }

    pub fn desired_length_m(&self) -> f64 {
        self.desired_length_m
    }

    pub fn coordinate(&self, node: NodeId) -> Result<Coordinate> {
        self.coordinates
            .coordinate_of(node)
            .ok_or(GuidanceError::UnknownNode(node))
    }

    /// Find a (potentially interpolated) coordinate `desired_length_m` away
    /// from the start of `via_edge`.
    ///
    /// `from_node`/`to_node` are the endpoints in stored order. With
    /// `traverse_in_reverse` the edge is walked from `to_node` towards
    /// `from_node`.
    pub fn representative_coordinate(
        &self,
        from_node: NodeId,
        to_node: NodeId,
        via_edge: EdgeId,
        traverse_in_reverse: bool,
    ) -> Result<Coordinate> {
        let (base_node, final_node) = if traverse_in_reverse {
            (to_node, from_node)
        } else {
            (from_node, to_node)
        };

        let geometry = match self.geometries.bucket(via_edge) {
            // Uncompressed roads are simple, return the coordinate at the end
            None => return self.coordinate(final_node),
            Some(geometry) => geometry,
        };
        debug_assert!(!geometry.is_empty(), "present bucket for edge {via_edge} is empty");

        let base_coordinate = self.coordinate(base_node)?;
        let final_coordinate = self.coordinate(final_node)?;

        if traverse_in_reverse {
            self.coordinate_from_compressed_range(base_coordinate, geometry.iter().rev(), final_coordinate)
        } else {
            self.coordinate_from_compressed_range(base_coordinate, geometry.iter(), final_coordinate)
        }
    }

    fn coordinate_from_compressed_range<'n, I>(
        &self,
        mut current_coordinate: Coordinate,
        compressed_geometry: I,
        final_coordinate: Coordinate,
    ) -> Result<Coordinate>
    where
        I: Iterator<Item = &'n NodeId>,
    {
        let desired = self.desired_length_m;
        let mut distance_to_current = 0.0;

        for &node in compressed_geometry {
            let next_coordinate = self.coordinate(node)?;
            debug_assert!(current_coordinate.is_valid());
            debug_assert!(next_coordinate.is_valid());

            let distance_to_next =
                distance_to_current + current_coordinate.haversine_distance(&next_coordinate);

            // reached the segment that crosses the desired distance
            if distance_to_next >= desired {
                let factor = segment_factor(desired, distance_to_current, distance_to_next);
                return Ok(Coordinate::interpolate_linear(factor, current_coordinate, next_coordinate));
            }

            current_coordinate = next_coordinate;
            distance_to_current = distance_to_next;
        }

        debug_assert!(current_coordinate.is_valid());
        debug_assert!(final_coordinate.is_valid());

        let distance_to_final =
            distance_to_current + current_coordinate.haversine_distance(&final_coordinate);

        if distance_to_current < desired && distance_to_final >= desired {
            let factor = segment_factor(desired, distance_to_current, distance_to_final);
            Ok(Coordinate::interpolate_linear(factor, current_coordinate, final_coordinate))
        } else {
            tracing::trace!(
                length_m = distance_to_final,
                desired_m = desired,
                "edge shorter than sampling distance, using final coordinate"
            );
            Ok(final_coordinate)
        }
    }
}

/// Fraction of the segment `[first, second]` (cumulative distances) that is
/// still needed to reach `desired`.
fn segment_factor(desired: f64, first_distance: f64, second_distance: f64) -> f64 {
    debug_assert!(first_distance < desired);
    debug_assert!(second_distance >= desired);
    let segment_length = second_distance - first_distance;
    if segment_length <= 0.0 {
        return 1.0;
    }
    ((desired - first_distance) / segment_length).clamp(0.0, 1.0)
}

/// Representative coordinate using the default sampling distance
pub fn representative_coordinate<G, C>(
    from_node: NodeId,
    to_node: NodeId,
    via_edge: EdgeId,
    traverse_in_reverse: bool,
    geometries: &G,
    coordinates: &C,
) -> Result<Coordinate>
where
    G: CompressedGeometry + ?Sized,
    C: NodeCoordinates + ?Sized,
{
    GeometrySampler::new(geometries, coordinates).representative_coordinate(
        from_node,
        to_node,
        via_edge,
        traverse_in_reverse,
    )
}
