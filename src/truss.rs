//! Immutable truss model built from parsed joint and beam records.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector2;
use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::errors::GeometryError;
use crate::geometry::{Force, Point, Support};

/// One row of the joint table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointRecord {
    /// One-based joint identifier; must equal the row position.
    pub id: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// External load along X.
    #[serde(default)]
    pub force_x: f64,
    /// External load along Y.
    #[serde(default)]
    pub force_y: f64,
    /// Restraints provided at the joint.
    #[serde(default)]
    pub support: Support,
}

impl JointRecord {
    /// Create a record in the tabular shape `(id, x, y, fx, fy, supported)`.
    ///
    /// A supported joint is pinned on both axes; use [`JointRecord::with_support`]
    /// for rollers.
    #[must_use]
    pub const fn new(
        id: usize,
        x: f64,
        y: f64,
        force_x: f64,
        force_y: f64,
        is_supported: bool,
    ) -> Self {
        Self {
            id,
            x,
            y,
            force_x,
            force_y,
            support: Support::from_flag(is_supported),
        }
    }

    /// Replace the restraint of this record.
    #[must_use]
    pub fn with_support(self, support: Support) -> Self {
        Self { support, ..self }
    }
}

/// One row of the beam table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamRecord {
    /// Beam identifier; output is ordered by this value.
    pub id: usize,
    /// Joint at the first end.
    pub joint_a: usize,
    /// Joint at the second end.
    pub joint_b: usize,
}

impl BeamRecord {
    /// Create a record in the tabular shape `(id, joint_a, joint_b)`.
    #[must_use]
    pub const fn new(id: usize, joint_a: usize, joint_b: usize) -> Self {
        Self {
            id,
            joint_a,
            joint_b,
        }
    }
}

/// Validated truss joint.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    /// One-based identifier.
    id: usize,
    /// Location of the pin.
    position: Point,
    /// External load applied at the pin.
    load: Force,
    /// Restraints provided at the pin.
    support: Support,
}

impl Joint {
    /// Identifier of the joint.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location of the joint.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// External load applied at the joint.
    #[must_use]
    pub fn load(&self) -> Force {
        self.load
    }

    /// Restraints provided at the joint.
    #[must_use]
    pub fn support(&self) -> Support {
        self.support
    }
}

/// Validated two-force member.
#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    /// Beam identifier.
    id: usize,
    /// Joint at the first end.
    joint_a: usize,
    /// Joint at the second end.
    joint_b: usize,
    /// Distance between the two joints.
    length: f64,
    /// Unit vector pointing from `joint_a` toward `joint_b`.
    direction: Vector2<f64>,
}

impl Beam {
    /// Identifier of the beam.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Joint ids at both ends, in record order.
    #[must_use]
    pub fn joints(&self) -> (usize, usize) {
        (self.joint_a, self.joint_b)
    }

    /// Distance between the two joints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Unit vector pointing from the first joint toward the second.
    #[must_use]
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }
}

/// Pin-jointed planar truss whose records have passed validation.
///
/// Joints are stored in id order and beams in ascending beam-id order, so
/// iteration order matches the column layout of the equilibrium system.
#[derive(Clone, Debug)]
pub struct TrussGeometry {
    /// Connectivity graph; node `i` is joint `i + 1`.
    graph: Graph<Joint, Beam>,
    /// Lookup from beam id to graph edge.
    beam_index: HashMap<usize, EdgeIndex>,
}

/// Validate joint and beam records and build an immutable [`TrussGeometry`].
///
/// # Errors
///
/// Returns a [`GeometryError`] naming the first offending joint or beam.
///
/// # Examples
/// ```
/// use trussforce::{build_geometry, BeamRecord, JointRecord};
///
/// let joints = [
///     JointRecord::new(1, 0.0, 0.0, 0.0, 0.0, true),
///     JointRecord::new(2, 3.0, 4.0, 0.0, -10.0, false),
/// ];
/// let beams = [BeamRecord::new(1, 1, 2)];
/// let truss = build_geometry(&joints, &beams).expect("valid records");
/// assert_eq!(truss.joint_count(), 2);
/// assert_eq!(truss.beam(1).map(|beam| beam.length()), Some(5.0));
/// ```
pub fn build_geometry(
    joints: &[JointRecord],
    beams: &[BeamRecord],
) -> Result<TrussGeometry, GeometryError> {
    if joints.is_empty() {
        return Err(GeometryError::Empty);
    }

    let mut graph = Graph::with_capacity(joints.len(), beams.len());
    let mut seen = HashSet::with_capacity(joints.len());
    for (row, record) in joints.iter().enumerate() {
        let position = Point::new(record.x, record.y);
        let load = Force::new(record.force_x, record.force_y);
        if !position.is_finite() || !load.is_finite() {
            return Err(GeometryError::NonFiniteJoint { joint: record.id });
        }
        if !seen.insert(record.id) {
            return Err(GeometryError::DuplicateJoint { joint: record.id });
        }
        if record.id != row + 1 {
            return Err(GeometryError::NonContiguousJoint {
                row: row + 1,
                joint: record.id,
            });
        }
        graph.add_node(Joint {
            id: record.id,
            position,
            load,
            support: record.support,
        });
    }

    let mut ordered = beams.to_vec();
    ordered.sort_by_key(|record| record.id);

    let mut beam_index = HashMap::with_capacity(ordered.len());
    for record in ordered {
        if beam_index.contains_key(&record.id) {
            return Err(GeometryError::DuplicateBeam { beam: record.id });
        }
        let start = node_for(&graph, record.id, record.joint_a)?;
        let end = node_for(&graph, record.id, record.joint_b)?;
        if start == end {
            return Err(GeometryError::SelfConnectedBeam {
                beam: record.id,
                joint: record.joint_a,
            });
        }
        let delta = graph[end].position.to_vector() - graph[start].position.to_vector();
        // hypot avoids overflow and underflow of the squared components.
        let length = delta.x.hypot(delta.y);
        if length == 0.0 {
            return Err(GeometryError::ZeroLengthBeam { beam: record.id });
        }
        let scale = delta.amax();
        let direction = delta / scale;
        let direction = direction / direction.x.hypot(direction.y);
        let edge = graph.add_edge(
            start,
            end,
            Beam {
                id: record.id,
                joint_a: record.joint_a,
                joint_b: record.joint_b,
                length,
                direction,
            },
        );
        beam_index.insert(record.id, edge);
    }

    Ok(TrussGeometry { graph, beam_index })
}

/// Resolve a joint id referenced by `beam` into its graph node.
fn node_for(
    graph: &Graph<Joint, Beam>,
    beam: usize,
    joint: usize,
) -> Result<NodeIndex, GeometryError> {
    if joint == 0 || joint > graph.node_count() {
        return Err(GeometryError::UnknownJoint { beam, joint });
    }
    Ok(NodeIndex::new(joint - 1))
}

impl TrussGeometry {
    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of beams in the truss.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total number of reaction unknowns contributed by all supports.
    #[must_use]
    pub fn reaction_count(&self) -> usize {
        self.joints().map(|joint| joint.support.reaction_count()).sum()
    }

    /// Look up a joint by id.
    #[must_use]
    pub fn joint(&self, id: usize) -> Option<&Joint> {
        if id == 0 {
            return None;
        }
        self.graph.node_weight(NodeIndex::new(id - 1))
    }

    /// Look up a beam by id.
    #[must_use]
    pub fn beam(&self, id: usize) -> Option<&Beam> {
        self.beam_index
            .get(&id)
            .and_then(|edge| self.graph.edge_weight(*edge))
    }

    /// External load at a joint.
    #[must_use]
    pub fn load(&self, joint: usize) -> Option<Force> {
        self.joint(joint).map(Joint::load)
    }

    /// Restraints at a joint.
    #[must_use]
    pub fn support(&self, joint: usize) -> Option<Support> {
        self.joint(joint).map(Joint::support)
    }

    /// Joints in id order.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> + '_ {
        self.graph.node_weights()
    }

    /// Beams in ascending beam-id order.
    pub fn beams(&self) -> impl Iterator<Item = &Beam> + '_ {
        self.graph.edge_weights()
    }

    /// Number of connected pieces the beams divide the joints into.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Ids of joints that no beam reaches.
    #[must_use]
    pub fn isolated_joints(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .filter(|node| self.graph.neighbors_undirected(*node).next().is_none())
            .map(|node| self.graph[node].id)
            .collect()
    }
}
