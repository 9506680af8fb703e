// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connectivity graph over all element geometry
//!
//! Every element vertex is lifted to 3D using its level elevation and passed
//! through a [`PointRegistry`], so coincident corners of unrelated elements
//! share one node.

use crate::{ElementKind, Id, Point2D, Point3D, PointId, PointRegistry, StructuralModel};

/// Frame element between two nodes
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub element: Id,
    pub kind: ElementKind,
    pub start: PointId,
    pub end: PointId,
}

/// Area element over a ring of nodes
#[derive(Clone, Debug, PartialEq)]
pub struct GraphFace {
    pub element: Id,
    pub kind: ElementKind,
    pub nodes: Vec<PointId>,
}

/// Deduplicated node/edge/face view of a model
#[derive(Debug, Default)]
pub struct ConnectivityGraph {
    nodes: PointRegistry<Point3D>,
    edges: Vec<GraphEdge>,
    faces: Vec<GraphFace>,
    supports: Vec<(Id, PointId)>,
}

impl ConnectivityGraph {
    pub fn build(model: &StructuralModel) -> Self {
        let elevation = |id: &Id| {
            model
                .layout
                .level(id)
                .map(|l| l.elevation)
                .unwrap_or(0.0)
        };
        let mut graph = ConnectivityGraph::default();

        for column in &model.elements.columns {
            let start = graph.node(column.location, elevation(&column.base_level_id));
            let end = graph.node(column.location, elevation(&column.top_level_id));
            graph.edge(&column.id, ElementKind::Column, start, end);
        }
        for beam in &model.elements.beams {
            let z = elevation(&beam.level_id);
            let start = graph.node(beam.start, z);
            let end = graph.node(beam.end, z);
            graph.edge(&beam.id, ElementKind::Beam, start, end);
        }
        for brace in &model.elements.braces {
            let start = graph.node(brace.start, elevation(&brace.base_level_id));
            let end = graph.node(brace.end, elevation(&brace.top_level_id));
            graph.edge(&brace.id, ElementKind::Brace, start, end);
        }
        for wall in &model.elements.walls {
            let (bottom, top) = (
                elevation(&wall.base_level_id),
                elevation(&wall.top_level_id),
            );
            let mut nodes: Vec<PointId> = wall.points.iter().map(|p| graph.node(*p, bottom)).collect();
            nodes.extend(wall.points.iter().rev().map(|p| graph.node(*p, top)));
            graph.faces.push(GraphFace {
                element: wall.id.clone(),
                kind: ElementKind::Wall,
                nodes,
            });
        }
        for floor in &model.elements.floors {
            let z = elevation(&floor.level_id);
            let nodes = floor.points.iter().map(|p| graph.node(*p, z)).collect();
            graph.faces.push(GraphFace {
                element: floor.id.clone(),
                kind: ElementKind::Floor,
                nodes,
            });
        }
        for footing in &model.elements.isolated_footings {
            let node = graph.node(footing.location, elevation(&footing.level_id));
            graph.supports.push((footing.id.clone(), node));
        }

        graph
    }

    fn node(&mut self, p: Point2D, z: f64) -> PointId {
        self.nodes.get_or_create_id(p.at_elevation(z))
    }

    fn edge(&mut self, element: &Id, kind: ElementKind, start: PointId, end: PointId) {
        self.edges.push(GraphEdge {
            element: element.clone(),
            kind,
            start,
            end,
        });
    }

    pub fn nodes(&self) -> &PointRegistry<Point3D> {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn faces(&self) -> &[GraphFace] {
        &self.faces
    }

    /// Footing id and its node
    pub fn supports(&self) -> &[(Id, PointId)] {
        &self.supports
    }

    /// Number of edges and faces touching a node
    pub fn degree(&self, node: PointId) -> usize {
        let edges = self
            .edges
            .iter()
            .filter(|e| e.start == node || e.end == node)
            .count();
        let faces = self.faces.iter().filter(|f| f.nodes.contains(&node)).count();
        edges + faces
    }
}
