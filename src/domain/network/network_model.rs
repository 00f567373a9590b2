use std::collections::{HashMap, HashSet};

use crate::api::network_dto::NetworkDto;
use crate::domain::network::edge::{Edge, EdgeKey, EdgeKind};
use crate::domain::network::edge_state::EdgeState;
use crate::domain::network::id::NodeId;
use crate::domain::network::node::Node;
use crate::error::{Error, Result};

/// Topology plus the per-edge state store of one simulated network.
///
/// Nodes and original edges are fixed from load to reload. Dynamic edges are
/// replaced by the engine every cycle; their states come and go with them.
/// Every original edge key owns exactly one `EdgeState` for the lifetime of
/// the model (duplicate definitions of one endpoint pair share it).
#[derive(Debug, Clone, Default)]
pub struct NetworkModel {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    original_edges: Vec<Edge>,
    dynamic_edges: Vec<Edge>,
    edge_states: HashMap<EdgeKey, EdgeState>,
}

impl NetworkModel {
    /// Validates and assembles a model. Either the whole network is accepted
    /// or an error is returned; there is no partial model.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut node_index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());

        for (index, node) in nodes.iter().enumerate() {
            if !node.has_finite_coordinates() {
                return Err(Error::NonFiniteCoordinates(node.id.id));
            }
            if node_index.insert(node.id, index).is_some() {
                return Err(Error::DuplicateNodeId(node.id.id));
            }
        }

        let mut edge_states: HashMap<EdgeKey, EdgeState> = HashMap::with_capacity(edges.len());

        for edge in edges.iter() {
            for endpoint in [edge.from, edge.to] {
                if !node_index.contains_key(&endpoint) {
                    return Err(Error::UnknownEdgeEndpoint { from: edge.from.id, to: edge.to.id, missing: endpoint.id });
                }
            }

            if !edge.length_km.is_finite() || edge.length_km < 0.0 {
                return Err(Error::InvalidEdgeLength { from: edge.from.id, to: edge.to.id, length: edge.length_km });
            }

            if edge.kind != EdgeKind::Original {
                log::warn!("Edge {} was loaded as dynamic; treating it as original.", edge.key());
            }

            edge_states.entry(edge.key().with_kind(EdgeKind::Original)).or_default();
        }

        let original_edges: Vec<Edge> = edges.into_iter().map(|e| Edge { kind: EdgeKind::Original, ..e }).collect();

        if original_edges.len() > edge_states.len() {
            log::debug!(
                "NetworkModel: {} edge definitions collapse onto {} distinct endpoint pairs.",
                original_edges.len(),
                edge_states.len()
            );
        }

        Ok(NetworkModel { nodes, node_index, original_edges, dynamic_edges: Vec::new(), edge_states })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&index| &self.nodes[index])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn original_edges(&self) -> &[Edge] {
        &self.original_edges
    }

    pub fn dynamic_edges(&self) -> &[Edge] {
        &self.dynamic_edges
    }

    /// Original edges followed by the current dynamic edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.original_edges.iter().chain(self.dynamic_edges.iter())
    }

    /// Distinct original edge keys in load order.
    pub fn original_keys(&self) -> Vec<EdgeKey> {
        let mut seen: HashSet<EdgeKey> = HashSet::with_capacity(self.original_edges.len());
        self.original_edges.iter().map(|e| e.key()).filter(|k| seen.insert(*k)).collect()
    }

    /// First original edge defined for `key`.
    pub fn original_edge(&self, key: &EdgeKey) -> Option<&Edge> {
        if key.kind != EdgeKind::Original {
            return None;
        }
        self.original_edges.iter().find(|e| e.key() == *key)
    }

    pub fn edge_state(&self, key: &EdgeKey) -> Option<&EdgeState> {
        self.edge_states.get(key)
    }

    pub fn edge_state_mut(&mut self, key: &EdgeKey) -> Option<&mut EdgeState> {
        self.edge_states.get_mut(key)
    }

    pub fn get_or_create_state(&mut self, key: EdgeKey) -> &mut EdgeState {
        self.edge_states.entry(key).or_default()
    }

    pub fn is_blocked(&self, key: &EdgeKey) -> bool {
        self.edge_states.get(key).is_some_and(|st| st.blocked)
    }

    pub fn flow(&self, key: &EdgeKey) -> f64 {
        self.edge_states.get(key).map_or(0.0, |st| st.flow)
    }

    /// Adds `amount` to the flow of an existing state. Unknown keys are ignored.
    pub fn add_flow(&mut self, key: &EdgeKey, amount: f64) {
        if let Some(state) = self.edge_states.get_mut(key) {
            state.flow += amount;
        }
    }

    pub fn reset_flows(&mut self) {
        for state in self.edge_states.values_mut() {
            state.flow = 0.0;
        }
    }

    pub fn clear_overloads(&mut self) {
        for state in self.edge_states.values_mut() {
            state.overloaded = false;
        }
    }

    /// Replaces the dynamic edge set. New edges get a fresh state, states of
    /// dynamic edges that did not survive are discarded.
    pub fn set_dynamic_edges(&mut self, edges: Vec<Edge>) {
        let keep: HashSet<EdgeKey> = edges.iter().map(|e| e.key()).collect();

        self.edge_states.retain(|key, _| key.kind == EdgeKind::Original || keep.contains(key));

        for key in keep {
            self.edge_states.entry(key).or_default();
        }

        self.dynamic_edges = edges;
    }

    pub fn clear_dynamic_edges(&mut self) {
        self.set_dynamic_edges(Vec::new());
    }

    /// Clears every blocked/flow/overloaded field and drops all dynamic edges.
    pub fn reset(&mut self) {
        self.clear_dynamic_edges();
        for state in self.edge_states.values_mut() {
            state.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl TryFrom<NetworkDto> for NetworkModel {
    type Error = Error;

    fn try_from(dto: NetworkDto) -> Result<Self> {
        let nodes = dto.nodes.into_iter().map(Node::from_dto).collect::<Result<Vec<Node>>>()?;
        let edges = dto.edges.into_iter().map(Edge::from_dto).collect::<Result<Vec<Edge>>>()?;

        let model = NetworkModel::new(nodes, edges)?;

        log::info!("NetworkModel loaded: {} nodes, {} original edges.", model.nodes.len(), model.original_edges.len());

        Ok(model)
    }
}
