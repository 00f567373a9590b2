use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::api::network_dto::{EdgeDto, EdgeRoleDto};
use crate::domain::network::id::NodeId;
use crate::domain::network::node::parse_numeric_id;
use crate::error::{Error, Result};

/// Nominal freight estimates attached to synthesised edges.
const NEAR_FREIGHT_ESTIMATE: f64 = 30.0;
const HUB_FREIGHT_ESTIMATE: f64 = 40.0;

/// Where an edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Loaded from the network definition; lives as long as the model.
    Original,
    /// Synthesised for one recalculation cycle.
    Dynamic,
}

impl EdgeKind {
    fn suffix(&self) -> &'static str {
        match self {
            EdgeKind::Original => "orig",
            EdgeKind::Dynamic => "dyn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRole {
    Main,
    AltPredefined,
    Dynamic,
}

/// Synthesis rule that produced a dynamic edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicEdgeOrigin {
    Near,
    Hub,
}

/// Canonical key of an undirected edge: ordered endpoint pair plus provenance.
///
/// `EdgeKey::new(a, b, k) == EdgeKey::new(b, a, k)`, so both traversal
/// directions resolve to the same `EdgeState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub low: NodeId,
    pub high: NodeId,
    pub kind: EdgeKind,
}

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId, kind: EdgeKind) -> Self {
        if u <= v { EdgeKey { low: u, high: v, kind } } else { EdgeKey { low: v, high: u, kind } }
    }

    pub fn original(u: i64, v: i64) -> Self {
        EdgeKey::new(NodeId::new(u), NodeId::new(v), EdgeKind::Original)
    }

    pub fn dynamic(u: i64, v: i64) -> Self {
        EdgeKey::new(NodeId::new(u), NodeId::new(v), EdgeKind::Dynamic)
    }

    /// The same endpoint pair under another provenance.
    pub fn with_kind(&self, kind: EdgeKind) -> Self {
        EdgeKey { low: self.low, high: self.high, kind }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.low, self.high, self.kind.suffix())
    }
}

/// Parses `<a>-<b>` (original edge) or `<a>-<b>-orig` / `<a>-<b>-dyn`.
/// Node ids may be negative (`-3--5`).
impl FromStr for EdgeKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || format!("'{}' is not an edge key, expected <a>-<b>[-orig|-dyn]", s);

        let (pair, kind) = if let Some(pair) = text.strip_suffix("-dyn") {
            (pair, EdgeKind::Dynamic)
        } else {
            (text.strip_suffix("-orig").unwrap_or(text), EdgeKind::Original)
        };

        // The separator is the first '-' that follows a digit; any other '-' is a sign.
        let separator = pair
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '-' && pair[..i].ends_with(|p: char| p.is_ascii_digit()))
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;

        let (first, second) = (&pair[..separator], &pair[separator + 1..]);
        let u = first.parse::<i64>().map_err(|_| format!("'{}' is not a node id", first))?;
        let v = second.parse::<i64>().map_err(|_| format!("'{}' is not a node id", second))?;

        Ok(EdgeKey::new(NodeId::new(u), NodeId::new(v), kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub length_km: f64,
    pub role: EdgeRole,
    pub kind: EdgeKind,
    /// Transport mode tag from the definition (`road`, `rail`, `alt_near`, ...).
    pub transport_type: String,
    pub freight_estimate: f64,
    pub origin: Option<DynamicEdgeOrigin>,
}

impl Edge {
    pub fn main(from: i64, to: i64, length_km: f64) -> Self {
        Edge::original(from, to, length_km, EdgeRole::Main)
    }

    pub fn alt_predefined(from: i64, to: i64, length_km: f64) -> Self {
        Edge::original(from, to, length_km, EdgeRole::AltPredefined)
    }

    fn original(from: i64, to: i64, length_km: f64, role: EdgeRole) -> Self {
        Edge {
            from: NodeId::new(from),
            to: NodeId::new(to),
            length_km,
            role,
            kind: EdgeKind::Original,
            transport_type: String::new(),
            freight_estimate: 0.0,
            origin: None,
        }
    }

    pub fn synthesized(from: NodeId, to: NodeId, length_km: f64, origin: DynamicEdgeOrigin) -> Self {
        let (transport_type, freight_estimate) = match origin {
            DynamicEdgeOrigin::Near => ("alt_near", NEAR_FREIGHT_ESTIMATE),
            DynamicEdgeOrigin::Hub => ("alt_hub", HUB_FREIGHT_ESTIMATE),
        };

        Edge {
            from,
            to,
            length_km,
            role: EdgeRole::Dynamic,
            kind: EdgeKind::Dynamic,
            transport_type: transport_type.to_string(),
            freight_estimate,
            origin: Some(origin),
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to, self.kind)
    }

    pub fn is_main(&self) -> bool {
        self.kind == EdgeKind::Original && self.role == EdgeRole::Main
    }

    /// Builds an original edge. Endpoint existence is checked by `NetworkModel`.
    pub fn from_dto(dto: EdgeDto) -> Result<Self> {
        let from = parse_numeric_id(&dto.von_id)?;
        let to = parse_numeric_id(&dto.zu_id)?;

        let length_km = match dto.distanz_km {
            None => 1.0,
            Some(length) if length == 0.0 => 1.0,
            Some(length) if !length.is_finite() || length < 0.0 => {
                return Err(Error::InvalidEdgeLength { from, to, length });
            }
            Some(length) => length,
        };

        let role = match dto.role {
            Some(EdgeRoleDto::AltPre) => EdgeRole::AltPredefined,
            Some(EdgeRoleDto::Main) | None => EdgeRole::Main,
        };

        Ok(Edge {
            from: NodeId::new(from),
            to: NodeId::new(to),
            length_km,
            role,
            kind: EdgeKind::Original,
            transport_type: dto.typ.unwrap_or_default(),
            freight_estimate: dto.fracht_schaetzung.filter(|v| v.is_finite()).unwrap_or(0.0),
            origin: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::network_dto::NumericIdDto;

    #[test]
    fn test_edge_key_is_direction_independent() {
        assert_eq!(EdgeKey::original(7, 3), EdgeKey::original(3, 7));
        assert_ne!(EdgeKey::original(3, 7), EdgeKey::dynamic(3, 7));
        assert_eq!(EdgeKey::original(7, 3).to_string(), "3-7-orig");
    }

    #[test]
    fn test_edge_key_from_str() {
        assert_eq!("4-2".parse::<EdgeKey>(), Ok(EdgeKey::original(2, 4)));
        assert_eq!("2-4-dyn".parse::<EdgeKey>(), Ok(EdgeKey::dynamic(2, 4)));
        assert!("2-x".parse::<EdgeKey>().is_err());
        assert!("2-4-road".parse::<EdgeKey>().is_err());
        assert!("24".parse::<EdgeKey>().is_err());
    }

    #[test]
    fn test_edge_key_from_str_with_negative_ids() {
        assert_eq!("-3-5".parse::<EdgeKey>(), Ok(EdgeKey::original(-3, 5)));
        assert_eq!("4--7-orig".parse::<EdgeKey>(), Ok(EdgeKey::original(4, -7)));
        assert_eq!("-3--5-dyn".parse::<EdgeKey>(), Ok(EdgeKey::dynamic(-3, -5)));
        assert_eq!(EdgeKey::dynamic(-3, -5).to_string().parse::<EdgeKey>(), Ok(EdgeKey::dynamic(-5, -3)));
    }

    #[test]
    fn test_from_dto_defaults_zero_length_and_role() {
        let dto = EdgeDto {
            von_id: NumericIdDto::Number(1),
            zu_id: NumericIdDto::Number(2),
            typ: Some("rail".to_string()),
            distanz_km: Some(0.0),
            fracht_schaetzung: None,
            role: None,
        };

        let edge = Edge::from_dto(dto).unwrap();

        assert_eq!(edge.length_km, 1.0);
        assert_eq!(edge.role, EdgeRole::Main);
        assert_eq!(edge.kind, EdgeKind::Original);
        assert!(edge.is_main());
    }

    #[test]
    fn test_from_dto_rejects_negative_length() {
        let dto = EdgeDto {
            von_id: NumericIdDto::Number(1),
            zu_id: NumericIdDto::Number(2),
            typ: None,
            distanz_km: Some(-5.0),
            fracht_schaetzung: None,
            role: None,
        };

        assert!(matches!(Edge::from_dto(dto), Err(Error::InvalidEdgeLength { from: 1, to: 2, .. })));
    }
}
