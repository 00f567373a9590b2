use serde::Serialize;

use crate::api::network_dto::{NodeDto, NumericIdDto};
use crate::domain::network::id::NodeId;
use crate::error::{Error, Result};

/// A city, port or terminal of the transport network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub region: String,
    pub node_type: String,
    pub lat: f64,
    pub lon: f64,
    pub population: f64,
    /// Goods volume this node absorbs per cycle.
    pub inbound: f64,
    /// Goods volume this node ships per cycle.
    pub outbound: f64,
}

impl Node {
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Node {
            id: NodeId::new(id),
            name: String::new(),
            region: String::new(),
            node_type: String::new(),
            lat,
            lon,
            population: 0.0,
            inbound: 0.0,
            outbound: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_population(mut self, population: f64) -> Self {
        self.population = population;
        self
    }

    pub fn with_goods(mut self, inbound: f64, outbound: f64) -> Self {
        self.inbound = inbound;
        self.outbound = outbound;
        self
    }

    pub fn has_finite_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Label shown by renderers: the name, or the id when the name is blank.
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() { self.id.to_string() } else { self.name.clone() }
    }

    pub fn from_dto(dto: NodeDto) -> Result<Self> {
        let id = parse_numeric_id(&dto.id)?;

        let node = Node {
            id: NodeId::new(id),
            name: dto.name.unwrap_or_default(),
            region: dto.land.unwrap_or_default(),
            node_type: dto.typ.unwrap_or_default(),
            lat: dto.lat,
            lon: dto.lon,
            population: finite_or_zero(dto.einwohner),
            inbound: finite_or_zero(dto.gueter_in),
            outbound: finite_or_zero(dto.gueter_out),
        };

        if !node.has_finite_coordinates() {
            return Err(Error::NonFiniteCoordinates(id));
        }

        Ok(node)
    }
}

pub(crate) fn parse_numeric_id(dto: &NumericIdDto) -> Result<i64> {
    match dto {
        NumericIdDto::Number(v) => Ok(*v),
        NumericIdDto::Text(text) => text.trim().parse::<i64>().map_err(|_| Error::NonNumericId(text.clone())),
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
