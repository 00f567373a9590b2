use serde::Deserialize;

/// Root of a `network.json` definition.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDto {
    pub nodes: Vec<NodeDto>,
    pub edges: Vec<EdgeDto>,
}

/// Ids are accepted as JSON numbers or as numeric strings (`"12"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericIdDto {
    Number(i64),
    Text(String),
}

impl From<i64> for NumericIdDto {
    fn from(v: i64) -> Self {
        NumericIdDto::Number(v)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDto {
    pub id: NumericIdDto,
    #[serde(default)]
    pub name: Option<String>,
    /// Country / region code.
    #[serde(default)]
    pub land: Option<String>,
    #[serde(default)]
    pub typ: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Population.
    #[serde(default)]
    pub einwohner: Option<f64>,
    /// Inbound goods volume.
    #[serde(default)]
    pub gueter_in: Option<f64>,
    /// Outbound goods volume.
    #[serde(default)]
    pub gueter_out: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDto {
    pub von_id: NumericIdDto,
    pub zu_id: NumericIdDto,
    #[serde(default)]
    pub typ: Option<String>,
    #[serde(default)]
    pub distanz_km: Option<f64>,
    #[serde(default)]
    pub fracht_schaetzung: Option<f64>,
    #[serde(default)]
    pub role: Option<EdgeRoleDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRoleDto {
    Main,
    AltPre,
}
