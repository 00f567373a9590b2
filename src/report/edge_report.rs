use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::domain::network::edge::{EdgeKind, EdgeRole};
use crate::domain::simulation::snapshot::{EdgeSnapshot, NetworkSnapshot};
use crate::error::Result;

/// One CSV row per snapshot edge.
#[derive(Debug, Serialize)]
struct EdgeReportRow<'a> {
    key: String,
    from: i64,
    to: i64,
    kind: &'static str,
    role: &'static str,
    transport_type: &'a str,
    length_km: f64,
    flow: f64,
    capacity: Option<f64>,
    blocked: bool,
    overloaded: bool,
    rerouted: bool,
    visible: bool,
}

impl<'a> From<&'a EdgeSnapshot> for EdgeReportRow<'a> {
    fn from(edge: &'a EdgeSnapshot) -> Self {
        EdgeReportRow {
            key: edge.key.to_string(),
            from: edge.from.id,
            to: edge.to.id,
            kind: match edge.kind {
                EdgeKind::Original => "original",
                EdgeKind::Dynamic => "dynamic",
            },
            role: match edge.role {
                EdgeRole::Main => "main",
                EdgeRole::AltPredefined => "alt_pre",
                EdgeRole::Dynamic => "dyn",
            },
            transport_type: &edge.transport_type,
            length_km: edge.length_km,
            flow: edge.flow,
            capacity: edge.capacity,
            blocked: edge.blocked,
            overloaded: edge.overloaded,
            rerouted: edge.rerouted,
            visible: edge.visible,
        }
    }
}

/// Writes the edge report as `;`-separated CSV with a header row.
pub fn write_edge_report<W: Write>(writer: W, snapshot: &NetworkSnapshot) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    for edge in snapshot.edges.iter() {
        csv_wtr.serialize(EdgeReportRow::from(edge))?;
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn write_edge_report_file(file_path: &str, snapshot: &NetworkSnapshot) -> Result<()> {
    let file = File::create(file_path)?;
    write_edge_report(file, snapshot)?;

    log::info!("Edge report with {} rows written to '{}'.", snapshot.edges.len(), file_path);
    Ok(())
}
