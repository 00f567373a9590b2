pub mod edge_report;
