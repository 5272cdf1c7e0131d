// Rendering of query results

use anyhow::{Context, Result};
use clap::ValueEnum;
use qdprobe_core::RawEntity;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// NAME / IDENTITY / TYPE table
    Table,
    /// Full records as pretty JSON
    Json,
}

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "IDENTITY")]
    identity: String,
    #[tabled(rename = "TYPE")]
    entity_type: String,
}

impl From<&RawEntity> for EntityRow {
    fn from(entity: &RawEntity) -> Self {
        Self {
            name: entity.name().unwrap_or("-").to_string(),
            identity: entity.identity().unwrap_or("-").to_string(),
            entity_type: entity.entity_type().unwrap_or("-").to_string(),
        }
    }
}

pub fn render(entities: &[RawEntity], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(entities)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(entities).context("Failed to serialize records")
        }
    }
}

fn render_table(entities: &[RawEntity]) -> String {
    let rows: Vec<EntityRow> = entities.iter().map(EntityRow::from).collect();
    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entities() -> Vec<RawEntity> {
        serde_json::from_value(json!([
            {"name": "amqp", "identity": "listener/0", "type": "org.apache.qpid.dispatch.listener"},
            {"port": "55672"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_table_has_header_and_placeholders() {
        let table = render(&entities(), OutputFormat::Table).unwrap();

        assert!(table.contains("NAME"));
        assert!(table.contains("IDENTITY"));
        assert!(table.contains("listener/0"));
        assert!(table.contains('-'));
    }

    #[test]
    fn test_json_keeps_all_attributes() {
        let rendered = render(&entities(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed[1]["port"], "55672");
    }
}
