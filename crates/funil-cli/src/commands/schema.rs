use funil_core::entities::Lead;
use funil_core::responses::{BoardView, FunnelSummary, MoveResponse};
use schemars::{Schema, schema_for};

use crate::cli::root_commands::{SchemaArgs, SchemaType};

/// Handle `funil schema`. Always JSON: a schema has no table form.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&schema(args.type_name))?);
    Ok(())
}

fn schema(kind: SchemaType) -> Schema {
    match kind {
        SchemaType::Lead => schema_for!(Lead),
        SchemaType::Board => schema_for!(BoardView),
        SchemaType::Move => schema_for!(MoveResponse),
        SchemaType::Summary => schema_for!(FunnelSummary),
    }
}
