use funil_core::responses::StageMapping;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `funil stages`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&StageMapping::table(), flags.format)
}
