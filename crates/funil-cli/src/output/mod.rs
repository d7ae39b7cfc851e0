use funil_core::responses::{BoardView, FunnelSummary, MoveResponse, StageMapping};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, render_table};

/// Responses that know how to lay themselves out as tables.
pub trait Tabular {
    fn tables(&self) -> Vec<Table>;
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let max_width = ui::prefs().term_width;
            Ok(value
                .tables()
                .iter()
                .map(|table| render_table(table, max_width))
                .collect::<Vec<_>>()
                .join("\n\n"))
        }
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl Tabular for BoardView {
    fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(vec!["column", "#", "id", "name", "phone", "profile"]);
        for column in &self.columns {
            if column.leads.is_empty() {
                table.row(vec![column.title.clone(), "0".into()]);
            }
            for (position, card) in column.leads.iter().enumerate() {
                let marker = if card.pending { "*" } else { "" };
                table.row(vec![
                    if position == 0 {
                        format!("{} ({})", column.title, column.count)
                    } else {
                        String::new()
                    },
                    (position + 1).to_string(),
                    format!("{}{marker}", card.id),
                    card.name.clone(),
                    card.phone.clone(),
                    card.search_profile.clone(),
                ]);
            }
        }

        table.note(format!("total: {}", self.total));
        if self.columns.iter().any(|c| c.leads.iter().any(|l| l.pending)) {
            table.note("* stage change not confirmed by the server");
        }
        for warning in &self.warnings {
            table.note(format!("warning: {warning}"));
        }
        vec![table]
    }
}

impl Tabular for MoveResponse {
    fn tables(&self) -> Vec<Table> {
        let dash = || "-".to_string();
        let mut summary = Table::key_value([
            ("lead", self.lead_id.clone()),
            ("outcome", self.outcome.clone()),
            ("from", self.from_column.clone().unwrap_or_else(dash)),
            ("to", self.to_column.clone().unwrap_or_else(dash)),
            (
                "index",
                self.index.map_or_else(dash, |index| index.to_string()),
            ),
            ("commit", self.commit.clone().unwrap_or_else(dash)),
        ]);
        for notification in &self.notifications {
            summary.note(notification.clone());
        }

        let mut tables = vec![summary];
        tables.extend(self.board.tables());
        tables
    }
}

impl Tabular for FunnelSummary {
    fn tables(&self) -> Vec<Table> {
        let mut metrics = Table::key_value([
            ("total leads", self.total_leads.to_string()),
            ("new this month", format!("+{}", self.new_leads_this_month)),
            ("won", self.won_leads.to_string()),
            ("conversion", format!("{:.1}%", self.conversion_rate)),
        ])
        .titled("Funnel");
        if self.unknown_stage_leads > 0 {
            metrics.note(format!(
                "{} lead(s) have an unknown funnel stage",
                self.unknown_stage_leads
            ));
        }

        let mut stages = Table::new(vec!["stage", "column", "leads"]);
        for count in &self.stages {
            stages.row(vec![
                count.stage.to_string(),
                count.column_id.clone(),
                count.count.to_string(),
            ]);
        }

        vec![metrics, stages]
    }
}

impl Tabular for Vec<StageMapping> {
    fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(vec!["#", "stage", "column"]);
        for mapping in self {
            table.row(vec![
                mapping.position.to_string(),
                mapping.stage.to_string(),
                mapping.column_id.clone(),
            ]);
        }
        vec![table]
    }
}

#[cfg(test)]
mod tests {
    use funil_core::responses::{BoardView, CardView, ColumnView, StageMapping};

    use super::render;
    use crate::cli::OutputFormat;

    fn board() -> BoardView {
        BoardView {
            columns: vec![
                ColumnView {
                    id: "novo".into(),
                    title: "Novo".into(),
                    count: 2,
                    leads: vec![
                        CardView {
                            id: "1".into(),
                            name: "João Silva".into(),
                            phone: "(11) 99999-0000".into(),
                            search_profile: "Apartamento 2 quartos".into(),
                            pending: false,
                        },
                        CardView {
                            id: "4".into(),
                            name: "Dora".into(),
                            phone: String::new(),
                            search_profile: String::new(),
                            pending: true,
                        },
                    ],
                },
                ColumnView {
                    id: "fechado".into(),
                    title: "Fechado".into(),
                    count: 0,
                    leads: vec![],
                },
            ],
            total: 2,
            warnings: vec!["lead 9 has unknown funnel stage \"Perdido\"".into()],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&board(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["columns"][0]["id"], "novo");
        assert_eq!(parsed["total"], 2);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&board(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn board_table_lists_cards_and_notes() {
        let out = render(&board(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("column")));
        assert!(out.contains("Novo (2)"));
        assert!(out.contains("João Silva"));
        assert!(out.contains("4*"));
        assert!(out.contains("total: 2"));
        assert!(out.contains("* stage change not confirmed"));
        assert!(out.contains("warning: lead 9"));
    }

    #[test]
    fn stages_table_has_one_row_per_stage() {
        let out = render(&StageMapping::table(), OutputFormat::Table).expect("render");
        assert_eq!(out.lines().count(), 2 + 6);
        assert!(out.contains("Em Qualificação"));
        assert!(out.contains("visita-agendada"));
    }
}
