/// A titled grid of pre-formatted cells plus trailing note lines.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub notes: Vec<String>,
}

impl Table {
    #[must_use]
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    /// Two-column `field  value` table.
    #[must_use]
    pub fn key_value<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(vec!["field", "value"]);
        for (key, value) in pairs {
            table.row(vec![key.into(), value.into()]);
        }
        table
    }
}

/// Render a table with aligned columns. Widths are measured in characters so
/// accented names line up.
#[must_use]
pub fn render_table(table: &Table, max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    fit_widths(&mut widths, max_width);

    let mut lines = Vec::with_capacity(table.rows.len() + table.notes.len() + 3);
    if let Some(title) = &table.title {
        lines.push(title.clone());
    }

    let header = format_row(table.headers.iter().copied(), &widths);
    let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    lines.push(header);
    lines.push("-".repeat(rule_width));

    if table.rows.is_empty() {
        lines.push("(no rows)".to_string());
    }
    for row in &table.rows {
        let cells = (0..widths.len()).map(|i| row.get(i).map_or("-", String::as_str));
        lines.push(format_row(cells, &widths));
    }

    lines.extend(table.notes.iter().cloned());
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let text = truncate(cell, width);
            if is_numeric(&text) {
                format!("{text:>width$}")
            } else {
                format!("{text:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Shrink the widest columns until the line fits.
fn fit_widths(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;
    let budget = max_width.saturating_sub(separators);

    while widths.iter().sum::<usize>() > budget {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > 4)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty()
        && text
            .trim_end_matches('%')
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Table, render_table, truncate};

    #[test]
    fn aligns_accented_cells_by_chars() {
        let mut table = Table::new(vec!["column", "name"]);
        table.row(vec!["Negociação".into(), "João".into()]);
        table.row(vec!["Novo".into(), "Ana".into()]);

        let out = render_table(&table, None);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "column      name");
        assert_eq!(lines[1], "-".repeat(16));
        assert_eq!(lines[2], "Negociação  João");
        assert_eq!(lines[3], "Novo        Ana");
    }

    #[test]
    fn numbers_are_right_aligned() {
        let mut table = Table::new(vec!["stage", "count"]);
        table.row(vec!["Novo".into(), "12".into()]);
        table.row(vec!["Fechado".into(), "3".into()]);

        let out = render_table(&table, None);
        assert!(out.lines().any(|line| line == "Fechado      3"));
    }

    #[test]
    fn empty_table_says_so_and_keeps_notes() {
        let mut table = Table::new(vec!["id"]).titled("Novo");
        table.note("total: 0");
        let out = render_table(&table, None);
        assert_eq!(out, "Novo\nid\n--\n(no rows)\ntotal: 0");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let mut table = Table::new(vec!["id", "search_profile"]);
        table.row(vec!["1".into(), "Apartamento 3 quartos na zona sul".into()]);

        let out = render_table(&table, Some(24));
        assert!(out.lines().all(|line| line.chars().count() <= 24));
        assert!(out.contains('…'));
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Ana", 5), "Ana");
        assert_eq!(truncate("Mariana", 5), "Mari…");
    }
}
