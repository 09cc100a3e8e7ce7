//! Plain-text table and card layouts for `list`

const MAX_CELL: usize = 40;

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn line<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Aligned columns with a header row
pub fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, MAX_CELL)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = vec![line(columns.iter(), &widths)];
    out.push(line(widths.iter().map(|w| "─".repeat(*w)), &widths));
    for row in &rows {
        out.push(line(row.iter(), &widths));
    }
    out.join("\n")
}

/// One block per record: `id · headline`, then the remaining columns
pub fn cards(columns: &[&str], rows: &[Vec<String>]) -> String {
    let label_width = columns.iter().skip(2).map(|c| c.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let mut lines = vec![format!(
                "▸ {} · {}",
                row.first().map(String::as_str).unwrap_or_default(),
                row.get(1).map(String::as_str).unwrap_or_default()
            )];
            for (column, value) in columns.iter().zip(row).skip(2) {
                lines.push(format!("    {column:<label_width$}  {value}"));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["T-1".into(), "No puedo entrar".into(), "abierto".into()],
            vec!["T-22".into(), "x".repeat(60), "resuelto".into()],
        ]
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = table(&["ID", "Subject", "Status"], &rows());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID    Subject"));
        assert!(lines[2].starts_with("T-1   No puedo entrar"));
        // long cells are cut with an ellipsis
        assert!(lines[3].contains('…'));
        let status_at = lines[0].find("Status").unwrap();
        assert_eq!(lines[2].chars().count() - "abierto".len(), status_at);
    }

    #[test]
    fn test_cards() {
        let out = cards(&["ID", "Subject", "Status"], &rows()[..1]);
        assert_eq!(out, "▸ T-1 · No puedo entrar\n    Status  abierto");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("señal", 5), "señal");
        assert_eq!(truncate("señales", 5), "seña…");
    }
}
