use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::format::truncate_unicode;
use crate::rows::DisplayRow;
use crate::ui::theme::Theme;

/// One visual line of the table: rows are interleaved with blank
/// separators and section headings, so scroll positions address lines,
/// not data rows.
enum TableLine<'a> {
    Blank,
    Section(&'static str),
    Data { row: &'a DisplayRow, stripe: bool },
}

fn build_lines(rows: &[DisplayRow]) -> Vec<TableLine<'_>> {
    let mut lines = Vec::with_capacity(rows.len() + 12);
    let mut current_section = None;
    let mut data_index = 0usize;

    for row in rows {
        if current_section != Some(row.section) {
            if current_section.is_some() {
                lines.push(TableLine::Blank);
            }
            lines.push(TableLine::Section(row.section));
            current_section = Some(row.section);
        }
        lines.push(TableLine::Data {
            row,
            stripe: data_index % 2 == 1,
        });
        data_index += 1;
    }
    lines
}

/// Number of scrollable lines the row set produces.
pub fn total_lines(rows: &[DisplayRow]) -> usize {
    if rows.is_empty() {
        return 0;
    }
    let sections = {
        let mut count = 0;
        let mut current = None;
        for row in rows {
            if current != Some(row.section) {
                count += 1;
                current = Some(row.section);
            }
        }
        count
    };
    // One heading per section plus a blank separator between sections.
    rows.len() + sections + sections.saturating_sub(1)
}

/// Lines hidden by the table chrome (borders and the column header).
pub const CHROME_LINES: u16 = 3;

/// Share of the inner width given to the value column.
const VALUE_COL_PERCENT: u16 = 55;

pub fn render(frame: &mut Frame, area: Rect, rows: &[DisplayRow], scroll: usize, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border));

    if rows.is_empty() {
        let msg = Paragraph::new(" no data collected — press r to retry")
            .style(Style::default().fg(theme.text_secondary))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let lines = build_lines(rows);
    // Width the item column resolves to: inner area minus the value
    // column and the inter-column gap. Long mount paths get an ellipsis
    // instead of silently clipping at the column edge.
    let inner_width = area.width.saturating_sub(2);
    let value_width = inner_width * VALUE_COL_PERCENT / 100;
    let item_width = inner_width.saturating_sub(value_width + 1).max(3) as usize;
    let capacity = area.height.saturating_sub(CHROME_LINES) as usize;
    let start = scroll.min(lines.len().saturating_sub(1));
    let end = (start + capacity).min(lines.len());

    let table_rows: Vec<Row> = lines[start..end]
        .iter()
        .map(|line| match line {
            TableLine::Blank => Row::new([Cell::from(""), Cell::from("")]),
            TableLine::Section(name) => Row::new([
                Cell::from(Span::styled(
                    *name,
                    Style::default()
                        .fg(theme.section_fg)
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(""),
            ]),
            TableLine::Data { row, stripe } => {
                let row_style = if *stripe {
                    Style::default().bg(theme.zebra_bg)
                } else {
                    Style::default()
                };
                Row::new([
                    Cell::from(Span::styled(
                        truncate_unicode(&format!("  {}", row.item), item_width),
                        Style::default().fg(theme.text_primary),
                    )),
                    Cell::from(Span::styled(
                        row.value.clone(),
                        Style::default().fg(theme.text_secondary),
                    )),
                ])
                .style(row_style)
            }
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Min(28),
            Constraint::Percentage(VALUE_COL_PERCENT),
        ],
    )
    .header(
        Row::new(["Item", "Value"]).style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(block);

    frame.render_widget(table, area);
}
