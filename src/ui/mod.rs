//! Terminal rendering.
//!
//! A single page view: header bar, element table with group column,
//! status bar, and a help overlay.

mod theme;

pub use theme::{ClassKind, Theme};

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::display::ElementRegistry;

/// Per-kind tallies of the page's current classes.
///
/// Every non-plain element lands in exactly one bucket, so the buckets
/// plus the plain remainder always sum to the element total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub success: usize,
    pub warning: usize,
    pub danger: usize,
    pub info: usize,
}

/// Tally the page's elements by class kind.
pub fn count_classes(registry: &ElementRegistry) -> ClassCounts {
    let mut counts = ClassCounts::default();
    for (_, element) in registry.iter() {
        match ClassKind::classify(&element.class) {
            ClassKind::Success => counts.success += 1,
            ClassKind::Warning => counts.warning += 1,
            ClassKind::Danger => counts.danger += 1,
            ClassKind::Info => counts.info += 1,
            ClassKind::Plain => {}
        }
    }
    counts
}

/// Render the header bar with page health overview.
///
/// Displays: status indicator, element counts by class kind, cycle number.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.cycle == 0 {
        let line = Line::from(vec![
            Span::styled(
                " SHELFWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Waiting for first cycle..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let counts = count_classes(&app.registry);

    // Overall status indicator
    let status_style = if app.last_error.is_some() || counts.danger > 0 {
        Style::default().fg(app.theme.danger)
    } else if counts.warning > 0 {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.success)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("SHELFWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", counts.success),
            Style::default().fg(app.theme.success),
        ),
        Span::raw(" ok "),
        if counts.warning > 0 {
            Span::styled(
                format!("{}", counts.warning),
                Style::default().fg(app.theme.warning),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if counts.danger > 0 {
            Span::styled(
                format!("{}", counts.danger),
                Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit "),
        if counts.info > 0 {
            Span::styled(
                format!("{}", counts.info),
                Style::default().fg(app.theme.highlight),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" info │ "),
        Span::styled(
            format!("{}", app.registry.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" elements │ "),
        Span::raw(format!("cycle {}", app.cycle)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the element table.
///
/// Elements appear in identifier order with their group, label, current
/// content, and class-driven styling.
pub fn render_elements(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Group"),
        Cell::from("Element"),
        Cell::from("Label"),
        Cell::from("Value"),
        Cell::from("Class"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .registry
        .iter()
        .map(|(id, element)| {
            let value_style = app.theme.class_style(&element.class);
            Row::new(vec![
                Cell::from(element.group.clone().unwrap_or_default()),
                Cell::from(id.clone()),
                Cell::from(element.label.clone().unwrap_or_default()),
                Cell::from(element.content.clone()).style(value_style),
                Cell::from(element.class.clone())
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1), // Group
        Constraint::Fill(2), // Element
        Constraint::Fill(2), // Label
        Constraint::Fill(2), // Value
        Constraint::Fill(2), // Class
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(app.theme.selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last page update, last error, controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(ref err) = app.last_error {
        format!(" {} | Error: {} | q:quit ?:help", app.source_description(), err)
    } else if let Some(updated) = app.last_updated {
        let mut parts = format!(
            " {} | Updated {:.1}s ago",
            app.source_description(),
            updated.elapsed().as_secs_f64()
        );
        if let Some(report) = &app.last_report {
            if !report.is_clean() {
                parts.push_str(&format!(" | {} elements missing", report.failures.len()));
            }
        }
        parts.push_str(" | ↑↓:select ?:help q:quit");
        parts
    } else {
        format!(" {} | Waiting... | q:quit", app.source_description())
    };

    let style = if app.last_error.is_some() {
        Style::default().fg(app.theme.danger)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the page view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  ↑/↓ j/k     Navigate elements"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 10u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplaySurface;

    #[test]
    fn test_count_classes_covers_every_kind() {
        let mut registry = ElementRegistry::from_ids(["a", "b", "c", "d", "e", "f"]);
        registry.update_element("a", "label label-success", "1").unwrap();
        registry.update_element("b", "label label-warning", "2").unwrap();
        registry.update_element("c", "label label-danger", "3").unwrap();
        registry.update_element("d", "label label-info", "4").unwrap();
        registry.update_element("e", "label label-default", "5").unwrap();
        // "f" never updated: blank class, stays plain

        let counts = count_classes(&registry);
        assert_eq!(counts.success, 1);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.danger, 1);
        assert_eq!(counts.info, 1);

        // Buckets plus the plain remainder account for every element
        let bucketed = counts.success + counts.warning + counts.danger + counts.info;
        assert_eq!(bucketed + 2, registry.len());
    }

    #[test]
    fn test_count_classes_empty_page() {
        let registry = ElementRegistry::new();
        assert_eq!(count_classes(&registry), ClassCounts::default());
    }
}
