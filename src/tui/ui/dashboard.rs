//! Dashboard view: Ranked cohort overview.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::application::CohortSnapshot;
use crate::domain::NeutrosophicTriple;
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_header};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One-line feedback shown under the ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => MedicalTheme::info(),
            StatusKind::Success => MedicalTheme::success(),
            StatusKind::Warning => MedicalTheme::warning(),
            StatusKind::Error => MedicalTheme::danger(),
        }
    }
}

/// Dashboard state for rendering.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Index into the ranked list
    pub selected: usize,
    pub status: Option<StatusMessage>,
}

impl DashboardState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a cohort of `len` patients.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState, cohort: &CohortSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(2), // Status line
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Vitalrank",
        "Neutrosophic TOPSIS Patient Prioritization",
    );
    render_main_content(f, chunks[1], state, cohort);
    render_status(f, chunks[2], state);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState, cohort: &CohortSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Summary panels
            Constraint::Percentage(65), // Ranking table
        ])
        .split(area);

    render_side_panels(f, chunks[0], state, cohort);
    render_ranking_table(f, chunks[1], state, cohort);
}

fn render_side_panels(f: &mut Frame, area: Rect, state: &DashboardState, cohort: &CohortSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Cohort summary
            Constraint::Length(3), // Selected closeness
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let mut summary = vec![Line::from(vec![
        Span::styled("  Patients: ", MedicalTheme::text_secondary()),
        Span::styled(cohort.len().to_string(), MedicalTheme::text()),
    ])];

    if let Some(most_urgent) = cohort.ranked.first() {
        summary.push(Line::from(vec![
            Span::styled("  Most urgent: ", MedicalTheme::text_secondary()),
            Span::styled(
                most_urgent.id.clone(),
                MedicalTheme::criticality(most_urgent.labels.criticality),
            ),
        ]));
    }

    match &cohort.ideal {
        Some(ideal) => {
            summary.push(triple_line("  PIS ", &ideal.best));
            summary.push(triple_line("  NIS ", &ideal.worst));
            if ideal.is_collapsed() {
                summary.push(Line::from(Span::styled(
                    "  PIS = NIS (ranking not informative)",
                    MedicalTheme::warning(),
                )));
            }
        }
        None => summary.push(Line::from(Span::styled(
            "  No ideal solutions yet",
            MedicalTheme::text_muted(),
        ))),
    }

    let summary_block = Block::default()
        .title(Span::styled(" Cohort Summary ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(summary).block(summary_block), chunks[0]);

    // Closeness of the selected patient
    let gauge_block = Block::default()
        .title(Span::styled(" Closeness (Csi) ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    match cohort.ranked.get(state.selected) {
        Some(record) => {
            let ratio = record.closeness.clamp(0.0, 1.0);
            let gauge = Gauge::default()
                .block(gauge_block)
                .gauge_style(MedicalTheme::gauge(ratio))
                .ratio(ratio)
                .label(format!("{} {:.4}", record.id, record.closeness));
            f.render_widget(gauge, chunks[1]);
        }
        None => f.render_widget(gauge_block, chunks[1]),
    }

    let actions: Vec<Line> = [
        ("N", "New Patient"),
        ("Enter", "Patient Detail"),
        ("G", "Priority Chart"),
        ("M", "Membership Functions"),
        ("E", "Export JSON"),
        ("R", "Reset Cohort"),
        ("Q", "Quit"),
    ]
    .iter()
    .map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
            Span::styled(*desc, MedicalTheme::key_desc()),
        ])
    })
    .collect();

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);
}

fn triple_line(label: &'static str, triple: &NeutrosophicTriple) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, MedicalTheme::text_secondary()),
        Span::styled(triple.to_string(), MedicalTheme::text()),
    ])
}

fn render_ranking_table(f: &mut Frame, area: Rect, state: &DashboardState, cohort: &CohortSnapshot) {
    let block = Block::default()
        .title(Span::styled(" Ranked Cohort ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if cohort.is_empty() {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No patients yet. Press [N] to add one.",
            MedicalTheme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let header = Row::new(
        ["Rank", "ID", "P", "N", "U", "D+", "D-", "Csi", "Criticality"]
            .into_iter()
            .map(Cell::from),
    )
    .style(MedicalTheme::header());

    let rows: Vec<Row> = cohort
        .ranked
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.rank.to_string()),
                Cell::from(r.id.clone()),
                Cell::from(format!("{:.4}", r.aggregated.positive)),
                Cell::from(format!("{:.4}", r.aggregated.negative)),
                Cell::from(format!("{:.4}", r.aggregated.neutral)),
                Cell::from(format!("{:.4}", r.distance_to_best)),
                Cell::from(format!("{:.4}", r.distance_to_worst)),
                Cell::from(format!("{:.4}", r.closeness)),
                Cell::from(r.labels.criticality.label())
                    .style(MedicalTheme::criticality(r.labels.criticality)),
            ])
            .style(MedicalTheme::text())
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(MedicalTheme::selected())
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let content = match &state.status {
        Some(status) => Line::from(Span::styled(format!(" {}", status.text), status.style())),
        None => key_hints(&[("↑↓", "Select"), ("Enter", "Detail")]),
    };

    let p = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let mut state = DashboardState::default();
        state.select_prev();
        assert_eq!(state.selected, 0);

        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, 2);

        state.clamp(1);
        assert_eq!(state.selected, 0);

        state.select_next(0);
        assert_eq!(state.selected, 0);
    }
}
