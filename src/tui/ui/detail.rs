//! Patient detail view: per-criterion matrix and labels.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{Criterion, CriterionWeights, MembershipCatalog, PatientRecord};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_header};

/// Term whose membership at `value` is highest.
fn nearest_term(criterion: Criterion, value: f64) -> &'static str {
    MembershipCatalog::reference()
        .variable(criterion)
        .terms()
        .iter()
        .max_by(|a, b| a.mf.degree(value).total_cmp(&b.mf.degree(value)))
        .map_or("-", |t| t.name)
}

/// Render the detail of one patient, or a placeholder if none is selected.
pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    record: Option<&PatientRecord>,
    weights: &CriterionWeights,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let Some(record) = record else {
        render_header(f, chunks[0], "Patient Detail", "no patient selected");
        let empty = Paragraph::new(Line::from(Span::styled(
            "The cohort is empty.",
            MedicalTheme::text_muted(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(empty, chunks[1]);
        render_footer(f, chunks[2]);
        return;
    };

    let subtitle = format!(
        "{} │ rank {} │ added {}",
        record.id,
        record.rank,
        record.added_at.format("%H:%M:%S UTC")
    );
    render_header(f, chunks[0], "Patient Detail", &subtitle);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .margin(1)
        .split(chunks[1]);

    render_matrix(f, body[0], record, weights);
    render_summary(f, body[1], record);
    render_footer(f, chunks[2]);
}

fn render_matrix(f: &mut Frame, area: Rect, record: &PatientRecord, weights: &CriterionWeights) {
    let header = Row::new(
        ["Criterion", "Value", "Nearest term", "Weight", "P", "N", "U"]
            .into_iter()
            .map(Cell::from),
    )
    .style(MedicalTheme::header());

    let mut rows: Vec<Row> = Criterion::ALL
        .iter()
        .map(|&c| {
            let value = record.observation.value(c);
            let triple = record.matrix[c.index()];
            Row::new(vec![
                Cell::from(c.name()),
                Cell::from(format!("{value} {}", c.unit())),
                Cell::from(nearest_term(c, value)),
                Cell::from(format!("{:.4}", weights.weight(c))),
                Cell::from(format!("{:.4}", triple.positive)).style(MedicalTheme::success()),
                Cell::from(format!("{:.4}", triple.negative)).style(MedicalTheme::danger()),
                Cell::from(format!("{:.4}", triple.neutral)).style(MedicalTheme::warning()),
            ])
            .style(MedicalTheme::text())
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("Aggregated"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(format!("{:.4}", weights.total())),
            Cell::from(format!("{:.4}", record.aggregated.positive)),
            Cell::from(format!("{:.4}", record.aggregated.negative)),
            Cell::from(format!("{:.4}", record.aggregated.neutral)),
        ])
        .style(MedicalTheme::title().add_modifier(Modifier::UNDERLINED)),
    );

    let widths = [
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(Span::styled(" Criterion Matrix ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(table, area);
}

fn render_summary(f: &mut Frame, area: Rect, record: &PatientRecord) {
    let labels = record.labels;
    let lines = vec![
        Line::from(vec![
            Span::styled("Criticality: ", MedicalTheme::text_secondary()),
            Span::styled(
                labels.criticality.label(),
                MedicalTheme::criticality(labels.criticality),
            ),
        ]),
        Line::from(vec![
            Span::styled("Risk:        ", MedicalTheme::text_secondary()),
            Span::styled(labels.risk.label(), MedicalTheme::risk(labels.risk)),
        ]),
        Line::from(vec![
            Span::styled("Uncertainty: ", MedicalTheme::text_secondary()),
            Span::styled(labels.uncertainty.label(), MedicalTheme::text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("D+  ", MedicalTheme::text_secondary()),
            Span::styled(format!("{:.4}", record.distance_to_best), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("D-  ", MedicalTheme::text_secondary()),
            Span::styled(format!("{:.4}", record.distance_to_worst), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Csi ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{:.4}", record.closeness),
                MedicalTheme::gauge(record.closeness),
            ),
        ]),
        Line::from(vec![
            Span::styled("Rank ", MedicalTheme::text_secondary()),
            Span::styled(record.rank.to_string(), MedicalTheme::title()),
        ]),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Assessment ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(key_hints(&[("↑↓", "Previous/Next"), ("Esc", "Back")])).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
