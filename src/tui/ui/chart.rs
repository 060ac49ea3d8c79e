//! Chart views: priority scatter (D+ vs D-) and membership curves.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::application::CohortSnapshot;
use crate::domain::{Criterion, MembershipCatalog, PatientRecord, CRITERIA_COUNT};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_header};

/// Which variable the membership chart shows.
#[derive(Debug, Default)]
pub struct MembershipState {
    pub criterion: usize,
}

impl MembershipState {
    pub fn next(&mut self) {
        self.criterion = (self.criterion + 1) % CRITERIA_COUNT;
    }

    pub fn prev(&mut self) {
        self.criterion = (self.criterion + CRITERIA_COUNT - 1) % CRITERIA_COUNT;
    }

    #[must_use]
    pub fn criterion(&self) -> Criterion {
        Criterion::ALL[self.criterion % CRITERIA_COUNT]
    }
}

/// Upper axis bound covering `max` with some headroom.
fn axis_bound(max: f64) -> f64 {
    if max > 0.0 {
        (max * 1.1 * 10.0).ceil() / 10.0
    } else {
        1.0
    }
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi]
        .into_iter()
        .map(|v| Span::styled(format!("{v:.2}"), MedicalTheme::text_muted()))
        .collect()
}

fn render_footer(f: &mut Frame, area: Rect, hints: &[(&'static str, &'static str)]) {
    let footer = Paragraph::new(key_hints(hints)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}

fn screen_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Chart
            Constraint::Length(2), // Footer
        ])
        .split(area)
}

/// Scatter of every patient's distance to the best (x) and worst (y) ideal.
///
/// Points below the diagonal sit closer to the worst solution, i.e. are
/// more urgent.
pub fn render_priority_chart(f: &mut Frame, area: Rect, cohort: &CohortSnapshot) {
    let chunks = screen_layout(area);
    render_header(f, chunks[0], "Priority Chart", "D+ vs D- per patient");

    let points: Vec<(&PatientRecord, [(f64, f64); 1])> = cohort
        .ranked
        .iter()
        .map(|r| (r, [(r.distance_to_best, r.distance_to_worst)]))
        .collect();

    let max = cohort
        .ranked
        .iter()
        .flat_map(|r| [r.distance_to_best, r.distance_to_worst])
        .fold(0.0_f64, f64::max);
    let bound = axis_bound(max);
    let diagonal = [(0.0, 0.0), (bound, bound)];

    let mut datasets = vec![Dataset::default()
        .name("Csi = 0.5")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(MedicalTheme::text_muted())
        .data(&diagonal)];

    datasets.extend(points.iter().map(|(record, point)| {
        Dataset::default()
            .name(format!("{} (#{})", record.id, record.rank))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(MedicalTheme::criticality(record.labels.criticality))
            .data(point)
    }));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" Ideal-Solution Distances ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("D+ (to best)", MedicalTheme::text_secondary()))
                .style(MedicalTheme::border())
                .bounds([0.0, bound])
                .labels(axis_labels(0.0, bound)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("D- (to worst)", MedicalTheme::text_secondary()))
                .style(MedicalTheme::border())
                .bounds([0.0, bound])
                .labels(axis_labels(0.0, bound)),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 2)));

    f.render_widget(chart, chunks[1]);
    render_footer(f, chunks[2], &[("Esc", "Back")]);
}

/// Gaussian curves of one variable, plus a marker at the selected patient's value.
pub fn render_membership_chart(
    f: &mut Frame,
    area: Rect,
    state: &MembershipState,
    selected: Option<&PatientRecord>,
) {
    let chunks = screen_layout(area);
    let criterion = state.criterion();
    let variable = MembershipCatalog::reference().variable(criterion);
    let domain = variable.domain();

    let subtitle = format!(
        "{} ({}) │ {}/{}",
        variable.name(),
        criterion.unit(),
        criterion.index() + 1,
        CRITERIA_COUNT
    );
    render_header(f, chunks[0], "Membership Functions", &subtitle);

    let curves: Vec<(&'static str, Style, Vec<(f64, f64)>)> = variable
        .terms()
        .iter()
        .filter_map(|term| {
            variable
                .curve(term.name)
                .map(|curve| (term.name, MedicalTheme::term_role(term.role), curve))
        })
        .collect();

    let marker = selected.map(|record| {
        let value = record.observation.value(criterion);
        (record.id.clone(), [(value, 0.0), (value, 1.0)])
    });

    let mut datasets: Vec<Dataset> = curves
        .iter()
        .map(|(name, style, curve)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(*style)
                .data(curve)
        })
        .collect();

    if let Some((id, line)) = &marker {
        datasets.push(
            Dataset::default()
                .name(id.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(MedicalTheme::info())
                .data(line),
        );
    }

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" Degree of Membership ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(criterion.abbreviation(), MedicalTheme::text_secondary()))
                .style(MedicalTheme::border())
                .bounds([domain.min, domain.max])
                .labels(axis_labels(domain.min, domain.max)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("μ", MedicalTheme::text_secondary()))
                .style(MedicalTheme::border())
                .bounds([0.0, 1.0])
                .labels(axis_labels(0.0, 1.0)),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 2)));

    f.render_widget(chart, chunks[1]);
    render_footer(f, chunks[2], &[("←→", "Variable"), ("Esc", "Back")]);
}
