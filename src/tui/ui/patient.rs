//! Vitals entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{Criterion, MembershipCatalog, PatientObservation, CRITERIA_COUNT};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_header};

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub criterion: Criterion,
    pub hint: String,
    pub value: String,
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let catalog = MembershipCatalog::reference();
        let fields = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let domain = catalog.variable(criterion).domain();
                FormField {
                    criterion,
                    hint: format!("{} ({}-{})", criterion.unit(), domain.min, domain.max),
                    value: String::new(),
                }
            })
            .collect();

        let mut state = Self {
            fields,
            selected_field: 0,
            error_message: None,
        };
        state.load(&PatientObservation::default());
        state
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.fields[self.selected_field].value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Wipe all field buffers and restore the form to its blank state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Fill every field from an observation.
    pub fn load(&mut self, observation: &PatientObservation) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.value = format_value(observation.value(field.criterion));
        }
        self.error_message = None;
    }

    /// Preset: near-ideal patient.
    pub fn load_stable_sample(&mut self) {
        self.load(&PatientObservation::stable_sample());
    }

    /// Preset: critical patient.
    pub fn load_critical_sample(&mut self) {
        self.load(&PatientObservation::critical_sample());
    }

    /// Parse the form into an observation.
    ///
    /// Only malformed numbers are rejected; values outside a vital's domain
    /// pass through (see [`Self::out_of_domain`]).
    pub fn to_observation(&self) -> Result<PatientObservation, String> {
        let mut values = Vec::with_capacity(CRITERIA_COUNT);

        for field in self.fields.iter() {
            let value: f64 = field
                .value
                .trim()
                .parse()
                .map_err(|_| format!("{}: Invalid number", field.criterion))?;
            values.push(value);
        }

        PatientObservation::from_slice(&values)
    }

    /// Criteria whose current value parses but lies outside its domain.
    #[must_use]
    pub fn out_of_domain(&self) -> Vec<Criterion> {
        let catalog = MembershipCatalog::reference();
        self.fields
            .iter()
            .filter(|field| {
                field.value.trim().parse::<f64>().is_ok_and(|v| {
                    !catalog.variable(field.criterion).domain().contains(v)
                })
            })
            .map(|field| field.criterion)
            .collect()
    }
}

/// Render the vitals entry form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], "New Patient", "Vital Signs");
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);
    let flagged = state.out_of_domain();

    render_field_column(
        f,
        columns[0],
        &state.fields[..mid],
        0,
        state.selected_field,
        &flagged,
    );
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
        &flagged,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
    flagged: &[Criterion],
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let is_flagged = flagged.contains(&field.criterion);

        let border_style = if is_flagged {
            MedicalTheme::warning()
        } else if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.criterion), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint.as_str(), MedicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let mut spans = vec![Span::raw(" "), value_display];
        if is_selected {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }
        if !field.value.is_empty() {
            spans.push(Span::styled(
                format!("  {}", field.hint),
                MedicalTheme::text_muted(),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let flagged = state.out_of_domain();

    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else if !flagged.is_empty() {
        let names: Vec<&str> = flagged.iter().map(|c| c.abbreviation()).collect();
        Line::from(vec![
            Span::styled("! ", MedicalTheme::warning()),
            Span::styled(
                format!("Outside expected range: {} (accepted)", names.join(", ")),
                MedicalTheme::warning(),
            ),
        ])
    } else {
        key_hints(&[
            ("↑↓", "Navigate"),
            ("Enter", "Submit"),
            ("S", "Stable"),
            ("C", "Critical"),
            ("D", "Defaults"),
            ("Esc", "Cancel"),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
