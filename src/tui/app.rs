//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::json::JsonReportExporter;
use crate::application::{CohortSnapshot, TriageService};
use crate::config::Settings;
use crate::domain::PatientRecord;

use super::ui::{
    chart::{render_membership_chart, render_priority_chart, MembershipState},
    dashboard::{render_dashboard, DashboardState, StatusKind, StatusMessage},
    detail::render_detail,
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    PatientForm,
    Detail,
    PriorityChart,
    Membership,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Triage service owning the cohort
    service: TriageService<JsonReportExporter>,

    /// Ranked cohort as last read from the service
    cohort: CohortSnapshot,

    /// Dashboard state (selection, status line)
    dashboard_state: DashboardState,

    /// Patient form state
    patient_form_state: PatientFormState,

    /// Membership chart state
    membership_state: MembershipState,

    /// Reset requested, waiting for confirmation
    confirm_reset: bool,
}

impl App {
    /// Create a new application instance from settings.
    ///
    /// # Errors
    /// Returns error if services cannot be initialized.
    pub fn new(settings: &Settings) -> Result<Self> {
        let exporter = Arc::new(JsonReportExporter::new(&settings.export_dir));
        Self::with_dependencies(TriageService::new(exporter))
    }

    /// Create application with an injected service (Composition Root pattern).
    ///
    /// # Errors
    /// Returns error if the initial cohort cannot be read.
    pub fn with_dependencies(service: TriageService<JsonReportExporter>) -> Result<Self> {
        let cohort = service.snapshot()?;
        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service,
            cohort,
            dashboard_state: DashboardState::default(),
            patient_form_state: PatientFormState::default(),
            membership_state: MembershipState::default(),
            confirm_reset: false,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        render_dashboard(f, content_area, &self.dashboard_state, &self.cohort)
                    }
                    Screen::PatientForm => {
                        render_patient_form(f, content_area, &self.patient_form_state)
                    }
                    Screen::Detail => render_detail(
                        f,
                        content_area,
                        self.selected_record(),
                        self.service.model().weights(),
                    ),
                    Screen::PriorityChart => render_priority_chart(f, content_area, &self.cohort),
                    Screen::Membership => render_membership_chart(
                        f,
                        content_area,
                        &self.membership_state,
                        self.selected_record(),
                    ),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn selected_record(&self) -> Option<&PatientRecord> {
        self.cohort.ranked.get(self.dashboard_state.selected)
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.dashboard_state.status = Some(StatusMessage::new(kind, text));
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Detail => self.handle_detail_key(key),
            Screen::PriorityChart => self.handle_chart_key(key),
            Screen::Membership => self.handle_membership_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.reset_cohort();
            } else {
                self.set_status(StatusKind::Info, "Reset cancelled");
            }
            return;
        }

        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.patient_form_state = PatientFormState::default();
                self.screen = Screen::PatientForm;
            }
            KeyCode::Up => self.dashboard_state.select_prev(),
            KeyCode::Down => self.dashboard_state.select_next(self.cohort.len()),
            KeyCode::Enter => {
                if !self.cohort.is_empty() {
                    self.screen = Screen::Detail;
                }
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.screen = Screen::PriorityChart;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.screen = Screen::Membership;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_cohort(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.cohort.is_empty() {
                    self.set_status(StatusKind::Info, "Cohort is already empty");
                } else {
                    self.confirm_reset = true;
                    self.set_status(
                        StatusKind::Warning,
                        format!(
                            "Remove all {} patients? Press [R] again to confirm",
                            self.cohort.len()
                        ),
                    );
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.patient_form_state.clear_sensitive();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => self.patient_form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.patient_form_state.next_field(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.patient_form_state.load_stable_sample();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.patient_form_state.load_critical_sample();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.patient_form_state = PatientFormState::default();
            }
            KeyCode::Char(c) => self.patient_form_state.input_char(c),
            KeyCode::Backspace => self.patient_form_state.delete_char(),
            KeyCode::Delete => self.patient_form_state.clear_field(),
            KeyCode::Enter => self.submit_patient_form(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.screen = Screen::Dashboard,
            KeyCode::Up => self.dashboard_state.select_prev(),
            KeyCode::Down => self.dashboard_state.select_next(self.cohort.len()),
            _ => {}
        }
    }

    fn handle_chart_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('g') | KeyCode::Char('G')) {
            self.screen = Screen::Dashboard;
        }
    }

    fn handle_membership_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Right => self.membership_state.next(),
            KeyCode::Left => self.membership_state.prev(),
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let observation = match self.patient_form_state.to_observation() {
            Ok(observation) => observation,
            Err(e) => {
                self.patient_form_state.error_message = Some(e);
                return;
            }
        };

        let flagged = observation.out_of_domain();

        match self.service.add_patient(observation) {
            Ok(record) => {
                self.patient_form_state.clear_sensitive();
                self.refresh_cohort();

                if let Some(pos) = self.cohort.ranked.iter().position(|r| r.id == record.id) {
                    self.dashboard_state.selected = pos;
                }

                let mut text = format!(
                    "{} added: rank {}, {}",
                    record.id,
                    record.rank,
                    record.labels.criticality.label()
                );
                let kind = if flagged.is_empty() {
                    StatusKind::Success
                } else {
                    let names: Vec<&str> = flagged.iter().map(|c| c.abbreviation()).collect();
                    text.push_str(&format!(" (outside expected range: {})", names.join(", ")));
                    StatusKind::Warning
                };
                self.set_status(kind, text);
                self.screen = Screen::Dashboard;
            }
            Err(e) => {
                tracing::error!("Failed to add patient: {}", e);
                self.patient_form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn refresh_cohort(&mut self) {
        match self.service.snapshot() {
            Ok(snapshot) => self.cohort = snapshot,
            Err(e) => {
                tracing::error!("Failed to read cohort: {}", e);
                self.cohort = CohortSnapshot::default();
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
        self.dashboard_state.clamp(self.cohort.len());
    }

    fn export_cohort(&mut self) {
        match self.service.export() {
            Ok(receipt) => self.set_status(
                StatusKind::Success,
                format!("Exported {} bytes to {}", receipt.bytes, receipt.location),
            ),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    fn reset_cohort(&mut self) {
        match self.service.reset() {
            Ok(()) => {
                self.refresh_cohort();
                self.set_status(StatusKind::Info, "Cohort cleared");
            }
            Err(e) => {
                tracing::error!("Reset failed: {}", e);
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientObservation;
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let temp = TempDir::new().expect("tempdir");
        let exporter = Arc::new(JsonReportExporter::new(temp.path()));
        let app = App::with_dependencies(TriageService::new(exporter)).expect("Should build app");
        (app, temp)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_add_patient_through_form() {
        let (mut app, _temp) = create_test_app();

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen, Screen::PatientForm);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.cohort.len(), 1);
        assert_eq!(
            app.dashboard_state.status.as_ref().map(|s| s.kind),
            Some(StatusKind::Success)
        );

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.cohort.len(), 2);
        let selected = app.selected_record().expect("New patient selected");
        assert_eq!(selected.id, "P2");
        assert_eq!(selected.rank, 1);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (mut app, _temp) = create_test_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::PatientForm);
        assert!(app.patient_form_state.error_message.is_some());
        assert!(app.cohort.is_empty());
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let (mut app, _temp) = create_test_app();
        app.service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");
        app.refresh_cohort();

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.cohort.len(), 1);

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('r'));
        assert!(app.cohort.is_empty());
        assert!(app.service.is_empty().expect("Should read cohort"));
    }

    #[test]
    fn test_export_reports_status() {
        let (mut app, _temp) = create_test_app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            app.dashboard_state.status.as_ref().map(|s| s.kind),
            Some(StatusKind::Error)
        );

        app.service
            .add_patient(PatientObservation::critical_sample())
            .expect("Should add");
        app.refresh_cohort();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            app.dashboard_state.status.as_ref().map(|s| s.kind),
            Some(StatusKind::Success)
        );
    }

    #[test]
    fn test_screen_navigation() {
        let (mut app, _temp) = create_test_app();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Dashboard);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.screen, Screen::Membership);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.membership_state.criterion, 1);
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.screen, Screen::PriorityChart);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
