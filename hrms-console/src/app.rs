//! Application state and reducer
//!
//! Keyboard input turns into either a local state change or a [`Command`]
//! the event loop executes on the runtime; completed requests come back as
//! [`AppMessage`] values. Nothing in here performs IO, which keeps the whole
//! screen flow testable without a terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use hrms_client::workflow::ALLOWED_YEARS;
use hrms_client::{HttpClient, SalaryWorkflow, Session};
use shared::api::{
    ChannelCatalogResponse, SalaryCalculationRequest, ShareSalarySlipRequest,
    ShareSalarySlipResponse,
};
use shared::models::{ChannelId, EmployeeRecord, EmployeeSummary, SalaryCalculation};
use std::path::PathBuf;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Directory,
    Salary,
}

/// Which half of the salary screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryPane {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Network work the event loop must start
#[derive(Debug)]
pub enum Command {
    Login { username: String, password: String },
    LoadDirectory,
    Calculate { ticket: u64, request: SalaryCalculationRequest },
    Download { request: SalaryCalculationRequest },
    Share { request: ShareSalarySlipRequest },
    Quit,
}

/// Completed async work fed back into the reducer
#[derive(Debug)]
pub enum AppMessage {
    LoginSucceeded {
        client: HttpClient,
        session: Session,
        employees: Vec<EmployeeSummary>,
        catalog: ChannelCatalogResponse,
    },
    LoginFailed(String),
    DirectoryLoaded(Vec<EmployeeRecord>),
    DirectoryFailed(String),
    CalculationReady {
        ticket: u64,
        calculation: SalaryCalculation,
    },
    CalculationFailed {
        ticket: u64,
        detail: String,
    },
    SlipSaved(PathBuf),
    DownloadFailed(String),
    ShareCompleted(Box<ShareSalarySlipResponse>),
    ShareFailed(String),
}

pub struct App {
    pub screen: Screen,
    pub client: HttpClient,
    pub session: Option<Session>,

    // Login screen
    pub login_field: LoginField,
    pub username: Input,
    pub password: Input,
    pub login_busy: bool,

    // Salary screen
    pub workflow: Option<SalaryWorkflow>,
    pub pane: SalaryPane,
    pub search: Input,
    pub cursor: usize,
    pub last_saved: Option<PathBuf>,

    // Directory screen
    pub directory: Vec<EmployeeRecord>,
    pub directory_search: Input,
    pub directory_cursor: usize,

    /// Transient status line; replaced by the next notification, cleared on
    /// successful completion of the action it belongs to
    pub notification: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: HttpClient) -> Self {
        Self {
            screen: Screen::Login,
            client,
            session: None,
            login_field: LoginField::Username,
            username: Input::default(),
            password: Input::default(),
            login_busy: false,
            workflow: None,
            pane: SalaryPane::List,
            search: Input::default(),
            cursor: 0,
            last_saved: None,
            directory: Vec::new(),
            directory_search: Input::default(),
            directory_cursor: 0,
            notification: None,
            should_quit: false,
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    /// Directory rows matching the search input, case-insensitively
    pub fn visible_directory(&self) -> Vec<&EmployeeRecord> {
        let needle = self.directory_search.value().to_lowercase();
        self.directory
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.full_name.to_lowercase().contains(&needle)
                    || e.employee_id.to_lowercase().contains(&needle)
                    || e.department.to_lowercase().contains(&needle)
            })
            .collect()
    }

    // ========== Keyboard ==========

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        // Global shortcuts once logged in
        if self.session.is_some() {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') => {
                        self.should_quit = true;
                        return Some(Command::Quit);
                    }
                    KeyCode::Char('l') => {
                        self.logout();
                        return None;
                    }
                    _ => {}
                }
            }
            match key.code {
                KeyCode::F(2) => {
                    self.screen = Screen::Directory;
                    return Some(Command::LoadDirectory);
                }
                KeyCode::F(3) => {
                    self.screen = Screen::Salary;
                    return None;
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Directory => {
                self.handle_directory_key(key);
                None
            }
            Screen::Salary => self.handle_salary_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return Some(Command::Quit);
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_field = match self.login_field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Enter => {
                if self.login_busy {
                    return None;
                }
                let username = self.username.value().trim().to_string();
                let password = self.password.value().to_string();
                if username.is_empty() || password.is_empty() {
                    self.notify("Username and password are required");
                    return None;
                }
                self.login_busy = true;
                self.notification = None;
                return Some(Command::Login { username, password });
            }
            _ => {
                let input = match self.login_field {
                    LoginField::Username => &mut self.username,
                    LoginField::Password => &mut self.password,
                };
                input.handle_event(&Event::Key(key));
            }
        }
        None
    }

    fn handle_directory_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.directory_cursor = self.directory_cursor.saturating_sub(1),
            KeyCode::Down => {
                let len = self.visible_directory().len();
                if len > 0 && self.directory_cursor < len - 1 {
                    self.directory_cursor += 1;
                }
            }
            KeyCode::Esc => {
                self.directory_search.reset();
                self.directory_cursor = 0;
            }
            _ => {
                self.directory_search.handle_event(&Event::Key(key));
                self.directory_cursor = 0;
            }
        }
    }

    fn handle_salary_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.pane {
            SalaryPane::List => {
                self.handle_salary_list_key(key);
                None
            }
            SalaryPane::Detail => self.handle_salary_detail_key(key),
        }
    }

    fn handle_salary_list_key(&mut self, key: KeyEvent) {
        let Some(workflow) = self.workflow.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                let len = workflow.visible_employees().len();
                if len > 0 && self.cursor < len - 1 {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => {
                let employee_id = workflow
                    .visible_employees()
                    .get(self.cursor)
                    .map(|e| e.employee_id.clone());
                if let Some(id) = employee_id {
                    match workflow.select_employee(&id) {
                        Ok(()) => {
                            self.pane = SalaryPane::Detail;
                            self.notification = None;
                        }
                        Err(e) => self.notify(e.to_string()),
                    }
                }
            }
            KeyCode::Tab => {
                // Cycle the department filter: all -> each department -> all
                let departments = workflow.departments();
                let next = match workflow.department_filter() {
                    None => departments.first().cloned(),
                    Some(current) => departments
                        .iter()
                        .position(|d| d == current)
                        .and_then(|i| departments.get(i + 1).cloned()),
                };
                workflow.set_department_filter(next);
                self.cursor = 0;
            }
            KeyCode::Esc => {
                self.search.reset();
                workflow.set_query("");
                self.cursor = 0;
            }
            _ => {
                self.search.handle_event(&Event::Key(key));
                workflow.set_query(self.search.value());
                self.cursor = 0;
            }
        }
    }

    fn handle_salary_detail_key(&mut self, key: KeyEvent) -> Option<Command> {
        let workflow = self.workflow.as_mut()?;

        match key.code {
            KeyCode::Esc => {
                workflow.back_to_selection();
                self.search.reset();
                self.pane = SalaryPane::List;
                self.cursor = 0;
                self.notification = None;
            }
            KeyCode::Char('c') => match workflow.begin_calculation() {
                Ok((ticket, request)) => {
                    self.notification = None;
                    return Some(Command::Calculate { ticket, request });
                }
                Err(e) => self.notify(e.to_string()),
            },
            KeyCode::Char('d') => match workflow.begin_download() {
                Ok(request) => {
                    self.notification = None;
                    return Some(Command::Download { request });
                }
                Err(e) => self.notify(e.to_string()),
            },
            KeyCode::Char('s') => match workflow.begin_share() {
                Ok(request) => {
                    self.notification = None;
                    return Some(Command::Share { request });
                }
                Err(e) => self.notify(e.to_string()),
            },
            KeyCode::Char('1') => workflow.toggle_channel(ChannelId::Email),
            KeyCode::Char('2') => workflow.toggle_channel(ChannelId::Whatsapp),
            KeyCode::Char('3') => workflow.toggle_channel(ChannelId::Sms),
            KeyCode::Left => self.shift_period(0, -1),
            KeyCode::Right => self.shift_period(0, 1),
            KeyCode::Up => self.shift_period(1, 0),
            KeyCode::Down => self.shift_period(-1, 0),
            _ => {}
        }
        None
    }

    /// Move the selected period, wrapping months across year boundaries.
    /// A move that would leave the allowed year range is refused outright,
    /// so December of the last year never wraps back to its own January.
    fn shift_period(&mut self, year_delta: i32, month_delta: i32) {
        let Some(workflow) = self.workflow.as_mut() else {
            return;
        };
        if workflow.state().is_busy() {
            return;
        }

        let (mut year, mut month) = workflow.period();
        year += year_delta;
        match month_delta {
            1 if month == 12 => {
                month = 1;
                year += 1;
            }
            -1 if month == 1 => {
                month = 12;
                year -= 1;
            }
            1 => month += 1,
            -1 => month -= 1,
            _ => {}
        }

        if !ALLOWED_YEARS.contains(&year) {
            return;
        }
        let _ = workflow.set_period(year, month);
    }

    fn logout(&mut self) {
        tracing::info!("Logged out");
        self.session = None;
        self.workflow = None;
        self.client = self.client.clone().without_token();
        self.screen = Screen::Login;
        self.pane = SalaryPane::List;
        self.username.reset();
        self.password.reset();
        self.search.reset();
        self.directory.clear();
        self.login_busy = false;
        self.notification = None;
        self.last_saved = None;
    }

    // ========== Reducer ==========

    pub fn apply(&mut self, message: AppMessage) {
        match message {
            AppMessage::LoginSucceeded {
                client,
                session,
                employees,
                catalog,
            } => {
                tracing::info!(employee_id = %session.user.employee_id, "Session started");
                self.client = client;
                self.session = Some(session);
                self.workflow = Some(SalaryWorkflow::new(employees, catalog));
                self.screen = Screen::Salary;
                self.pane = SalaryPane::List;
                self.cursor = 0;
                self.login_busy = false;
                self.password.reset();
                self.notification = None;
            }
            AppMessage::LoginFailed(detail) => {
                self.login_busy = false;
                self.notify(detail);
            }
            AppMessage::DirectoryLoaded(records) => {
                self.directory = records;
                self.directory_cursor = 0;
            }
            AppMessage::DirectoryFailed(detail) => self.notify(detail),
            AppMessage::CalculationReady {
                ticket,
                calculation,
            } => {
                if let Some(workflow) = self.workflow.as_mut()
                    && workflow.apply_calculation(ticket, calculation)
                {
                    self.notification = None;
                }
            }
            AppMessage::CalculationFailed { ticket, detail } => {
                if let Some(workflow) = self.workflow.as_mut()
                    && let Some(message) = workflow.calculation_failed(ticket, &detail)
                {
                    self.notify(message);
                }
            }
            AppMessage::SlipSaved(path) => {
                if let Some(workflow) = self.workflow.as_mut() {
                    workflow.download_finished();
                }
                self.notify(format!("Saved {}", path.display()));
                self.last_saved = Some(path);
            }
            AppMessage::DownloadFailed(detail) => {
                let message = match self.workflow.as_mut() {
                    Some(workflow) => workflow.download_failed(&detail),
                    None => detail,
                };
                self.notify(message);
            }
            AppMessage::ShareCompleted(response) => {
                if let Some(workflow) = self.workflow.as_mut() {
                    workflow.share_finished(*response);
                }
                self.notification = None;
            }
            AppMessage::ShareFailed(detail) => {
                let message = match self.workflow.as_mut() {
                    Some(workflow) => workflow.share_failed(&detail),
                    None => detail,
                };
                self.notify(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_client::ClientConfig;
    use shared::models::{CommunicationChannel, EmployeeStatus};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn summary(employee_id: &str, full_name: &str) -> EmployeeSummary {
        EmployeeSummary {
            employee_id: employee_id.to_string(),
            full_name: full_name.to_string(),
            department: "Engineering".to_string(),
            designation: "Engineer".to_string(),
            email_address: "a@example.com".to_string(),
            contact_number: "+911234567890".to_string(),
            basic_salary: 40000.0,
            status: EmployeeStatus::Active,
        }
    }

    fn catalog() -> ChannelCatalogResponse {
        ChannelCatalogResponse {
            channels: vec![CommunicationChannel {
                id: ChannelId::Email,
                name: "Email".to_string(),
                icon: String::new(),
                description: String::new(),
                recommended: true,
            }],
            default_selection: vec![ChannelId::Email],
        }
    }

    fn calculation(employee_id: &str) -> SalaryCalculation {
        serde_json::from_value(serde_json::json!({
            "employee_info": {
                "employee_id": employee_id,
                "employee_name": "Asha Rao",
                "department": "Engineering",
                "designation": "Engineer",
                "calculation_month": "March 2025"
            },
            "employee_details": {
                "present_days": 26,
                "total_working_days": 26,
                "attendance_percentage": 100.0
            },
            "earnings": {
                "basic_salary": 40000.0, "hra": 20000.0, "da": 4000.0,
                "medical_allowance": 1250.0, "transport_allowance": 1600.0,
                "gross_salary": 66850.0
            },
            "deductions": {
                "pf_employee": 1800.0, "pf_employer": 1800.0,
                "esi_employee": 0.0, "esi_employer": 0.0,
                "professional_tax": 200.0, "income_tax": 2935.0,
                "total_deductions": 4935.0
            },
            "net_salary": 61915.0,
            "employer_contributions": {
                "pf_employer": 1800.0, "esi_employer": 0.0,
                "total_employer_contribution": 1800.0
            }
        }))
        .unwrap()
    }

    fn logged_in_app() -> App {
        let client = ClientConfig::default().build_http_client();
        let mut app = App::new(client.clone());
        let session = Session {
            user: summary("E100", "Asha Rao"),
            token: "token".to_string(),
        };
        app.apply(AppMessage::LoginSucceeded {
            client,
            session,
            employees: vec![summary("E100", "Asha Rao"), summary("E101", "Bharat Iyer")],
            catalog: catalog(),
        });
        app
    }

    #[test]
    fn login_success_opens_the_salary_screen() {
        let app = logged_in_app();
        assert_eq!(app.screen, Screen::Salary);
        assert!(app.session.is_some());
        assert!(app.workflow.is_some());
        assert!(!app.login_busy);
        assert!(app.password.value().is_empty());
    }

    #[test]
    fn login_failure_shows_backend_detail() {
        let client = ClientConfig::default().build_http_client();
        let mut app = App::new(client);
        app.login_busy = true;
        app.apply(AppMessage::LoginFailed(
            "Invalid username or password".to_string(),
        ));
        assert!(!app.login_busy);
        assert_eq!(
            app.notification.as_deref(),
            Some("Invalid username or password")
        );
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn empty_login_fields_are_rejected_locally() {
        let client = ClientConfig::default().build_http_client();
        let mut app = App::new(client);
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert!(app.notification.is_some());
        assert!(!app.login_busy);
    }

    #[test]
    fn calculate_key_issues_a_command_and_refuses_a_second() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter)); // select first employee

        let command = app.handle_key(key(KeyCode::Char('c')));
        assert!(matches!(command, Some(Command::Calculate { .. })));

        // In flight: the same key now only produces a notification
        let second = app.handle_key(key(KeyCode::Char('c')));
        assert!(second.is_none());
        assert_eq!(
            app.notification.as_deref(),
            Some("A request is already in flight")
        );
    }

    #[test]
    fn share_without_channels_never_reaches_the_network() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter));
        let command = app.handle_key(key(KeyCode::Char('c'))).unwrap();
        let Command::Calculate { ticket, .. } = command else {
            panic!("expected a calculate command");
        };
        app.apply(AppMessage::CalculationReady {
            ticket,
            calculation: calculation("E100"),
        });

        // The catalog seeded only email; deselect it
        app.handle_key(key(KeyCode::Char('1')));
        let command = app.handle_key(key(KeyCode::Char('s')));
        assert!(command.is_none());
        assert_eq!(
            app.notification.as_deref(),
            Some("Please select at least one communication channel")
        );
    }

    #[test]
    fn stale_calculation_leaves_state_unchanged() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter));
        let Command::Calculate { ticket, .. } =
            app.handle_key(key(KeyCode::Char('c'))).unwrap()
        else {
            panic!("expected a calculate command");
        };

        // User goes back and selects the other employee
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        app.apply(AppMessage::CalculationReady {
            ticket,
            calculation: calculation("E100"),
        });
        let workflow = app.workflow.as_ref().unwrap();
        assert!(workflow.calculation().is_none());
        assert_eq!(
            workflow.selected_employee().unwrap().employee_id,
            "E101"
        );
    }

    #[test]
    fn saved_slip_is_reported_with_its_path() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter));
        let Command::Calculate { ticket, .. } =
            app.handle_key(key(KeyCode::Char('c'))).unwrap()
        else {
            panic!("expected a calculate command");
        };
        app.apply(AppMessage::CalculationReady {
            ticket,
            calculation: calculation("E100"),
        });

        assert!(matches!(
            app.handle_key(key(KeyCode::Char('d'))),
            Some(Command::Download { .. })
        ));
        app.apply(AppMessage::SlipSaved(PathBuf::from(
            "Salary_Slip_Asha_Rao_2025_03.pdf",
        )));
        assert_eq!(
            app.notification.as_deref(),
            Some("Saved Salary_Slip_Asha_Rao_2025_03.pdf")
        );
        assert!(app.last_saved.is_some());
    }

    #[test]
    fn logout_returns_to_login_and_drops_the_session() {
        let mut app = logged_in_app();
        let ctrl_l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        app.handle_key(ctrl_l);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.is_none());
        assert!(app.workflow.is_none());
    }

    #[test]
    fn typing_in_the_list_filters_employees() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Char('b')));
        let workflow = app.workflow.as_ref().unwrap();
        let visible = workflow.visible_employees();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].employee_id, "E101");
    }

    #[test]
    fn period_keys_stay_inside_the_allowed_years() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter));

        // Walk down past the lower bound
        for _ in 0..40 {
            app.handle_key(key(KeyCode::Down));
        }
        let (year, _) = app.workflow.as_ref().unwrap().period();
        assert_eq!(year, ALLOWED_YEARS[0]);

        for _ in 0..80 {
            app.handle_key(key(KeyCode::Up));
        }
        let (year, _) = app.workflow.as_ref().unwrap().period();
        assert_eq!(year, *ALLOWED_YEARS.last().unwrap());
    }

    #[test]
    fn month_wrap_stops_at_the_range_edges() {
        let mut app = logged_in_app();
        app.handle_key(key(KeyCode::Enter));

        let last_year = *ALLOWED_YEARS.last().unwrap();
        app.workflow
            .as_mut()
            .unwrap()
            .set_period(last_year, 12)
            .unwrap();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.workflow.as_ref().unwrap().period(), (last_year, 12));

        app.workflow
            .as_mut()
            .unwrap()
            .set_period(ALLOWED_YEARS[0], 1)
            .unwrap();
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.workflow.as_ref().unwrap().period(), (ALLOWED_YEARS[0], 1));
    }
}
