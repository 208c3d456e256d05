//! Screen rendering

use crate::app::{App, LoginField, SalaryPane, Screen};
use hrms_client::WorkflowState;
use ratatui::{prelude::*, widgets::*};
use shared::models::{ChannelId, SalaryCalculation};

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_login(f, app),
        Screen::Directory => draw_directory(f, app),
        Screen::Salary => draw_salary(f, app),
    }
}

fn busy(app: &App) -> bool {
    app.login_busy
        || app
            .workflow
            .as_ref()
            .is_some_and(|w| w.state().is_busy())
}

fn status_line(f: &mut Frame, app: &App, area: Rect, hint: &str) {
    let line = match (&app.notification, busy(app)) {
        (Some(message), _) => Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Yellow),
        )),
        (None, true) => Line::from(Span::styled(
            " Working... ",
            Style::default().fg(Color::Cyan),
        )),
        (None, false) => Line::from(Span::styled(
            format!(" {} ", hint),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

// ========== Login ==========

fn draw_login(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" HRMS Console "),
        Span::styled(" Sign in ", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .horizontal_margin(4)
        .vertical_margin(1)
        .split(chunks[1]);

    let field_style = |field: LoginField| {
        if app.login_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let username = Paragraph::new(app.username.value())
        .style(field_style(LoginField::Username))
        .block(Block::default().borders(Borders::ALL).title(" Username "));
    f.render_widget(username, form[0]);

    let masked = "*".repeat(app.password.value().chars().count());
    let password = Paragraph::new(masked)
        .style(field_style(LoginField::Password))
        .block(Block::default().borders(Borders::ALL).title(" Password "));
    f.render_widget(password, form[1]);

    let (input, area) = match app.login_field {
        LoginField::Username => (&app.username, form[0]),
        LoginField::Password => (&app.password, form[1]),
    };
    f.set_cursor_position((area.x + input.visual_cursor() as u16 + 1, area.y + 1));

    status_line(f, app, chunks[2], "Enter: sign in | Tab: switch field | Esc: quit");
}

// ========== Directory ==========

fn draw_directory(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let search = Paragraph::new(app.directory_search.value())
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    f.render_widget(search, chunks[0]);

    let rows: Vec<Row> = app
        .visible_directory()
        .iter()
        .map(|e| {
            Row::new(vec![
                e.employee_id.clone(),
                e.full_name.clone(),
                e.department.clone(),
                e.designation.clone(),
                e.email_address.clone(),
            ])
        })
        .collect();

    let mut state = TableState::default();
    state.select(Some(app.directory_cursor));

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(24),
            Constraint::Length(18),
            Constraint::Length(22),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Department", "Designation", "Email"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Employees ({}) ", app.visible_directory().len())),
    );
    f.render_stateful_widget(table, chunks[1], &mut state);

    status_line(f, app, chunks[2], "F3: salary | Ctrl+L: logout | Ctrl+Q: quit");
}

// ========== Salary workflow ==========

fn draw_salary(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(f.area());

    match app.pane {
        SalaryPane::List => draw_salary_list(f, app, chunks[0]),
        SalaryPane::Detail => draw_salary_detail(f, app, chunks[0]),
    }

    let hint = match app.pane {
        SalaryPane::List => "Enter: select | Tab: department | F2: directory | Ctrl+L: logout",
        SalaryPane::Detail => {
            "c: calculate | d: download | s: share | 1/2/3: channels | arrows: period | Esc: back"
        }
    };
    status_line(f, app, chunks[1], hint);
}

fn draw_salary_list(f: &mut Frame, app: &App, area: Rect) {
    let Some(workflow) = app.workflow.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let filter = workflow.department_filter().unwrap_or("All departments");
    let search = Paragraph::new(app.search.value()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Search [{}] ", filter)),
    );
    f.render_widget(search, chunks[0]);

    let items: Vec<ListItem> = workflow
        .visible_employees()
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<7}", e.employee_id),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!("{:<26}", e.full_name)),
                Span::styled(
                    format!("{:<18}", e.department),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(e.designation.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.cursor));

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select employee "),
        );
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_salary_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(workflow) = app.workflow.as_ref() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(1)])
        .split(area);

    draw_detail_sidebar(f, app, columns[0]);

    match workflow.calculation() {
        Some(calculation) => draw_breakdown(f, app, columns[1], calculation),
        None => {
            let placeholder = Paragraph::new("Press 'c' to calculate the salary")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Breakdown "));
            f.render_widget(placeholder, columns[1]);
        }
    }
}

fn draw_detail_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let Some(workflow) = app.workflow.as_ref() else {
        return;
    };
    let Some(employee) = workflow.selected_employee() else {
        return;
    };

    let (year, month) = workflow.period();
    let month_name = chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            &*employee.full_name,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(&*employee.employee_id, Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::raw(&*employee.designation),
        ]),
        Line::from(Span::raw(&*employee.department)),
        Line::default(),
        Line::from(vec![
            Span::raw("Period: "),
            Span::styled(
                format!("{} {}", month_name, year),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled("Channels", Style::default().add_modifier(Modifier::BOLD))),
    ];

    for (idx, channel) in workflow.catalog().iter().enumerate() {
        let selected = workflow.channels().contains(channel.id);
        let marker = if selected { "[x]" } else { "[ ]" };
        let style = if selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let recommended = if channel.recommended { " (recommended)" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{} {} {}{}", idx + 1, marker, channel.name, recommended),
            style,
        )));
    }

    let state_label = match workflow.state() {
        WorkflowState::Calculating { .. } => Some("Calculating..."),
        WorkflowState::Downloading => Some("Downloading..."),
        WorkflowState::Sharing => Some("Sharing..."),
        _ => None,
    };
    if let Some(label) = state_label {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(Color::Cyan),
        )));
    }

    if let Some(path) = &app.last_saved {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw("Saved: "),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Green)),
        ]));
    }

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Employee "));
    f.render_widget(sidebar, area);
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn draw_breakdown(f: &mut Frame, app: &App, area: Rect, calculation: &SalaryCalculation) {
    let Some(workflow) = app.workflow.as_ref() else {
        return;
    };

    let has_outcome = workflow.share_outcome().is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if has_outcome {
            vec![Constraint::Min(14), Constraint::Length(12)]
        } else {
            vec![Constraint::Min(1)]
        })
        .split(area);

    let earnings = &calculation.earnings;
    let deductions = &calculation.deductions;
    let attendance = &calculation.employee_details;

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let rows = vec![
        Row::new(vec![
            format!(
                "Attendance {}/{} ({}%)",
                attendance.present_days,
                attendance.total_working_days,
                attendance.attendance_percentage
            ),
            String::new(),
        ]),
        Row::new(vec!["Basic Salary".to_string(), money(earnings.basic_salary)]),
        Row::new(vec!["HRA".to_string(), money(earnings.hra)]),
        Row::new(vec!["DA".to_string(), money(earnings.da)]),
        Row::new(vec![
            "Medical Allowance".to_string(),
            money(earnings.medical_allowance),
        ]),
        Row::new(vec![
            "Transport Allowance".to_string(),
            money(earnings.transport_allowance),
        ]),
        Row::new(vec!["Gross Salary".to_string(), money(earnings.gross_salary)])
            .style(bold),
        Row::new(vec!["PF".to_string(), money(deductions.pf_employee)]),
        Row::new(vec!["ESI".to_string(), money(deductions.esi_employee)]),
        Row::new(vec![
            "Professional Tax".to_string(),
            money(deductions.professional_tax),
        ]),
        Row::new(vec!["Income Tax".to_string(), money(deductions.income_tax)]),
        Row::new(vec![
            "Total Deductions".to_string(),
            money(deductions.total_deductions),
        ])
        .style(bold),
        Row::new(vec!["NET SALARY".to_string(), money(calculation.net_salary)])
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    ];

    let table = Table::new(rows, [Constraint::Min(24), Constraint::Length(14)]).block(
        Block::default().borders(Borders::ALL).title(format!(
            " Breakdown - {} ",
            calculation.employee_info.calculation_month
        )),
    );
    f.render_widget(table, chunks[0]);

    if let Some(outcome) = workflow.share_outcome() {
        draw_share_outcome(f, chunks[1], outcome);
    }
}

fn draw_share_outcome(
    f: &mut Frame,
    area: Rect,
    outcome: &shared::api::ShareSalarySlipResponse,
) {
    let results = &outcome.sharing_results;
    let mut lines = Vec::new();

    for channel in &results.successful_channels {
        if let Some(delivery) = results.results.get(channel) {
            lines.push(Line::from(vec![
                Span::styled("  OK  ", Style::default().fg(Color::Green)),
                Span::raw(format!("{}: {}", channel_label(*channel), delivery.message)),
            ]));
        }
    }
    for channel in &results.failed_channels {
        if let Some(delivery) = results.results.get(channel) {
            lines.push(Line::from(vec![
                Span::styled(" FAIL ", Style::default().fg(Color::Red)),
                Span::raw(format!("{}: {}", channel_label(*channel), delivery.message)),
            ]));
        }
    }

    if let Some(signature) = &outcome.digital_signature {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(
                "Signed by {} ({}) on {}",
                signature.signed_by, signature.designation, signature.signature_date
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("Verification: {}", signature.verification_code),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = if results.failed_channels.is_empty() {
        " Shared successfully "
    } else {
        " Shared with failures "
    };
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}

fn channel_label(channel: ChannelId) -> &'static str {
    match channel {
        ChannelId::Email => "Email",
        ChannelId::Whatsapp => "WhatsApp",
        ChannelId::Sms => "SMS",
    }
}
