use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hrms_console::app::Command;
use hrms_console::{App, AppMessage, ConsoleConfig, logger, net, ui};
use hrms_client::ClientConfig;
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ConsoleConfig::from_env();
    let _guard = logger::init(&config.log_dir)?;

    tracing::info!(server = %config.server_url, "HRMS console starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = ClientConfig::new(&config.server_url).build_http_client();
    let mut app = App::new(client);
    let result = run(&mut terminal, &mut app, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config: &ConsoleConfig,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            && let Some(command) = app.handle_key(key)
        {
            execute_command(app, config, &tx, command);
        }

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        if app.should_quit {
            tracing::info!("HRMS console shutting down");
            return Ok(());
        }
    }
}

fn execute_command(
    app: &App,
    config: &ConsoleConfig,
    tx: &mpsc::UnboundedSender<AppMessage>,
    command: Command,
) {
    match command {
        Command::Login { username, password } => {
            net::spawn_login(tx.clone(), app.client.clone(), username, password);
        }
        Command::LoadDirectory => {
            net::spawn_directory(tx.clone(), app.client.clone());
        }
        Command::Calculate { ticket, request } => {
            net::spawn_calculation(tx.clone(), app.client.clone(), ticket, request);
        }
        Command::Download { request } => {
            net::spawn_download(
                tx.clone(),
                app.client.clone(),
                request,
                config.download_dir.clone(),
            );
        }
        Command::Share { request } => {
            net::spawn_share(tx.clone(), app.client.clone(), request);
        }
        Command::Quit => {}
    }
}
