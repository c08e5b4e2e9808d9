pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::logging;
use crate::paths::AppPaths;

use action::Action;
use handlers::{apply_action, handle_key_event};
use state::AppState;
use view::draw;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::{env, io, time::Duration};

pub fn run() -> Result<()> {
    // --- 1. PREAMBLE & CONFIG ---
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            let path_str = Config::get_path_string()
                .unwrap_or_else(|_| "[Could not determine config path]".to_string());
            eprintln!("Could not load configuration: {:#}", e);
            eprintln!("Please fix or remove the file at:");
            eprintln!("  {}", path_str);
            return Ok(());
        }
    };

    // First run: write the defaults out so there is something to edit
    if let Ok(path) = AppPaths::get_config_file_path()
        && !path.exists()
        && let Err(e) = config.save()
    {
        eprintln!("Could not write default config: {:#}", e);
    }

    match AppPaths::get_log_dir().and_then(|dir| logging::init_logging(&config.log_level, &dir)) {
        Ok(dir) => info!("event=config_loaded log_dir={}", dir.display()),
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        error!("event=panic info={}", info);
        default_hook(info);
    }));

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::from_config(&config);

    // --- 4. UI LOOP ---
    let result = run_loop(&mut terminal, &mut app_state);
    if let Err(e) = &result {
        warn!("event=ui_loop_error error={:#}", e);
    }

    // --- 5. TEARDOWN ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => state.next(),
                MouseEventKind::ScrollUp => state.previous(),
                _ => {}
            },
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = handle_key_event(key, state) {
                    let quit = action == Action::Quit;
                    apply_action(state, action);
                    if quit {
                        return Ok(());
                    }
                }
            }
            _ => {}
        }
    }
}

fn print_help() {
    println!("Daily News - jot down today's news");
    println!("----------------------------------------");
    println!("Usage: dailynews [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -h, --help    Show this help");
    println!();

    if let Ok(path) = Config::get_path_string() {
        println!("Configuration File: {}", path);
    } else {
        println!("Configuration Path: ~/.config/dailynews/config.toml (Standard XDG)");
    }
    println!();
    println!("Config Options:");
    println!("  screen_title = \"Daily News Scene\"");
    println!("  empty_message = \"No news available\"");
    println!("  log_level = \"info\" (error, warn, info, debug, trace)");
    println!();
    println!("Keys:");
    println!("  Form: Tab/Shift+Tab move between fields, Ctrl+S saves, Esc jumps to the list");
    println!("  Date: Left/Right change the day, PgUp/PgDn the month, t resets to today");
    println!("  List: j/k select, Space marks, d deletes, J/K reorder, a back to form, q quits");
}
