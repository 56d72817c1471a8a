use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use skydash::audio::{default_player, SilentAudio};
use skydash::config::{Cli, GameConfig};
use skydash::constants::{INPUT_POLL_MS, LOG_FILE};
use skydash::game::GameLoop;
use skydash::input::{handle_event, InputResult};
use skydash::render::sprite::{load_game_over_art, PixelImage, Sprite};
use skydash::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use skydash::ui::{self, SceneView};
use skydash::utils::build_info::VERSION_STRING;
use skydash::utils::logging::init_file_logger;
use skydash::utils::persistence::save_path;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match save_path(LOG_FILE) {
        Ok(path) => {
            if let Err(e) = init_file_logger(&path, cli.log_level.as_deref()) {
                eprintln!("Could not open log file {}: {}", path.display(), e);
            }
        }
        Err(e) => eprintln!("Logging disabled: {}", e),
    }
    log::info!("Skydash {} starting", VERSION_STRING);

    let config = GameConfig::load(&cli);
    let store: Box<dyn KeyValueStore> = match JsonFileStore::open_default() {
        Ok(store) => {
            log::debug!("Scores stored in {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("No score file available, best score will not persist: {}", e);
            Box::new(MemoryStore::default())
        }
    };

    if cli.reset_best {
        let mut game = GameLoop::new(config.field(), store, Box::new(SilentAudio), false);
        if game.reset_best()? {
            log::info!("Best score cleared");
            println!("Best score cleared.");
        } else {
            log::warn!("No score file available, nothing to clear");
            eprintln!("No score file available, nothing was cleared.");
        }
        return Ok(());
    }

    let sprite = Sprite::load(config.sprite.as_deref());
    let game_over_art = load_game_over_art(config.game_over_image.as_deref());
    let mut game = GameLoop::new(
        config.field(),
        store,
        default_player(),
        config.sound_enabled,
    )
    .with_frame_interval(config.frame_interval_ms);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game, &sprite, game_over_art.as_ref());

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Terminal error: {}", e);
    }
    result?;

    log::info!("Exiting with best score {}", game.session.best_score);
    println!("Best score: {}", game.session.best_score);
    Ok(())
}

/// Draw, feed elapsed time to the game, and dispatch input until quit.
fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut GameLoop,
    sprite: &Sprite,
    game_over_art: Option<&PixelImage>,
) -> io::Result<()> {
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;
    let mut rng = rand::thread_rng();
    let mut last_ms = now_ms();

    loop {
        let now = now_ms();
        game.advance(now.saturating_sub(last_ms), now, &mut rng);
        last_ms = now;

        terminal.draw(|frame| {
            let view = SceneView {
                game,
                sprite,
                game_over_art,
                now_ms: now,
            };
            ui::draw_ui(frame, &view);
        })?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match handle_event(&event::read()?) {
                InputResult::Quit => break,
                InputResult::Command(command) => game.handle(command, now_ms()),
                InputResult::Continue => {}
            }
        }
    }
    Ok(())
}
