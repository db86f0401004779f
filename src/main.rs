use anyhow::Context;
use log::{error, info};
use macroquad::prelude::*;

use quadtile_editor::app::{App, SceneFactory};
use quadtile_editor::cli::{self, CliCommand, USAGE};
use quadtile_editor::config::EditorConfig;
use quadtile_editor::editor::TilemapEditor;
use quadtile_editor::input::InputPoller;
use quadtile_editor::render::backend::MacroquadBackend;
use quadtile_editor::scene::Scene;
use quadtile_editor::store::MountedStore;

fn window_conf() -> Conf {
    Conf {
        window_title: "Quadtile Editor".into(),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

fn open_store(opts: &cli::Options) -> anyhow::Result<MountedStore> {
    let data = opts.data_dir()?;
    let user = opts.user_dir()?;
    let mut store = MountedStore::new();
    store.mount(&data);
    store
        .set_write_dir(&user)
        .with_context(|| format!("can't use '{}' as the user directory", user.display()))?;
    info!("Data from '{}', saving to '{}'", data.display(), user.display());
    Ok(store)
}

async fn run() -> anyhow::Result<i32> {
    let opts = match cli::parse(std::env::args().skip(1))? {
        CliCommand::Run(opts) => opts,
        CliCommand::Help => {
            print!("{}", USAGE);
            return Ok(0);
        }
        CliCommand::Version => {
            println!("quadtile {}", env!("CARGO_PKG_VERSION"));
            return Ok(0);
        }
    };

    let store = open_store(&opts)?;
    let config = EditorConfig::load(&store).context("can't load editor config")?;

    let factory: SceneFactory = {
        let config = config.clone();
        let store = store.clone();
        Box::new(move || {
            let editor = TilemapEditor::new(&config, store.clone())?;
            Ok(Box::new(editor) as Box<dyn Scene>)
        })
    };

    let mut app = App::new(factory, config.timestep, vec2(screen_width(), screen_height()))?;
    let mut backend = MacroquadBackend::new(store);
    let mut input = InputPoller::new();

    while app.is_running() {
        let events = input.poll();
        if let Err(e) = app.frame(&events, vec2(screen_width(), screen_height())) {
            error!("Frame failed: {:#}", e);
            if !app.recover() {
                return Ok(1);
            }
        }
        backend.render(app.context());
        next_frame().await;
    }

    Ok(0)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}
