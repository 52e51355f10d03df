//! Speed Rush: Extreme Highway, main entry point.
//!
//! A 2D arcade highway racer written in Rust using:
//! - **raylib** for windowing, graphics and audio
//! - **bevy_ecs** for the entity-component-system world
//!
//! # Main Loop
//!
//! 1. Read `config.ini` and the command line, open the window
//! 2. Load textures, the HUD font and sounds, falling back to flat shapes and
//!    silence for anything missing
//! 3. Register screen hooks and observers on the race world
//! 4. Every frame:
//!    - poll the keyboard into `InputState`
//!    - run the front-end schedule (screen changes, menu, audio bridge)
//!    - advance the race while on the Playing screen
//!    - draw the frame
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use clap::Parser;
use log::{error, info, warn};
use raylib::{RaylibHandle, RaylibThread};

use speedrush::error::InitError;
use speedrush::events::audio::AudioCmd;
use speedrush::events::crash::observe_crash_show_game_over;
use speedrush::events::menu::menu_selection_observer;
use speedrush::events::screen::observe_screen_change;
use speedrush::events::switchdebug::switch_debug_observer;
use speedrush::race::Race;
use speedrush::resources::audio::{setup_audio, shutdown_audio};
use speedrush::resources::fontstore::FontStore;
use speedrush::resources::gameconfig::GameConfig;
use speedrush::resources::highscores::HighScores;
use speedrush::resources::input::InputState;
use speedrush::resources::screen::{NextScreen, Screen, Screens};
use speedrush::resources::soundbank::{SoundBank, Track};
use speedrush::resources::texturestore::TextureStore;
use speedrush::systems::audio::{
    downgrade_failed_sounds, forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages, update_engine_volume,
};
use speedrush::systems::input::update_input_state;
use speedrush::systems::render::render_frame;
use speedrush::systems::screen::{
    check_pending_screen, menu_controller, register_screen_hooks, screen_keys, state_is_menu,
    toggle_debug,
};

#[derive(Parser)]
#[command(version, about = "Speed Rush: Extreme Highway. Dodge the traffic, chase the high score.")]
struct Cli {
    /// INI file to read settings from.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Fixed seed for the traffic pattern.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown error".to_string()
    }
}

/// Open the game window. Raylib panics when it cannot create one.
fn open_window(config: &GameConfig) -> Result<(RaylibHandle, RaylibThread), InitError> {
    let (width, height) = config.window_size();
    let vsync = config.vsync;
    catch_unwind(AssertUnwindSafe(|| {
        let mut builder = raylib::init();
        builder
            .size(width as i32, height as i32)
            .title("Speed Rush: Extreme Highway");
        if vsync {
            builder.vsync();
        }
        builder.build()
    }))
    .map_err(|payload| InitError::Window(panic_message(payload.as_ref())))
}

fn front_schedule() -> Schedule {
    let mut front = Schedule::default();
    front.set_executor_kind(ExecutorKind::SingleThreaded);
    front.add_systems(
        (
            check_pending_screen,
            menu_controller.run_if(state_is_menu),
            screen_keys,
            toggle_debug,
            poll_audio_messages,
            update_bevy_audio_messages,
            downgrade_failed_sounds,
            update_engine_volume,
            forward_audio_cmds,
            update_bevy_audio_cmds,
        )
            .chain(),
    );
    front
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using default settings");
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let (mut rl, thread) = match open_window(&config) {
        Ok(window) => window,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);
    if config.fullscreen {
        rl.toggle_fullscreen();
    }
    info!("Hello! This is Speed Rush: Extreme Highway");

    let textures = TextureStore::load(&mut rl, &thread, &config.assets_dir);
    let fonts = FontStore::load(&mut rl, &thread, &config.assets_dir);
    let (bank, preload) = SoundBank::from_dir(&config.assets_dir);

    let mut race = Race::new(config.road_layout(), config.seed);
    {
        let world = race.world_mut();
        world.insert_resource(Screen::new());
        world.insert_resource(NextScreen::new());
        world.insert_resource(InputState::default());
        world.insert_resource(HighScores::new());

        let mut music = Vec::new();
        music.extend(bank.start_track(Track::Music));
        music.extend(bank.set_track_volume(Track::Music, config.music_volume));
        world.insert_resource(bank);
        world.insert_resource(config);

        setup_audio(world, preload);
        world.resource_mut::<Messages<AudioCmd>>().write_batch(music);

        register_screen_hooks(world);
        world.spawn(Observer::new(observe_screen_change));
        world.spawn(Observer::new(observe_crash_show_game_over));
        world.spawn(Observer::new(menu_selection_observer));
        world.spawn(Observer::new(switch_debug_observer));
        world.flush();

        world.resource_mut::<NextScreen>().set(Screens::Menu);
    }

    let mut front = front_schedule();

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if let Some(mut input) = race.world_mut().get_resource_mut::<InputState>() {
            update_input_state(&rl, &mut input);
        }
        front.run(race.world_mut());

        let screen = race.world().resource::<Screen>().get();
        if screen == Screens::Quitting {
            break;
        }
        if screen == Screens::Playing {
            let intent = race.world().resource::<InputState>().driver_intent();
            race.update(dt, intent);
        }

        let mut d = rl.begin_drawing(&thread);
        render_frame(race.world_mut(), &mut d, &textures, &fonts);
    }

    shutdown_audio(race.world_mut());
    info!("Bye!");
    ExitCode::SUCCESS
}
