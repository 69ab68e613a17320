mod host;
mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use courier_assets::{AssetManifest, ModelRole};
use courier_common::{ForestConfig, MissionConfig};
use courier_hud::{HudFrame, Presenter, TextPresenter};
use courier_kernel::{ForestScene, MissionEvent, Session, route_audio};
use courier_tools::SessionInspector;
use glam::Vec3;
use host::ConsoleSink;
use script::{Script, Step};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// One frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(name = "courier", about = "Headless host for courier sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Mission config (YAML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Asset manifest (JSON). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a scripted session and print the HUD
    Play {
        /// Step script (YAML). Runs the full pickup-and-deliver sequence when omitted.
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Print the HUD every N frames
        #[arg(short, long, default_value = "60")]
        every: u64,
        /// Print HUD frames and the summary as JSON lines
        #[arg(long)]
        json: bool,
        /// Reject every sound request
        #[arg(long)]
        mute: bool,
    },
    /// Fly the forest bird for a number of ticks
    Forest {
        /// Forest scene config (YAML). Defaults are used when omitted.
        #[arg(long)]
        scene: Option<PathBuf>,
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        #[arg(short, long, default_value = "60")]
        every: u64,
    },
    /// Config utilities
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective mission config as YAML
    Dump,
    /// Load and validate a config file
    Check { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MissionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MissionConfig::default(),
    };
    let manifest = match &cli.manifest {
        Some(path) => AssetManifest::load(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        None => AssetManifest::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("courier v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", courier_common::crate_info());
            println!("input: {}", courier_input::crate_info());
            println!("assets: {}", courier_assets::crate_info());
            println!("kernel: {}", courier_kernel::crate_info());
            println!("hud: {}", courier_hud::crate_info());
            println!("tools: {}", courier_tools::crate_info());
        }
        Commands::Play {
            script,
            every,
            json,
            mute,
        } => {
            let script = match script {
                Some(path) => Script::load(&path)
                    .with_context(|| format!("loading script {}", path.display()))?,
                None => Script::full_run(&config),
            };
            play(config, &manifest, &script, every.max(1), json, mute)?;
        }
        Commands::Forest {
            scene,
            ticks,
            every,
        } => {
            let scene = match scene {
                Some(path) => ForestConfig::load(&path)
                    .with_context(|| format!("loading forest scene {}", path.display()))?,
                None => ForestConfig::default(),
            };
            forest(&scene, &manifest, ticks, every.max(1));
        }
        Commands::Config { action } => match action {
            ConfigAction::Dump => print!("{}", config.to_yaml_string()?),
            ConfigAction::Check { file } => {
                let checked = MissionConfig::load(&file)
                    .with_context(|| format!("checking {}", file.display()))?;
                println!(
                    "{}: ok ({} obstacles)",
                    file.display(),
                    checked.desk_positions.len()
                );
            }
        },
    }

    Ok(())
}

fn play(
    config: MissionConfig,
    manifest: &AssetManifest,
    script: &Script,
    every: u64,
    json: bool,
    mute: bool,
) -> anyhow::Result<()> {
    let hud = config.hud.clone();
    let mut session = Session::new(config);
    let mut sink = ConsoleSink::new(mute);
    let presenter = TextPresenter::new().with_controls(false);
    let mut history: Vec<MissionEvent> = Vec::new();

    tracing::info!(
        session = %session.id(),
        script = %script.name,
        frames = script.frame_count(),
        "play started"
    );
    session.on_player_loaded(host::import_model(manifest, ModelRole::Player));
    session.on_package_loaded(host::import_model(manifest, ModelRole::Package));

    for step in &script.steps {
        match step {
            Step::Key { name, pressed } => session.handle_key(name, *pressed),
            Step::Interact => {
                session.handle_key("e", true);
                session.handle_key("e", false);
            }
            Step::Orbit { dx, dy } => session.handle_pointer_drag(*dx, *dy),
            Step::Zoom { delta } => session.handle_wheel(*delta),
            Step::Place { x, y, z } => session.place_player(Vec3::new(*x, *y, *z)),
            Step::Wait { frames } => {
                for _ in 0..*frames {
                    session.step(FRAME);
                    flush_events(&mut session, &mut sink, &mut history);

                    if session.tick() % every == 0 {
                        if let Some(frame) = HudFrame::project(&session, &hud) {
                            if json {
                                println!("{}", serde_json::to_string(&frame)?);
                            } else {
                                print!("{}", presenter.present(&frame));
                            }
                        }
                    }
                }
            }
        }
    }

    flush_events(&mut session, &mut sink, &mut history);
    for (cue, volume) in sink.playing() {
        tracing::debug!(?cue, volume, "still playing at exit");
    }

    let summary = SessionInspector::summary(&session);
    let tally = SessionInspector::tally(&history);
    if json {
        println!("{}", serde_json::to_string(&summary)?);
        println!("{}", serde_json::to_string(&tally)?);
    } else {
        println!("{summary}");
        println!("Events: {tally}");
    }
    Ok(())
}

/// Hand the frame's events to the audio sink and report refusals back.
fn flush_events(session: &mut Session, sink: &mut ConsoleSink, history: &mut Vec<MissionEvent>) {
    let events = session.drain_events();
    for cue in route_audio(&events, sink) {
        session.on_sound_rejected(cue);
    }
    history.extend(events);
}

fn forest(config: &ForestConfig, manifest: &AssetManifest, ticks: u64, every: u64) {
    let mut scene = ForestScene::new(config);
    scene.on_bird_loaded(host::import_model(manifest, ModelRole::Bird));

    for _ in 0..ticks {
        let Some(sample) = scene.tick() else {
            continue;
        };
        if scene.ticks() % every == 0 {
            let p = sample.position;
            let l = sample.light_position;
            println!(
                "tick={} bird=({:.2}, {:.2}, {:.2}) yaw={:.1} light=({:.2}, {:.2}, {:.2})",
                scene.ticks(),
                p.x,
                p.y,
                p.z,
                sample.yaw.to_degrees(),
                l.x,
                l.y,
                l.z
            );
        }
    }
}
