use std::error::Error;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use clap::Parser;
use log::{error, warn, LevelFilter};
use queue_core::{
    AudioPlayer, MediaControlsHandler, NoRemote, NullSession, PlaybackState, PlayerConfig,
    PlayerController, PlayerDataSource, PlayerDelegate, QueueItem, RemoteAdapter, TrackList,
};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

type Controller = PlayerController<AudioPlayer, NullSession, Box<dyn RemoteAdapter>>;

#[derive(Parser, Debug)]
#[command(name = "queue-player", version, about = "Play audio files in order")]
struct Cli {
    /// Files or directories to queue, in order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Queue position to start from
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Repeat the starting track
    #[arg(short = 'l', long = "loop")]
    looping: bool,

    /// Config file (defaults to the per-user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds skipped by rewind / fast-forward
    #[arg(long)]
    seek_interval: Option<f64>,

    /// Do not register with the OS media controls
    #[arg(long)]
    no_media_keys: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Prints now-playing changes to the terminal.
struct ConsoleDelegate {
    tracks: Rc<TrackList>,
}

impl ConsoleDelegate {
    fn title(&self, index: usize) -> String {
        self.tracks.title_for_index(index).unwrap_or_default()
    }
}

impl PlayerDelegate for ConsoleDelegate {
    fn on_item_changed(&self, _item: &QueueItem, index: usize) {
        println!("[{}/{}] {}", index + 1, self.tracks.len(), self.title(index));
    }

    fn on_became_invalid(&self, _state: PlaybackState) {
        println!("stopped");
    }

    fn on_paused(&self, _state: PlaybackState) {
        println!("paused");
    }

    fn on_playing(&self, _state: PlaybackState) {
        println!("playing");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("queue_core")
        .add_filter_allow_str("queue_player")
        .build();
    if let Err(e) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => PlayerConfig::load_from(path)?,
        None => PlayerConfig::load().unwrap_or_else(|e| {
            warn!("{}, using defaults", e);
            PlayerConfig::default()
        }),
    };
    if let Some(interval) = cli.seek_interval {
        config.seek_interval_secs = interval;
    }

    let tracks = Rc::new(TrackList::from_paths(&cli.paths)?);
    if tracks.is_empty() {
        return Err("no playable files found".into());
    }

    let remote: Box<dyn RemoteAdapter> = if cli.no_media_keys {
        Box::new(NoRemote)
    } else {
        match MediaControlsHandler::new("Queue Player") {
            Ok(handler) => Box::new(handler),
            Err(e) => {
                warn!("{}", e);
                Box::new(NoRemote)
            }
        }
    };

    let tick_interval = config.tick_interval;
    let mut controller: Controller =
        PlayerController::new(AudioPlayer::new()?, NullSession::new(), remote, config);

    let delegate = Rc::new(ConsoleDelegate {
        tracks: tracks.clone(),
    });
    controller.set_delegate(&delegate);
    controller.set_data_source(&tracks);

    controller.load_items(tracks.queue_items(), cli.start)?;
    if cli.looping {
        controller.toggle_looping();
    }
    controller.play();

    println!("p play/pause  n next  b back  f/r seek  l loop  s stop  q quit");
    let input = spawn_input_reader();

    loop {
        controller.tick();
        controller.pump_remote_commands();

        for line in input.try_iter() {
            if !apply_command(&mut controller, line.trim()) {
                controller.stop();
                return Ok(());
            }
        }
        if controller.state() == PlaybackState::Invalid {
            return Ok(());
        }

        std::thread::sleep(tick_interval);
    }
}

/// Returns `false` when the user asked to quit.
fn apply_command(controller: &mut Controller, command: &str) -> bool {
    match command {
        "p" => controller.play(),
        "n" => controller.skip_forward(),
        "b" => controller.skip_back(),
        "f" => controller.fast_forward(),
        "r" => controller.rewind(),
        "l" => {
            let enabled = controller.toggle_looping();
            println!("loop {}", if enabled { "on" } else { "off" });
        }
        "s" => controller.stop(),
        "q" => return false,
        "" => {}
        other => println!("unknown command: {}", other),
    }
    true
}

fn spawn_input_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
