pub mod audio;
pub mod audio_player;
pub mod config;
pub mod controller;
pub mod delegate;
pub mod error;
pub mod import;
pub mod library;
pub mod media_controls;
pub mod playback;
pub mod queue;
pub mod remote;
pub mod session;
pub mod transport;

pub use audio::*;
pub use audio_player::*;
pub use config::*;
pub use controller::*;
pub use delegate::*;
pub use error::*;
pub use import::*;
pub use library::*;
pub use media_controls::*;
pub use playback::*;
pub use queue::*;
pub use remote::*;
pub use session::*;
pub use transport::*;
