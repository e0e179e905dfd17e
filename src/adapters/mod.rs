pub mod audio;

pub use audio::{AudioController, NoAudioController};
