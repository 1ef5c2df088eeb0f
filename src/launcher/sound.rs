use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Sounds the launcher can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Navigate,
    Select,
}

/// Plays cue sounds; implementations must never fail loudly
pub trait SoundPlayer {
    fn play(&self, cue: SoundCue);
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play(&self, cue: SoundCue) {
        (**self).play(cue)
    }
}

/// Player used when no audio is configured or available
#[derive(Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self, _cue: SoundCue) {}
}

/// Audio output through the default device
pub struct RodioPlayer {
    // Dropping the stream stops all playback
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
    cues: HashMap<SoundCue, Vec<u8>>,
}

impl RodioPlayer {
    /// Open the default output device and read the cue files
    ///
    /// Returns `None` when there is no device or no cue could be read.
    pub fn open(navigate: Option<&Path>, select: Option<&Path>) -> Option<Self> {
        let mut cues = HashMap::new();
        for (cue, path) in [(SoundCue::Navigate, navigate), (SoundCue::Select, select)] {
            let Some(path) = path else { continue };
            match fs::read(path) {
                Ok(bytes) => {
                    cues.insert(cue, bytes);
                }
                Err(e) => debug!("Sound {} unavailable: {}", path.display(), e),
            }
        }

        if cues.is_empty() {
            return None;
        }

        let (stream, handle) = match rodio::OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                warn!("No audio output: {}", e);
                return None;
            }
        };

        info!("Loaded {} launcher sounds", cues.len());
        Some(Self {
            _stream: stream,
            handle,
            cues,
        })
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, cue: SoundCue) {
        let Some(bytes) = self.cues.get(&cue) else {
            return;
        };

        let source = match rodio::Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => source,
            Err(e) => {
                debug!("Cannot decode {:?} sound: {}", cue, e);
                return;
            }
        };

        match rodio::Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => debug!("Cannot play {:?} sound: {}", cue, e),
        }
    }
}

/// Build the best available player for the configured cue files
pub fn open_player(navigate: Option<&Path>, select: Option<&Path>) -> Box<dyn SoundPlayer> {
    match RodioPlayer::open(navigate, select) {
        Some(player) => Box::new(player),
        None => Box::new(Silent),
    }
}
