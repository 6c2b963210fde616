//! Audio cue playback

use std::{
    io::Write,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::state::Cue;

/// Something that can play a cue. Playback is fire-and-forget.
pub trait CueSink: Send + Sync {
    fn emit(&self, cue: Cue);
}

/// Plays cues by spawning an external player with a sound file per cue.
/// Without a player or file configured it rings the terminal bell.
#[derive(Debug, Clone, Default)]
pub struct CommandCuePlayer {
    player: Option<String>,
    short_cue: Option<PathBuf>,
    long_cue: Option<PathBuf>,
}

impl CommandCuePlayer {
    pub fn new(player: Option<String>, short_cue: Option<PathBuf>, long_cue: Option<PathBuf>) -> Self {
        Self {
            player,
            short_cue,
            long_cue,
        }
    }

    fn sound_for(&self, cue: Cue) -> Option<&PathBuf> {
        match cue {
            Cue::Short => self.short_cue.as_ref(),
            Cue::Long => self.long_cue.as_ref(),
        }
    }
}

impl CueSink for CommandCuePlayer {
    fn emit(&self, cue: Cue) {
        let (Some(player), Some(sound)) = (self.player.clone(), self.sound_for(cue).cloned()) else {
            ring_bell(cue);
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available to play {:?} cue", cue);
            return;
        };

        // Overlapping cues are allowed; nothing waits on the previous one
        handle.spawn(async move {
            debug!("Playing {:?} cue with {} {}", cue, player, sound.display());
            match Command::new(&player).arg(&sound).output().await {
                Ok(output) if !output.status.success() => {
                    warn!(
                        "{} exited with {}: {}",
                        player,
                        output.status,
                        String::from_utf8_lossy(&output.stderr)
                    );
                }
                Ok(_) => {}
                Err(e) => warn!("Failed to run cue player {}: {}", player, e),
            }
        });
    }
}

fn ring_bell(cue: Cue) {
    let bells: &[u8] = match cue {
        Cue::Short => b"\x07",
        Cue::Long => b"\x07\x07",
    };
    let mut stderr = std::io::stderr();
    if let Err(e) = stderr.write_all(bells).and_then(|_| stderr.flush()) {
        debug!("Failed to ring terminal bell: {}", e);
    }
}

/// Records every emitted cue instead of playing it
#[derive(Debug, Clone, Default)]
pub struct RecordingCueSink {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CueSink for RecordingCueSink {
    fn emit(&self, cue: Cue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}
