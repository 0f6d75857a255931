//! HUD and audio sinks that report through the log.

use duck_hunt_core::{Audio, AudioCue, GameStatus, Hud, HudFrame};

/// HUD that keeps the latest frame and logs status changes.
#[derive(Debug, Default)]
pub struct LogHud {
    latest: Option<HudFrame>,
    updates: u64,
}

impl LogHud {
    /// Most recent frame pushed by the game.
    #[must_use]
    pub fn latest(&self) -> Option<&HudFrame> {
        self.latest.as_ref()
    }

    /// Number of updates received since initialization.
    #[must_use]
    pub const fn updates(&self) -> u64 {
        self.updates
    }
}

impl Hud for LogHud {
    fn initialize(&mut self, frame: &HudFrame) {
        log::debug!("hud ready: score {}", frame.score);
        self.latest = Some(frame.clone());
    }

    fn update(&mut self, frame: &HudFrame) {
        self.updates += 1;
        let status_changed = self
            .latest
            .as_ref()
            .map_or(true, |previous| previous.status != frame.status);
        if status_changed && frame.status != GameStatus::Blank {
            log::info!("{}", frame.status);
        }
        log::trace!(
            "score {} | bullets {} | {} | shot {} missed {}",
            frame.score,
            frame.bullets,
            frame.wave_label(),
            frame.ducks_shot,
            frame.ducks_missed
        );
        self.latest = Some(frame.clone());
    }
}

/// Audio sink that only logs cues.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAudio;

impl Audio for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        log::trace!("play {cue:?}");
    }

    fn stop(&mut self, cue: AudioCue) {
        log::trace!("stop {cue:?}");
    }
}
