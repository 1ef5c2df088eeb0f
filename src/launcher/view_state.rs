use crate::catalog::GameRecord;
use crate::launcher::sound::SoundCue;

/// Cover size in the carousel
pub const COVER_WIDTH: f32 = 200.0;
pub const COVER_HEIGHT: f32 = 250.0;

/// Horizontal gap between covers
pub const COVER_SPACING: f32 = 40.0;

/// Distance between the left edges of neighbouring covers
pub const CAROUSEL_STRIDE: f32 = COVER_WIDTH + COVER_SPACING;

/// Fraction of the remaining scroll distance covered each frame
pub const SCROLL_EASING: f32 = 0.15;

/// Fraction of the remaining lift distance covered each frame
pub const LIFT_EASING: f32 = 0.2;

/// Vertical displacement of the selected cover, negative is up
pub const LIFT_TARGET: f32 = -20.0;

/// Opacity added to the incoming background each frame
pub const FADE_STEP: f32 = 0.05;

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Input understood by the launcher, already decoded from keys and pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherEvent {
    Navigate(Step),
    Confirm,
    Quit,
}

/// Side effects requested by a frame update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PlaySound(SoundCue),
    Launch(usize),
    Quit,
}

/// Everything the launcher draws that changes from frame to frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Highlighted record, always within the catalog
    pub selected_index: usize,
    /// Current and wanted carousel scroll, in pixels
    pub scroll_offset: f32,
    pub scroll_target: f32,
    /// Current and wanted lift of the highlighted cover
    pub lift_offset: f32,
    pub lift_target: f32,
    /// Background being faded in, `None` is the plain backdrop. Lags the
    /// selection while an earlier fade is still running.
    pub background: Option<String>,
    /// Background being faded out, dropped once the fade completes
    pub previous_background: Option<String>,
    /// Opacity of `background`, from 0 to 1
    pub fade_alpha: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0.0,
            scroll_target: 0.0,
            lift_offset: 0.0,
            lift_target: LIFT_TARGET,
            background: None,
            previous_background: None,
            fade_alpha: 1.0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this frame's input, then advance the animations by one frame
    pub fn update(&mut self, events: &[LauncherEvent], records: &[GameRecord]) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.selected_index = self.selected_index.min(records.len().saturating_sub(1));

        for event in events {
            match *event {
                LauncherEvent::Navigate(step) => {
                    if self.navigate(step, records.len()) {
                        effects.push(Effect::PlaySound(SoundCue::Navigate));
                    }
                }
                LauncherEvent::Confirm => {
                    if records.get(self.selected_index).map_or(false, GameRecord::is_launchable) {
                        effects.push(Effect::PlaySound(SoundCue::Select));
                        effects.push(Effect::Launch(self.selected_index));
                    }
                }
                LauncherEvent::Quit => effects.push(Effect::Quit),
            }
        }

        self.tick(records);
        effects
    }

    /// Move the selection by one, clamped at both ends. Returns whether it moved.
    fn navigate(&mut self, step: Step, len: usize) -> bool {
        let next = match step {
            Step::Previous => self.selected_index.checked_sub(1),
            Step::Next => Some(self.selected_index + 1).filter(|&i| i < len),
        };

        match next {
            Some(index) => {
                self.selected_index = index;
                self.lift_offset = 0.0;
                true
            }
            None => false,
        }
    }

    /// Advance scroll, background fade and lift by one frame
    fn tick(&mut self, records: &[GameRecord]) {
        self.scroll_target = self.selected_index as f32 * CAROUSEL_STRIDE;
        self.scroll_offset = ease(self.scroll_offset, self.scroll_target, SCROLL_EASING);

        let wanted = records
            .get(self.selected_index)
            .and_then(GameRecord::background_path)
            .map(str::to_string);
        // A fade in progress runs to completion before the next one starts
        if self.fade_alpha < 1.0 {
            self.fade_alpha = (self.fade_alpha + FADE_STEP).min(1.0);
            if self.fade_alpha >= 1.0 {
                self.previous_background = None;
            }
        } else if wanted != self.background {
            self.previous_background = std::mem::replace(&mut self.background, wanted);
            self.fade_alpha = 0.0;
        }

        self.lift_offset = ease(self.lift_offset, self.lift_target, LIFT_EASING);
    }

    /// Horizontal distance from the screen centre to the centre of cover `index`
    pub fn cover_offset(&self, index: usize) -> f32 {
        index as f32 * CAROUSEL_STRIDE - self.scroll_offset
    }

    /// Vertical displacement of cover `index`
    pub fn cover_lift(&self, index: usize) -> f32 {
        if index == self.selected_index {
            self.lift_offset
        } else {
            0.0
        }
    }
}

/// Move `current` toward `target` by a fixed fraction of the remaining distance
pub fn ease(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}
