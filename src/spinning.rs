///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::{Data, Lens};

/// Seconds per revolution of the ambient spin when nothing boosts it.
pub const RESTING_PERIOD: f64 = 4.0;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// SpinData
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Render-target contract for a spinning disc. Any rendering layer that can
/// hold a rotation value, a running/paused flag and an ambient period can
/// host the controllers in this crate.
pub trait SpinData {
    /// Manual rotation published by the drag controller, degrees.
    fn get_rotation(&self) -> f64;
    fn set_rotation(&mut self, degrees: f64);
    /// Whether the ambient spin is running.
    fn get_playing(&self) -> bool;
    fn set_playing(&mut self, playing: bool);
    /// Ambient spin period, seconds per revolution.
    fn get_period(&self) -> f64;
    fn set_period(&mut self, seconds: f64);
}

#[derive(Clone, Data, Lens, PartialEq, Debug)]
pub struct SpinState {
    pub rotation: f64,
    pub playing: bool,
    pub period: f64,
}

impl SpinState {
    pub fn new() -> Self {
        Self {
            rotation: 0.0,
            playing: true,
            period: RESTING_PERIOD,
        }
    }
}

impl Default for SpinState {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinData for SpinState {
    fn get_rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    fn get_playing(&self) -> bool {
        self.playing
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn get_period(&self) -> f64 {
        self.period
    }

    fn set_period(&mut self, seconds: f64) {
        self.period = seconds;
    }
}
