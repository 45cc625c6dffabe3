///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use std::time::Duration;

use druid::{widget::Controller, Command, Data, Event, Selector, Target, TimerToken, Widget};

use crate::spinning::SpinData;

pub const ENGAGE_BOOST: Selector = Selector::new("spin-disc.engage-boost");

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// BoostData / BoostProfile
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Host-supplied boost input: true while a mint is in flight or freshly
/// succeeded.
pub trait BoostData {
    fn is_boosting(&self) -> bool;
}

/// Timing knobs for one boost flavor. The ambient disc and the mint-preview
/// spinner run different window lengths; both ship as constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoostProfile {
    /// Shortest allowed period, seconds per revolution.
    pub min_period: f64,
    /// Multiplier applied to the resting period while boosted.
    pub ratio: f64,
    /// How long the boost lasts before the period reverts.
    pub window: Duration,
}

/// Flavor used for the ambient disc behind the mint flow.
pub const AMBIENT_DISC: BoostProfile = BoostProfile {
    min_period: 0.75,
    ratio: 0.45,
    window: Duration::from_millis(1500),
};

/// Flavor used for the mint-preview spinner.
pub const PREVIEW_SPINNER: BoostProfile = BoostProfile {
    min_period: 0.75,
    ratio: 0.45,
    window: Duration::from_millis(1200),
};

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// BoostState
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Remembers the resting period across overlapping boosts so retriggers
/// reset the timer without compounding the speed-up.
#[derive(Debug, Default)]
pub struct BoostState {
    resting: Option<f64>,
}

impl BoostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter (or re-enter) boost given the currently applied period.
    /// The resting period is captured on the first engagement only; the
    /// returned boosted period is always derived from it.
    pub fn engage(&mut self, current_period: f64, profile: &BoostProfile) -> f64 {
        let resting = *self.resting.get_or_insert(current_period);
        (resting * profile.ratio).max(profile.min_period)
    }

    /// Leave boost, yielding the period to restore.
    pub fn restore(&mut self) -> Option<f64> {
        self.resting.take()
    }

    pub fn is_engaged(&self) -> bool {
        self.resting.is_some()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// BoostController
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Temporarily speeds up the ambient spin when the host's boost input goes
/// high, reverting to the remembered resting period once the window elapses.
///
/// The rising edge is observed in `update` (where data is immutable) and
/// bounced through [`ENGAGE_BOOST`] back into `event`, where the period knob
/// can be written. A retrigger mid-window replaces the revert timer; the
/// superseded timer still fires but its token no longer matches and it is
/// ignored.
pub struct BoostController {
    profile: BoostProfile,
    state: BoostState,
    revert: TimerToken,
}

impl BoostController {
    pub fn new(profile: BoostProfile) -> Self {
        BoostController {
            profile,
            state: BoostState::new(),
            revert: TimerToken::INVALID,
        }
    }
}

impl Default for BoostController {
    fn default() -> Self {
        Self::new(AMBIENT_DISC)
    }
}

impl<T: Data + SpinData + BoostData, W: Widget<T>> Controller<T, W> for BoostController {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut druid::EventCtx,
        event: &druid::Event,
        data: &mut T,
        env: &druid::Env,
    ) {
        match event {
            Event::Command(cmd) if cmd.is(ENGAGE_BOOST) => {
                let boosted = self.state.engage(data.get_period(), &self.profile);
                data.set_period(boosted);
                self.revert = ctx.request_timer(self.profile.window);
                log::debug!("boost engaged, period {:.2}s", boosted);
                ctx.set_handled();
                return;
            }
            Event::Timer(token) if *token == self.revert => {
                self.revert = TimerToken::INVALID;
                if let Some(resting) = self.state.restore() {
                    data.set_period(resting);
                    log::debug!("boost reverted, period {:.2}s", resting);
                }
                ctx.set_handled();
                return;
            }
            _ => {}
        }

        child.event(ctx, event, data, env);
    }

    fn update(
        &mut self,
        child: &mut W,
        ctx: &mut druid::UpdateCtx,
        old_data: &T,
        data: &T,
        env: &druid::Env,
    ) {
        if data.is_boosting() && !old_data.is_boosting() {
            ctx.submit_command(Command::new(ENGAGE_BOOST, (), Target::Widget(ctx.widget_id())));
        }
        child.update(ctx, old_data, data, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boosted_period_from_resting_four_seconds() {
        let mut state = BoostState::new();
        let boosted = state.engage(4.0, &AMBIENT_DISC);
        assert!((boosted - 1.8).abs() < 1e-9);
        assert_eq!(state.restore(), Some(4.0));
    }

    #[test]
    fn floor_applies_to_short_periods() {
        let mut state = BoostState::new();
        let boosted = state.engage(1.0, &AMBIENT_DISC);
        assert!((boosted - 0.75).abs() < 1e-9);
    }

    #[test]
    fn retrigger_does_not_compound() {
        // Re-engaging with the already-boosted period applied must keep
        // deriving from the original resting period, and the eventual
        // restore yields exactly that original.
        let mut state = BoostState::new();
        let first = state.engage(4.0, &AMBIENT_DISC);
        let second = state.engage(first, &AMBIENT_DISC);
        assert!((first - second).abs() < 1e-9);
        assert_eq!(state.restore(), Some(4.0));
        assert!(!state.is_engaged());
    }

    #[test]
    fn restore_without_engage_is_none() {
        let mut state = BoostState::new();
        assert_eq!(state.restore(), None);
    }

    #[test]
    fn profiles_differ_only_in_window() {
        assert_eq!(AMBIENT_DISC.ratio, PREVIEW_SPINNER.ratio);
        assert_eq!(AMBIENT_DISC.min_period, PREVIEW_SPINNER.min_period);
        assert_eq!(AMBIENT_DISC.window, Duration::from_millis(1500));
        assert_eq!(PREVIEW_SPINNER.window, Duration::from_millis(1200));
    }
}
