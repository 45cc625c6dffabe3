use druid::{widget::Controller, Cursor, Data, Event, MouseButton, Widget};

use crate::easing::SpinEasing;
use crate::geometry::pointer_angle;
use crate::spinning::SpinData;

/// Live pointer-drag session. Exists only between the initiating press and
/// its matching release.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    last_angle: f64,
    button: MouseButton,
}

/// Lets the user spin the disc by hand.
///
/// Pointer presses open a drag session; moves are converted into angular
/// deltas around the widget center and fed to the easing loop, which settles
/// them into the rotation published through [`SpinData`]. The ambient spin
/// is paused for the whole session and resumed on release.
///
/// Single-pointer by construction: the session remembers the initiating
/// button and press events from any other button are ignored until it ends.
pub struct DragController {
    session: Option<DragSession>,
    easing: SpinEasing,
}

impl DragController {
    pub fn new() -> Self {
        DragController {
            session: None,
            easing: SpinEasing::new(),
        }
    }

    fn end_session<T: SpinData>(&mut self, ctx: &mut druid::EventCtx, data: &mut T) {
        self.session = None;
        ctx.set_active(false);
        ctx.clear_cursor();
        data.set_playing(true);
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data + SpinData, W: Widget<T>> Controller<T, W> for DragController {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut druid::EventCtx,
        event: &druid::Event,
        data: &mut T,
        env: &druid::Env,
    ) {
        child.event(ctx, event, data, env);

        if ctx.is_handled() {
            return;
        }

        match event {
            Event::MouseDown(mouse_event) => {
                if self.session.is_some() {
                    // A second concurrent press does not steal the session.
                    return;
                }
                self.easing.set_base(data.get_rotation());
                let entry_angle = pointer_angle(mouse_event.pos, ctx.size()).unwrap_or(0.0);
                self.session = Some(DragSession {
                    last_angle: entry_angle,
                    button: mouse_event.button,
                });
                ctx.set_active(true);
                ctx.set_cursor(&Cursor::OpenHand);
                data.set_playing(false);
                log::debug!("drag session opened at {:.1} deg", entry_angle);
            }
            Event::MouseMove(mouse_event) => {
                if let Some(session) = &mut self.session {
                    // Center-point angle is undefined; that sample contributes
                    // no delta.
                    if let Some(angle) = pointer_angle(mouse_event.pos, ctx.size()) {
                        let delta = angle - session.last_angle;
                        session.last_angle = angle;
                        self.easing.push_delta(delta);
                        if self.easing.arm() {
                            ctx.request_anim_frame();
                        }
                    }
                }
            }
            Event::MouseUp(mouse_event) => {
                let ends_session = self
                    .session
                    .map_or(false, |session| session.button == mouse_event.button);
                if ends_session {
                    self.end_session(ctx, data);
                }
            }
            Event::WindowDisconnected => {
                // Pointer-cancel equivalent: the session cannot complete.
                if self.session.is_some() {
                    self.end_session(ctx, data);
                }
            }
            Event::AnimFrame(_) => {
                let was_settled = self.easing.is_settled();
                let rotation = self.easing.step();
                if !was_settled {
                    data.set_rotation(rotation);
                }
                if !self.easing.is_settled() && self.easing.arm() {
                    ctx.request_anim_frame();
                }
            }
            _ => {}
        }
    }
}
