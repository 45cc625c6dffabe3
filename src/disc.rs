use std::time::Duration;

use druid::kurbo::Circle;
use druid::piet::InterpolationMode;
use druid::widget::prelude::*;
use druid::{Affine, Color, ImageBuf, Point, RadialGradient, Rect, TimerToken, UnitPoint};

use crate::confetti::{CelebrationData, ConfettiBurst};
use crate::geometry::wrap_degrees;
use crate::spinning::SpinData;

/// Ambient animation tick.
const TICK: Duration = Duration::from_millis(16);

/// Fallback edge length when the host hands us unbounded constraints.
const DEFAULT_SIDE: f64 = 360.0;

/// Vinyl-record rendering of a profile image.
///
/// Stateless with respect to interaction: the drag and boost controllers
/// publish through [`SpinData`] and this widget only paints. The ambient
/// spin phase is widget-local and advances on a fixed timer while
/// `playing` is set, one revolution per `period` seconds; the manual
/// rotation from the drag controller is composed on top.
pub struct DiscWidget {
    texture: Option<ImageBuf>,
    phase: f64,
    tick: TimerToken,
    burst: Option<ConfettiBurst>,
    last_seq: u64,
}

impl DiscWidget {
    pub fn new() -> Self {
        DiscWidget {
            texture: None,
            phase: 0.0,
            tick: TimerToken::INVALID,
            burst: None,
            last_seq: 0,
        }
    }

    /// Profile image to lay over the platter. Without one the bare platter
    /// is painted.
    pub fn with_texture(mut self, texture: ImageBuf) -> Self {
        self.texture = Some(texture);
        self
    }
}

impl Default for DiscWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data + SpinData + CelebrationData> Widget<T> for DiscWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut T, _env: &Env) {
        match event {
            Event::WindowConnected => {
                self.tick = ctx.request_timer(TICK);
            }
            Event::Timer(token) if *token == self.tick => {
                let dt = TICK.as_secs_f64();
                let period = data.get_period();
                if data.get_playing() && period > 0.0 {
                    self.phase = wrap_degrees(self.phase + 360.0 * dt / period);
                    ctx.request_paint();
                }
                if let Some(burst) = &mut self.burst {
                    if !burst.step(dt) {
                        self.burst = None;
                    }
                    ctx.request_paint();
                }
                self.tick = ctx.request_timer(TICK);
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, _ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, _env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            self.last_seq = data.celebration_seq();
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &T, data: &T, _env: &Env) {
        if data.celebration_seq() != self.last_seq {
            self.last_seq = data.celebration_seq();
            self.burst = Some(ConfettiBurst::new());
        }
        if old_data.get_rotation() != data.get_rotation()
            || old_data.get_playing() != data.get_playing()
            || old_data.get_period() != data.get_period()
        {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &T, _env: &Env) -> Size {
        let mut side = bc.max().min_side();
        if !side.is_finite() {
            log::warn!("Unbounded constraints passed to DiscWidget");
            side = DEFAULT_SIDE;
        }
        bc.constrain(Size::new(side, side))
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &T, _env: &Env) {
        let size = ctx.size();
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = size.min_side() / 2.0 - 10.0;
        if radius <= 0.0 {
            return;
        }
        let hole_radius = size.min_side() * 0.075;
        let platter = Circle::new(center, radius);

        // Platter with a subtle radial sheen.
        let platter_paint = RadialGradient::new(
            1.0,
            (
                Color::rgb8(0x2a, 0x2a, 0x2a),
                Color::rgb8(0x1a, 0x1a, 0x1a),
                Color::rgb8(0x2a, 0x2a, 0x2a),
                Color::rgb8(0x0a, 0x0a, 0x0a),
            ),
        );
        ctx.fill(platter, &platter_paint);

        // Groove rings.
        let groove_color = Color::rgba8(0xff, 0xff, 0xff, 0x0d);
        let mut groove = hole_radius + 20.0;
        while groove < radius {
            ctx.stroke(Circle::new(center, groove), &groove_color, 1.0);
            groove += 8.0;
        }

        // Profile texture, rotated by ambient phase plus manual rotation,
        // veiled slightly so it blends with the platter.
        if let Some(texture) = &self.texture {
            let rotation = (self.phase + data.get_rotation()).to_radians();
            let image_side = radius * 1.6;
            let image_rect = Rect::from_center_size(center, Size::new(image_side, image_side));
            ctx.with_save(|ctx| {
                ctx.clip(Circle::new(center, radius - 5.0));
                ctx.transform(Affine::translate(center.to_vec2()));
                ctx.transform(Affine::rotate(rotation));
                ctx.transform(Affine::translate(-center.to_vec2()));
                let image = texture.to_image(ctx.render_ctx);
                ctx.draw_image(&image, image_rect, InterpolationMode::Bilinear);
                ctx.fill(
                    Circle::new(center, radius - 5.0),
                    &Color::rgba8(0x1a, 0x1a, 0x1a, 0x33),
                );
            });
        }

        // Specular highlight, fixed in place above the spinning surface.
        let highlight = RadialGradient::new(
            0.6,
            (
                Color::rgba8(0xff, 0xff, 0xff, 0x66),
                Color::rgba8(0xff, 0xff, 0xff, 0x33),
                Color::rgba8(0xff, 0xff, 0xff, 0x0d),
                Color::rgba8(0xff, 0xff, 0xff, 0x00),
            ),
        )
        .with_center(UnitPoint::new(0.35, 0.35));
        ctx.fill(platter, &highlight);

        // Center hole and hub.
        let hole = Circle::new(center, hole_radius);
        ctx.fill(hole, &Color::BLACK);
        ctx.stroke(hole, &Color::rgba8(0xff, 0xff, 0xff, 0x4d), 1.0);

        let hub = Circle::new(center, hole_radius * 0.6);
        let hub_paint = RadialGradient::new(
            1.0,
            (Color::rgb8(0x44, 0x44, 0x44), Color::rgb8(0x22, 0x22, 0x22)),
        );
        ctx.fill(hub, &hub_paint);

        // Outer edge.
        ctx.stroke(
            Circle::new(center, radius - 1.0),
            &Color::rgba8(0xff, 0xff, 0xff, 0x1a),
            2.0,
        );

        if let Some(burst) = &self.burst {
            burst.paint(ctx, size);
        }
    }
}
