use std::time::Duration;

use druid::widget::{Button, CrossAxisAlignment, Either, Flex, Label, MainAxisAlignment, SizedBox};
use druid::{
    theme, AppLauncher, Color, Data, Env, Lens, LocalizedString, PlatformError, Selector,
    TimerToken, Widget, WidgetExt, WindowDesc,
};

use druid_color_thesaurus::*;

use druid_spin_disc_widget::onchain::{
    MintClient, MintStage, PreviewClient, TokenMetadata, BASE_SEPOLIA,
};
use druid_spin_disc_widget::{
    BoostController, BoostData, CelebrationData, DiscWidget, DragController, SpinData, SpinState,
    AMBIENT_DISC,
};

//////////////////////////////////////////////////////////////////////////////////////
// Constants
//////////////////////////////////////////////////////////////////////////////////////
pub const BACKGROUND: Color = black::ONYX;
pub const DEMO_WALLET: &str = "0x1111111111111111111111111111111111111111";
pub const PROFILE_IMAGE_URL: &str = "https://spinmint.vercel.app/logo.jpg";

const START_MINT: Selector = Selector::new("spinmint.start-mint");

/// Simulated wallet-confirmation and mining delays (the preview flow takes
/// about 1.4 s end to end).
const SIGNING_DELAY: Duration = Duration::from_millis(400);
const MINING_DELAY: Duration = Duration::from_millis(1000);
/// How long the success celebration (confetti + boost input) stays up.
const CELEBRATION_WINDOW: Duration = Duration::from_millis(1800);

//////////////////////////////////////////////////////////////////////////////////////
//
// MintFlow
//
//////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Data, Lens, PartialEq)]
pub struct MintFlow {
    pub stage: MintStage,
    pub tx_hash: String,
    pub token_id: u64,
    pub error: String,
    pub confirm_open: bool,
    pub celebrating: bool,
    pub celebration_seq: u64,
}

impl MintFlow {
    pub fn new() -> Self {
        MintFlow {
            stage: MintStage::Idle,
            tx_hash: String::new(),
            token_id: 0,
            error: String::new(),
            confirm_open: false,
            celebrating: false,
            celebration_seq: 0,
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//
// AppData
//
//////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Data, Lens, PartialEq)]
pub struct AppData {
    pub spin: SpinState,
    pub mint: MintFlow,
}

impl SpinData for AppData {
    fn get_rotation(&self) -> f64 {
        self.spin.get_rotation()
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.spin.set_rotation(degrees);
    }

    fn get_playing(&self) -> bool {
        self.spin.get_playing()
    }

    fn set_playing(&mut self, playing: bool) {
        self.spin.set_playing(playing);
    }

    fn get_period(&self) -> f64 {
        self.spin.get_period()
    }

    fn set_period(&mut self, seconds: f64) {
        self.spin.set_period(seconds);
    }
}

impl BoostData for AppData {
    fn is_boosting(&self) -> bool {
        self.mint.stage.in_flight() || self.mint.celebrating
    }
}

impl CelebrationData for AppData {
    fn celebration_seq(&self) -> u64 {
        self.mint.celebration_seq
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//
// MintFlowController
//
//////////////////////////////////////////////////////////////////////////////////////

/// Drives the preview mint flow on timers: confirm → signing → mining →
/// success (confetti + boost) → back to idle. The wallet/contract side is
/// whatever [`MintClient`] it is built with.
pub struct MintFlowController<C> {
    client: C,
    signing: TimerToken,
    mining: TimerToken,
    celebration: TimerToken,
}

impl<C: MintClient> MintFlowController<C> {
    pub fn new(client: C) -> Self {
        MintFlowController {
            client,
            signing: TimerToken::INVALID,
            mining: TimerToken::INVALID,
            celebration: TimerToken::INVALID,
        }
    }
}

impl<C: MintClient, W: Widget<AppData>> druid::widget::Controller<AppData, W>
    for MintFlowController<C>
{
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut druid::EventCtx,
        event: &druid::Event,
        data: &mut AppData,
        env: &Env,
    ) {
        match event {
            druid::Event::Command(cmd) if cmd.is(START_MINT) => {
                data.mint.confirm_open = false;
                data.mint.error.clear();
                data.mint.stage = MintStage::Signing;
                self.signing = ctx.request_timer(SIGNING_DELAY);
                ctx.set_handled();
                return;
            }
            druid::Event::Timer(token) if *token == self.signing => {
                self.signing = TimerToken::INVALID;
                let token_uri =
                    TokenMetadata::new(self.client.total_supply(), PROFILE_IMAGE_URL, DEMO_WALLET)
                        .to_json()
                        .unwrap_or_default();
                match self.client.mint(DEMO_WALLET, &token_uri) {
                    Ok(receipt) => {
                        data.mint.tx_hash = receipt.tx_hash;
                        data.mint.token_id = receipt.token_id;
                        data.mint.stage = MintStage::Mining;
                        self.mining = ctx.request_timer(MINING_DELAY);
                    }
                    Err(err) => {
                        data.mint.stage = MintStage::Failed;
                        data.mint.error = err.to_string();
                        log::warn!("mint failed: {}", err);
                    }
                }
                ctx.set_handled();
                return;
            }
            druid::Event::Timer(token) if *token == self.mining => {
                self.mining = TimerToken::INVALID;
                data.mint.stage = MintStage::Success;
                data.mint.celebrating = true;
                data.mint.celebration_seq += 1;
                self.celebration = ctx.request_timer(CELEBRATION_WINDOW);
                ctx.set_handled();
                return;
            }
            druid::Event::Timer(token) if *token == self.celebration => {
                self.celebration = TimerToken::INVALID;
                data.mint.celebrating = false;
                data.mint.stage = MintStage::Idle;
                ctx.set_handled();
                return;
            }
            _ => {}
        }

        child.event(ctx, event, data, env);
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//
// Main
//
//////////////////////////////////////////////////////////////////////////////////////

fn main() -> Result<(), PlatformError> {
    let main_window = WindowDesc::new(make_ui())
        .window_size((480.0, 640.0))
        .title(LocalizedString::new("SpinMint"));

    let data = AppData {
        spin: SpinState::new(),
        mint: MintFlow::new(),
    };

    AppLauncher::with_window(main_window)
        .configure_env(|env, _| {
            env.set(theme::WINDOW_BACKGROUND_COLOR, BACKGROUND);
            env.set(theme::TEXT_COLOR, white::ALABASTER);
            env.set(theme::CURSOR_COLOR, Color::BLACK);
        })
        .log_to_console()
        .launch(data)?;

    Ok(())
}

fn make_ui() -> impl Widget<AppData> {
    let disc = DiscWidget::new()
        .controller(DragController::new())
        .controller(BoostController::new(AMBIENT_DISC));

    Flex::column()
        .with_child(
            Label::new("SpinMint")
                .with_text_size(28.0)
                .padding((0.0, 12.0, 0.0, 0.0)),
        )
        .with_child(Label::new("Spin your profile, mint your NFT").with_text_size(14.0))
        .with_flex_child(disc.center(), 1.0)
        .with_child(make_action_bar())
        .with_child(make_status_bar())
        .main_axis_alignment(MainAxisAlignment::SpaceBetween)
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .controller(MintFlowController::new(PreviewClient::new()))
}

fn make_action_bar() -> impl Widget<AppData> {
    let mint_button = Button::new(format!("Mint on {}", BASE_SEPOLIA.name)).on_click(
        |_ctx, data: &mut AppData, _env| {
            if data.mint.stage == MintStage::Idle || data.mint.stage == MintStage::Failed {
                data.mint.confirm_open = true;
            }
        },
    );

    let send_button = Button::new("Send NFT").disabled_if(|_, _| true);

    let confirm_panel = Flex::column()
        .with_child(Label::new("Confirm Mint").with_text_size(18.0))
        .with_child(Label::new(format!(
            "Network: {}   Est. gas: ~0.00021 ETH",
            BASE_SEPOLIA.name
        )))
        .with_child(
            Flex::row()
                .with_child(
                    Button::new("Confirm").on_click(|ctx, _data: &mut AppData, _env| {
                        ctx.submit_command(START_MINT);
                    }),
                )
                .with_child(
                    Button::new("Cancel").on_click(|_ctx, data: &mut AppData, _env| {
                        data.mint.confirm_open = false;
                    }),
                ),
        )
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .padding(8.0)
        .background(gray::DAVYS_GRAY);

    Flex::column()
        .with_child(
            Flex::row()
                .with_child(mint_button)
                .with_child(send_button)
                .main_axis_alignment(MainAxisAlignment::Center),
        )
        .with_child(Either::new(
            |data: &AppData, _| data.mint.confirm_open,
            confirm_panel,
            SizedBox::empty(),
        ))
        .cross_axis_alignment(CrossAxisAlignment::Center)
}

fn make_status_bar() -> impl Widget<AppData> {
    Flex::column()
        .with_child(Label::new(|data: &AppData, _: &Env| {
            if data.mint.stage == MintStage::Failed && !data.mint.error.is_empty() {
                data.mint.error.clone()
            } else {
                data.mint.stage.message().to_owned()
            }
        }))
        .with_child(Label::new(|data: &AppData, _: &Env| {
            if data.mint.tx_hash.is_empty() {
                "Preview mode — connect wallet to enable features in production.".to_owned()
            } else {
                format!(
                    "Token #{}  tx {}…{}",
                    data.mint.token_id,
                    &data.mint.tx_hash[..6.min(data.mint.tx_hash.len())],
                    &data.mint.tx_hash[data.mint.tx_hash.len().saturating_sub(4)..],
                )
            }
        }))
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .padding(5.0)
}
