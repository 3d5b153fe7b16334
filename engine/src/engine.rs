use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{input::InputState, render::Renderer};

/// Configuration values for the engine window and runtime behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Upper bound on frames per second. Frames never run faster than this.
    pub target_fps: u32,
    pub resizable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Woodchain".into(),
            width: 800,
            height: 600,
            vsync: true,
            target_fps: 30,
            resizable: false,
        }
    }
}

impl EngineConfig {
    /// Wall-clock time between two frame deadlines.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

/// Main entrypoint for running a game.
pub struct Engine {
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new engine instance with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine from an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Override the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Override the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable or disable vertical sync.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    /// Cap the frame rate.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = fps;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the provided game until the window is closed.
    ///
    /// Returns the first error raised while starting up or while running a frame.
    pub fn run<G: Game + 'static>(self, game: G) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        info!(
            "starting engine: {}x{} window, {} fps cap",
            self.config.width, self.config.height, self.config.target_fps
        );

        let now = Instant::now();
        let mut app = App {
            config: self.config,
            game,
            ctx: None,
            next_frame: now,
            failure: None,
        };
        event_loop.run_app(&mut app)?;

        match app.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App<G: Game> {
    config: EngineConfig,
    game: G,
    ctx: Option<EngineContext>,
    next_frame: Instant,
    failure: Option<anyhow::Error>,
}

impl<G: Game> App<G> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("engine stopped: {err:?}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }
}

impl<G: Game> ApplicationHandler for App<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }

        let mut ctx = match EngineContext::new(event_loop, &self.config) {
            Ok(ctx) => ctx,
            Err(err) => return self.fail(event_loop, err),
        };
        if let Err(err) = self.game.init(&mut ctx) {
            return self.fail(event_loop, err);
        }

        self.next_frame = Instant::now();
        ctx.window.request_redraw();
        self.ctx = Some(ctx);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        ctx.handle_window_event(&event);

        if ends_loop(&event) {
            info!("close requested");
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(new_size) => {
                ctx.renderer.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                let mut result = self.game.update(ctx);
                if result.is_ok() {
                    result = self.game.draw(ctx);
                }
                ctx.input.begin_frame();

                if let Err(err) = result {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_frame {
            ctx.window.request_redraw();
            let period = self.config.frame_period();
            self.next_frame += period;
            // A stalled frame does not queue up catch-up frames.
            if self.next_frame <= now {
                self.next_frame = now + period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Only the window's close request ends the loop. Keys never do.
fn ends_loop(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::CloseRequested)
}

/// Shared context provided to game code each frame.
pub struct EngineContext {
    window: Arc<Window>,
    input: InputState,
    renderer: Renderer,
}

impl EngineContext {
    fn new(event_loop: &ActiveEventLoop, config: &EngineConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to open window")?,
        );
        let renderer = Renderer::new(Arc::clone(&window), config.vsync)?;

        Ok(Self {
            window,
            input: InputState::new(),
            renderer,
        })
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.input.handle_key(event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_button(*button, *state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                // Game code works in logical pixels, the window reports physical ones.
                let logical: LogicalPosition<f64> = position.to_logical(self.window.scale_factor());
                self.input.handle_cursor_moved(logical.x, logical.y);
            }
            _ => {}
        }
    }

    /// Access the current input state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Access the renderer for drawing operations.
    pub fn renderer(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

/// Trait implemented by user code to hook into the engine lifecycle.
pub trait Game {
    /// Called once after the window is created but before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext) -> Result<()>;

    /// Draw the current frame. Called right after `update`.
    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()>;
}
