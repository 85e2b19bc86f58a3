//! Ripplefield - a field of points that ripples with the sound in the room.
//!
//! Loudness from the default microphone spreads outward from the center of
//! the grid; move the pointer to swing the camera around.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ripplefield::audio::AudioCapture;
use ripplefield::cli::Args;
use ripplefield::field::PointField;
use ripplefield::params::RenderConfig;
use ripplefield::rendering::{RenderSystem, Uniforms};
use ripplefield::ripple::RippleReader;
use ripplefield::visualizer::Visualizer;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Render-loop context
    visualizer: Visualizer<RippleReader>,

    /// Microphone stream (None when capture is unavailable)
    _capture: Option<AudioCapture>,

    // Configuration
    render_config: RenderConfig,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let field = PointField::build(&args.field_layout()).context("building point field")?;
        let (visualizer, writer) = Visualizer::with_shared_history(
            field,
            args.ripple_mapping(),
            args.camera_follow(),
        )
        .context("building visualizer")?;

        // A missing microphone leaves the history silent: the field renders flat
        let capture = match AudioCapture::start(&args.capture_config(), writer) {
            Ok(capture) => Some(capture),
            Err(e) => {
                warn!("{}; rendering a silent field", e);
                None
            }
        };

        Ok(Self {
            window: None,
            render_system: None,
            visualizer,
            _capture: capture,
            render_config: RenderConfig::default(),
        })
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        if let Err(e) = self.visualizer.render_frame() {
            error!("Ripple mapping failed: {}", e);
            return;
        }
        if let Err(e) = render_system.update_points(self.visualizer.field()) {
            error!("Point upload failed: {}", e);
            return;
        }

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        let (view_proj, _eye) = self
            .visualizer
            .camera()
            .create_view_proj_matrix(&self.render_config);
        render_system.update_uniforms(&Uniforms::new(
            view_proj,
            &self.render_config,
            (width, height),
        ));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.resize(width, height)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => error!("Render error: {:?}", e),
        }
    }

    fn set_pointer(&mut self, x: f64, y: f64) {
        if let Some(render_system) = &self.render_system {
            let size = render_system.size();
            self.visualizer.camera_mut().set_pointer(x, y, size);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Ripplefield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.visualizer.field(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        info!("Ripplefield is running, press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_pointer(position.x, position.y);
            }
            WindowEvent::Touch(Touch {
                phase: TouchPhase::Started | TouchPhase::Moved,
                location,
                ..
            }) => {
                self.set_pointer(location.x, location.y);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.run_app(&mut app).context("running event loop")?;
    Ok(())
}
