//! The windowed host loop.
//!
//! Each redraw: apply this frame's input commands, advance [`Time`], step the
//! [`Simulation`], then hand the refreshed vertex buffer to [`GpuState`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::AppError;
use crate::gpu::GpuState;
use crate::input::{Command, Input};
use crate::simulation::Simulation;
use crate::time::Time;

/// How often the window title's FPS readout is refreshed, in frames.
const TITLE_REFRESH_FRAMES: u64 = 30;

pub struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    sim: Simulation,
    input: Input,
    time: Time,
    error: Option<AppError>,
}

impl App {
    pub fn new(sim: Simulation) -> Self {
        Self {
            window: None,
            gpu_state: None,
            sim,
            input: Input::new(),
            time: Time::new(),
            error: None,
        }
    }

    /// Step with a fixed `dt` instead of wall-clock frame time.
    pub fn with_fixed_delta(mut self, dt: Option<f32>) -> Self {
        self.time.set_fixed_delta(dt);
        self
    }

    /// Returns false when the loop should exit.
    fn apply_commands(&mut self) -> bool {
        for command in self.input.commands() {
            match command {
                Command::GrowParticles => self.sim.grow_particles(),
                Command::TogglePause => {
                    self.time.toggle_pause();
                    log::info!("{}", if self.time.is_paused() { "Paused" } else { "Resumed" });
                }
                Command::Quit => {
                    log::info!("ESC: Goodbye!");
                    return false;
                }
            }
        }
        true
    }

    fn update_title(&self) {
        if self.time.frame() % TITLE_REFRESH_FRAMES != 0 {
            return;
        }
        if let Some(window) = &self.window {
            let status = match self.sim.winner() {
                Some(_) => "winner!".to_string(),
                None => format!("{} left", self.sim.store().len()),
            };
            window.set_title(&format!(
                "Particle Arena - {} - {:.0} fps",
                status,
                self.time.fps()
            ));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.apply_commands() {
            event_loop.exit();
            return;
        }
        self.input.begin_frame();

        let dt = self.time.update();
        self.sim.step(dt);
        self.update_title();

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.sim) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let config = self.sim.config();
        let window_attrs = Window::default_attributes()
            .with_title("Particle Arena")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let capacity = self.sim.store().len();
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), capacity))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Goodbye!");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open a window and run `app` until it is closed.
pub fn run(mut app: App) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
