use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use gallery_nav::cli::Cli;
use gallery_nav::core::{
    create_instance, probe_render_backend, Clock, ContextSignal, EventTarget, NavCommand,
    Throttled, WinitInputAdapter,
};
use gallery_nav::overlay::{OverlayAction, OverlayView};
use gallery_nav::renderer::GalleryRenderer;
use gallery_nav::script::{self, Script};
use gallery_nav::{Exhibit, NavError, NavigationController};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 800;
const WINDOW_TITLE: &str = "Gallery";
/// Seconds between attempts to rebuild a lost GPU device
const RECOVERY_INTERVAL: f32 = 1.0;

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<GalleryRenderer>,
    instance: wgpu::Instance,
    nav: NavigationController,
    exhibits: Vec<Exhibit>,
    titles: Vec<String>,
    adapter: WinitInputAdapter,
    signal: ContextSignal,
    clock: Clock,
    recovery: Throttled,
    show_ui: bool,
}

impl App {
    fn new(mut nav: NavigationController, exhibits: Vec<Exhibit>, show_ui: bool) -> Self {
        let signal = ContextSignal::new();
        nav.attach_context_signal(signal.clone());
        let max_delta = nav.config().max_frame_delta;
        let titles = exhibits.iter().map(|e| e.label().to_string()).collect();

        Self {
            window: None,
            renderer: None,
            instance: create_instance(),
            nav,
            exhibits,
            titles,
            adapter: WinitInputAdapter::new(),
            signal,
            clock: Clock::new(max_delta),
            recovery: Throttled::new(RECOVERY_INTERVAL),
            show_ui,
        }
    }

    fn create_renderer(&self, window: &Arc<Window>) -> Result<GalleryRenderer, NavError> {
        pollster::block_on(GalleryRenderer::new(
            window.clone(),
            &self.instance,
            &self.signal,
            self.show_ui,
        ))
    }

    fn frame(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let delta = self.clock.tick();
        self.nav.tick(delta);

        if self.nav.is_paused() {
            self.try_recover(&window, delta);
            return;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let view = OverlayView {
            camera: self.nav.camera(),
            gallery: self.nav.gallery(),
            titles: &self.titles,
            current_index: self.nav.current_index(),
            is_transitioning: self.nav.is_transitioning(),
            notice: self.nav.notice(),
        };

        let result = renderer.render(&window, &view);
        match result {
            Ok(actions) => self.apply_overlay(actions),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.reconfigure();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                self.signal.notify_lost();
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }

    /// While paused, drop the dead renderer and periodically try a fresh one
    fn try_recover(&mut self, window: &Arc<Window>, delta: f32) {
        if self.renderer.take().is_some() {
            if let Some(notice) = self.nav.notice() {
                window.set_title(&format!("{WINDOW_TITLE} - {notice}"));
            }
        }

        self.recovery.advance(delta);
        if !self.recovery.try_fire() {
            return;
        }

        match self.create_renderer(window) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.nav.on_context_restored();
                self.clock.reset();
                window.set_title(WINDOW_TITLE);
            }
            Err(e) => log::warn!("device recovery failed: {}", e),
        }
    }

    fn apply_overlay(&mut self, actions: Vec<OverlayAction>) {
        for action in actions {
            match action {
                OverlayAction::Input(event) => {
                    self.nav.handle_input(&event);
                }
                OverlayAction::Command(command) => {
                    self.nav.command(command);
                }
                OverlayAction::Select { index } => self.on_exhibit_clicked(index),
            }
        }
    }

    /// Report the clicked exhibit's link and walk over to it
    fn on_exhibit_clicked(&mut self, index: usize) {
        let Some(exhibit) = self.exhibits.get(index) else {
            return;
        };
        match &exhibit.url {
            Some(url) => log::info!("visit {} at {}", exhibit.id, url),
            None => log::info!("selected {} (no link)", exhibit.id),
        }
        self.nav.command(NavCommand::Jump { index });
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match self.create_renderer(&window) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("Unsupported: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.nav
            .orbit_mut()
            .set_viewport_height(window.inner_size().height as f32);
        self.clock.reset();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Let egui see the event first
        let target = match self.renderer.as_mut() {
            Some(renderer) => {
                let consumed = renderer.handle_event(&window, &event);
                if consumed {
                    EventTarget::Control
                } else {
                    renderer.pointer_target()
                }
            }
            None => EventTarget::Canvas,
        };

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
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.nav.orbit_mut().set_viewport_height(size.height as f32);
            }
            WindowEvent::RedrawRequested => self.frame(),
            other => {
                for input in self.adapter.process_event(&other, target) {
                    self.nav.handle_input(&input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run_script(path: &std::path::Path, nav: &mut NavigationController) -> Result<()> {
    let script = Script::from_json_file(path)
        .with_context(|| format!("loading script {}", path.display()))?;
    let trajectory = script::run(&script, nav);
    println!("{}", serde_json::to_string_pretty(&trajectory)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.load_config().context("loading navigation config")?;
    let exhibits = cli.load_exhibits().context("loading exhibits")?;

    if let Some(path) = &cli.script {
        let mut nav = NavigationController::new(config, &exhibits)?;
        return run_script(path, &mut nav);
    }

    if let Err(e) = probe_render_backend() {
        log::error!("Unsupported: {}", e);
        return Err(e.into());
    }

    let nav = NavigationController::new(config, &exhibits)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(nav, exhibits, !cli.no_ui);

    log::info!("Gallery - Controls: scroll/arrows walk, drag looks, Home resets, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
