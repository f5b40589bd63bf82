//! Window renderer: clears to the gallery backdrop and draws the egui overlay.

use std::sync::Arc;

use winit::window::Window;

use crate::core::{ContextSignal, EventTarget, GpuContext};
use crate::error::{NavError, Result};
use crate::overlay::{Overlay, OverlayAction, OverlayView};

/// Gallery wall colour, #1a1a1a
pub const BACKDROP_SRGB: [u8; 3] = [0x1a, 0x1a, 0x1a];

pub struct GalleryRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    overlay: Overlay,
}

impl GalleryRenderer {
    pub async fn new(
        window: Arc<Window>,
        instance: &wgpu::Instance,
        signal: &ContextSignal,
        show_controls: bool,
    ) -> Result<Self> {
        let size = window.inner_size();

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| NavError::BackendUnavailable(format!("surface creation failed: {e}")))?;
        let gpu = GpuContext::new_with_surface(instance, &surface, signal).await?;

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(gpu.device(), &surface_config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "renderer initialized: {}x{} {:?}",
            size.width,
            size.height,
            surface_config.format
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            egui_renderer,
            egui_state,
            egui_ctx,
            overlay: Overlay::new(show_controls),
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| NavError::BackendUnavailable("surface has no formats".into()))?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Re-apply the current configuration after the surface went stale
    pub fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Feed a window event to egui; true if egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// What the pointer is over, for the input normalizer
    pub fn pointer_target(&self) -> EventTarget {
        if self.egui_ctx.wants_pointer_input() {
            EventTarget::Control
        } else if self.egui_ctx.is_pointer_over_area() {
            EventTarget::Overlay
        } else {
            EventTarget::Canvas
        }
    }

    pub fn render(
        &mut self,
        window: &Window,
        view: &OverlayView<'_>,
    ) -> std::result::Result<Vec<OverlayAction>, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Gallery Encoder"),
            });

        // Backdrop pass
        {
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(backdrop_color(view.notice.is_some())),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        // egui pass - overlay and projected artworks
        let raw_input = self.egui_state.take_egui_input(window);
        let mut actions = Vec::new();
        let overlay = &mut self.overlay;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            actions = overlay.show(ctx, view);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(self.gpu.device(), self.gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            self.gpu.device(),
            self.gpu.queue(),
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(actions)
    }
}

/// Backdrop clear colour in linear space; dimmed while paused
pub fn backdrop_color(paused: bool) -> wgpu::Color {
    let scale = if paused { 0.5 } else { 1.0 };
    let [r, g, b] = BACKDROP_SRGB.map(|c| srgb_to_linear(c) * scale);
    wgpu::Color { r, g, b, a: 1.0 }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
