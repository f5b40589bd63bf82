use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Instance, Queue, Surface};

use super::context_guard::ContextSignal;
use crate::error::{NavError, Result};

/// Shared GPU device for the viewer
///
/// The device-lost callback posts into a `ContextSignal`, which the
/// navigation controller polls at the start of each frame.
#[derive(Clone)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

pub fn create_instance() -> Instance {
    Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    })
}

/// Check that some adapter exists before any window or controller is built
pub fn probe_render_backend() -> Result<()> {
    let instance = create_instance();
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .map_err(|e| NavError::BackendUnavailable(format!("{e}")))?;

    let info = adapter.get_info();
    log::info!("render backend: {} ({:?})", info.name, info.backend);
    Ok(())
}

impl GpuContext {
    /// Create a device compatible with `surface`
    pub async fn new_with_surface(
        instance: &Instance,
        surface: &Surface<'_>,
        signal: &ContextSignal,
    ) -> Result<Self> {
        let adapter = Self::request_adapter(instance, surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;
        install_device_lost_handler(&device, signal.clone());

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| NavError::BackendUnavailable(format!("no compatible adapter: {e}")))
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Gallery Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| NavError::BackendUnavailable(format!("device request failed: {e}")))
    }
}

fn install_device_lost_handler(device: &Device, signal: ContextSignal) {
    device.set_device_lost_callback(move |reason, message| {
        log::error!("GPU device lost: reason={:?}, message={}", reason, message);
        signal.notify_lost();
    });
}
