use std::fmt;

/// Failures while bringing up the GPU for the carousel window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    CreateSurface(wgpu::CreateSurfaceError),
    /// No adapter is able to drive the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    RequestDevice(wgpu::RequestDeviceError),
    /// The adapter offers no usable configuration for the surface.
    SurfaceConfig,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSurface(e) => write!(f, "cannot create surface: {e}"),
            Self::NoAdapter(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::RequestDevice(e) => write!(f, "device request refused: {e}"),
            Self::SurfaceConfig => {
                write!(f, "adapter offers no usable surface configuration")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateSurface(e) => Some(e),
            Self::NoAdapter(e) => Some(e),
            Self::RequestDevice(e) => Some(e),
            Self::SurfaceConfig => None,
        }
    }
}

/// GPU device, queue, and presentation surface for the carousel window.
pub struct RenderContext {
    /// Logical device every carousel resource is created against.
    pub device: wgpu::Device,
    /// Submission queue shared by uploads and render passes.
    pub queue: wgpu::Queue,
    /// Swapchain surface of the host window.
    pub surface: wgpu::Surface<'static>,
    /// Active surface configuration.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Bring up the GPU against `window` at `initial_size` physical
    /// pixels.
    ///
    /// # Errors
    ///
    /// Fails when no adapter matches the surface, the device request is
    /// refused, or the surface cannot be configured. There is no
    /// degraded fallback; callers surface the error and stop.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::CreateSurface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::NoAdapter)?;
        log::info!("rendering on {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sphaira device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::RequestDevice)?;

        let (width, height) = initial_size;
        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or(RenderContextError::SurfaceConfig)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        // Atlas pixels are display-referred, so alpha blending has to
        // run in display space rather than through an sRGB-encoding
        // surface.
        config.format = config.format.remove_srgb_suffix();
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// The surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Largest square texture the device supports; bounds the atlas
    /// edge.
    #[must_use]
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Match the surface to a new physical window size. Zero-sized
    /// dimensions are ignored so minimize events cannot wedge the
    /// swapchain.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture to draw into.
    ///
    /// # Errors
    ///
    /// Propagates [`wgpu::SurfaceError`]; the caller reconfigures on
    /// `Lost` or `Outdated` and retries on the following frame.
    pub fn acquire_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Open a command encoder for one frame of carousel work.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sphaira encoder"),
            })
    }

    /// Finish `encoder` and hand its work to the queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}
