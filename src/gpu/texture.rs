//! Atlas and depth texture abstractions for the disc pipeline.

use image::RgbaImage;

/// A sampled RGBA texture holding one composed atlas.
///
/// Uploads replace the whole texture, so a fresh `AtlasTexture` is created
/// per upload and the consuming bind group is rebuilt. Until the first atlas
/// arrives from the loader thread, [`AtlasTexture::blank`] stands in with a
/// single opaque black texel.
pub struct AtlasTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl AtlasTexture {
    /// Create a 1x1 opaque black placeholder.
    #[must_use]
    pub fn blank(device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> Self {
        Self::from_pixels(device, queue, 1, 1, &[0, 0, 0, 255], label)
    }

    /// Create a texture sized to `image` and upload its pixels.
    #[must_use]
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        Self::from_pixels(device, queue, width, height, image.as_raw(), label)
    }

    fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        // Rgba8Unorm, not Srgb: atlas pixels are display-referred and the
        // shader must see the stored byte values unchanged.
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// A depth buffer sized to the surface, recreated on every resize.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Depth format shared with every pipeline that depth-tests.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture with the given surface dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}
