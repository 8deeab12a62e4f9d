//! Top-level carousel engine.
//!
//! [`MenuEngine`] owns the GPU context, arcball control, scene, camera,
//! atlas loader, and disc renderer, and drives them once per frame.
//! Hosts feed it pointer events and window resizes; it reports active
//! item and movement changes through [`MenuCallbacks`].

mod animation;
mod input;

use glam::{Mat4, Vec2};

use crate::atlas::{AtlasLayout, AtlasLoader, AtlasRequest};
use crate::camera::MenuCamera;
use crate::control::ArcballControl;
use crate::error::MenuError;
use crate::geometry::Mesh;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::items::{ensure_non_empty, MenuItem};
use crate::options::MenuOptions;
use crate::renderer::disc::{DiscInstance, DiscRenderer, SceneUniform};
use crate::scene::CarouselScene;
use crate::util::frame_timing::FrameClock;

use self::animation::EdgeLatch;

/// Cap on the device pixel ratio applied to the surface resolution.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Surface dimensions for a physical window size, with the device
/// pixel ratio capped at [`MAX_PIXEL_RATIO`]. Pointer math keeps the
/// uncapped size; only the backing resolution shrinks.
fn surface_dimensions(
    width: u32,
    height: u32,
    scale_factor: f64,
) -> (u32, u32) {
    let scale = (MAX_PIXEL_RATIO / scale_factor).min(1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dims = (
        ((f64::from(width) * scale).round() as u32).max(1),
        ((f64::from(height) * scale).round() as u32).max(1),
    );
    dims
}

/// Host callbacks fired as the carousel state changes.
///
/// Both fire on transitions only: movement when the sphere starts or
/// stops, the active item when the settled index changes.
#[derive(Default)]
pub struct MenuCallbacks {
    /// Item index the idle carousel has settled on.
    pub on_active_item_change: Option<Box<dyn FnMut(usize)>>,
    /// Movement started (`true`) or stopped (`false`).
    pub on_movement_change: Option<Box<dyn FnMut(bool)>>,
}

/// The core engine for the spherical project carousel.
///
/// Owns the GPU surface, the arcball control, the disc anchor scene,
/// and the background atlas loader, and drives them all from
/// [`render`](Self::render).
///
/// # Construction
///
/// Use [`MenuEngine::new`] with the window handle, its physical size
/// and scale factor, the item list, and tuned [`MenuOptions`].
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to advance the simulation
/// and present. Call [`resize`](Self::resize) when the window size or
/// scale factor changes. Pointer input is forwarded via
/// [`handle_pointer`](Self::handle_pointer).
///
/// # Callbacks
///
/// Movement and active-item transitions are reported through
/// [`MenuCallbacks`].
pub struct MenuEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,

    /// Dolly camera looking at the sphere center.
    camera: MenuCamera,
    /// Arcball rotation control.
    control: ArcballControl,
    /// Disc anchors over the carousel sphere.
    scene: CarouselScene,
    disc_renderer: DiscRenderer,
    depth: DepthTexture,

    /// Background thread composing the thumbnail and label atlases.
    atlas_loader: AtlasLoader,
    /// Grid edge of the atlas currently bound; stays 1 until the first
    /// finished atlas lands.
    atlas_grid_edge: u32,

    items: Vec<MenuItem>,
    options: MenuOptions,
    frame_clock: FrameClock,

    movement: EdgeLatch,
    active_item: Option<usize>,
    /// Rotation velocity sampled after the instance rebuild, one frame
    /// behind the control's own value.
    smooth_rotation_velocity: f32,
    /// Per-frame instance matrix scratch, uploaded every frame.
    instances: Vec<DiscInstance>,
    /// Last reported cursor position in physical pixels.
    cursor: Vec2,
    callbacks: MenuCallbacks,
}

impl MenuEngine {
    /// Build the engine on the given window surface.
    ///
    /// `size` is the physical window size and `scale_factor` the device
    /// pixel ratio. An empty `items` list is replaced with placeholder
    /// items so the carousel always has something to show.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError`] if GPU initialization or the atlas thread
    /// spawn fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        items: Vec<MenuItem>,
        options: MenuOptions,
        callbacks: MenuCallbacks,
    ) -> Result<Self, MenuError> {
        let items = ensure_non_empty(items);
        let surface_size = surface_dimensions(size.0, size.1, scale_factor);
        let context = RenderContext::new(window, surface_size).await?;

        let mut shader_composer = ShaderComposer::new();
        let mut camera = MenuCamera::new(&options.camera);
        let control = ArcballControl::new(
            Vec2::new(size.0 as f32, size.1 as f32),
            options.control.clone(),
        );
        let scene = CarouselScene::new(&options.layout);
        let anchor_count = scene.anchor_count();

        let disc_mesh =
            Mesh::disc(options.layout.disc_steps, options.layout.disc_radius);
        let disc_renderer = DiscRenderer::new(
            &context,
            &mut shader_composer,
            &disc_mesh,
            anchor_count as u32,
        );
        let depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let atlas_loader =
            AtlasLoader::new().map_err(MenuError::AtlasThread)?;
        let layout = AtlasLayout::for_items(
            items.len(),
            &options.atlas,
            context.max_texture_dimension(),
        );
        atlas_loader.submit(AtlasRequest::Build {
            items: items.clone(),
            layout,
        });

        camera.update_projection(
            surface_size.0 as f32,
            surface_size.1 as f32,
            options.layout.sphere_radius,
        );

        Ok(Self {
            context,
            _shader_composer: shader_composer,
            camera,
            control,
            scene,
            disc_renderer,
            depth,
            atlas_loader,
            atlas_grid_edge: 1,
            items,
            options,
            frame_clock: FrameClock::new(),
            movement: EdgeLatch::new(),
            active_item: None,
            smooth_rotation_velocity: 0.0,
            instances: Vec::with_capacity(anchor_count),
            cursor: Vec2::ZERO,
            callbacks,
        })
    }

    /// Execute one frame: advance the simulation, upload uniforms, draw
    /// the discs, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let delta_time = self.frame_clock.tick();
        self.animate(delta_time);
        self.poll_atlas();

        let axis = self.control.rotation_axis;
        let scene_uniform = SceneUniform {
            world: Mat4::IDENTITY.to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
            projection: self.camera.projection_matrix().to_cols_array_2d(),
            camera_position: [
                self.camera.position.x,
                self.camera.position.y,
                self.camera.position.z,
                1.0,
            ],
            rotation_axis_velocity: [
                axis.x,
                axis.y,
                axis.z,
                self.smooth_rotation_velocity
                    * self.options.layout.stretch_velocity_boost,
            ],
            item_count: self.items.len() as u32,
            grid_edge: self.atlas_grid_edge,
            show_labels: u32::from(self.movement.active()),
            frames: self.frame_clock.frames(),
        };
        self.disc_renderer
            .write_scene(&self.context.queue, &scene_uniform);

        let frame = self.context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("disc render pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    wgpu::Color::TRANSPARENT,
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            self.disc_renderer.draw(&mut render_pass);
        }
        self.context.submit(encoder);
        frame.present();

        Ok(())
    }

    /// Resize the surface, depth buffer, and projection to a new
    /// physical window size.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        if width > 0 && height > 0 {
            let (surface_width, surface_height) =
                surface_dimensions(width, height, scale_factor);
            self.context.resize(surface_width, surface_height);
            self.depth = DepthTexture::new(
                &self.context.device,
                surface_width,
                surface_height,
            );
            self.camera.update_projection(
                surface_width as f32,
                surface_height as f32,
                self.options.layout.sphere_radius,
            );
            self.control
                .set_viewport(Vec2::new(width as f32, height as f32));
        }
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl MenuEngine {
    /// Item index the carousel last settled on, if it has settled yet.
    #[must_use]
    pub fn active_item(&self) -> Option<usize> {
        self.active_item
    }

    /// Whether the sphere is being dragged or still coasting.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.movement.active()
    }

    /// Anchor currently closest to facing the camera.
    ///
    /// Unlike [`Self::active_item`] this tracks the live orientation,
    /// so it previews where the carousel would settle mid-drag.
    #[must_use]
    pub fn nearest_anchor(&self) -> usize {
        self.scene.nearest_anchor(
            self.control.orientation,
            self.control.snap_direction,
        )
    }

    /// Items shown on the carousel.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        // A 3x display renders at two thirds of its physical size.
        assert_eq!(surface_dimensions(900, 600, 3.0), (600, 400));
        assert_eq!(surface_dimensions(800, 600, 2.0), (800, 600));
        assert_eq!(surface_dimensions(800, 600, 1.0), (800, 600));
    }

    #[test]
    fn surface_dimensions_never_hit_zero() {
        assert_eq!(surface_dimensions(1, 1, 8.0), (1, 1));
    }
}
