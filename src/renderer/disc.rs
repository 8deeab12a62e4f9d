//! Instanced disc renderer for the carousel sphere.
//!
//! Draws one textured disc per icosphere vertex in a single instanced
//! call. Per-instance model matrices stream into a vertex buffer every
//! frame, and the two atlas textures are swapped in whenever the loader
//! thread finishes composing a new atlas.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::atlas::PreparedAtlas;
use crate::geometry::Mesh;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{AtlasTexture, DepthTexture};

/// Vertex for the disc fan mesh.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct DiscVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// Per-instance data: one model matrix per sphere vertex.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiscInstance {
    /// Model matrix as column-major 4x4 floats.
    pub model: [[f32; 4]; 4],
}

impl DiscInstance {
    /// Pack a glam matrix into the instance layout.
    #[must_use]
    pub fn from_matrix(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Per-frame uniforms for the disc pipeline.
///
/// Field order and types must match `SceneUniforms` in
/// `assets/shaders/modules/scene.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// World (sphere orientation) matrix.
    pub world: [[f32; 4]; 4],
    /// Camera view matrix.
    pub view: [[f32; 4]; 4],
    /// Camera projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Camera position in world space (w unused).
    pub camera_position: [f32; 4],
    /// xyz: world-space rotation axis, w: angular velocity.
    pub rotation_axis_velocity: [f32; 4],
    /// Number of menu items sharing the atlas.
    pub item_count: u32,
    /// Atlas cells per row.
    pub grid_edge: u32,
    /// Nonzero when label cells should blend over thumbnails.
    pub show_labels: u32,
    /// Monotonic frame counter in 60fps units.
    pub frames: f32,
}

/// Instanced renderer drawing every carousel disc in one call.
///
/// Owns the disc mesh buffers, the per-instance matrix buffer, the
/// scene uniform, and the atlas bind group.
pub struct DiscRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    index_count: u32,
    instance_count: u32,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    atlas_layout: wgpu::BindGroupLayout,
    atlas_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
}

impl DiscRenderer {
    /// Build buffers, bind groups, and the pipeline for the given disc
    /// mesh. `anchor_count` instance slots are allocated up front.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        disc_mesh: &Mesh,
        anchor_count: u32,
    ) -> Self {
        let vertices: Vec<DiscVertex> = disc_mesh
            .vertices
            .iter()
            .map(|v| DiscVertex {
                position: v.position.to_array(),
                uv: v.uv.to_array(),
            })
            .collect();
        let indices = disc_mesh.indices();

        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Disc Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Disc Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let instance_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Disc Instance Buffer"),
                size: u64::from(anchor_count)
                    * size_of::<DiscInstance>() as u64,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

        let scene_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Disc Scene Uniform Buffer"),
                size: size_of::<SceneUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

        let scene_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Disc Scene Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let scene_bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Disc Scene Bind Group"),
                layout: &scene_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                }],
            });

        let atlas_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Disc Atlas Bind Group Layout"),
                    entries: &[
                        atlas_texture_entry(0),
                        atlas_texture_entry(1),
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(
                                wgpu::SamplerBindingType::Filtering,
                            ),
                            count: None,
                        },
                    ],
                });

        let sampler = context.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Opaque black placeholders until the loader delivers an atlas.
        let thumbs =
            AtlasTexture::blank(&context.device, &context.queue, "Thumbnail Atlas");
        let labels =
            AtlasTexture::blank(&context.device, &context.queue, "Label Atlas");
        let atlas_bind_group = Self::create_atlas_bind_group(
            context,
            &atlas_layout,
            &thumbs,
            &labels,
            &sampler,
        );

        let pipeline = Self::create_pipeline(
            context,
            &scene_layout,
            &atlas_layout,
            shader_composer,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            index_count: indices.len() as u32,
            instance_count: anchor_count,
            scene_buffer,
            scene_bind_group,
            atlas_layout,
            atlas_bind_group,
            sampler,
        }
    }

    /// Upload fresh atlas textures and rebuild the atlas bind group.
    pub fn set_atlases(&mut self, context: &RenderContext, atlas: &PreparedAtlas) {
        let thumbs = AtlasTexture::upload(
            &context.device,
            &context.queue,
            &atlas.thumbnails,
            "Thumbnail Atlas",
        );
        let labels = AtlasTexture::upload(
            &context.device,
            &context.queue,
            &atlas.labels,
            "Label Atlas",
        );
        self.atlas_bind_group = Self::create_atlas_bind_group(
            context,
            &self.atlas_layout,
            &thumbs,
            &labels,
            &self.sampler,
        );
    }

    /// Stream this frame's per-instance model matrices to the GPU.
    ///
    /// `instances` must not exceed the anchor count given at construction.
    pub fn write_instances(&mut self, queue: &wgpu::Queue, instances: &[DiscInstance]) {
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        self.instance_count = instances.len() as u32;
    }

    /// Upload this frame's scene uniforms.
    pub fn write_scene(&self, queue: &wgpu::Queue, scene: &SceneUniform) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(scene));
    }

    /// Record the instanced disc draw into `render_pass`.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instance_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
        render_pass.set_bind_group(1, &self.atlas_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }

    // The bind group keeps both textures alive after this returns.
    fn create_atlas_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        thumbs: &AtlasTexture,
        labels: &AtlasTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Disc Atlas Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&thumbs.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&labels.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        scene_layout: &wgpu::BindGroupLayout,
        atlas_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> wgpu::RenderPipeline {
        let shader = shader_composer.compose(
            &context.device,
            "Disc Shader",
            include_str!("../../assets/shaders/disc.wgsl"),
            "disc.wgsl",
        );

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Disc Pipeline Layout"),
                    bind_group_layouts: &[scene_layout, atlas_layout],
                    push_constant_ranges: &[],
                });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<DiscVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1, // uv
                },
            ],
        };

        // Instance buffer layout (4x4 matrix as 4 vec4s)
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<DiscInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2, // model matrix col 0
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3, // model matrix col 1
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4, // model matrix col 2
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 5, // model matrix col 3
                },
            ],
        };

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Disc Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout, instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }
}

// Both atlases bind identically, only the slot differs.
fn atlas_texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;

    #[test]
    fn scene_uniform_matches_wgsl_layout() {
        assert_eq!(size_of::<SceneUniform>(), 240);
        assert_eq!(std::mem::offset_of!(SceneUniform, view), 64);
        assert_eq!(std::mem::offset_of!(SceneUniform, projection), 128);
        assert_eq!(std::mem::offset_of!(SceneUniform, camera_position), 192);
        assert_eq!(std::mem::offset_of!(SceneUniform, rotation_axis_velocity), 208);
        assert_eq!(std::mem::offset_of!(SceneUniform, item_count), 224);
        assert_eq!(std::mem::offset_of!(SceneUniform, frames), 236);
    }

    #[test]
    fn vertex_and_instance_strides_are_packed() {
        assert_eq!(size_of::<DiscVertex>(), 20);
        assert_eq!(size_of::<DiscInstance>(), 64);
    }

    #[test]
    fn instance_packs_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let instance = DiscInstance::from_matrix(m);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn disc_mesh_interleaves_center_first() {
        let mesh = Mesh::disc(8, 1.0);
        let first = &mesh.vertices[0];
        assert_eq!(first.position.to_array(), [0.0, 0.0, 0.0]);
        assert_eq!(first.uv.to_array(), [0.5, 0.5]);
    }
}
