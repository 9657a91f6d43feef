mod pipeline;

use {
    crate::{
        graphics::{
            vulkan_api::{
                DescriptorPool, DescriptorSetLayout, Framebuffer,
                HostCoherentBuffer, Pipeline, PipelineLayout, RenderDevice,
                RenderPass, MAX_NUM_IMAGES,
            },
            Frame, GraphicsError, SwapchainFrames,
        },
        math::Mat4,
    },
    ash::vk,
    memoffset::offset_of,
    std::sync::Arc,
};

/// The clear color. The alpha channel is visible on non-opaque surfaces.
const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.5];

/// Vertex data exactly as it is laid out in the buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct TriangleVertices {
    positions: [[f32; 3]; 3],
    colors: [[f32; 3]; 3],
}

const VERTICES: TriangleVertices = TriangleVertices {
    positions: [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]],
    colors: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
};

/// Byte offsets of each region in the triangle's buffer.
///
/// The buffer starts with one uniform slot per possible swapchain image so
/// the host never writes a matrix the GPU may still be reading. The vertex
/// positions and colors follow the last slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct BufferLayout {
    uniform_stride: u64,
    positions_offset: u64,
    colors_offset: u64,
    size_in_bytes: u64,
}

impl BufferLayout {
    fn new(min_uniform_buffer_offset_alignment: u64) -> Self {
        let uniform_size = std::mem::size_of::<Mat4>() as u64;
        let alignment = min_uniform_buffer_offset_alignment.max(1);
        let uniform_stride = uniform_size.div_ceil(alignment) * alignment;
        let positions_offset = uniform_stride * MAX_NUM_IMAGES as u64;
        let colors_offset =
            positions_offset + offset_of!(TriangleVertices, colors) as u64;
        let size_in_bytes = positions_offset
            + std::mem::size_of::<TriangleVertices>() as u64;
        Self {
            uniform_stride,
            positions_offset,
            colors_offset,
            size_in_bytes,
        }
    }

    fn uniform_offset(&self, swapchain_image_index: usize) -> u64 {
        self.uniform_stride * swapchain_image_index as u64
    }
}

/// Resources used to render a single rotating triangle to a frame.
pub struct Triangle {
    framebuffers: Vec<Framebuffer>,
    extent: vk::Extent2D,
    descriptor_sets: Vec<vk::DescriptorSet>,
    _descriptor_pool: DescriptorPool,
    pipeline: Pipeline,
    pipeline_layout: PipelineLayout,
    _descriptor_set_layout: DescriptorSetLayout,
    render_pass: RenderPass,
    buffer: HostCoherentBuffer,
    layout: BufferLayout,
    render_device: Arc<RenderDevice>,
}

// Public API
// ----------

impl Triangle {
    /// Create the pipeline, buffer and descriptors for the triangle.
    ///
    /// Framebuffers are created later by rebuild_framebuffers, once the
    /// swapchain exists.
    pub fn new(render_device: Arc<RenderDevice>) -> Result<Self, GraphicsError> {
        let layout = BufferLayout::new(
            render_device.limits().min_uniform_buffer_offset_alignment,
        );
        let mut buffer = HostCoherentBuffer::new(
            render_device.clone(),
            vk::BufferUsageFlags::UNIFORM_BUFFER
                | vk::BufferUsageFlags::VERTEX_BUFFER,
            layout.size_in_bytes,
        )?;
        buffer.set_debug_name("triangle buffer");

        // Safe because the buffer has not been used by the GPU yet.
        unsafe {
            buffer.write(layout.positions_offset, &[VERTICES])?;
            for index in 0..MAX_NUM_IMAGES {
                buffer.write(
                    layout.uniform_offset(index),
                    Mat4::identity().as_slice(),
                )?;
            }
        }

        let (render_pass, descriptor_set_layout, pipeline_layout, pipeline) = unsafe {
            let render_pass =
                pipeline::create_render_pass(render_device.clone())?;
            let (descriptor_set_layout, pipeline_layout) =
                pipeline::create_layouts(render_device.clone())?;
            let pipeline = pipeline::create_pipeline(
                render_device.clone(),
                include_bytes!("./shaders/triangle.vert.spv"),
                include_bytes!("./shaders/triangle.frag.spv"),
                &pipeline_layout,
                &render_pass,
            )?;
            (render_pass, descriptor_set_layout, pipeline_layout, pipeline)
        };

        let descriptor_pool = unsafe {
            DescriptorPool::new(
                render_device.clone(),
                MAX_NUM_IMAGES as u32,
                &[vk::DescriptorPoolSize {
                    ty: vk::DescriptorType::UNIFORM_BUFFER,
                    descriptor_count: MAX_NUM_IMAGES as u32,
                }],
            )?
        };
        descriptor_pool.set_debug_name("triangle descriptor pool");
        let descriptor_sets = descriptor_pool.allocate_descriptor_sets(
            &[&descriptor_set_layout; MAX_NUM_IMAGES],
        )?;
        write_descriptor_sets(&render_device, &descriptor_sets, &buffer, &layout);

        Ok(Self {
            framebuffers: vec![],
            extent: vk::Extent2D::default(),
            descriptor_sets,
            _descriptor_pool: descriptor_pool,
            pipeline,
            pipeline_layout,
            _descriptor_set_layout: descriptor_set_layout,
            render_pass,
            buffer,
            layout,
            render_device,
        })
    }

    /// Drop every framebuffer.
    ///
    /// Must be called before the swapchain is rebuilt because the
    /// framebuffers reference the swapchain image views.
    pub fn clear_framebuffers(&mut self) {
        self.framebuffers.clear();
    }

    /// Create one framebuffer for each swapchain image.
    pub fn rebuild_framebuffers(
        &mut self,
        swapchain_frames: &SwapchainFrames,
    ) -> Result<(), GraphicsError> {
        self.framebuffers.clear();
        let extent = swapchain_frames.swapchain()?.extent();
        for index in 0..swapchain_frames.swapchain_image_count() {
            let attachments =
                [swapchain_frames.swapchain_image_view(index)?.raw()];
            let create_info = vk::FramebufferCreateInfo::default()
                .render_pass(self.render_pass.raw())
                .attachments(&attachments)
                .width(extent.width)
                .height(extent.height)
                .layers(1);
            let framebuffer = unsafe {
                Framebuffer::new(self.render_device.clone(), &create_info)?
            };
            framebuffer.set_debug_name(format!("triangle framebuffer {}", index));
            self.framebuffers.push(framebuffer);
        }
        self.extent = extent;
        Ok(())
    }

    /// Record the commands which draw the triangle into the frame's command
    /// buffer.
    ///
    /// # Params
    ///
    /// * `frame` - an acquired frame whose command buffer is recording
    /// * `rotation` - the transform applied to every vertex
    pub fn record(
        &mut self,
        frame: &Frame,
        rotation: &Mat4,
    ) -> Result<(), GraphicsError> {
        let index = frame.swapchain_image_index();
        let framebuffer = self
            .framebuffers
            .get(index)
            .ok_or(GraphicsError::FrameMissing)?;

        // Safe because the frame's fence was waited when it was acquired, so
        // no submission still reads this image's uniform slot.
        unsafe {
            self.buffer
                .write(self.layout.uniform_offset(index), rotation.as_slice())?;
        }

        let clear_values = [vk::ClearValue {
            color: vk::ClearColorValue {
                float32: CLEAR_COLOR,
            },
        }];
        let render_area = vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent: self.extent,
        };
        let render_pass_begin_info = vk::RenderPassBeginInfo::default()
            .render_pass(self.render_pass.raw())
            .framebuffer(framebuffer.raw())
            .render_area(render_area)
            .clear_values(&clear_values);
        let viewport = vk::Viewport {
            x: 0.0,
            y: 0.0,
            width: self.extent.width as f32,
            height: self.extent.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        };

        let device = self.render_device.device();
        let command_buffer = frame.command_buffer();
        unsafe {
            device.cmd_begin_render_pass(
                command_buffer,
                &render_pass_begin_info,
                vk::SubpassContents::INLINE,
            );
            device.cmd_bind_vertex_buffers(
                command_buffer,
                0,
                &[self.buffer.raw(), self.buffer.raw()],
                &[self.layout.positions_offset, self.layout.colors_offset],
            );
            device.cmd_bind_pipeline(
                command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline.raw(),
            );
            device.cmd_bind_descriptor_sets(
                command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline_layout.raw(),
                0,
                &[self.descriptor_sets[index]],
                &[],
            );
            device.cmd_set_viewport(command_buffer, 0, &[viewport]);
            device.cmd_set_scissor(command_buffer, 0, &[render_area]);
            device.cmd_draw(
                command_buffer,
                3, // vertex count
                1, // instance count
                0, // first vertex
                0, // first instance
            );
            device.cmd_end_render_pass(command_buffer);
        }
        Ok(())
    }
}

// Private API
// -----------

/// Point each descriptor set at its own uniform slot.
fn write_descriptor_sets(
    render_device: &RenderDevice,
    descriptor_sets: &[vk::DescriptorSet],
    buffer: &HostCoherentBuffer,
    layout: &BufferLayout,
) {
    let buffer_infos: Vec<[vk::DescriptorBufferInfo; 1]> = (0..descriptor_sets
        .len())
        .map(|index| {
            [vk::DescriptorBufferInfo {
                buffer: buffer.raw(),
                offset: layout.uniform_offset(index),
                range: std::mem::size_of::<Mat4>() as u64,
            }]
        })
        .collect();
    let writes: Vec<vk::WriteDescriptorSet> = descriptor_sets
        .iter()
        .zip(&buffer_infos)
        .map(|(&descriptor_set, buffer_info)| {
            vk::WriteDescriptorSet::default()
                .dst_set(descriptor_set)
                .dst_binding(0)
                .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                .buffer_info(buffer_info)
        })
        .collect();
    unsafe {
        render_device.device().update_descriptor_sets(&writes, &[]);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_slots_respect_the_offset_alignment() {
        let layout = BufferLayout::new(256);
        assert_eq!(layout.uniform_stride, 256);
        assert_eq!(layout.uniform_offset(0), 0);
        assert_eq!(layout.uniform_offset(3), 768);
        assert_eq!(layout.positions_offset, 1024);
    }

    #[test]
    fn small_alignments_pack_matrices_tightly() {
        let layout = BufferLayout::new(16);
        assert_eq!(layout.uniform_stride, 64);
        let layout = BufferLayout::new(0);
        assert_eq!(layout.uniform_stride, 64);
    }

    #[test]
    fn colors_follow_positions() {
        let layout = BufferLayout::new(64);
        assert_eq!(layout.positions_offset, 256);
        assert_eq!(layout.colors_offset, 256 + 36);
        assert_eq!(layout.size_in_bytes, 256 + 72);
    }
}
