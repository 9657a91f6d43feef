mod command_pool;
mod descriptor_pool;
mod descriptor_set_layout;
mod fence;
mod framebuffer;
mod host_coherent_buffer;
mod image_view;
mod pipeline;
mod pipeline_layout;
mod render_pass;
mod semaphore;
mod semaphore_pool;
mod shader_module;

pub use self::{
    command_pool::CommandPool, descriptor_pool::DescriptorPool,
    descriptor_set_layout::DescriptorSetLayout, fence::Fence,
    framebuffer::Framebuffer, host_coherent_buffer::HostCoherentBuffer,
    image_view::ImageView, pipeline::Pipeline, pipeline_layout::PipelineLayout,
    render_pass::RenderPass, semaphore::Semaphore,
    semaphore_pool::SemaphorePool, shader_module::ShaderModule,
};
