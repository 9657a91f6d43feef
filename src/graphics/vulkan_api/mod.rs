//! Thin, owned wrappers around the Vulkan objects this application needs.
//!
//! Every wrapper holds an `Arc<RenderDevice>` so the device always outlives
//! the objects created with it.

mod error;
mod instance;
mod raii;
mod render_device;
mod swapchain;

pub mod ffi;

pub use self::{
    error::VulkanError,
    instance::Instance,
    raii::{
        CommandPool, DescriptorPool, DescriptorSetLayout, Fence, Framebuffer,
        HostCoherentBuffer, ImageView, Pipeline, PipelineLayout, RenderPass,
        Semaphore, SemaphorePool, ShaderModule,
    },
    render_device::{Queue, RenderDevice, WindowSurface},
    swapchain::{
        Swapchain, SwapchainParameters, SwapchainStatus, IMAGE_FORMAT,
        MAX_NUM_IMAGES,
    },
};
