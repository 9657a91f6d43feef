use {crate::graphics::vulkan_api::VulkanError, thiserror::Error};

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error(transparent)]
    VulkanError(#[from] VulkanError),

    #[error(
        "Unable to acquire Frame resources! Did you forget to return a Frame?"
    )]
    FrameMissing,

    #[error("The swapchain has not been built yet")]
    SwapchainMissing,

    #[error("Frame {} has no acquire semaphore, it was never acquired", .0)]
    FrameNotAcquired(usize),
}
