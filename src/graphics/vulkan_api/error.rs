use {ash::vk, thiserror::Error};

#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("Unable to load the Vulkan library")]
    UnableToLoadVulkan(#[source] ash::LoadingError),

    #[error("The following extensions are required but unavailable {:?}", .0)]
    RequiredExtensionsNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan extensions")]
    UnableToListAvailableExtensions(#[source] vk::Result),

    #[error("Unable to get the available Vulkan layers")]
    UnableToListAvailableLayers(#[source] vk::Result),

    #[error("Unable to create a Vulkan instance")]
    UnableToCreateInstance(#[source] vk::Result),

    #[error("Unable to create the Vulkan debug messenger")]
    UnableToCreateDebugMessenger(#[source] vk::Result),

    #[error("Unable to create a Vulkan surface for the Wayland surface")]
    UnableToCreateSurface(#[source] vk::Result),

    #[error("Unable to enumerate physical devices")]
    UnableToEnumeratePhysicalDevices(#[source] vk::Result),

    #[error("No physical device can render and present to the window")]
    NoSuitableDeviceFound,

    #[error("Unable to create the logical device")]
    UnableToCreateLogicalDevice(#[source] vk::Result),

    #[error("Unable to query the surface for {}", .0)]
    UnableToQuerySurface(&'static str, #[source] vk::Result),

    #[error("The surface does not support the required format {:?}", .0)]
    SurfaceFormatUnsupported(vk::Format),

    #[error(
        "Present mode {:?} is not supported, the surface supports {:?}",
        .requested,
        .supported
    )]
    PresentModeUnsupported {
        requested: vk::PresentModeKHR,
        supported: Vec<vk::PresentModeKHR>,
    },

    #[error("The surface does not support composite alpha {:?}", .0)]
    CompositeAlphaUnsupported(vk::CompositeAlphaFlagsKHR),

    #[error("The swapchain has {} images but at most {} are supported", .count, .max)]
    TooManySwapchainImages { count: usize, max: usize },

    #[error("Unable to create the swapchain")]
    UnableToCreateSwapchain(#[source] vk::Result),

    #[error("Unable to get the swapchain images")]
    UnableToGetSwapchainImages(#[source] vk::Result),

    #[error("Unable to acquire the next swapchain image")]
    UnableToAcquireSwapchainImage(#[source] vk::Result),

    #[error("Unable to present the swapchain image")]
    UnableToPresentSwapchainImage(#[source] vk::Result),

    #[error("Unable to create an image view")]
    UnableToCreateImageView(#[source] vk::Result),

    #[error("Unable to create a fence")]
    UnableToCreateFence(#[source] vk::Result),

    #[error("Error while waiting for a fence")]
    UnableToWaitForFence(#[source] vk::Result),

    #[error("Unable to reset a fence")]
    UnableToResetFence(#[source] vk::Result),

    #[error("Unable to create a semaphore")]
    UnableToCreateSemaphore(#[source] vk::Result),

    #[error("Unable to create a command pool")]
    UnableToCreateCommandPool(#[source] vk::Result),

    #[error("Unable to allocate command buffers")]
    UnableToAllocateCommandBuffers(#[source] vk::Result),

    #[error("Unable to reset a command buffer")]
    UnableToResetCommandBuffer(#[source] vk::Result),

    #[error("Unable to begin a command buffer")]
    UnableToBeginCommandBuffer(#[source] vk::Result),

    #[error("Unable to end a command buffer")]
    UnableToEndCommandBuffer(#[source] vk::Result),

    #[error("Unable to submit graphics commands")]
    UnableToSubmitCommands(#[source] vk::Result),

    #[error("Unable to create a render pass")]
    UnableToCreateRenderPass(#[source] vk::Result),

    #[error("Unable to create a framebuffer")]
    UnableToCreateFramebuffer(#[source] vk::Result),

    #[error("Shader bytes are not valid SPIR-V")]
    InvalidShaderBytes(#[source] std::io::Error),

    #[error("Unable to create a shader module")]
    UnableToCreateShaderModule(#[source] vk::Result),

    #[error("Unable to create a descriptor set layout")]
    UnableToCreateDescriptorSetLayout(#[source] vk::Result),

    #[error("Unable to create a descriptor pool")]
    UnableToCreateDescriptorPool(#[source] vk::Result),

    #[error("Unable to allocate descriptor sets")]
    UnableToAllocateDescriptorSets(#[source] vk::Result),

    #[error("Unable to create a pipeline layout")]
    UnableToCreatePipelineLayout(#[source] vk::Result),

    #[error("Unable to create a graphics pipeline")]
    UnableToCreateGraphicsPipeline(#[source] vk::Result),

    #[error("Unable to create a buffer")]
    UnableToCreateBuffer(#[source] vk::Result),

    #[error("No memory type supports {:?} for type bits {:#b}", .flags, .type_bits)]
    NoCompatibleMemoryType {
        type_bits: u32,
        flags: vk::MemoryPropertyFlags,
    },

    #[error("Unable to allocate device memory")]
    UnableToAllocateMemory(#[source] vk::Result),

    #[error("Unable to bind buffer memory")]
    UnableToBindBufferMemory(#[source] vk::Result),

    #[error("Unable to map device memory")]
    UnableToMapMemory(#[source] vk::Result),

    #[error(
        "Write of {} bytes at offset {} overflows a {} byte buffer",
        .len,
        .offset,
        .size
    )]
    BufferWriteOutOfBounds { offset: u64, len: u64, size: u64 },

    #[error("Error while waiting for the device to idle")]
    UnableToWaitIdle(#[source] vk::Result),
}
