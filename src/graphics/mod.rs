mod error;
mod swapchain_frames;
mod triangle;

pub mod vulkan_api;

pub use self::{
    error::GraphicsError,
    swapchain_frames::{AcquiredFrame, Frame, SwapchainFrames},
    triangle::Triangle,
};
