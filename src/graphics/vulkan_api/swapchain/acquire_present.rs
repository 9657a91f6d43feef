//! Just the logic for acquiring and presenting swapchain images.
//!
//! Suboptimal and out-of-date results both mean the swapchain no longer
//! matches the surface, so they are reported as a status rather than an
//! error.

use {
    super::Swapchain, crate::graphics::vulkan_api::VulkanError, ash::vk,
};

/// Indicates that the swapchain needs a rebuild, or that the operation
/// completed for the given image index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum SwapchainStatus {
    /// Completed the operation with the given swapchain index.
    Index(usize),

    /// Indicates that the swapchain needs to be rebuilt.
    NeedsRebuild,
}

// Public API
// ----------

impl Swapchain {
    /// Acquire the next swapchain image.
    ///
    /// # Params
    ///
    /// * `semaphore` - signalled when the swapchain image is available
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the semaphore must be unsignalled with no pending operations
    ///   - the application must rebuild the swapchain when NeedsRebuild is
    ///     returned
    pub unsafe fn acquire_swapchain_image(
        &self,
        semaphore: vk::Semaphore,
    ) -> Result<SwapchainStatus, VulkanError> {
        let result = self.render_device.swapchain_loader().acquire_next_image(
            self.swapchain,
            u64::MAX,
            semaphore,
            vk::Fence::null(),
        );
        acquire_status(result)
    }

    /// Present a swapchain image to the screen.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the image must have been acquired and transitioned to
    ///     PRESENT_SRC_KHR, typically by the render pass
    ///   - the application must rebuild the swapchain when NeedsRebuild is
    ///     returned
    pub unsafe fn present_swapchain_image(
        &self,
        index: usize,
        wait_semaphores: &[vk::Semaphore],
    ) -> Result<SwapchainStatus, VulkanError> {
        let swapchains = [self.swapchain];
        let indices = [index as u32];
        let present_info = vk::PresentInfoKHR::default()
            .wait_semaphores(wait_semaphores)
            .swapchains(&swapchains)
            .image_indices(&indices);
        let result = self.render_device.swapchain_loader().queue_present(
            self.render_device.graphics_queue().raw(),
            &present_info,
        );
        present_status(index, result)
    }
}

// Private API
// -----------

/// Map the result of vkAcquireNextImageKHR to a status.
fn acquire_status(
    result: Result<(u32, bool), vk::Result>,
) -> Result<SwapchainStatus, VulkanError> {
    match result {
        Ok((index, false)) => Ok(SwapchainStatus::Index(index as usize)),

        Ok((_, true)) => {
            log::debug!("Acquire Image: Swapchain suboptimal, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            log::debug!("Acquire Image: Swapchain lost, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(err) => Err(VulkanError::UnableToAcquireSwapchainImage(err)),
    }
}

/// Map the result of vkQueuePresentKHR to a status.
fn present_status(
    index: usize,
    result: Result<bool, vk::Result>,
) -> Result<SwapchainStatus, VulkanError> {
    match result {
        Ok(false) => Ok(SwapchainStatus::Index(index)),

        Ok(true) => {
            log::debug!(
                "Present Image: Swapchain is suboptimal and needs rebuild"
            );
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            log::debug!("Present Image: Swapchain lost, needs rebuild.");
            Ok(SwapchainStatus::NeedsRebuild)
        }

        Err(err) => Err(VulkanError::UnableToPresentSwapchainImage(err)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn acquired_images_report_their_index() {
        assert_eq!(
            acquire_status(Ok((2, false))).unwrap(),
            SwapchainStatus::Index(2)
        );
    }

    #[test]
    fn stale_acquires_need_a_rebuild() {
        assert_eq!(
            acquire_status(Ok((1, true))).unwrap(),
            SwapchainStatus::NeedsRebuild
        );
        assert_eq!(
            acquire_status(Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap(),
            SwapchainStatus::NeedsRebuild
        );
    }

    #[test]
    fn other_acquire_errors_propagate() {
        let result = acquire_status(Err(vk::Result::ERROR_DEVICE_LOST));
        assert!(matches!(
            result,
            Err(VulkanError::UnableToAcquireSwapchainImage(
                vk::Result::ERROR_DEVICE_LOST
            ))
        ));
    }

    #[test]
    fn presented_images_report_their_index() {
        assert_eq!(
            present_status(3, Ok(false)).unwrap(),
            SwapchainStatus::Index(3)
        );
    }

    #[test]
    fn stale_presents_need_a_rebuild() {
        assert_eq!(
            present_status(0, Ok(true)).unwrap(),
            SwapchainStatus::NeedsRebuild
        );
        assert_eq!(
            present_status(0, Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap(),
            SwapchainStatus::NeedsRebuild
        );
    }

    #[test]
    fn other_present_errors_propagate() {
        let result =
            present_status(1, Err(vk::Result::ERROR_SURFACE_LOST_KHR));
        assert!(matches!(
            result,
            Err(VulkanError::UnableToPresentSwapchainImage(
                vk::Result::ERROR_SURFACE_LOST_KHR
            ))
        ));
    }
}
