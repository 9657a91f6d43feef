mod frame;
mod rebuild_state;

use {
    crate::graphics::{
        vulkan_api::{
            ImageView, RenderDevice, Semaphore, SemaphorePool, Swapchain,
            SwapchainParameters,
        },
        GraphicsError,
    },
    ash::vk,
    std::sync::Arc,
};

use self::rebuild_state::RebuildState;

pub use self::frame::Frame;

/// The result of acquiring a swapchain frame.
pub enum AcquiredFrame {
    /// The frame is ready for rendering commands.
    Available(Frame),

    /// The swapchain must be rebuilt before anything can be drawn.
    SwapchainNeedsRebuild,
}

/// This type owns the application's Swapchain and all resources required to
/// synchronize graphics command submissions per-frame.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> NeedsRebuild
///     NeedsRebuild --> Ready: rebuild_swapchain
///     Ready --> Recording: acquire_swapchain_frame
///     Ready --> NeedsRebuild: suboptimal / out of date
///     Recording --> Ready: present_frame
///     Recording --> NeedsRebuild: present suboptimal / out of date
///     Ready --> NeedsRebuild: invalidate_swapchain
/// ```
///
/// Each swapchain image has its own [Frame]. A frame's fence is waited
/// before its command buffer is reused, so at most one submission per image
/// is in flight and the queue is never idled between frames.
#[cfg_attr(doc, aquamarine::aquamarine)]
pub struct SwapchainFrames {
    rebuild_state: RebuildState<Semaphore>,
    frames: Vec<Option<Frame>>,
    swapchain: Option<Swapchain>,
    semaphore_pool: SemaphorePool,

    present_mode: vk::PresentModeKHR,
    opaque: bool,
    render_device: Arc<RenderDevice>,
}

// Public API
// ----------

impl SwapchainFrames {
    /// Create a new instance of the swapchain and dependent resources.
    ///
    /// The swapchain is initialized into a state where it always needs to be
    /// rebuilt right away. This means that all swapchain-dependent resources
    /// are created by the application's rebuild path.
    ///
    /// # Params
    ///
    /// * `present_mode` - used for every swapchain, must be supported by the
    ///   surface
    /// * `opaque` - present with opaque instead of premultiplied alpha
    pub fn new(
        render_device: Arc<RenderDevice>,
        present_mode: vk::PresentModeKHR,
        opaque: bool,
    ) -> Self {
        let semaphore_pool = SemaphorePool::new(render_device.clone());
        Self {
            rebuild_state: RebuildState::new(),
            frames: vec![],
            swapchain: None,
            semaphore_pool,
            present_mode,
            opaque,
            render_device,
        }
    }

    /// Get the current swapchain.
    pub fn swapchain(&self) -> Result<&Swapchain, GraphicsError> {
        self.swapchain.as_ref().ok_or(GraphicsError::SwapchainMissing)
    }

    /// Get the number of swapchain images.
    ///
    /// This can change after calls to rebuild_swapchain.
    pub fn swapchain_image_count(&self) -> usize {
        self.frames.len()
    }

    /// Get the ImageView for the swapchain image of the corresponding index.
    pub fn swapchain_image_view(
        &self,
        swapchain_image_index: usize,
    ) -> Result<&ImageView, GraphicsError> {
        let image_view = self
            .frames
            .get(swapchain_image_index)
            .and_then(Option::as_ref)
            .ok_or(GraphicsError::FrameMissing)?
            .swapchain_image_view();
        Ok(image_view)
    }

    /// Get the next swapchain image and return the relevant frame object.
    /// The frame must be returned by a call to present_frame.
    pub fn acquire_swapchain_frame(
        &mut self,
    ) -> Result<AcquiredFrame, GraphicsError> {
        if self.rebuild_state.needs_rebuild() {
            return Ok(AcquiredFrame::SwapchainNeedsRebuild);
        }

        let acquire_semaphore = self.semaphore_pool.get_semaphore()?;
        let status = unsafe {
            self.swapchain()?
                .acquire_swapchain_image(acquire_semaphore.raw())?
        };

        let Some((index, acquire_semaphore)) =
            self.rebuild_state.acquired(status, acquire_semaphore)
        else {
            return Ok(AcquiredFrame::SwapchainNeedsRebuild);
        };

        let mut current_frame = self
            .frames
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(GraphicsError::FrameMissing)?;

        if let Some(semaphore) =
            current_frame.replace_acquire_semaphore(acquire_semaphore)
        {
            semaphore.set_debug_name("scratch semaphore");
            self.semaphore_pool.return_semaphore(semaphore);
        }

        // Prepare the frame for the application's rendering commands.
        if let Err(err) = current_frame.reset_frame_commands() {
            self.frames[index] = Some(current_frame);
            return Err(err.into());
        }

        Ok(AcquiredFrame::Available(current_frame))
    }

    /// Submit frame commands and tell the swapchain to present it.
    ///
    /// A suboptimal or out-of-date present flags the swapchain for a rebuild
    /// on the next acquire.
    pub fn present_frame(
        &mut self,
        mut frame: Frame,
    ) -> Result<(), GraphicsError> {
        let index = frame.swapchain_image_index();
        let result = frame.submit_frame_commands().and_then(|_| {
            let status = unsafe {
                self.swapchain()?.present_swapchain_image(
                    index,
                    &[frame.release_semaphore().raw()],
                )?
            };
            Ok(status)
        });

        // return the frame to the set of frames
        self.frames[index] = Some(frame);

        self.rebuild_state.presented(result?);
        Ok(())
    }

    /// Force the swapchain and dependent resources to be rebuilt the next time
    /// a frame is acquired.
    pub fn invalidate_swapchain(&mut self) {
        self.rebuild_state.invalidate();
    }

    /// Waits for all frames to finish executing their graphics commands.
    pub fn wait_for_all_frames_to_complete(
        &self,
    ) -> Result<(), GraphicsError> {
        for frame in &self.frames {
            frame
                .as_ref()
                .ok_or(GraphicsError::FrameMissing)?
                .wait_for_graphics_commands_to_complete()?;
        }
        Ok(())
    }

    /// Rebuild the Swapchain and all per-frame synchronization resources.
    ///
    /// Resources which reference swapchain images, like framebuffers, must
    /// be dropped by the caller before calling this method.
    ///
    /// # Params
    ///
    /// * `buffer_size` - the size of the window's buffer in pixels
    pub fn rebuild_swapchain(
        &mut self,
        buffer_size: (u32, u32),
    ) -> Result<(), GraphicsError> {
        self.wait_for_all_frames_to_complete()?;
        if self.rebuild_state.has_retired_semaphores() {
            self.render_device.wait_idle()?;
            drop(self.rebuild_state.release_retired_semaphores());
        }

        // The number of swapchain images and their format can change, so all
        // per-frame resources are rebuilt.
        self.frames.clear();
        self.swapchain = None;

        let swapchain = Swapchain::new(
            self.render_device.clone(),
            SwapchainParameters {
                buffer_size,
                present_mode: self.present_mode,
                opaque: self.opaque,
            },
        )?;

        for index in 0..swapchain.images().len() {
            let frame = Frame::new(
                &self.render_device,
                &mut self.semaphore_pool,
                index,
                &swapchain,
            )?;
            self.frames.push(Some(frame));
        }
        self.swapchain = Some(swapchain);

        self.rebuild_state.rebuilt();
        Ok(())
    }
}

impl Drop for SwapchainFrames {
    fn drop(&mut self) {
        if let Err(err) = self.render_device.wait_idle() {
            log::error!("{}", err);
        }
    }
}
