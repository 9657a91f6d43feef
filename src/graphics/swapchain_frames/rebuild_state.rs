use crate::graphics::vulkan_api::SwapchainStatus;

/// Tracks when the swapchain must be rebuilt and which acquire semaphores
/// can only be released once the device is idle.
///
/// Generic over the semaphore type so the bookkeeping does not depend on a
/// live device.
#[derive(Debug)]
pub(super) struct RebuildState<S> {
    needs_rebuild: bool,

    // Semaphores handed to an acquire which then reported the swapchain as
    // stale. They may still be signalled.
    retired_semaphores: Vec<S>,
}

impl<S> RebuildState<S> {
    /// A new state always starts out needing a rebuild.
    pub fn new() -> Self {
        Self {
            needs_rebuild: true,
            retired_semaphores: vec![],
        }
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn invalidate(&mut self) {
        self.needs_rebuild = true;
    }

    /// Record the outcome of an acquire.
    ///
    /// Returns the image index and the semaphore when an image was acquired.
    /// Otherwise the semaphore is retired and a rebuild is flagged.
    pub fn acquired(
        &mut self,
        status: SwapchainStatus,
        semaphore: S,
    ) -> Option<(usize, S)> {
        match status {
            SwapchainStatus::Index(index) => Some((index, semaphore)),
            SwapchainStatus::NeedsRebuild => {
                self.retired_semaphores.push(semaphore);
                self.needs_rebuild = true;
                None
            }
        }
    }

    /// Record the outcome of a present.
    pub fn presented(&mut self, status: SwapchainStatus) {
        if status == SwapchainStatus::NeedsRebuild {
            self.needs_rebuild = true;
        }
    }

    /// True when the device must idle before the retired semaphores can be
    /// released.
    pub fn has_retired_semaphores(&self) -> bool {
        !self.retired_semaphores.is_empty()
    }

    /// Hand back every retired semaphore.
    ///
    /// Only call this after the device has gone idle.
    pub fn release_retired_semaphores(&mut self) -> Vec<S> {
        std::mem::take(&mut self.retired_semaphores)
    }

    /// Clear the rebuild flag once a new swapchain exists.
    pub fn rebuilt(&mut self) {
        self.needs_rebuild = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ready() -> RebuildState<&'static str> {
        let mut state = RebuildState::new();
        state.rebuilt();
        state
    }

    #[test]
    fn new_state_needs_a_rebuild() {
        let state = RebuildState::<u32>::new();
        assert!(state.needs_rebuild());
        assert!(!state.has_retired_semaphores());
    }

    #[test]
    fn acquired_images_keep_their_semaphore() {
        let mut state = ready();
        assert_eq!(
            state.acquired(SwapchainStatus::Index(1), "first"),
            Some((1, "first"))
        );
        assert!(!state.needs_rebuild());
        assert!(!state.has_retired_semaphores());
    }

    #[test]
    fn stale_acquire_retires_the_semaphore_and_forces_a_rebuild() {
        let mut state = ready();
        assert_eq!(state.acquired(SwapchainStatus::NeedsRebuild, "stale"), None);
        assert!(state.needs_rebuild());
        assert!(state.has_retired_semaphores());
    }

    #[test]
    fn suboptimal_present_forces_a_rebuild_on_the_next_acquire() {
        let mut state = ready();
        state.presented(SwapchainStatus::Index(0));
        assert!(!state.needs_rebuild());

        state.presented(SwapchainStatus::NeedsRebuild);
        assert!(state.needs_rebuild());
    }

    #[test]
    fn retired_semaphores_are_released_on_rebuild() {
        let mut state = ready();
        state.acquired(SwapchainStatus::NeedsRebuild, "a");
        state.rebuilt();
        state.acquired(SwapchainStatus::NeedsRebuild, "b");

        assert_eq!(state.release_retired_semaphores(), vec!["a", "b"]);
        assert!(!state.has_retired_semaphores());
        assert!(state.release_retired_semaphores().is_empty());

        state.rebuilt();
        assert!(!state.needs_rebuild());
    }

    #[test]
    fn invalidate_forces_a_rebuild() {
        let mut state = ready();
        state.invalidate();
        assert!(state.needs_rebuild());
    }
}
