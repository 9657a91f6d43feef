use ash::vk;

/// A Vulkan device queue.
#[derive(Debug, Copy, Clone)]
pub struct Queue {
    family_index: u32,
    index: u32,
    queue: vk::Queue,
}

// Public API
// ----------

impl Queue {
    /// The queue family index for this queue.
    pub fn family_index(&self) -> u32 {
        self.family_index
    }

    /// The raw queue handle.
    pub fn raw(&self) -> vk::Queue {
        self.queue
    }
}

impl std::fmt::Display for Queue {
    fn fmt(&self, format: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format.write_fmt(format_args!(
            "Queue {}:{}",
            self.family_index, self.index,
        ))
    }
}

// Private API
// -----------

impl Queue {
    pub(super) fn new(device: &ash::Device, family_index: u32, index: u32) -> Self {
        let queue = unsafe { device.get_device_queue(family_index, index) };
        Self {
            family_index,
            index,
            queue,
        }
    }
}
