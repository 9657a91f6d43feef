use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::{ffi::c_void, sync::Arc},
};

/// A Vulkan buffer backed by its own host-coherent allocation which stays
/// mapped for the buffer's whole lifetime.
pub struct HostCoherentBuffer {
    size_in_bytes: u64,
    mapped: *mut c_void,
    memory: vk::DeviceMemory,
    buffer: vk::Buffer,
    render_device: Arc<RenderDevice>,
}

// Public API
// ----------

impl HostCoherentBuffer {
    /// Create a new buffer that the host can write directly.
    pub fn new(
        render_device: Arc<RenderDevice>,
        usage: vk::BufferUsageFlags,
        size_in_bytes: u64,
    ) -> Result<Self, VulkanError> {
        let device = render_device.device();
        let create_info = vk::BufferCreateInfo::default()
            .size(size_in_bytes)
            .usage(usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);
        let buffer = unsafe {
            device
                .create_buffer(&create_info, None)
                .map_err(VulkanError::UnableToCreateBuffer)?
        };

        // The buffer is destroyed by hand on each failure path below because
        // Self does not exist yet.
        let memory = match unsafe { allocate_memory(&render_device, buffer) } {
            Ok(memory) => memory,
            Err(err) => {
                unsafe { device.destroy_buffer(buffer, None) };
                return Err(err);
            }
        };
        let mapped = unsafe {
            device
                .bind_buffer_memory(buffer, memory, 0)
                .map_err(VulkanError::UnableToBindBufferMemory)
                .and_then(|_| {
                    device
                        .map_memory(
                            memory,
                            0,
                            vk::WHOLE_SIZE,
                            vk::MemoryMapFlags::empty(),
                        )
                        .map_err(VulkanError::UnableToMapMemory)
                })
        };
        let mapped = match mapped {
            Ok(mapped) => mapped,
            Err(err) => {
                unsafe {
                    device.destroy_buffer(buffer, None);
                    device.free_memory(memory, None);
                }
                return Err(err);
            }
        };

        Ok(Self {
            size_in_bytes,
            mapped,
            memory,
            buffer,
            render_device,
        })
    }

    /// Copy data into the buffer at the given byte offset.
    ///
    /// Writes which would run past the end of the buffer are rejected.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the caller must ensure the GPU is not reading the written range
    pub unsafe fn write<T: Copy>(
        &mut self,
        offset_in_bytes: u64,
        data: &[T],
    ) -> Result<(), VulkanError> {
        let len = std::mem::size_of_val(data) as u64;
        check_write_range(offset_in_bytes, len, self.size_in_bytes)?;
        let dst = (self.mapped as *mut u8).add(offset_in_bytes as usize);
        std::ptr::copy_nonoverlapping(
            data.as_ptr() as *const u8,
            dst,
            len as usize,
        );
        Ok(())
    }

    pub fn set_debug_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.render_device
            .set_debug_name(self.memory, format!("{} memory", name));
        self.render_device.set_debug_name(self.buffer, name);
    }

    /// The size of the buffer in bytes.
    pub fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    /// Get the raw Vulkan buffer handle.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer
    }
}

impl Drop for HostCoherentBuffer {
    fn drop(&mut self) {
        unsafe {
            let device = self.render_device.device();
            device.unmap_memory(self.memory);
            device.destroy_buffer(self.buffer, None);
            device.free_memory(self.memory, None);
        }
    }
}

impl std::fmt::Debug for HostCoherentBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCoherentBuffer")
            .field("buffer", &self.buffer)
            .field("memory", &self.memory)
            .field("size_in_bytes", &self.size_in_bytes)
            .finish()
    }
}

// Private API
// -----------

fn check_write_range(
    offset_in_bytes: u64,
    len: u64,
    size_in_bytes: u64,
) -> Result<(), VulkanError> {
    let fits = offset_in_bytes
        .checked_add(len)
        .is_some_and(|end| end <= size_in_bytes);
    if fits {
        Ok(())
    } else {
        Err(VulkanError::BufferWriteOutOfBounds {
            offset: offset_in_bytes,
            len,
            size: size_in_bytes,
        })
    }
}

unsafe fn allocate_memory(
    render_device: &RenderDevice,
    buffer: vk::Buffer,
) -> Result<vk::DeviceMemory, VulkanError> {
    let requirements = render_device
        .device()
        .get_buffer_memory_requirements(buffer);
    let memory_type_index = render_device.memory_type_index(
        requirements.memory_type_bits,
        vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT,
    )?;
    let allocate_info = vk::MemoryAllocateInfo::default()
        .allocation_size(requirements.size)
        .memory_type_index(memory_type_index);
    render_device
        .device()
        .allocate_memory(&allocate_info, None)
        .map_err(VulkanError::UnableToAllocateMemory)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_inside_the_buffer_are_allowed() {
        assert!(check_write_range(0, 64, 64).is_ok());
        assert!(check_write_range(32, 32, 64).is_ok());
        assert!(check_write_range(64, 0, 64).is_ok());
    }

    #[test]
    fn writes_past_the_end_are_rejected() {
        assert!(matches!(
            check_write_range(40, 32, 64),
            Err(VulkanError::BufferWriteOutOfBounds {
                offset: 40,
                len: 32,
                size: 64
            })
        ));
        assert!(check_write_range(u64::MAX, 1, 64).is_err());
    }
}
