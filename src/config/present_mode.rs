use {ash::vk, std::fmt, std::str::FromStr};

/// The swapchain presentation modes which can be requested on the command
/// line.
///
/// The numeric values match `VkPresentModeKHR`, so `-p 2` and `-p fifo` both
/// select FIFO.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PresentMode {
    Immediate,
    Mailbox,
    #[default]
    Fifo,
    FifoRelaxed,
}

impl PresentMode {
    /// Every mode in numeric order.
    pub const ALL: [PresentMode; 4] = [
        PresentMode::Immediate,
        PresentMode::Mailbox,
        PresentMode::Fifo,
        PresentMode::FifoRelaxed,
    ];

    /// The Vulkan enum value for this mode.
    pub fn as_vk(self) -> vk::PresentModeKHR {
        match self {
            PresentMode::Immediate => vk::PresentModeKHR::IMMEDIATE,
            PresentMode::Mailbox => vk::PresentModeKHR::MAILBOX,
            PresentMode::Fifo => vk::PresentModeKHR::FIFO,
            PresentMode::FifoRelaxed => vk::PresentModeKHR::FIFO_RELAXED,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PresentMode::Immediate => "immediate",
            PresentMode::Mailbox => "mailbox",
            PresentMode::Fifo => "fifo",
            PresentMode::FifoRelaxed => "fifo-relaxed",
        }
    }
}

impl fmt::Display for PresentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return PresentMode::ALL.get(index).copied().ok_or_else(|| {
                format!("present mode must be in 0..=3, got {}", index)
            });
        }
        PresentMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!(
                    "unknown present mode '{}', expected 0-3 or one of \
                     immediate, mailbox, fifo, fifo-relaxed",
                    trimmed
                )
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbers_follow_the_vulkan_enum() {
        for (index, mode) in PresentMode::ALL.iter().enumerate() {
            assert_eq!(
                index.to_string().parse::<PresentMode>().unwrap(),
                *mode
            );
            assert_eq!(mode.as_vk().as_raw(), index as i32);
        }
    }

    #[test]
    fn names_are_accepted() {
        assert_eq!("mailbox".parse(), Ok(PresentMode::Mailbox));
        assert_eq!("FIFO-relaxed".parse(), Ok(PresentMode::FifoRelaxed));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!("4".parse::<PresentMode>().is_err());
        assert!("vsync".parse::<PresentMode>().is_err());
        assert!("-1".parse::<PresentMode>().is_err());
    }

    #[test]
    fn fifo_is_the_default() {
        assert_eq!(PresentMode::default(), PresentMode::Fifo);
    }
}
