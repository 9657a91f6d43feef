use {
    crate::{
        config::Config,
        graphics::{
            vulkan_api::{Instance, RenderDevice},
            AcquiredFrame, SwapchainFrames, Triangle,
        },
        math::{
            angle_for_elapsed_millis, compensate_quarter_turns,
            triangle_rotation,
        },
        timing::{Benchmark, FrameClock, SwapDelay},
        wayland::WaylandClient,
    },
    anyhow::{Context, Result},
    signal_hook::consts::{SIGINT, SIGTERM},
    std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Instant,
    },
};

/// The main application state.
///
/// Fields drop in declaration order, so the Vulkan resources are destroyed
/// before the Wayland surface they present to.
pub struct Application {
    config: Config,
    benchmark: Benchmark,
    frame_clock: Option<FrameClock>,
    swap_delay: SwapDelay,
    triangle: Triangle,
    swapchain_frames: SwapchainFrames,
    render_device: Arc<RenderDevice>,
    wayland: WaylandClient,
}

// Public API
// ----------

impl Application {
    /// Connect to the compositor, wait for the window's first configure and
    /// create every Vulkan resource needed to draw.
    pub fn new(config: Config) -> Result<Self> {
        let mut wayland = WaylandClient::connect(&config)
            .context("Unable to connect to the Wayland compositor")?;
        wayland
            .wait_for_configure()
            .context("Error while waiting for the first configure")?;

        let instance = Instance::new()
            .context("Unable to create the Vulkan instance")?;
        let render_device = unsafe {
            // Safe because the wayland client outlives the render device, see
            // the field order on Application.
            Arc::new(
                RenderDevice::new(
                    instance,
                    wayland.raw_display(),
                    wayland.raw_surface()?,
                )
                .context("Unable to create the render device")?,
            )
        };
        let swapchain_frames = SwapchainFrames::new(
            render_device.clone(),
            config.present_mode.as_vk(),
            config.opaque,
        );
        let triangle = Triangle::new(render_device.clone())
            .context("Unable to create the triangle renderer")?;

        wayland.create_cursor_surface();

        Ok(Self {
            config,
            benchmark: Benchmark::new(),
            frame_clock: None,
            swap_delay: SwapDelay::new(config.swap_delay),
            triangle,
            swapchain_frames,
            render_device,
            wayland,
        })
    }

    /// Draw frames until the window closes or the process is asked to stop.
    pub fn run(mut self) -> Result<()> {
        let terminate = Arc::new(AtomicBool::new(false));
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, terminate.clone())
                .context("Unable to install the signal handler")?;
        }

        while self.wayland.is_running() && !terminate.load(Ordering::Relaxed) {
            self.wayland.dispatch_pending()?;
            self.redraw()?;
        }

        Ok(())
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        if let Err(err) = self.render_device.wait_idle() {
            log::error!("{}", err);
        }
    }
}

// Private API
// -----------

impl Application {
    fn redraw(&mut self) -> Result<()> {
        if self.wayland.window().needs_buffer_geometry_update() {
            self.wayland.update_buffer_geometry();
            self.swapchain_frames.invalidate_swapchain();
        }

        let now = Instant::now();
        if let Some(report) = self.benchmark.poll(now) {
            log::info!("{}", report);
            if self.config.toggle_tearing {
                self.wayland.window_mut().toggle_tearing();
            }
        }

        let clock = *self.frame_clock.get_or_insert(FrameClock::new(now));
        let angle = angle_for_elapsed_millis(clock.elapsed_millis(now));
        let rotation = compensate_quarter_turns(
            &triangle_rotation(angle),
            self.wayland.window().buffer_quarter_turns(),
        );

        let frame = match self.swapchain_frames.acquire_swapchain_frame()? {
            AcquiredFrame::Available(frame) => frame,
            AcquiredFrame::SwapchainNeedsRebuild => {
                return self.rebuild_swapchain_resources();
            }
        };
        self.triangle.record(&frame, &rotation)?;
        self.swapchain_frames.present_frame(frame)?;
        self.benchmark.frame_presented();

        self.swap_delay.wait();
        Ok(())
    }

    fn rebuild_swapchain_resources(&mut self) -> Result<()> {
        let buffer_size = self.wayland.window().buffer_size();
        self.swapchain_frames.wait_for_all_frames_to_complete()?;
        self.triangle.clear_framebuffers();
        self.swapchain_frames
            .rebuild_swapchain((
                buffer_size.width.max(1) as u32,
                buffer_size.height.max(1) as u32,
            ))
            .context("Unable to rebuild the swapchain")?;
        self.triangle
            .rebuild_framebuffers(&self.swapchain_frames)?;
        Ok(())
    }
}
