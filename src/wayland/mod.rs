//! The Wayland half of the client: globals, the xdg-shell toplevel, outputs
//! and input.

mod cursor;
mod display;
mod error;
mod geometry;
mod output;
mod registry;
mod seat;
mod window;

use {
    crate::config::Config,
    log::{debug, info, warn},
    std::ffi::c_void,
    wayland_client::{
        delegate_noop,
        protocol::{wl_compositor::WlCompositor, wl_shm::WlShm},
    },
    wayland_protocols::wp::{
        fractional_scale::v1::client::wp_fractional_scale_manager_v1::WpFractionalScaleManagerV1,
        tearing_control::v1::client::{
            wp_tearing_control_manager_v1::WpTearingControlManagerV1,
            wp_tearing_control_v1::WpTearingControlV1,
        },
        viewporter::client::{
            wp_viewport::WpViewport, wp_viewporter::WpViewporter,
        },
    },
};

pub use self::{
    cursor::Cursor,
    display::Display,
    error::WaylandError,
    geometry::{
        compute_buffer_geometry, is_transposed, quarter_turns, BufferGeometry,
        Geometry,
    },
    output::{EnteredOutputs, OutputInfo, Outputs},
    registry::Globals,
    seat::{button_action, key_action, Input, InputAction},
    window::{Window, DEFAULT_WINDOW_SIZE},
};

/// Everything the event handlers update.
pub struct WaylandState {
    running: bool,
    globals: Globals,
    outputs: Outputs,
    window: Window,
    input: Input,
    cursor: Option<Cursor>,
}

impl WaylandState {
    fn new(config: &Config) -> Self {
        Self {
            running: true,
            globals: Globals::default(),
            outputs: Outputs::default(),
            window: Window::new(config),
            input: Input::default(),
            cursor: None,
        }
    }

    /// Leave the main loop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Destroy the window, then every other protocol object this client
    /// created or bound.
    fn destroy(&mut self) {
        self.window.destroy();
        self.outputs.clear();
        if let Some(mut cursor) = self.cursor.take() {
            cursor.destroy();
        }
        self.input = Input::default();
        self.globals.destroy();
    }
}

delegate_noop!(WaylandState: ignore WlCompositor);
delegate_noop!(WaylandState: ignore WlShm);
delegate_noop!(WaylandState: ignore WpViewporter);
delegate_noop!(WaylandState: ignore WpViewport);
delegate_noop!(WaylandState: ignore WpTearingControlManagerV1);
delegate_noop!(WaylandState: ignore WpTearingControlV1);
delegate_noop!(WaylandState: ignore WpFractionalScaleManagerV1);

/// A connected client with a configured toplevel window.
pub struct WaylandClient {
    state: WaylandState,
    display: Display,
}

// Public API
// ----------

impl WaylandClient {
    /// Connect, bind the globals, and create the window surface.
    ///
    /// The window still needs its first configure before anything can be
    /// presented, see [Self::wait_for_configure].
    pub fn connect(config: &Config) -> Result<Self, WaylandError> {
        let mut display = Display::connect()?;
        let mut state = WaylandState::new(config);

        // The first roundtrip binds globals, the second collects the events
        // sent to the newly bound outputs.
        display.roundtrip(&mut state)?;
        display.roundtrip(&mut state)?;

        if state.globals.wm_base.is_none() {
            return Err(WaylandError::MissingGlobal("xdg_wm_base"));
        }
        if !state.globals.supports_fractional_scale() {
            info!("Fractional scaling is unavailable, using integer scales");
        }

        state
            .window
            .create_surface(&state.globals, &display.queue_handle())?;

        Ok(Self { state, display })
    }

    /// Dispatch events until the compositor sends the first configure, or
    /// the client is asked to stop.
    pub fn wait_for_configure(&mut self) -> Result<(), WaylandError> {
        while self.state.running && self.state.window.is_waiting_for_configure()
        {
            self.display.blocking_dispatch(&mut self.state)?;
        }
        if let Some(serial) = self.state.window.last_configure_serial() {
            debug!("Acked the first configure, serial {}", serial);
        }
        Ok(())
    }

    /// Create the surface used for the pointer image.
    pub fn create_cursor_surface(&mut self) {
        let qh = self.display.queue_handle();
        if let (Some(cursor), Some(compositor)) =
            (&mut self.state.cursor, &self.state.globals.compositor)
        {
            cursor.create_surface(compositor, &qh);
        }
    }

    /// Handle any events that have arrived without blocking.
    pub fn dispatch_pending(&mut self) -> Result<(), WaylandError> {
        self.display.dispatch_pending(&mut self.state)?;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    pub fn window(&self) -> &Window {
        &self.state.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.state.window
    }

    /// Recompute the window's buffer geometry from the current outputs.
    pub fn update_buffer_geometry(&mut self) {
        self.state.window.update_buffer_geometry(&self.state.outputs);
    }

    /// The libwayland display pointer for Vulkan surface creation.
    pub fn raw_display(&self) -> *mut c_void {
        self.display.raw_display()
    }

    /// The libwayland surface pointer for Vulkan surface creation.
    pub fn raw_surface(&self) -> Result<*mut c_void, WaylandError> {
        self.state.window.raw_surface()
    }
}

impl Drop for WaylandClient {
    fn drop(&mut self) {
        self.state.destroy();
        if let Err(err) = self.display.flush() {
            warn!("Unable to flush the final requests: {}", err);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn destroying_the_state_releases_everything() {
        let mut state = WaylandState::new(&Config::default());
        state.destroy();
        assert!(state.globals.is_empty());
        assert!(state.outputs.is_empty());
        assert!(state.cursor.is_none());
        assert!(state.window.raw_surface().is_err());

        // A second teardown is harmless.
        state.destroy();
        assert!(state.globals.is_empty());
    }
}
