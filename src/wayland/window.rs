use {
    super::{
        geometry::{compute_buffer_geometry, quarter_turns, Geometry},
        EnteredOutputs, Globals, Outputs, WaylandError, WaylandState,
    },
    crate::config::Config,
    log::{debug, info},
    std::ffi::c_void,
    wayland_client::{
        protocol::{
            wl_output::Transform,
            wl_seat::WlSeat,
            wl_surface::{self, WlSurface},
        },
        Connection, Dispatch, Proxy, QueueHandle,
    },
    wayland_protocols::{
        wp::{
            fractional_scale::v1::client::wp_fractional_scale_v1::{
                self, WpFractionalScaleV1,
            },
            tearing_control::v1::client::wp_tearing_control_v1::{
                PresentationHint, WpTearingControlV1,
            },
            viewporter::client::wp_viewport::WpViewport,
        },
        xdg::shell::client::{
            xdg_surface::{self, XdgSurface},
            xdg_toplevel::{self, XdgToplevel},
        },
    },
};

/// The size used until the compositor suggests one.
pub const DEFAULT_WINDOW_SIZE: Geometry = Geometry::new(250, 250);

/// Fractional scales are sent in 120ths.
const FRACTIONAL_SCALE_DENOMINATOR: f64 = 120.0;

const TITLE: &str = "wayland-triangle";
const APP_ID: &str = "org.freedesktop.wayland-triangle";

/// The toplevel window and the protocol objects attached to its surface.
pub struct Window {
    surface: Option<WlSurface>,
    xdg_surface: Option<XdgSurface>,
    toplevel: Option<XdgToplevel>,
    viewport: Option<WpViewport>,
    fractional_scale: Option<WpFractionalScaleV1>,
    tearing_control: Option<WpTearingControlV1>,

    entered_outputs: EnteredOutputs,

    // Last size of a floating window, restored when leaving fullscreen.
    window_size: Geometry,
    logical_size: Geometry,
    buffer_size: Geometry,
    buffer_scale: i32,
    buffer_transform: Transform,
    preferred_fractional_scale: Option<f64>,

    fullscreen: bool,
    maximized: bool,
    fixed_ratio: bool,
    tearing_requested: bool,
    tearing_enabled: bool,

    wait_for_configure: bool,
    last_configure_serial: Option<u32>,
    needs_buffer_geometry_update: bool,
}

// Public API
// ----------

impl Window {
    pub fn new(config: &Config) -> Self {
        Self {
            surface: None,
            xdg_surface: None,
            toplevel: None,
            viewport: None,
            fractional_scale: None,
            tearing_control: None,
            entered_outputs: EnteredOutputs::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            logical_size: Geometry::default(),
            buffer_size: DEFAULT_WINDOW_SIZE,
            buffer_scale: 1,
            buffer_transform: Transform::Normal,
            preferred_fractional_scale: None,
            fullscreen: config.fullscreen,
            maximized: config.maximized,
            fixed_ratio: config.fixed_ratio,
            tearing_requested: config.tearing,
            tearing_enabled: false,
            wait_for_configure: false,
            last_configure_serial: None,
            needs_buffer_geometry_update: false,
        }
    }

    /// Create the surface and toplevel roles, then commit without a buffer
    /// to ask the compositor for the first configure.
    pub fn create_surface(
        &mut self,
        globals: &Globals,
        qh: &QueueHandle<WaylandState>,
    ) -> Result<(), WaylandError> {
        let compositor = globals
            .compositor
            .as_ref()
            .ok_or(WaylandError::MissingGlobal("wl_compositor"))?;
        let wm_base = globals
            .wm_base
            .as_ref()
            .ok_or(WaylandError::MissingGlobal("xdg_wm_base"))?;

        let surface = compositor.create_surface(qh, ());

        if let (Some(manager), true) =
            (&globals.tearing_manager, self.tearing_requested)
        {
            self.tearing_control =
                Some(manager.get_tearing_control(&surface, qh, ()));
            self.set_tearing(true);
        }

        let xdg_surface = wm_base.get_xdg_surface(&surface, qh, ());
        let toplevel = xdg_surface.get_toplevel(qh, ());
        toplevel.set_title(TITLE.to_owned());
        toplevel.set_app_id(APP_ID.to_owned());
        if self.fullscreen {
            toplevel.set_fullscreen(None);
        } else if self.maximized {
            toplevel.set_maximized();
        }

        if let (Some(viewporter), Some(manager)) =
            (&globals.viewporter, &globals.fractional_scale_manager)
        {
            self.viewport = Some(viewporter.get_viewport(&surface, qh, ()));
            self.fractional_scale =
                Some(manager.get_fractional_scale(&surface, qh, ()));
        }

        self.start_waiting_for_configure();
        surface.commit();

        self.surface = Some(surface);
        self.xdg_surface = Some(xdg_surface);
        self.toplevel = Some(toplevel);
        Ok(())
    }

    /// True until the first xdg_surface configure has been acknowledged.
    pub fn is_waiting_for_configure(&self) -> bool {
        self.wait_for_configure
    }

    /// The serial of the most recently acknowledged configure.
    pub fn last_configure_serial(&self) -> Option<u32> {
        self.last_configure_serial
    }

    pub fn needs_buffer_geometry_update(&self) -> bool {
        self.needs_buffer_geometry_update
    }

    pub fn request_buffer_geometry_update(&mut self) {
        self.needs_buffer_geometry_update = true;
    }

    /// Recompute the buffer geometry from the current logical size and
    /// outputs, and tell the compositor about anything that changed.
    pub fn update_buffer_geometry(&mut self, outputs: &Outputs) {
        let transform = self
            .entered_outputs
            .buffer_transform(|name| outputs.info(name));
        if transform != self.buffer_transform {
            self.buffer_transform = transform;
            if let Some(surface) = &self.surface {
                surface.set_buffer_transform(transform);
            }
        }

        let output_scale =
            self.entered_outputs.buffer_scale(|name| outputs.info(name));
        let geometry = compute_buffer_geometry(
            self.logical_size,
            self.buffer_transform,
            output_scale,
            self.preferred_fractional_scale,
            self.fullscreen && self.fixed_ratio,
        );

        if geometry.scale != self.buffer_scale {
            self.buffer_scale = geometry.scale;
            if let Some(surface) = &self.surface {
                surface.set_buffer_scale(geometry.scale);
            }
        }
        self.buffer_size = geometry.size;

        if let (Some(viewport), Some(destination)) =
            (&self.viewport, geometry.viewport_destination)
        {
            viewport.set_destination(destination.width, destination.height);
        }

        debug!(
            "Buffer geometry: {:?} at scale {} ({:?})",
            self.buffer_size, self.buffer_scale, self.buffer_transform
        );
        self.needs_buffer_geometry_update = false;
    }

    /// The size, in pixels, that swapchain images should have.
    pub fn buffer_size(&self) -> Geometry {
        self.buffer_size
    }

    /// The quarter turns rendering must compensate for.
    pub fn buffer_quarter_turns(&self) -> u32 {
        quarter_turns(self.buffer_transform)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Ask the compositor to enter or leave fullscreen.
    pub fn toggle_fullscreen(&mut self) {
        let Some(toplevel) = &self.toplevel else {
            return;
        };
        if self.fullscreen {
            toplevel.unset_fullscreen();
        } else {
            toplevel.set_fullscreen(None);
        }
    }

    /// Start an interactive move.
    pub fn start_move(&self, seat: &WlSeat, serial: u32) {
        if let Some(toplevel) = &self.toplevel {
            toplevel._move(seat, serial);
        }
    }

    /// Send the presentation hint. Does nothing without tearing control.
    pub fn set_tearing(&mut self, enable: bool) {
        let Some(tearing_control) = &self.tearing_control else {
            return;
        };
        let hint = if enable {
            PresentationHint::Async
        } else {
            PresentationHint::Vsync
        };
        tearing_control.set_presentation_hint(hint);
        self.tearing_enabled = enable;
        info!("Tearing {}", if enable { "enabled" } else { "disabled" });
    }

    pub fn toggle_tearing(&mut self) {
        self.set_tearing(!self.tearing_enabled);
    }

    /// The raw `wl_surface` pointer used to create the Vulkan surface.
    pub fn raw_surface(&self) -> Result<*mut c_void, WaylandError> {
        self.surface
            .as_ref()
            .map(|surface| surface.id().as_ptr().cast())
            .ok_or(WaylandError::SurfaceNotCreated)
    }

    /// Destroy every protocol object, children before parents.
    pub fn destroy(&mut self) {
        if let Some(tearing_control) = self.tearing_control.take() {
            tearing_control.destroy();
        }
        if let Some(fractional_scale) = self.fractional_scale.take() {
            fractional_scale.destroy();
        }
        if let Some(viewport) = self.viewport.take() {
            viewport.destroy();
        }
        if let Some(toplevel) = self.toplevel.take() {
            toplevel.destroy();
        }
        if let Some(xdg_surface) = self.xdg_surface.take() {
            xdg_surface.destroy();
        }
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
    }
}

// Private API
// -----------

impl Window {
    fn start_waiting_for_configure(&mut self) {
        self.wait_for_configure = true;
        self.last_configure_serial = None;
    }

    /// Record an acknowledged xdg_surface configure.
    fn configure_acked(&mut self, serial: u32) {
        self.last_configure_serial = Some(serial);
        self.wait_for_configure = false;
    }

    fn is_surface(&self, surface: &WlSurface) -> bool {
        self.surface.as_ref() == Some(surface)
    }

    fn configure_toplevel(&mut self, suggested: Geometry, states: &[u8]) {
        let (fullscreen, maximized) = parse_toplevel_states(states);
        self.fullscreen = fullscreen;
        self.maximized = maximized;

        let floating = !fullscreen && !maximized;
        if suggested.is_valid() {
            if floating {
                self.window_size = suggested;
            }
            self.logical_size = suggested;
        } else if floating {
            self.logical_size = self.window_size;
        }
        self.needs_buffer_geometry_update = true;
    }

    fn set_preferred_scale(&mut self, wire_scale: u32) {
        self.preferred_fractional_scale =
            Some(wire_scale as f64 / FRACTIONAL_SCALE_DENOMINATOR);
        self.needs_buffer_geometry_update = true;
    }

    pub(super) fn enter_output(&mut self, global_name: u32) {
        if self.entered_outputs.enter(global_name) {
            self.needs_buffer_geometry_update = true;
        }
    }

    pub(super) fn leave_output(&mut self, global_name: u32) {
        if self.entered_outputs.leave(global_name) {
            self.needs_buffer_geometry_update = true;
        }
    }
}

/// Decode the fullscreen and maximized flags from the configure states
/// array.
fn parse_toplevel_states(states: &[u8]) -> (bool, bool) {
    let mut fullscreen = false;
    let mut maximized = false;
    let decoded = states
        .chunks_exact(4)
        .filter_map(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(u32::from_ne_bytes)
        .filter_map(|raw| xdg_toplevel::State::try_from(raw).ok());
    for state in decoded {
        match state {
            xdg_toplevel::State::Fullscreen => fullscreen = true,
            xdg_toplevel::State::Maximized => maximized = true,
            _ => {}
        }
    }
    (fullscreen, maximized)
}

impl Dispatch<WlSurface, ()> for WaylandState {
    fn event(
        state: &mut Self,
        surface: &WlSurface,
        event: wl_surface::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if !state.window.is_surface(surface) {
            return;
        }
        match event {
            wl_surface::Event::Enter { output } => {
                if let Some(name) = state.outputs.global_name_of(&output) {
                    state.window.enter_output(name);
                }
            }
            wl_surface::Event::Leave { output } => {
                if let Some(name) = state.outputs.global_name_of(&output) {
                    state.window.leave_output(name);
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<XdgSurface, ()> for WaylandState {
    fn event(
        state: &mut Self,
        xdg_surface: &XdgSurface,
        event: xdg_surface::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let xdg_surface::Event::Configure { serial } = event {
            xdg_surface.ack_configure(serial);
            state.window.configure_acked(serial);
        }
    }
}

impl Dispatch<XdgToplevel, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _toplevel: &XdgToplevel,
        event: xdg_toplevel::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            xdg_toplevel::Event::Configure {
                width,
                height,
                states,
            } => {
                state
                    .window
                    .configure_toplevel(Geometry::new(width, height), &states);
            }
            xdg_toplevel::Event::Close => {
                info!("The compositor asked the window to close");
                state.stop();
            }
            _ => {}
        }
    }
}

impl Dispatch<WpFractionalScaleV1, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _proxy: &WpFractionalScaleV1,
        event: wp_fractional_scale_v1::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let wp_fractional_scale_v1::Event::PreferredScale { scale } = event
        {
            state.window.set_preferred_scale(scale);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn states(values: &[xdg_toplevel::State]) -> Vec<u8> {
        values
            .iter()
            .flat_map(|&state| u32::from(state).to_ne_bytes())
            .collect()
    }

    fn window(config: Config) -> Window {
        Window::new(&config)
    }

    #[test]
    fn new_windows_use_the_default_size() {
        let window = window(Config::default());
        assert_eq!(window.buffer_size(), DEFAULT_WINDOW_SIZE);
        assert!(!window.needs_buffer_geometry_update());
        assert!(!window.is_waiting_for_configure());
    }

    #[test]
    fn rendering_waits_for_the_first_configure() {
        let mut window = window(Config::default());
        window.start_waiting_for_configure();
        assert!(window.is_waiting_for_configure());
        assert_eq!(window.last_configure_serial(), None);

        window.configure_acked(17);
        assert!(!window.is_waiting_for_configure());
        assert_eq!(window.last_configure_serial(), Some(17));

        window.configure_acked(18);
        assert!(!window.is_waiting_for_configure());
        assert_eq!(window.last_configure_serial(), Some(18));
    }

    #[test]
    fn states_are_decoded() {
        use xdg_toplevel::State;
        assert_eq!(parse_toplevel_states(&[]), (false, false));
        let activated = states(&[State::Activated, State::Fullscreen]);
        assert_eq!(parse_toplevel_states(&activated), (true, false));
        assert_eq!(
            parse_toplevel_states(&states(&[State::Maximized])),
            (false, true)
        );
    }

    #[test]
    fn unknown_and_truncated_states_are_ignored() {
        let mut raw = 9999u32.to_ne_bytes().to_vec();
        raw.extend_from_slice(&[2, 0]);
        assert_eq!(parse_toplevel_states(&raw), (false, false));
    }

    #[test]
    fn suggested_sizes_are_remembered_while_floating() {
        let mut window = window(Config::default());
        window.configure_toplevel(Geometry::new(640, 480), &[]);
        assert_eq!(window.logical_size, Geometry::new(640, 480));
        assert_eq!(window.window_size, Geometry::new(640, 480));
        assert!(window.needs_buffer_geometry_update());
    }

    #[test]
    fn zero_size_configures_restore_the_floating_size() {
        let mut window = window(Config::default());
        window.configure_toplevel(Geometry::new(0, 0), &[]);
        assert_eq!(window.logical_size, DEFAULT_WINDOW_SIZE);

        window.configure_toplevel(Geometry::new(800, 600), &[]);
        window.configure_toplevel(
            Geometry::new(1920, 1080),
            &states(&[xdg_toplevel::State::Fullscreen]),
        );
        assert!(window.is_fullscreen());
        assert_eq!(window.logical_size, Geometry::new(1920, 1080));
        assert_eq!(window.window_size, Geometry::new(800, 600));

        window.configure_toplevel(Geometry::new(0, 0), &[]);
        assert!(!window.is_fullscreen());
        assert_eq!(window.logical_size, Geometry::new(800, 600));
    }

    #[test]
    fn geometry_follows_outputs_and_fractional_scale() {
        let mut window = window(Config::default());
        let outputs = Outputs::default();
        window.configure_toplevel(Geometry::new(300, 200), &[]);
        window.update_buffer_geometry(&outputs);
        assert_eq!(window.buffer_size(), Geometry::new(300, 200));
        assert!(!window.needs_buffer_geometry_update());

        window.set_preferred_scale(180);
        assert!(window.needs_buffer_geometry_update());
        window.update_buffer_geometry(&outputs);
        assert_eq!(window.buffer_size(), Geometry::new(450, 300));
    }

    #[test]
    fn fixed_ratio_only_applies_in_fullscreen() {
        let mut window = window(Config {
            fixed_ratio: true,
            ..Config::default()
        });
        let outputs = Outputs::default();
        window.configure_toplevel(Geometry::new(300, 200), &[]);
        window.update_buffer_geometry(&outputs);
        assert_eq!(window.buffer_size(), Geometry::new(300, 200));

        window.configure_toplevel(
            Geometry::new(300, 200),
            &states(&[xdg_toplevel::State::Fullscreen]),
        );
        window.update_buffer_geometry(&outputs);
        assert_eq!(window.buffer_size(), Geometry::new(200, 200));
    }

    #[test]
    fn leaving_an_unknown_output_is_not_a_change() {
        let mut window = window(Config::default());
        window.leave_output(3);
        assert!(!window.needs_buffer_geometry_update());
        window.enter_output(3);
        assert!(window.needs_buffer_geometry_update());
    }

    #[test]
    fn tearing_needs_the_protocol() {
        let mut window = window(Config {
            tearing: true,
            ..Config::default()
        });
        window.toggle_tearing();
        assert!(!window.tearing_enabled);
    }

    #[test]
    fn raw_surface_requires_a_surface() {
        let window = window(Config::default());
        assert!(matches!(
            window.raw_surface(),
            Err(WaylandError::SurfaceNotCreated)
        ));
    }
}
