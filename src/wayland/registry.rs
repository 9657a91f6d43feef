use {
    super::{Cursor, WaylandState},
    log::{info, warn},
    wayland_client::{
        protocol::{
            wl_compositor::WlCompositor, wl_output::WlOutput,
            wl_registry::{self, WlRegistry}, wl_seat::WlSeat, wl_shm::WlShm,
        },
        Connection, Dispatch, Proxy, QueueHandle,
    },
    wayland_protocols::{
        wp::{
            fractional_scale::v1::client::wp_fractional_scale_manager_v1::WpFractionalScaleManagerV1,
            tearing_control::v1::client::wp_tearing_control_manager_v1::WpTearingControlManagerV1,
            viewporter::client::wp_viewporter::WpViewporter,
        },
        xdg::shell::client::xdg_wm_base::{self, XdgWmBase},
    },
};

/// The globals this client binds, if the compositor advertises them.
#[derive(Default)]
pub struct Globals {
    pub compositor: Option<WlCompositor>,
    pub wm_base: Option<XdgWmBase>,
    pub seat: Option<WlSeat>,
    pub shm: Option<WlShm>,
    pub tearing_manager: Option<WpTearingControlManagerV1>,
    pub viewporter: Option<WpViewporter>,
    pub fractional_scale_manager: Option<WpFractionalScaleManagerV1>,
}

impl Globals {
    /// The highest compositor version this client speaks.
    const COMPOSITOR_VERSION: u32 = 4;

    /// Output scale events arrive starting with version 2.
    const OUTPUT_VERSION: u32 = 2;

    /// True when both protocols needed for fractional scaling are bound.
    pub fn supports_fractional_scale(&self) -> bool {
        self.viewporter.is_some() && self.fractional_scale_manager.is_some()
    }

    /// True when no global is bound.
    pub fn is_empty(&self) -> bool {
        self.compositor.is_none()
            && self.wm_base.is_none()
            && self.seat.is_none()
            && self.shm.is_none()
            && self.tearing_manager.is_none()
            && self.viewporter.is_none()
            && self.fractional_scale_manager.is_none()
    }

    /// Release every bound global.
    ///
    /// Globals with a destructor request send it. The compositor, seat and
    /// shm are bound at versions without one, so they are only dropped.
    pub fn destroy(&mut self) {
        self.shm = None;
        self.seat = None;
        if let Some(wm_base) = self.wm_base.take() {
            wm_base.destroy();
        }
        self.compositor = None;
        if let Some(viewporter) = self.viewporter.take() {
            viewporter.destroy();
        }
        if let Some(manager) = self.fractional_scale_manager.take() {
            manager.destroy();
        }
        if let Some(manager) = self.tearing_manager.take() {
            manager.destroy();
        }
    }
}

impl Dispatch<WlRegistry, ()> for WaylandState {
    fn event(
        state: &mut Self,
        registry: &WlRegistry,
        event: wl_registry::Event,
        _data: &(),
        conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => {
                state.bind_global(registry, conn, qh, name, &interface, version)
            }
            wl_registry::Event::GlobalRemove { name } => {
                if state.outputs.remove(name) {
                    info!("Output {} was removed", name);
                    state.window.leave_output(name);
                }
            }
            _ => {}
        }
    }
}

impl WaylandState {
    fn bind_global(
        &mut self,
        registry: &WlRegistry,
        conn: &Connection,
        qh: &QueueHandle<Self>,
        name: u32,
        interface: &str,
        version: u32,
    ) {
        let globals = &mut self.globals;
        if interface == WlCompositor::interface().name {
            globals.compositor = Some(registry.bind(
                name,
                version.min(Globals::COMPOSITOR_VERSION),
                qh,
                (),
            ));
        } else if interface == XdgWmBase::interface().name {
            globals.wm_base = Some(registry.bind(name, 1, qh, ()));
        } else if interface == WlSeat::interface().name {
            globals.seat = Some(registry.bind(name, 1, qh, ()));
        } else if interface == WlShm::interface().name {
            let shm: WlShm = registry.bind(name, 1, qh, ());
            match Cursor::load(conn, shm.clone()) {
                Ok(cursor) => self.cursor = Some(cursor),
                Err(err) => warn!("{:#}", anyhow::Error::new(err)),
            }
            globals.shm = Some(shm);
        } else if interface == WlOutput::interface().name {
            if version >= Globals::OUTPUT_VERSION {
                let output: WlOutput =
                    registry.bind(name, Globals::OUTPUT_VERSION, qh, name);
                self.outputs.add(name, output);
            }
        } else if interface == WpTearingControlManagerV1::interface().name {
            globals.tearing_manager = Some(registry.bind(name, 1, qh, ()));
        } else if interface == WpViewporter::interface().name {
            globals.viewporter = Some(registry.bind(name, 1, qh, ()));
        } else if interface == WpFractionalScaleManagerV1::interface().name {
            globals.fractional_scale_manager =
                Some(registry.bind(name, 1, qh, ()));
        } else {
            return;
        }
        info!("Bound {} v{} (global {})", interface, version, name);
    }
}

impl Dispatch<XdgWmBase, ()> for WaylandState {
    fn event(
        _state: &mut Self,
        wm_base: &XdgWmBase,
        event: xdg_wm_base::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let xdg_wm_base::Event::Ping { serial } = event {
            wm_base.pong(serial);
        }
    }
}
