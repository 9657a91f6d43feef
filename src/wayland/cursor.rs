use {
    super::{WaylandError, WaylandState},
    log::warn,
    wayland_client::{
        protocol::{
            wl_buffer::WlBuffer, wl_compositor::WlCompositor,
            wl_pointer::WlPointer, wl_shm::WlShm, wl_surface::WlSurface,
        },
        Connection, Dispatch, QueueHandle,
    },
    wayland_cursor::CursorTheme,
};

/// The default theme cursor shown over the window.
const CURSOR_NAME: &str = "left_ptr";

/// Cursor size in pixels.
const CURSOR_SIZE: u32 = 32;

/// User data for the cursor surface. Keeps its events apart from the
/// window surface's.
pub struct CursorSurface;

/// The cursor theme and the surface used to display it.
pub struct Cursor {
    theme: CursorTheme,
    surface: Option<WlSurface>,
}

impl Cursor {
    /// Load the default cursor theme.
    pub fn load(conn: &Connection, shm: WlShm) -> Result<Self, WaylandError> {
        let mut theme = CursorTheme::load(conn, shm, CURSOR_SIZE)
            .map_err(WaylandError::UnableToLoadCursorTheme)?;
        if theme.get_cursor(CURSOR_NAME).is_none() {
            warn!("The cursor theme has no '{}' cursor", CURSOR_NAME);
        }
        Ok(Self {
            theme,
            surface: None,
        })
    }

    /// Create the surface the cursor image is attached to.
    pub fn create_surface(
        &mut self,
        compositor: &WlCompositor,
        qh: &QueueHandle<WaylandState>,
    ) {
        if self.surface.is_none() {
            self.surface = Some(compositor.create_surface(qh, CursorSurface));
        }
    }

    /// Show the themed cursor for the pointer.
    pub fn show(&mut self, pointer: &WlPointer, serial: u32) {
        let Some(surface) = &self.surface else {
            return;
        };
        let Some(cursor) = self.theme.get_cursor(CURSOR_NAME) else {
            return;
        };
        let image = &cursor[0];
        let (width, height) = image.dimensions();
        let (hotspot_x, hotspot_y) = image.hotspot();
        let buffer: &WlBuffer = image;

        surface.attach(Some(buffer), 0, 0);
        surface.damage(0, 0, width as i32, height as i32);
        surface.commit();
        pointer.set_cursor(
            serial,
            Some(surface),
            hotspot_x as i32,
            hotspot_y as i32,
        );
    }

    /// Hide the cursor while the pointer is over the window.
    pub fn hide(pointer: &WlPointer, serial: u32) {
        pointer.set_cursor(serial, None, 0, 0);
    }

    pub fn destroy(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
    }
}

impl Dispatch<WlSurface, CursorSurface> for WaylandState {
    fn event(
        _state: &mut Self,
        _surface: &WlSurface,
        _event: <WlSurface as wayland_client::Proxy>::Event,
        _data: &CursorSurface,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
    }
}
