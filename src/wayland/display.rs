use {
    super::{WaylandError, WaylandState},
    std::{ffi::c_void, io::ErrorKind},
    wayland_client::{
        backend, protocol::wl_registry::WlRegistry, Connection, EventQueue,
        QueueHandle,
    },
};

/// The connection to the compositor and the queue all client objects
/// dispatch through.
pub struct Display {
    event_queue: EventQueue<WaylandState>,
    _registry: WlRegistry,
    connection: Connection,
}

impl Display {
    /// Connect to the compositor named by the environment and request the
    /// global registry.
    pub fn connect() -> Result<Self, WaylandError> {
        let connection = Connection::connect_to_env()
            .map_err(WaylandError::UnableToConnect)?;
        let event_queue = connection.new_event_queue();
        let registry = connection.display().get_registry(&event_queue.handle(), ());
        Ok(Self {
            event_queue,
            _registry: registry,
            connection,
        })
    }

    pub fn queue_handle(&self) -> QueueHandle<WaylandState> {
        self.event_queue.handle()
    }

    /// Block until the compositor has processed every request sent so far.
    pub fn roundtrip(
        &mut self,
        state: &mut WaylandState,
    ) -> Result<usize, WaylandError> {
        self.event_queue
            .roundtrip(state)
            .map_err(WaylandError::UnableToDispatch)
    }

    /// Block until at least one event has been dispatched.
    pub fn blocking_dispatch(
        &mut self,
        state: &mut WaylandState,
    ) -> Result<usize, WaylandError> {
        self.event_queue
            .blocking_dispatch(state)
            .map_err(WaylandError::UnableToDispatch)
    }

    /// Send queued requests, read whatever the socket already holds, and
    /// dispatch the resulting events. Never blocks.
    ///
    /// The presentation engine only reads the socket for FIFO presentation,
    /// so the read is done here to keep input flowing in every present mode.
    pub fn dispatch_pending(
        &mut self,
        state: &mut WaylandState,
    ) -> Result<usize, WaylandError> {
        ignore_would_block(self.event_queue.flush())?;
        if let Some(guard) = self.event_queue.prepare_read() {
            ignore_would_block(guard.read().map(|_| ()))?;
        }
        self.event_queue
            .dispatch_pending(state)
            .map_err(WaylandError::UnableToDispatch)
    }

    /// Send any queued requests to the compositor.
    pub fn flush(&self) -> Result<(), WaylandError> {
        ignore_would_block(self.event_queue.flush())
    }

    /// The libwayland `wl_display` pointer used to create Vulkan surfaces.
    ///
    /// The pointer is valid for as long as this Display lives.
    pub fn raw_display(&self) -> *mut c_void {
        self.connection.backend().display_ptr().cast()
    }
}

fn ignore_would_block(
    result: Result<(), backend::WaylandError>,
) -> Result<(), WaylandError> {
    match result {
        Err(backend::WaylandError::Io(err))
            if err.kind() == ErrorKind::WouldBlock =>
        {
            Ok(())
        }
        other => other.map_err(WaylandError::ConnectionFailed),
    }
}
