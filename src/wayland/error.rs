use {
    thiserror::Error,
    wayland_client::{backend, ConnectError, DispatchError},
};

#[derive(Debug, Error)]
pub enum WaylandError {
    #[error("Unable to connect to the Wayland compositor")]
    UnableToConnect(#[source] ConnectError),

    #[error("Error while dispatching Wayland events")]
    UnableToDispatch(#[source] DispatchError),

    #[error("Unable to read or flush the Wayland connection")]
    ConnectionFailed(#[source] backend::WaylandError),

    #[error("The compositor does not support the required global {}", .0)]
    MissingGlobal(&'static str),

    #[error("Unable to load the cursor theme")]
    UnableToLoadCursorTheme(#[source] backend::InvalidId),

    #[error("The window surface has not been created yet")]
    SurfaceNotCreated,
}
