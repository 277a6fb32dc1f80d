use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A required element was not found for the given selector.
    MissingElement(String),
    /// A DOM call rejected (class list, attribute, style, observer...).
    Dom(String),
    /// Local storage is unavailable or rejected a read/write.
    Storage(String),
    /// Adapter, device or surface creation failed.
    Gpu(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageError::MissingElement(selector) => write!(f, "missing element: {}", selector),
            PageError::Dom(msg) => write!(f, "DOM error: {}", msg),
            PageError::Storage(msg) => write!(f, "storage error: {}", msg),
            PageError::Gpu(msg) => write!(f, "GPU error: {}", msg),
        }
    }
}

impl Error for PageError {}

impl From<wgpu::CreateSurfaceError> for PageError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        PageError::Gpu(format!("surface: {}", err))
    }
}

impl From<wgpu::RequestAdapterError> for PageError {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        PageError::Gpu(format!("adapter: {}", err))
    }
}

impl From<wgpu::RequestDeviceError> for PageError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        PageError::Gpu(format!("device: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
