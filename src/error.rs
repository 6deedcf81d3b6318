//! Error types for lightcone.
//!
//! GPU acquisition failures are fatal at startup. Configuration problems are
//! reported before any window is opened. Missing controls never abort; they
//! are logged and the affected parameter keeps its default.

use crate::controls::ControlId;

/// Errors that can occur while acquiring the rendering context.
///
/// Every variant means the render context is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// Failed to create a surface for the window.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a Vulkan/Metal/DX12/GL capable device is required")]
    NoAdapter,
    /// Failed to create the GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors raised while loading or validating a [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors reported by the control binder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// An expected control is not present in the panel.
    #[error("control element missing: {0}")]
    ElementMissing(ControlId),
}

/// Errors that can occur when running the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("render context unavailable: {0}")]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
