/// Global Tokio runtime for async HTTP operations
///
/// eframe drives the UI from its own event loop, but reqwest requires a tokio
/// runtime. Background tasks are spawned here, write their results into the
/// shared state and ask egui for a repaint.
///
/// ```rust,ignore
/// use terminal::utils::runtime::TOKIO_RT;
///
/// TOKIO_RT.spawn(async move {
///     let result = some_async_operation().await;
///     state.write().apply(result);
///     ctx.request_repaint();
/// });
/// ```
use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

pub static TOKIO_RT: Lazy<Runtime> = Lazy::new(|| {
    Runtime::new().expect("Failed to create Tokio runtime for async HTTP operations")
});
