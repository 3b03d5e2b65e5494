/// User interface components
///
/// - `selector.rs` - image selection, drag-and-drop, preview
/// - `preview.rs` - scoped preview handle
/// - `result.rs` - classification result renderer
/// - `confidence_bar.rs` - canvas bar used by the renderer
/// - `status.rs` - busy panel, error banner, service indicator

pub mod confidence_bar;
pub mod preview;
pub mod result;
pub mod selector;
pub mod status;
