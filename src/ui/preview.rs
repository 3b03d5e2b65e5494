/// Scoped preview handle for the selected image
///
/// The slot holds at most one decoded-on-demand iced image handle. Every
/// acquisition gets a fresh id; a handle is released exactly once, either
/// when it is replaced, when the slot is cleared, or when the slot drops.
use iced::widget::image::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewId(u64);

#[derive(Debug)]
struct Preview {
    id: PreviewId,
    handle: Handle,
}

#[derive(Debug, Default)]
pub struct PreviewSlot {
    current: Option<Preview>,
    next_id: u64,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a handle for `bytes`, releasing the previous one first
    pub fn acquire(&mut self, bytes: Vec<u8>) -> PreviewId {
        self.release();

        self.next_id += 1;
        let id = PreviewId(self.next_id);
        self.current = Some(Preview {
            id,
            handle: Handle::from_bytes(bytes),
        });

        log::debug!("Acquired preview {:?}", id);
        id
    }

    /// Release the held handle. Returns the released id, or None if the slot
    /// was already empty.
    pub fn release(&mut self) -> Option<PreviewId> {
        let released = self.current.take().map(|preview| preview.id);
        if let Some(id) = released {
            log::debug!("Released preview {:?}", id);
        }
        released
    }

    pub fn handle(&self) -> Option<&Handle> {
        self.current.as_ref().map(|preview| &preview.handle)
    }

    #[cfg(test)]
    pub fn current_id(&self) -> Option<PreviewId> {
        self.current.as_ref().map(|preview| preview.id)
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.release();
    }
}
