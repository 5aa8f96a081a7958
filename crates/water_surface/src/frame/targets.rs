//! Reflection render target cache

use super::RenderTargetAllocator;

/// Holds the reflection target once it has been allocated
///
/// The first request allocates through the host; later requests reuse the
/// same handle even if the requested size changes.
#[derive(Debug)]
pub struct ReflectionTargets<H> {
    handle: Option<H>,
    size: Option<(u32, u32)>,
}

impl<H> Default for ReflectionTargets<H> {
    fn default() -> Self {
        Self { handle: None, size: None }
    }
}

impl<H> ReflectionTargets<H> {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached target, allocating it on first use
    pub fn get_or_acquire<A>(&mut self, allocator: &mut A, size: (u32, u32)) -> &H
    where
        A: RenderTargetAllocator<Handle = H>,
    {
        if let Some(current) = self.size {
            if current != size {
                log::debug!("Reusing {}x{} reflection target for a {}x{} request", current.0, current.1, size.0, size.1);
            }
        }

        let allocated_size = &mut self.size;
        self.handle.get_or_insert_with(|| {
            log::info!("Allocating {}x{} reflection target", size.0, size.1);
            *allocated_size = Some(size);
            allocator.acquire_render_target(size.0, size.1)
        })
    }

    /// The cached target, if any
    pub fn current(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Size the cached target was allocated with
    pub fn allocated_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Give the cached target back to the caller for release
    pub fn release(&mut self) -> Option<H> {
        self.size = None;
        self.handle.take()
    }
}
