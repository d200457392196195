//! Block-copy accelerator capability.
//!
//! A block-copy engine (a 2D DMA unit on most display controllers) moves a
//! whole frame from one pixel region to another. When no engine is present
//! surfaces fall back to a linear memory copy with identical results.

use crate::pixel::Pixel;

/// Hardware block-copy engine.
///
/// Both regions stay borrowed until [`wait_for_completion`] returns, so an
/// implementation may keep their addresses for the duration of the transfer.
///
/// [`wait_for_completion`]: BlockCopy::wait_for_completion
pub trait BlockCopy {
    /// Start copying a `width` x `height` frame from `src` into `dst`.
    fn start_copy(&mut self, src: &[Pixel], dst: &mut [Pixel], width: u32, height: u32);

    /// Block until the transfer started by [`start_copy`](BlockCopy::start_copy)
    /// has finished. There is no timeout.
    fn wait_for_completion(&mut self);
}

impl<T: BlockCopy + ?Sized> BlockCopy for &mut T {
    fn start_copy(&mut self, src: &[Pixel], dst: &mut [Pixel], width: u32, height: u32) {
        (**self).start_copy(src, dst, width, height)
    }

    fn wait_for_completion(&mut self) {
        (**self).wait_for_completion()
    }
}

/// Placeholder for coordinators built without an accelerator.
///
/// The type has no values, so an `Option<NoAccelerator>` is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAccelerator {}

impl BlockCopy for NoAccelerator {
    fn start_copy(&mut self, _src: &[Pixel], _dst: &mut [Pixel], _width: u32, _height: u32) {
        match *self {}
    }

    fn wait_for_completion(&mut self) {
        match *self {}
    }
}

/// Synchronous linear copy used when no accelerator is available.
pub(crate) fn linear_copy(dst: &mut [Pixel], src: &[Pixel]) {
    dst.copy_from_slice(src);
}
