//! Lock-protected panel.
//!
//! Drawing and presentation mutate both frame buffers and the layer
//! registers, so concurrent callers must be serialized. [`SharedPanel`]
//! wraps the driver in a spin lock, which works without an OS and can live
//! in a `static`.

use spin::{Mutex, MutexGuard};
use tftlcd_graphics::NoAccelerator;

use crate::Ili9341;

/// Panel driver behind a spin lock.
pub struct SharedPanel<'a, B, L, A = NoAccelerator> {
    inner: Mutex<Ili9341<'a, B, L, A>>,
}

impl<'a, B, L, A> SharedPanel<'a, B, L, A> {
    /// Wrap a driver.
    pub const fn new(panel: Ili9341<'a, B, L, A>) -> Self {
        Self {
            inner: Mutex::new(panel),
        }
    }

    /// Lock the driver, spinning until it is free.
    pub fn lock(&self) -> MutexGuard<'_, Ili9341<'a, B, L, A>> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the driver.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ili9341<'a, B, L, A>) -> R) -> R {
        let mut panel = self.inner.lock();
        f(&mut panel)
    }

    /// Unwrap the driver.
    pub fn into_inner(self) -> Ili9341<'a, B, L, A> {
        self.inner.into_inner()
    }
}
