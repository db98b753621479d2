//! A single-slot holder for the process-wide key listener.

/// Holds at most one registered listener.
///
/// Dropping the listener (on `uninstall` or when the registration itself is dropped) is what
/// unregisters it from the host.
#[derive(Debug)]
pub struct Registration<L> {
    slot: Option<L>,
}

impl<L> Registration<L> {
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Installs the listener built by `register` unless one is already installed.
    ///
    /// `register` is not called when a listener is present. Returns `true` if a listener was
    /// installed by this call.
    pub fn install(&mut self, register: impl FnOnce() -> L) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(register());
        true
    }

    /// Like [`install`](Self::install), for registrations that can fail.
    pub fn try_install<E>(&mut self, register: impl FnOnce() -> Result<L, E>) -> Result<bool, E> {
        if self.slot.is_some() {
            return Ok(false);
        }
        self.slot = Some(register()?);
        Ok(true)
    }

    /// Drops the installed listener. Returns `false` if none was installed.
    pub fn uninstall(&mut self) -> bool {
        self.slot.take().is_some()
    }

    pub fn is_installed(&self) -> bool {
        self.slot.is_some()
    }
}

impl<L> Default for Registration<L> {
    fn default() -> Self {
        Self::new()
    }
}
