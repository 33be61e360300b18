/// Protected subtree hosted by a gate.
///
/// Contract: `mount` is only ever called while authorization is granted,
/// and `unmount` is called as soon as it no longer is.
pub trait ProtectedOutlet: Send + Sync {
    fn mount(&self);

    fn unmount(&self);
}
