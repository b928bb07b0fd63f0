#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Working file set (or challenge identity) changed; the sandbox bridge
    /// should reconcile.
    SyncSandbox,
    /// Playground was cleared; discard the sandbox instance.
    TeardownSandbox,
}
