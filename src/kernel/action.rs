use crate::kernel::services::ports::catalog::ChallengeDescriptor;
use crate::kernel::state::Scaffold;

#[derive(Debug, Clone)]
pub enum Action {
    /// Descriptor fetch kicked off; shows the loading indicator without
    /// touching any loaded state.
    ChallengeLoadStarted {
        category: String,
        slug: String,
    },
    /// Descriptor and generated file set arrived; atomically replaces the
    /// current challenge.
    ChallengeLoaded {
        descriptor: ChallengeDescriptor,
        scaffold: Scaffold,
    },
    /// Descriptor fetch or parse failed; the previous state is retained.
    ChallengeLoadFailed {
        category: String,
        slug: String,
        error: String,
    },
    UpdateFileContent {
        path: String,
        content: String,
    },
    SetActiveFile {
        path: String,
    },
    ResetChallenge,
    ClearPlayground,
    /// Sandbox adapter status flags; never carries errors, only booleans.
    SandboxStatus {
        busy: bool,
        failed: bool,
    },
}
