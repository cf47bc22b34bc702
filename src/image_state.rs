//! Load lifecycle of the image a card is currently attempting.

use crate::resolver::ImageBranch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePhase {
    Loading,
    Loaded,
    Failed,
}

/// What the host should do after a load signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Signal belonged to an older reference.
    Stale,
    Loaded,
    /// First failure on the supplied image: resolve again, now on the fallback.
    Retry,
    /// Failure with no attempts left.
    GaveUp,
}

/// One resolution cycle: the reference being attempted and how far it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoad {
    reference: String,
    branch: ImageBranch,
    phase: ImagePhase,
}

impl ImageLoad {
    pub fn start(reference: String, branch: ImageBranch) -> Self {
        Self {
            reference,
            branch,
            phase: ImagePhase::Loading,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn branch(&self) -> ImageBranch {
        self.branch
    }

    pub fn phase(&self) -> ImagePhase {
        self.phase
    }

    pub fn on_loaded(&mut self, reference: &str) -> Transition {
        if reference != self.reference || self.phase != ImagePhase::Loading {
            return Transition::Stale;
        }
        self.phase = ImagePhase::Loaded;
        Transition::Loaded
    }

    pub fn on_error(&mut self, reference: &str) -> Transition {
        if reference != self.reference || self.phase != ImagePhase::Loading {
            return Transition::Stale;
        }
        self.phase = ImagePhase::Failed;
        match self.branch {
            ImageBranch::Supplied => Transition::Retry,
            ImageBranch::Fallback => Transition::GaveUp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_success_is_terminal() {
        let mut load = ImageLoad::start("a".into(), ImageBranch::Supplied);
        assert_eq!(load.phase(), ImagePhase::Loading);
        assert_eq!(load.on_loaded("a"), Transition::Loaded);
        assert_eq!(load.phase(), ImagePhase::Loaded);
        assert_eq!(load.on_error("a"), Transition::Stale);
        assert_eq!(load.phase(), ImagePhase::Loaded);
    }

    #[test]
    fn supplied_failure_asks_for_retry() {
        let mut load = ImageLoad::start("a".into(), ImageBranch::Supplied);
        assert_eq!(load.on_error("a"), Transition::Retry);
        assert_eq!(load.phase(), ImagePhase::Failed);
    }

    #[test]
    fn fallback_failure_gives_up_once() {
        let mut load = ImageLoad::start("f".into(), ImageBranch::Fallback);
        assert_eq!(load.on_error("f"), Transition::GaveUp);
        assert_eq!(load.on_error("f"), Transition::Stale);
        assert_eq!(load.phase(), ImagePhase::Failed);
    }

    #[test]
    fn signals_for_other_references_are_ignored() {
        let mut load = ImageLoad::start("new".into(), ImageBranch::Fallback);
        assert_eq!(load.on_loaded("old"), Transition::Stale);
        assert_eq!(load.on_error("old"), Transition::Stale);
        assert_eq!(load.phase(), ImagePhase::Loading);
    }
}
