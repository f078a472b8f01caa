//! Animation name selection.
//!
//! Playback is the renderer's job; this module only decides which name to
//! request.  Agents ask for `"<action>_<facing>"` first and fall back to the
//! bare `"<action>"`.  A missing name is logged and ignored.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use ai_core::{AgentId, Facing};

/// The set of animation names the renderer can play.
#[derive(Clone, Debug, Default)]
pub struct AnimationLibrary {
    names:      HashSet<String>,
    accept_all: bool,
}

impl AnimationLibrary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names:      names.into_iter().map(Into::into).collect(),
            accept_all: false,
        }
    }

    /// A library that claims to have every name (headless runs).
    pub fn accept_all() -> Self {
        Self { names: HashSet::new(), accept_all: true }
    }

    #[inline]
    pub fn exists(&self, name: &str) -> bool {
        self.accept_all || self.names.contains(name)
    }
}

/// The animation an agent is currently requesting.
#[derive(Clone, Debug)]
pub struct Animator {
    library: Arc<AnimationLibrary>,
    current: Option<String>,
}

impl Animator {
    pub fn new(library: Arc<AnimationLibrary>) -> Self {
        Self { library, current: None }
    }

    #[inline]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Request a named animation.  Returns `false` (and keeps the current
    /// one) if the library does not have it.
    pub fn play(&mut self, agent: AgentId, name: &str) -> bool {
        if !self.library.exists(name) {
            debug!(%agent, animation = name, "animation missing; ignored");
            return false;
        }
        if self.current.as_deref() != Some(name) {
            self.current = Some(name.to_owned());
        }
        true
    }

    /// Request `"<action>_<facing>"`, else `"<action>"`.
    pub fn play_facing(&mut self, agent: AgentId, action: &str, facing: Facing) -> bool {
        let directional = format!("{action}_{facing}");
        if self.library.exists(&directional) {
            return self.play(agent, &directional);
        }
        self.play(agent, action)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
