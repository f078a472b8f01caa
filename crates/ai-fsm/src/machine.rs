//! `StateMachine<A>`: the dispatch loop.

use tracing::debug;

use crate::{Actor, FsmError, FsmResult, State, Transitions};

#[cfg(not(feature = "fx-hash"))]
type StateTable<A> = std::collections::HashMap<<A as Actor>::Key, Box<dyn State<A>>>;
#[cfg(feature = "fx-hash")]
type StateTable<A> = rustc_hash::FxHashMap<<A as Actor>::Key, Box<dyn State<A>>>;

/// Upper bound on transitions chained from `enter` callbacks in one call.
pub const MAX_CHAINED_TRANSITIONS: usize = 16;

/// Whether a transition calls `exit` on the outgoing state.
///
/// The default skips it: states such as a mid-combo attack rely on never
/// being exited by a transition.  Machines that want the symmetric lifecycle
/// opt in with `CallExit`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    #[default]
    Skip,
    CallExit,
}

/// Drives one actor through a named set of states.
///
/// `current` is `None` until the first [`step`](Self::step); once set it is
/// always a key present in the state table, because every transition target
/// is checked before it is entered.
pub struct StateMachine<A: Actor> {
    initial:     A::Key,
    states:      StateTable<A>,
    current:     Option<A::Key>,
    exit_policy: ExitPolicy,
    stopped:     bool,
    label:       String,
    transitions: u64,
}

impl<A: Actor> StateMachine<A> {
    /// Start building a machine whose first `step` enters `initial`.
    pub fn builder(initial: A::Key) -> StateMachineBuilder<A> {
        StateMachineBuilder {
            initial,
            states:      StateTable::<A>::default(),
            exit_policy: ExitPolicy::default(),
            label:       String::from("fsm"),
        }
    }

    /// The current state, `None` before the first step or after `stop`.
    #[inline]
    pub fn current(&self) -> Option<A::Key> {
        self.current
    }

    #[inline]
    pub fn initial(&self) -> A::Key {
        self.initial
    }

    #[inline]
    pub fn is_in(&self, key: A::Key) -> bool {
        self.current == Some(key)
    }

    #[inline]
    pub fn contains(&self, key: A::Key) -> bool {
        self.states.contains_key(&key)
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }

    /// Number of transitions applied so far (the lazy initial entry counts).
    #[inline]
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run one tick.
    ///
    /// The first call enters the initial state; every call, including the
    /// first, then executes the current state.  Transitions requested during
    /// `enter` or `execute` are applied before returning.
    pub fn step(&mut self, actor: &mut A, ctx: &mut A::Ctx<'_>) -> FsmResult<()> {
        if self.stopped {
            return Err(FsmError::Stopped);
        }
        if self.current.is_none() {
            let initial = self.initial;
            self.apply(initial, A::Entry::default(), actor, ctx)?;
        }

        let Some(current) = self.current else {
            return Err(FsmError::Stopped);
        };
        let mut handle = Transitions::new(Some(current));
        match self.states.get(&current) {
            Some(state) => state.execute(actor, ctx, &mut handle),
            None => return Err(FsmError::UnknownState(format!("{current:?}"))),
        }
        self.drain(handle, actor, ctx)
    }

    /// Switch to `to` immediately and enter it with a default payload.
    pub fn transition(
        &mut self,
        to:    A::Key,
        actor: &mut A,
        ctx:   &mut A::Ctx<'_>,
    ) -> FsmResult<()> {
        self.transition_with(to, A::Entry::default(), actor, ctx)
    }

    /// Switch to `to` immediately, forwarding `entry` to its `enter`.
    ///
    /// Fails fast with [`FsmError::UnknownState`] when `to` is not
    /// registered; the current state is left untouched in that case.
    pub fn transition_with(
        &mut self,
        to:    A::Key,
        entry: A::Entry,
        actor: &mut A,
        ctx:   &mut A::Ctx<'_>,
    ) -> FsmResult<()> {
        if self.stopped {
            return Err(FsmError::Stopped);
        }
        self.apply(to, entry, actor, ctx)
    }

    /// Tear the machine down.  Irreversible: the state table is dropped and
    /// every later `step`/`transition` returns [`FsmError::Stopped`].
    pub fn stop(&mut self) {
        debug!(machine = %self.label, from = ?self.current, "state machine stopped");
        self.current = None;
        self.states.clear();
        self.stopped = true;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply(
        &mut self,
        to:    A::Key,
        entry: A::Entry,
        actor: &mut A,
        ctx:   &mut A::Ctx<'_>,
    ) -> FsmResult<()> {
        let mut next = (to, entry);
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            let (to, entry) = next;
            if !self.states.contains_key(&to) {
                return Err(FsmError::UnknownState(format!("{to:?}")));
            }

            if self.exit_policy == ExitPolicy::CallExit {
                if let Some(state) = self.current.and_then(|from| self.states.get(&from)) {
                    state.exit(actor, ctx);
                }
            }

            debug!(machine = %self.label, from = ?self.current, to = ?to, "transition");
            self.current = Some(to);
            self.transitions += 1;

            let mut handle = Transitions::new(Some(to));
            if let Some(state) = self.states.get(&to) {
                state.enter(actor, ctx, &mut handle, entry);
            }
            match handle.take() {
                Some(chained) => next = chained,
                None => return Ok(()),
            }
        }
        Err(FsmError::TransitionLoop(MAX_CHAINED_TRANSITIONS, format!("{:?}", next.0)))
    }

    fn drain(
        &mut self,
        mut handle: Transitions<A::Key, A::Entry>,
        actor:      &mut A,
        ctx:        &mut A::Ctx<'_>,
    ) -> FsmResult<()> {
        match handle.take() {
            Some((to, entry)) => self.apply(to, entry, actor, ctx),
            None => Ok(()),
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`StateMachine`].
pub struct StateMachineBuilder<A: Actor> {
    initial:     A::Key,
    states:      StateTable<A>,
    exit_policy: ExitPolicy,
    label:       String,
}

impl<A: Actor> StateMachineBuilder<A> {
    /// Register `state` under `key`.  A second registration for the same key
    /// replaces the first.
    pub fn state(mut self, key: A::Key, state: impl State<A> + 'static) -> Self {
        self.states.insert(key, Box::new(state));
        self
    }

    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Name used in log lines (e.g. `"enemy#3"`).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validate that the initial state is registered and build the machine.
    pub fn build(self) -> FsmResult<StateMachine<A>> {
        if !self.states.contains_key(&self.initial) {
            return Err(FsmError::MissingInitialState(format!("{:?}", self.initial)));
        }
        Ok(StateMachine {
            initial:     self.initial,
            states:      self.states,
            current:     None,
            exit_policy: self.exit_policy,
            stopped:     false,
            label:       self.label,
            transitions: 0,
        })
    }
}
