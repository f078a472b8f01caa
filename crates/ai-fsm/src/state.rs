//! The `State` and `Actor` traits and the `Transitions` handle.

use std::fmt::Debug;
use std::hash::Hash;

/// Key type naming a state inside one machine (usually a fieldless enum).
pub trait StateKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> StateKey for T {}

/// The data a machine drives.
///
/// `Actor` is implemented by the agent's *body* (position, vitals, timers),
/// not by the struct that owns the machine, so a state can borrow the body
/// mutably while the machine itself is borrowed by the dispatch loop.
pub trait Actor: 'static {
    /// Names of the states this actor can be in.
    type Key: StateKey;

    /// Extra data handed to `enter` by a transition.  Plain steps and plain
    /// transitions pass `Entry::default()`.
    type Entry: Default;

    /// Per-tick context borrowed from the owning scene.
    type Ctx<'a>;
}

/// One behaviour unit: the `enter` / `execute` / `exit` lifecycle.
///
/// States are long-lived and shared across every activation, so they hold
/// no per-activation data; timers live on the actor and are reset in
/// `enter`.  A state asks for a transition through the [`Transitions`]
/// handle instead of holding a pointer back to its machine.
pub trait State<A: Actor> {
    /// Called when the machine switches to this state.
    fn enter(
        &self,
        _actor: &mut A,
        _ctx:   &mut A::Ctx<'_>,
        _fsm:   &mut Transitions<A::Key, A::Entry>,
        _entry: A::Entry,
    ) {
    }

    /// Called on every `step()` while this state is current.
    fn execute(
        &self,
        actor: &mut A,
        ctx:   &mut A::Ctx<'_>,
        fsm:   &mut Transitions<A::Key, A::Entry>,
    );

    /// Called on the outgoing state only when the machine's
    /// [`ExitPolicy`][crate::ExitPolicy] is `CallExit`.
    fn exit(&self, _actor: &mut A, _ctx: &mut A::Ctx<'_>) {}
}

/// Non-owning handle passed into `enter`/`execute`.
///
/// Records at most one requested transition; the machine applies it as soon
/// as the callback returns.  Requesting twice keeps the last request.
#[derive(Debug)]
pub struct Transitions<K, E> {
    current: Option<K>,
    pending: Option<(K, E)>,
}

impl<K: StateKey, E: Default> Transitions<K, E> {
    pub(crate) fn new(current: Option<K>) -> Self {
        Self { current, pending: None }
    }

    /// The state whose callback is running.
    #[inline]
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Request a switch to `to` with a default entry payload.
    pub fn transition(&mut self, to: K) {
        self.pending = Some((to, E::default()));
    }

    /// Request a switch to `to`, forwarding `entry` to its `enter`.
    pub fn transition_with(&mut self, to: K, entry: E) {
        self.pending = Some((to, entry));
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn take(&mut self) -> Option<(K, E)> {
        self.pending.take()
    }
}
