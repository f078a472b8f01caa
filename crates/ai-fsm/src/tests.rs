//! Unit tests for ai-fsm.

use crate::{Actor, ExitPolicy, FsmError, State, StateMachine, Transitions};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Light {
    Red,
    Green,
    Yellow,
    Unregistered,
}

/// Entry payload: how many ticks the entered state should last.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
struct Hold(u32);

#[derive(Default)]
struct Lamp {
    ticks_in_state: u32,
    hold:           u32,
}

/// Borrowed per-tick context, mirroring how a scene lends its world.
struct Journal<'a> {
    lines: &'a mut Vec<String>,
}

impl Actor for Lamp {
    type Key = Light;
    type Entry = Hold;
    type Ctx<'a> = Journal<'a>;
}

/// Records its lifecycle and moves to `next` after `hold` ticks.
struct Phase {
    name: &'static str,
    next: Light,
}

impl State<Lamp> for Phase {
    fn enter(&self, lamp: &mut Lamp, ctx: &mut Journal<'_>, _fsm: &mut Transitions<Light, Hold>, entry: Hold) {
        lamp.ticks_in_state = 0;
        lamp.hold = if entry.0 == 0 { 2 } else { entry.0 };
        ctx.lines.push(format!("enter:{}", self.name));
    }

    fn execute(&self, lamp: &mut Lamp, ctx: &mut Journal<'_>, fsm: &mut Transitions<Light, Hold>) {
        lamp.ticks_in_state += 1;
        ctx.lines.push(format!("exec:{}", self.name));
        if lamp.ticks_in_state >= lamp.hold {
            fsm.transition(self.next);
        }
    }

    fn exit(&self, _lamp: &mut Lamp, ctx: &mut Journal<'_>) {
        ctx.lines.push(format!("exit:{}", self.name));
    }
}

/// Immediately bounces to `to` from `enter`.
struct Bounce {
    to: Light,
}

impl State<Lamp> for Bounce {
    fn enter(&self, _lamp: &mut Lamp, _ctx: &mut Journal<'_>, fsm: &mut Transitions<Light, Hold>, _entry: Hold) {
        fsm.transition(self.to);
    }

    fn execute(&self, _lamp: &mut Lamp, _ctx: &mut Journal<'_>, _fsm: &mut Transitions<Light, Hold>) {}
}

fn traffic(policy: ExitPolicy) -> StateMachine<Lamp> {
    StateMachine::builder(Light::Red)
        .state(Light::Red, Phase { name: "red", next: Light::Green })
        .state(Light::Green, Phase { name: "green", next: Light::Yellow })
        .state(Light::Yellow, Phase { name: "yellow", next: Light::Red })
        .exit_policy(policy)
        .label("lamp")
        .build()
        .unwrap()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn missing_initial_state_is_rejected() {
        let result = StateMachine::<Lamp>::builder(Light::Yellow)
            .state(Light::Red, Phase { name: "red", next: Light::Green })
            .build();
        assert!(matches!(result, Err(FsmError::MissingInitialState(_))));
    }

    #[test]
    fn current_is_none_before_first_step() {
        let fsm = traffic(ExitPolicy::Skip);
        assert_eq!(fsm.current(), None);
        assert_eq!(fsm.initial(), Light::Red);
        assert!(fsm.contains(Light::Green));
        assert!(!fsm.contains(Light::Unregistered));
        assert_eq!(fsm.label(), "lamp");
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn first_step_enters_then_executes() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        assert_eq!(lines, ["enter:red", "exec:red"]);
        assert_eq!(fsm.current(), Some(Light::Red));
        assert_eq!(fsm.transition_count(), 1);
    }

    #[test]
    fn requested_transition_enters_without_executing() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        for _ in 0..2 {
            fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        }
        assert_eq!(lines, ["enter:red", "exec:red", "exec:red", "enter:green"]);
        assert_eq!(fsm.current(), Some(Light::Green));

        lines.clear();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        assert_eq!(lines, ["exec:green"]);
    }

    #[test]
    fn default_policy_never_calls_exit() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        for _ in 0..6 {
            fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        }
        assert!(lines.iter().all(|l| !l.starts_with("exit:")), "{lines:?}");
    }

    #[test]
    fn call_exit_policy_exits_outgoing_state() {
        let mut fsm = traffic(ExitPolicy::CallExit);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        for _ in 0..2 {
            fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        }
        assert_eq!(lines, ["enter:red", "exec:red", "exec:red", "exit:red", "enter:green"]);
    }

    #[test]
    fn reentering_a_state_resets_its_timer() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        // Red(2) → Green(2) → Yellow(2) → Red again.
        for _ in 0..6 {
            fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        }
        assert_eq!(fsm.current(), Some(Light::Red));
        assert_eq!(lamp.ticks_in_state, 0);
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use super::*;

    #[test]
    fn external_transition_forwards_entry() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.transition_with(Light::Yellow, Hold(5), &mut lamp, &mut Journal { lines: &mut lines })
            .unwrap();
        assert_eq!(fsm.current(), Some(Light::Yellow));
        assert_eq!(lamp.hold, 5);
        assert_eq!(lines, ["enter:yellow"]);
    }

    #[test]
    fn transition_before_first_step_skips_initial_entry() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.transition(Light::Green, &mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        assert_eq!(lines, ["enter:green", "exec:green"]);
    }

    #[test]
    fn unknown_target_fails_fast_and_keeps_state() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        let err = fsm
            .transition(Light::Unregistered, &mut lamp, &mut Journal { lines: &mut lines })
            .unwrap_err();
        assert_eq!(err, FsmError::UnknownState("Unregistered".into()));
        assert_eq!(fsm.current(), Some(Light::Red));
    }

    #[test]
    fn transition_chained_from_enter_is_applied() {
        let mut fsm = StateMachine::<Lamp>::builder(Light::Red)
            .state(Light::Red, Bounce { to: Light::Green })
            .state(Light::Green, Phase { name: "green", next: Light::Red })
            .build()
            .unwrap();
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        // Red bounced straight to Green, which is executed in the same step.
        assert_eq!(lines, ["enter:green", "exec:green"]);
        assert_eq!(fsm.current(), Some(Light::Green));
    }

    #[test]
    fn endless_enter_chain_is_an_error() {
        let mut fsm = StateMachine::<Lamp>::builder(Light::Red)
            .state(Light::Red, Bounce { to: Light::Green })
            .state(Light::Green, Bounce { to: Light::Red })
            .build()
            .unwrap();
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        let err = fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap_err();
        assert!(matches!(err, FsmError::TransitionLoop(_, _)));
    }
}

// ── Stop ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop {
    use super::*;

    #[test]
    fn stop_is_terminal() {
        let mut fsm = traffic(ExitPolicy::Skip);
        let mut lamp = Lamp::default();
        let mut lines = Vec::new();
        fsm.step(&mut lamp, &mut Journal { lines: &mut lines }).unwrap();
        fsm.stop();

        assert!(fsm.is_stopped());
        assert_eq!(fsm.current(), None);
        assert!(!fsm.contains(Light::Red));
        assert_eq!(fsm.step(&mut lamp, &mut Journal { lines: &mut lines }), Err(FsmError::Stopped));
        assert_eq!(
            fsm.transition(Light::Red, &mut lamp, &mut Journal { lines: &mut lines }),
            Err(FsmError::Stopped)
        );
    }
}
