//! The target registry: state label → handler, built once per behavior.
//!
//! # Shape
//!
//! A registry is generic over three types:
//!
//! - `S`: the behavior's state labels ([`StateId`]).
//! - `A`: the agent context each citizen owns (tools, position, counters).
//! - `E`: the environment the handlers act on (world queries, pathing).
//!
//! Handlers receive a [`Cx`] bundling `&mut A`, `&mut E` and the machine's
//! delay counter for the current tick.  Guards see `&A` and `&E` only.
//!
//! # Interrupts
//!
//! Besides per-state targets a registry may hold state-less interrupts.
//! Their guards are checked, in registration order, before the current
//! state's target; the first passing interrupt runs instead of it.

use rustc_hash::FxHashMap;

use crate::{ActionResult, DelayCounter, FsmError, FsmResult, StateId};

type Action<S, A, E> = Box<dyn Fn(&mut Cx<'_, S, A, E>) -> ActionResult<S> + Send + Sync>;
type Guard<A, E> = Box<dyn Fn(&A, &E) -> bool + Send + Sync>;
type TransitionHook<S, A> = Box<dyn Fn(&mut A, S, S) + Send + Sync>;

// ── Cx ────────────────────────────────────────────────────────────────────────

/// Everything one handler invocation may touch.
///
/// Lives for a single handler call; nothing in it can be kept past the tick.
pub struct Cx<'a, S, A, E> {
    /// The citizen's own context.
    pub agent: &'a mut A,
    /// Shared world collaborators.
    pub env:   &'a mut E,
    state:     S,
    delay:     &'a mut DelayCounter,
}

impl<'a, S: StateId, A, E> Cx<'a, S, A, E> {
    pub fn new(agent: &'a mut A, env: &'a mut E, state: S, delay: &'a mut DelayCounter) -> Self {
        Self { agent, env, state, delay }
    }

    /// The state whose target is running.
    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    /// Skip the next `ticks` ticks.  Overrides any delay set earlier.
    #[inline]
    pub fn set_delay(&mut self, ticks: u32) {
        self.delay.set(ticks);
    }

    #[inline]
    pub fn delay(&self) -> u32 {
        self.delay.remaining()
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

pub(crate) struct Target<S, A, E> {
    pub(crate) guard:  Option<Guard<A, E>>,
    pub(crate) action: Action<S, A, E>,
}

pub(crate) struct Interrupt<S, A, E> {
    pub(crate) guard:  Guard<A, E>,
    pub(crate) action: Action<S, A, E>,
}

// ── TargetRegistry ────────────────────────────────────────────────────────────

/// Immutable state → handler table shared by all agents of one behavior.
pub struct TargetRegistry<S, A, E> {
    name:          &'static str,
    entry:         S,
    fallback:      S,
    targets:       FxHashMap<S, Target<S, A, E>>,
    interrupts:    Vec<Interrupt<S, A, E>>,
    on_transition: Option<TransitionHook<S, A>>,
}

impl<S: StateId, A, E> TargetRegistry<S, A, E> {
    /// Start a registry whose machines begin in `entry`.
    pub fn builder(name: &'static str, entry: S) -> RegistryBuilder<S, A, E> {
        RegistryBuilder {
            name,
            entry,
            fallback:      entry,
            targets:       FxHashMap::default(),
            interrupts:    Vec::new(),
            on_transition: None,
            duplicate:     None,
        }
    }

    /// Behavior name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// State a new machine starts in.
    pub fn entry(&self) -> S {
        self.entry
    }

    /// State a machine returns to after a handler error.
    pub fn fallback(&self) -> S {
        self.fallback
    }

    /// `true` if `state` has a target.
    pub fn contains(&self, state: S) -> bool {
        self.targets.contains_key(&state)
    }

    /// Number of state targets (interrupts excluded).
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn interrupt_count(&self) -> usize {
        self.interrupts.len()
    }

    /// All bound states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.targets.keys().copied()
    }

    pub(crate) fn resolve(&self, state: S) -> Option<&Target<S, A, E>> {
        self.targets.get(&state)
    }

    /// First interrupt whose guard passes for this agent and environment.
    pub(crate) fn pending_interrupt(&self, agent: &A, env: &E) -> Option<&Interrupt<S, A, E>> {
        self.interrupts.iter().find(|i| (i.guard)(agent, env))
    }

    pub(crate) fn notify_transition(&self, agent: &mut A, from: S, to: S) {
        if let Some(hook) = &self.on_transition {
            hook(agent, from, to);
        }
    }
}

// ── RegistryBuilder ───────────────────────────────────────────────────────────

/// Fluent construction of a [`TargetRegistry`].
///
/// Registration order only matters for interrupts.  Binding the same state
/// twice is reported by [`build`](Self::build) as
/// [`FsmError::DuplicateTarget`].
pub struct RegistryBuilder<S, A, E> {
    name:          &'static str,
    entry:         S,
    fallback:      S,
    targets:       FxHashMap<S, Target<S, A, E>>,
    interrupts:    Vec<Interrupt<S, A, E>>,
    on_transition: Option<TransitionHook<S, A>>,
    duplicate:     Option<S>,
}

impl<S: StateId, A, E> RegistryBuilder<S, A, E> {
    /// State to fall back to when a handler fails.  Defaults to the entry
    /// state.
    pub fn fallback(mut self, state: S) -> Self {
        self.fallback = state;
        self
    }

    /// Bind `state` to an unconditional handler.
    pub fn target<F>(self, state: S, action: F) -> Self
    where
        F: Fn(&mut Cx<'_, S, A, E>) -> ActionResult<S> + Send + Sync + 'static,
    {
        self.insert(state, None, Box::new(action))
    }

    /// Bind `state` to a handler that only runs while `guard` holds.
    pub fn guarded<G, F>(self, state: S, guard: G, action: F) -> Self
    where
        G: Fn(&A, &E) -> bool + Send + Sync + 'static,
        F: Fn(&mut Cx<'_, S, A, E>) -> ActionResult<S> + Send + Sync + 'static,
    {
        self.insert(state, Some(Box::new(guard)), Box::new(action))
    }

    /// Add a state-less interrupt checked before every state target.
    pub fn interrupt<G, F>(mut self, guard: G, action: F) -> Self
    where
        G: Fn(&A, &E) -> bool + Send + Sync + 'static,
        F: Fn(&mut Cx<'_, S, A, E>) -> ActionResult<S> + Send + Sync + 'static,
    {
        self.interrupts.push(Interrupt { guard: Box::new(guard), action: Box::new(action) });
        self
    }

    /// Run `hook(agent, from, to)` after every change of state.
    pub fn on_transition<H>(mut self, hook: H) -> Self
    where
        H: Fn(&mut A, S, S) + Send + Sync + 'static,
    {
        self.on_transition = Some(Box::new(hook));
        self
    }

    /// Validate and freeze the table.
    ///
    /// Fails on a duplicate binding, or when the entry or fallback state has
    /// no target.
    pub fn build(self) -> FsmResult<TargetRegistry<S, A, E>, S> {
        if let Some(state) = self.duplicate {
            return Err(FsmError::DuplicateTarget { registry: self.name, state });
        }
        for state in [self.entry, self.fallback] {
            if !self.targets.contains_key(&state) {
                return Err(FsmError::Unbound { registry: self.name, state });
            }
        }
        Ok(TargetRegistry {
            name:          self.name,
            entry:         self.entry,
            fallback:      self.fallback,
            targets:       self.targets,
            interrupts:    self.interrupts,
            on_transition: self.on_transition,
        })
    }

    fn insert(mut self, state: S, guard: Option<Guard<A, E>>, action: Action<S, A, E>) -> Self {
        if self.targets.insert(state, Target { guard, action }).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(state);
        }
        self
    }
}
