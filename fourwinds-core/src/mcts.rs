//! Generic Monte Carlo tree search.
//!
//! The search core is stateless and game-agnostic: a `SearchSpec`
//! implementation supplies legal-move generation, move application, and
//! state evaluation, and the engine runs plain UCB1 selection with
//! uniform-random expansion and negamax backpropagation. The tree is built
//! fresh for every decision and discarded afterwards.

use std::time::{Duration, Instant};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The three callbacks that parameterize a search.
///
/// `evaluate` returns a scalar in [-1, 1] from the perspective of the side
/// to move in the given state: either a terminal payoff or a bounded
/// random-playout estimate (the provided rng drives any playout).
pub trait SearchSpec {
    type State: Clone;
    type Action: Clone;

    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Action>;
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;
    fn evaluate(&self, state: &Self::State, rng: &mut dyn RngCore) -> f64;
}

/// Search budgets and tuning.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Iteration budget per decision.
    pub iterations: u32,
    /// Wall-clock budget per decision. Whichever budget runs out first
    /// stops the search.
    pub max_time: Duration,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Seed for the search rng; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            iterations: 400,
            max_time: Duration::from_secs(1),
            exploration: 1.41,
            seed: None,
        }
    }
}

/// Diagnostics from one completed search.
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    pub iterations: u32,
    pub elapsed: Duration,
    pub root_visits: u32,
    pub best_child_visits: u32,
}

// Index-based tree arena; nodes reference each other by position.
struct Node<S, A> {
    state: S,
    /// The action that led here. `None` only for the root.
    action: Option<A>,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Vec<A>,
    visits: u32,
    value: f64,
}

impl<S, A> Node<S, A> {
    fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = self.value / self.visits as f64;
        let exploration_term =
            exploration * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        exploitation + exploration_term
    }
}

/// Runs a search from `root_state` and returns the best action with stats.
///
/// Returns `None` when the root has no legal actions or neither budget
/// allows a single iteration; callers are expected to fall back to a
/// deterministic policy rather than treat this as an error.
pub fn search<P: SearchSpec>(
    spec: &P,
    root_state: P::State,
    config: &SearchConfig,
) -> Option<(P::Action, SearchStats)> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::thread_rng().next_u64()),
    };

    let untried = spec.legal_moves(&root_state);
    if untried.is_empty() {
        return None;
    }

    let mut arena: Vec<Node<P::State, P::Action>> = vec![Node {
        state: root_state,
        action: None,
        parent: None,
        children: Vec::new(),
        untried,
        visits: 0,
        value: 0.0,
    }];

    let start = Instant::now();
    let mut iterations = 0u32;

    while iterations < config.iterations && start.elapsed() < config.max_time {
        // Selection: descend through fully-expanded nodes via UCB1.
        let mut idx = 0;
        while arena[idx].untried.is_empty() && !arena[idx].children.is_empty() {
            let parent_visits = arena[idx].visits;
            let best = arena[idx]
                .children
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    let ua = arena[a].ucb1(parent_visits, config.exploration);
                    let ub = arena[b].ucb1(parent_visits, config.exploration);
                    ua.partial_cmp(&ub).unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(idx);
            idx = best;
        }

        // Expansion: attach one uniformly-chosen untried action.
        if !arena[idx].untried.is_empty() {
            let pick = rng.gen_range(0..arena[idx].untried.len());
            let action = arena[idx].untried.swap_remove(pick);
            let state = spec.apply(&arena[idx].state, &action);
            let untried = spec.legal_moves(&state);
            let child = arena.len();
            arena.push(Node {
                state,
                action: Some(action),
                parent: Some(idx),
                children: Vec::new(),
                untried,
                visits: 0,
                value: 0.0,
            });
            arena[idx].children.push(child);
            idx = child;
        }

        // Simulation.
        let mut reward = spec.evaluate(&arena[idx].state, &mut rng);

        // Backpropagation, negamax style: what is good for the side to
        // move at a node is bad for the side that moved into it.
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            arena[i].visits += 1;
            arena[i].value += reward;
            reward = -reward;
            cursor = arena[i].parent;
        }

        iterations += 1;
    }

    // Most-visited child of the root, the robust choice under a small budget.
    let best = arena[0]
        .children
        .iter()
        .copied()
        .max_by_key(|&c| arena[c].visits)?;

    let stats = SearchStats {
        iterations,
        elapsed: start.elapsed(),
        root_visits: arena[0].visits,
        best_child_visits: arena[best].visits,
    };
    let action = arena[best].action.clone()?;
    Some((action, stats))
}
