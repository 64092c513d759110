//! Episode scheduler: expands a Latin square into a balanced run order.
//!
//! Given k variants (Condition A) and k levels for each of two context
//! factors (Conditions B and C), the scheduler emits k² episodes such that
//! every variant is observed exactly once under every (context1, context2)
//! combination.
//!
//! ```
//! use latin_schedule::LatinSquareScheduler;
//!
//! let scheduler = LatinSquareScheduler::new(
//!     vec!["ResNet", "ViT", "MLP"],
//!     vec!["low_shift", "medium_shift", "high_shift"],
//!     vec!["low_noise", "medium_noise", "high_noise"],
//!     Some(42),
//! )?;
//!
//! for ep in &scheduler {
//!     println!("{} {} {} {}", ep.episode_id, ep.variant, ep.context1, ep.context2);
//! }
//! assert_eq!(scheduler.len(), 9);
//! # Ok::<(), latin_schedule::ScheduleError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScheduleError};
use crate::generator::generate_latin_square;
use crate::square::LatinSquare;

/// A single scheduled episode.
///
/// Payload values are opaque to the scheduler; they are copied out of the
/// caller's lists unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Episode<V, C1, C2> {
    /// Variant (model, treatment) run in this episode
    pub variant: V,
    /// First controlled context factor (e.g., domain shift)
    pub context1: C1,
    /// Second controlled context factor (e.g., noise level)
    pub context2: C2,
    /// Position in the schedule, contiguous from 0
    pub episode_id: usize,
}

impl<V: fmt::Display, C1: fmt::Display, C2: fmt::Display> fmt::Display for Episode<V, C1, C2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} | {} | {}",
            self.episode_id, self.variant, self.context1, self.context2
        )
    }
}

/// Latin-square scheduler over k variants and two k-level context factors.
///
/// The schedule is fully materialized at construction and never mutated,
/// so iteration is restartable and the scheduler can be shared across
/// threads once built.
#[derive(Debug, Clone)]
pub struct LatinSquareScheduler<V, C1, C2> {
    /// Square dimension (number of variants)
    k: usize,
    /// Seed used for the square permutation
    seed: Option<u64>,
    variants: Vec<V>,
    context1: Vec<C1>,
    context2: Vec<C2>,
    /// square[i][j] = index into `variants` for (context1[i], context2[j])
    square: LatinSquare,
    /// Expanded episodes in row-major order
    episodes: Vec<Episode<V, C1, C2>>,
}

impl<V: Clone, C1: Clone, C2: Clone> LatinSquareScheduler<V, C1, C2> {
    /// Build a schedule.
    ///
    /// # Arguments
    /// * `variants` - The k variants to compare
    /// * `context1` - k levels of the first context factor (square rows)
    /// * `context2` - k levels of the second context factor (square columns)
    /// * `seed` - Permutes the square reproducibly; `None` uses the base square
    ///
    /// # Errors
    /// `LengthMismatch` if `context1` or `context2` do not have one entry per
    /// variant, `InvalidDimension` if `variants` is empty.
    pub fn new(
        variants: Vec<V>,
        context1: Vec<C1>,
        context2: Vec<C2>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let k = variants.len();

        if context1.len() != k {
            return Err(ScheduleError::LengthMismatch {
                field: "context1",
                expected: k,
                actual: context1.len(),
            });
        }

        if context2.len() != k {
            return Err(ScheduleError::LengthMismatch {
                field: "context2",
                expected: k,
                actual: context2.len(),
            });
        }

        let square = generate_latin_square(k, seed)?;
        let episodes = build_episodes(&square, &variants, &context1, &context2);

        info!(
            k = k,
            episodes = episodes.len(),
            seeded = seed.is_some(),
            "Built Latin square schedule"
        );

        Ok(Self {
            k,
            seed,
            variants,
            context1,
            context2,
            square,
            episodes,
        })
    }
}

impl<V, C1, C2> LatinSquareScheduler<V, C1, C2> {
    /// Get the square dimension.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Get the seed the square was permuted with.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Get the underlying Latin square.
    pub fn square(&self) -> &LatinSquare {
        &self.square
    }

    /// Get the variants, indexed by square symbol.
    pub fn variants(&self) -> &[V] {
        &self.variants
    }

    /// Get the first context factor levels (square rows).
    pub fn context1(&self) -> &[C1] {
        &self.context1
    }

    /// Get the second context factor levels (square columns).
    pub fn context2(&self) -> &[C2] {
        &self.context2
    }

    /// Get all episodes in schedule order.
    pub fn episodes(&self) -> &[Episode<V, C1, C2>] {
        &self.episodes
    }

    /// Iterate over episodes in schedule order.
    pub fn iter(&self) -> std::slice::Iter<'_, Episode<V, C1, C2>> {
        self.episodes.iter()
    }

    /// Number of episodes (k²).
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Check whether the schedule has no episodes.
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Consume the scheduler, returning its episodes.
    pub fn into_episodes(self) -> Vec<Episode<V, C1, C2>> {
        self.episodes
    }
}

impl<'a, V, C1, C2> IntoIterator for &'a LatinSquareScheduler<V, C1, C2> {
    type Item = &'a Episode<V, C1, C2>;
    type IntoIter = std::slice::Iter<'a, Episode<V, C1, C2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Expand a square into episodes, row index outer and column index inner.
///
/// S[i][j] is the variant index for the context pair (i, j).
fn build_episodes<V: Clone, C1: Clone, C2: Clone>(
    square: &LatinSquare,
    variants: &[V],
    context1: &[C1],
    context2: &[C2],
) -> Vec<Episode<V, C1, C2>> {
    let k = square.size();
    let mut episodes = Vec::with_capacity(k * k);

    for (i, row) in square.rows().iter().enumerate() {
        for (j, &variant_idx) in row.iter().enumerate() {
            episodes.push(Episode {
                variant: variants[variant_idx].clone(),
                context1: context1[i].clone(),
                context2: context2[j].clone(),
                episode_id: episodes.len(),
            });
        }
    }

    episodes
}
