use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{DVector, Float};

use super::Bounds;

/// A struct that holds the results of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// The lowest cost observed over the whole run.
    pub best_cost: Float,
    /// The position at which [`OptimizationResult::best_cost`] was observed.
    pub best_position: DVector<Float>,
    /// The number of iterations performed.
    pub iterations: usize,
    /// The number of objective function evaluations.
    pub cost_evals: usize,
    /// The bounds of the search space. This is `None` if the run was unbounded.
    pub bounds: Option<Bounds>,
    /// A message set by the optimizer.
    pub message: String,
}

impl Default for OptimizationResult {
    fn default() -> Self {
        Self {
            best_cost: Float::INFINITY,
            best_position: DVector::zeros(0),
            iterations: 0,
            cost_evals: 0,
            bounds: None,
            message: String::new(),
        }
    }
}

impl OptimizationResult {
    /// Convert the result into the `(best_cost, best_position)` pair.
    pub fn destructure(self) -> (Float, DVector<Float>) {
        (self.best_cost, self.best_position)
    }
}

impl Display for OptimizationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = format!(
            "╒══════════════════════════════════════════════════════════════════════════════════════════════╕
│{:^94}│",
            "OPTIMIZATION RESULTS",
        );
        let status = format!(
            "╞════════════════════════════════════════════╤════════════════════╤═════════════╤══════════════╡
│ Iterations: {:>10}                     │ fval: {:+12.3E} │ #fcn: {:>5} │              │",
            self.iterations, self.best_cost, self.cost_evals,
        );
        let message = format!(
            "├────────────────────────────────────────────┴────────────────────┴─────────────┴──────────────┤
│ Message: {:<83} │",
            self.message,
        );
        let header =
            "├───────╥────────────────────────────────────────────╥──────────────┬──────────────┬───────────┤
│ Par # ║ Value                                      ║       -Bound │       +Bound │ At Limit? │
├───────╫────────────────────────────────────────────╫──────────────┼──────────────┼───────────┤"
                .to_string();
        let rows = self
            .best_position
            .iter()
            .enumerate()
            .map(|(i, xi)| {
                let (lower, upper, at_limit) = self.bounds.as_ref().map_or(
                    (Float::NEG_INFINITY, Float::INFINITY, false),
                    |bounds| {
                        (
                            bounds.lower()[i],
                            bounds.upper()[i],
                            bounds.at_bound(i, *xi),
                        )
                    },
                );
                format!(
                    "│ {:>5} ║ {:>+12.8E}                             ║ {:>+12.3E} │ {:>+12.3E} │ {:^9} │",
                    i,
                    xi,
                    lower,
                    upper,
                    if at_limit { "yes" } else { "" }
                )
            })
            .collect::<Vec<_>>();
        let bottom = "└───────╨────────────────────────────────────────────╨──────────────┴──────────────┴───────────┘".to_string();
        let out = [title, status, message, header, rows.join("\n"), bottom].join("\n");
        write!(f, "{}", out)
    }
}
