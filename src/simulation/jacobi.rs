use crate::{
    compute::{ComputeBackend, Kernel},
    field::{ChannelLayout, Field, Grid, SwappableField},
    geometry::{Coverage, Primitive},
};

/// Where a solve reads its fixed right-hand side from.
pub enum RightHandSide<'a> {
    /// The target's own front field, as it is when the solve starts.
    Front,

    /// Any other field with the target's layout.
    Field(&'a Field),
}

/// A fixed-iteration Jacobi relaxation over a [SwappableField].
///
/// The right-hand side is copied into a scratch field before the first
/// round, so the target's front field can serve as its own right-hand
/// side even though every round swaps the target.
pub struct JacobiSolver {
    rounds: usize,
    full_screen: Coverage,
    interior: Coverage,
    scalar_rhs: Field,
    vector_rhs: Field,
}

impl JacobiSolver {
    /// `iterations` is rounded down to an even count, and never below 2.
    /// An even count leaves the result in the field which was the front
    /// before the solve.
    pub fn new(grid: Grid, iterations: usize) -> Self {
        Self {
            rounds: (iterations & !1).max(2),
            full_screen: Primitive::full_screen().coverage(&grid),
            interior: Primitive::interior(&grid).coverage(&grid),
            scalar_rhs: Field::new(grid, ChannelLayout::Scalar, "jacobi rhs"),
            vector_rhs: Field::new(grid, ChannelLayout::Vector, "jacobi rhs"),
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Relax `target` towards the solution of the system described by
    /// `alpha` and `beta`:
    ///
    ///   x' = (x_left + x_right + x_below + x_above + alpha * b) / beta
    ///
    /// Only interior cells are written. There is no convergence check.
    pub fn solve(
        &mut self,
        backend: &dyn ComputeBackend,
        target: &mut SwappableField,
        rhs: RightHandSide<'_>,
        alpha: f32,
        beta: f32,
    ) {
        let scratch = match target.layout() {
            ChannelLayout::Scalar => &mut self.scalar_rhs,
            ChannelLayout::Vector => &mut self.vector_rhs,
        };

        {
            let source = match rhs {
                RightHandSide::Front => target.front(),
                RightHandSide::Field(field) => field,
            };
            debug_assert_eq!(source.layout(), scratch.layout());
            backend.dispatch(
                &Kernel::Copy,
                &self.full_screen,
                &[source],
                scratch,
            );
        }

        let kernel = Kernel::Jacobi { alpha, beta };
        for _ in 0..self.rounds {
            let (front, back) = target.split_mut();
            backend.dispatch(
                &kernel,
                &self.interior,
                &[front, &*scratch],
                back,
            );
            target.swap_buffers();
        }
    }
}
