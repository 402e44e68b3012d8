//! Evaluation counters for `--profile`.
//!
//! Stored as `Option<EvalCounters>` on the machine. When `None`, every
//! increment is skipped.

/// Performance counters collected during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub items_dispatched: u64,
    pub applications: u64,
    pub recursion_unrollings: u64,
    pub branches_taken: u64,
    pub max_frame_depth: usize,
}

impl EvalCounters {
    #[inline]
    pub fn count_item(&mut self) {
        self.items_dispatched = self.items_dispatched.wrapping_add(1);
    }

    /// A closure application (a new frame).
    #[inline]
    pub fn count_application(&mut self) {
        self.applications = self.applications.wrapping_add(1);
    }

    /// A recursion token unrolled one step.
    #[inline]
    pub fn count_unrolling(&mut self) {
        self.recursion_unrollings = self.recursion_unrollings.wrapping_add(1);
    }

    /// A conditional that appended one of its branches.
    #[inline]
    pub fn count_branch(&mut self) {
        self.branches_taken = self.branches_taken.wrapping_add(1);
    }

    #[inline]
    pub fn observe_depth(&mut self, depth: usize) {
        self.max_frame_depth = self.max_frame_depth.max(depth);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Control items dispatched: {}\n  \
             Closure applications:     {}\n  \
             Recursion unrollings:     {}\n  \
             Branches taken:           {}\n  \
             Deepest frame stack:      {}",
            self.items_dispatched,
            self.applications,
            self.recursion_unrollings,
            self.branches_taken,
            self.max_frame_depth,
        )
    }
}
