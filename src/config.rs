/// How a `için` loop schedules its increment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForLoop {
    /// `init; while cond { body; incr }`
    #[default]
    Conventional,
    /// The increment also fires once right after the condition is first
    /// evaluated, before the body has run. Kept for programs written against
    /// that behaviour.
    EagerIncrement,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub for_loop: ForLoop,
    /// Upper bound on executed statements plus loop iterations. `None` runs
    /// until the program ends, however long that takes.
    pub step_limit: Option<u64>,
}

impl Config {
    pub fn with_for_loop(mut self, for_loop: ForLoop) -> Self {
        self.for_loop = for_loop;
        self
    }
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
