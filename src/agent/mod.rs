//! Agent loops - the core control-flow logic.
//!
//! Two loop styles over the same collaborators:
//! 1. [`ReActAgent`]: ask the model, parse a Thought/Action pair, dispatch the
//!    action, feed the observation back, repeat until `Finish` or the step
//!    budget runs out
//! 2. [`PlanAndSolveAgent`]: ask the model for an ordered subtask plan once,
//!    then resolve each subtask in sequence with a cumulative transcript

mod plan_solve;
mod prompt;
mod react;

pub use plan_solve::{Executor, PlanAndSolveAgent, Planner};
pub use react::ReActAgent;
