//! Marked function - same contract as `stdin_function`, but the success line
//! is written as `$%*%$Output:<json>` so callers can pick it out of any other
//! output the function produces.

use function_common::{Emit, RunnerConfig};

fn main() {
    let config = RunnerConfig::from_env().with_emit(Emit::Marked);
    function_common::run_with(config, stdin_function::handle);
}
