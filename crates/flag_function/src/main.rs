//! Flag-mode function - `--input <value|->` plus an optional `--param2`.

use std::io;

use clap::Parser;
use flag_function::{FlagArgs, FlagOutput};
use function_common::RunnerConfig;

fn main() {
    let config = RunnerConfig::from_env();

    let args = match FlagArgs::try_parse() {
        Ok(args) => args,
        // --help and --version print their text and exit 0.
        Err(e) if flag_function::is_informational(&e) => e.exit(),
        Err(e) => {
            function_common::finish::<FlagOutput>(Err(flag_function::usage_error(&e)), &config)
        }
    };

    config.logger().debug(format!("{args:?}"));
    let outcome = flag_function::execute(&args, io::stdin().lock());
    function_common::finish(outcome, &config);
}
