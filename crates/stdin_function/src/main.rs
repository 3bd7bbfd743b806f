//! Stdin-object function - reads `{"requiredParam": ..., "optionalParam": ...}`
//! from stdin and echoes it back.

fn main() {
    function_common::run(stdin_function::handle);
}
