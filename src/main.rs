/// Binary entrypoint for the `nanoid-cli` executable.
///
/// All behavior lives in the `nanoid_cli` library so tests can drive it
/// without spawning the binary.
fn main() {
    nanoid_cli::run();
}
