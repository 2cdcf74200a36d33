//! Command line front end for glyph math on UFO sources.

use glyphmath::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::runner::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
