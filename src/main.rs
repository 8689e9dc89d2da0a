//! drydock binary entry point.

use drydock::ui::Console;

fn main() {
    drydock::logging::init_logging();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut console = Console::stdio();
    let code = drydock::cli::run(argv, &mut console);
    std::process::exit(code);
}
