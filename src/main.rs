//! labtrack main entrypoint.

use labtrack::run;
use labtrack::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
