//! Entry point for the `loadplan` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = loadplan_cli::run() {
        eprintln!("loadplan: {err}");
        std::process::exit(1);
    }
}
