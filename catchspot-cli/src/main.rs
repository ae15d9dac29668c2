//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = catchspot_cli::run() {
        eprintln!("catchspot: {err}");
        std::process::exit(1);
    }
}
