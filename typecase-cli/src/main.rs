//! Binary entrypoint for typecase-cli (made by Kotype)

fn main() {
    if let Err(err) = typecase_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
