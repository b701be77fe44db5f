fn main() {
    if let Err(err) = rog_codegen::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
