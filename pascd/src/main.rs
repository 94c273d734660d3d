fn main() {
    if let Err(e) = pascd::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
