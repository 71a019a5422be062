fn main() {
    if let Err(err) = catmood::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
