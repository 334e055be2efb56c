fn main() {
    if let Err(err) = pipegraph::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
