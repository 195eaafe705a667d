fn main() {
    if let Err(err) = unitsv::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
