fn main() {
    if let Err(err) = myograph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
