fn main() {
    if let Err(err) = canvas_autoplace::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
