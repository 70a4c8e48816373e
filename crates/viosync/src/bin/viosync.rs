fn main() {
    if let Err(err) = viosync::run() {
        eprintln!("{}", viosync::format_error(&err));
        std::process::exit(1);
    }
}
