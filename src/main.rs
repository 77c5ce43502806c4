fn main() {
    if let Err(err) = clipscout_lib::run() {
        eprintln!("clipscout: {err:#}");
        std::process::exit(1);
    }
}
