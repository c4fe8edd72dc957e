fn main() {
    #[cfg(feature = "cli")]
    ykcmp::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("ykcmp: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
