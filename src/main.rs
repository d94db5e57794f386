fn main() {
    homelab::app::cli::run();
}
