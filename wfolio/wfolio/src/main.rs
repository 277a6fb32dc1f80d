fn main() {
    wfolio::run();
}
