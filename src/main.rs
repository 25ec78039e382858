fn main() {
    blockforge::run_cli();
}
