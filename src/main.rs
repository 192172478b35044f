fn main() {
    chess_core::uci::run_uci_loop();
}
