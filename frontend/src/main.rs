fn main() {
    mankind_frontend::run();
}
