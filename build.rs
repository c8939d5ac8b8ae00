fn main() {
    // ESP-IDF build environment propagation; host builds have nothing to do.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
