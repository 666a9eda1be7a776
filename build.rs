fn main() {
    // embuild only participates in cross builds for the ESP-IDF target.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
