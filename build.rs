fn main() {
    // UniFFI scaffolding comes from the proc-macros in ffi.rs
    // (uniffi::setup_scaffolding!()), so there is no UDL file to compile.
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
