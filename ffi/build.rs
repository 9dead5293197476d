fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("MONDAY_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(std::path::Path::new(&crate_dir).join("include/monday.h"));
        }
        Err(err) => println!("cargo:warning=cbindgen failed: {err}"),
    }

    println!("cargo:rerun-if-changed=src");
}
