fn main() {
    // shown in the page footer
    let built = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    println!("cargo:rustc-env=BUILD_TIME={built}");

    println!("cargo:rerun-if-changed=build.rs");
    // content/ is embedded into the binary
    println!("cargo:rerun-if-changed=content");
}
