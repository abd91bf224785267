// File: crates/surface-skia-gl/build.rs
// Summary: Links the extra system libraries Skia's prebuilt binaries need on the target OS.

fn main() {
    // Build scripts run on the host, so read the target from cargo rather than cfg!.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        // RegOpenKeyExW, RegQueryInfoKeyW (ICU)
        "windows" => println!("cargo:rustc-link-lib=advapi32"),
        // eglGetProcAddress lookups resolve against these on Android.
        "android" => {
            println!("cargo:rustc-link-lib=EGL");
            println!("cargo:rustc-link-lib=GLESv2");
        }
        _ => {}
    }
    println!("cargo:rerun-if-changed=build.rs");
}
