use std::process::Command;

fn main() {
    // Build date shown by `lenver version`
    let build_date = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    println!("cargo:rustc-env=LENVER_BUILD_DATE={}", build_date);

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=LENVER_RUSTC_VERSION={}", rustc_version);

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=LENVER_TARGET={}", target);

    println!("cargo:rerun-if-changed=Cargo.toml");
}
