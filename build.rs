use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // Build marker reported by /health, to tell which binary is running.
    let build_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rustc-env=MESSENGER_BUILD_ID={}", build_id);
}
