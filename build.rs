fn main() {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .unwrap_or_default();
    let hash = hash.trim();

    if hash.is_empty() {
        println!("cargo:rustc-env=OSSINT_REVISION=unknown");
    } else {
        println!("cargo:rustc-env=OSSINT_REVISION={hash}");
    }

    // Rerun when the current commit changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(ref_path) = std::fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.strip_prefix("ref: ").map(|r| r.trim().to_string()))
    {
        println!("cargo:rerun-if-changed=.git/{ref_path}");
    }
}
