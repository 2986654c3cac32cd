//! Rust (Cargo)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn rust() -> PlatformRules {
    PlatformRules::builder("rust", "Rust")
        .primary(&["Cargo.toml"])
        .secondary(&["Cargo.lock", "src/main.rs", "src/lib.rs", "build.rs"])
        .structure(&["src/bin", "benches"])
        .config(&["rust-toolchain", "rust-toolchain.toml", ".cargo/config.toml", "rustfmt.toml", "clippy.toml"])
        .manifests(&["Cargo.toml"])
        .framework(
            FrameworkBuilder::new("Actix")
                .package("actix-web")
                .source("*.rs", r"\buse\s+actix_web\b"),
        )
        .framework(
            FrameworkBuilder::new("Axum")
                .package("axum")
                .source("*.rs", r"\buse\s+axum\b"),
        )
        .framework(
            FrameworkBuilder::new("Rocket")
                .package("rocket")
                .source("*.rs", r"#\[(macro_use\s+extern\s+crate\s+rocket|launch)\]"),
        )
        .framework(
            FrameworkBuilder::new("Warp")
                .package("warp")
                .source("*.rs", r"\buse\s+warp\b"),
        )
        .framework(
            FrameworkBuilder::new("Tokio")
                .package("tokio")
                .source("*.rs", r"#\[tokio::main\]"),
        )
        .content("*.rs", r"(?m)^\s*(pub\s+)?(async\s+)?fn\s+main\s*\(")
        .default_build_tool("cargo")
        .command(CommandRule::for_tool("cargo").build("cargo build --release").install("cargo fetch"))
        .build_required(true)
        .build()
        .expect("built-in rust rules are valid")
}
