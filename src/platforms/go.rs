//! Go modules

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn go() -> PlatformRules {
    PlatformRules::builder("go", "Go")
        .primary(&["go.mod"])
        .secondary(&["go.sum", "main.go"])
        .structure(&["cmd", "pkg", "internal"])
        .config(&["go.work", ".golangci.yml", ".golangci.yaml", ".goreleaser.yml"])
        .manifests(&["go.mod"])
        .framework(
            FrameworkBuilder::new("Gin")
                .package_containing("github.com/gin-gonic/gin")
                .source("*.go", r#""github\.com/gin-gonic/gin""#),
        )
        .framework(
            FrameworkBuilder::new("Echo")
                .package_containing("github.com/labstack/echo")
                .source("*.go", r#""github\.com/labstack/echo(/v\d+)?""#),
        )
        .framework(
            FrameworkBuilder::new("Fiber")
                .package_containing("github.com/gofiber/fiber")
                .source("*.go", r#""github\.com/gofiber/fiber(/v\d+)?""#),
        )
        .framework(
            FrameworkBuilder::new("Chi")
                .package_containing("github.com/go-chi/chi")
                .source("*.go", r#""github\.com/go-chi/chi(/v\d+)?""#),
        )
        .framework(FrameworkBuilder::new("Gorilla Mux").package_containing("github.com/gorilla/mux"))
        .framework(FrameworkBuilder::new("Beego").package_containing("github.com/beego/beego"))
        .framework(FrameworkBuilder::new("Buffalo").package_containing("github.com/gobuffalo/buffalo"))
        .framework(
            FrameworkBuilder::new("Standard Library")
                .source("*.go", r"http\.ListenAndServe\("),
        )
        .content("*.go", r"(?m)^package\s+main\b")
        .default_build_tool("go")
        .command(CommandRule::for_tool("go").build("go build ./...").install("go mod download"))
        .build_required(true)
        .build()
        .expect("built-in go rules are valid")
}
