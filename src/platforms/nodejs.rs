//! Node.js (npm, Yarn and pnpm)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

/// Matches a dependency key in a raw `package.json` excerpt
fn manifest_key(package: &str) -> String {
    format!(r#""{}"\s*:"#, regex::escape(package))
}

pub fn nodejs() -> PlatformRules {
    let mut builder = PlatformRules::builder("nodejs", "Node.js")
        .primary(&["package.json"])
        .secondary(&[
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            ".npmrc",
            ".yarnrc",
            ".yarnrc.yml",
            "pnpm-workspace.yaml",
            ".nvmrc",
        ])
        .structure(&["pages", "components", "src/components", "src/pages"])
        .config(&[
            "tsconfig.json",
            "webpack.config.js",
            "vite.config.js",
            "vite.config.ts",
            "next.config.js",
            "next.config.mjs",
            "vue.config.js",
            "nuxt.config.js",
            "nuxt.config.ts",
            ".babelrc",
            "babel.config.js",
            "jest.config.js",
        ])
        .manifests(&["package.json"])
        // Meta-frameworks come before the libraries they are built on so they
        // win ties on equal evidence.
        .framework(
            FrameworkBuilder::new("Next.js")
                .package("next")
                .source("package.json", &manifest_key("next"))
                .source("*.jsx", r#"from\s+['"]next/"#)
                .source("*.tsx", r#"from\s+['"]next/"#),
        )
        .framework(
            FrameworkBuilder::new("Nuxt.js")
                .package("nuxt")
                .source("package.json", &manifest_key("nuxt"))
                .path("nuxt.config.js")
                .path("nuxt.config.ts"),
        )
        .framework(
            FrameworkBuilder::new("Gatsby")
                .package("gatsby")
                .source("package.json", &manifest_key("gatsby"))
                .path("gatsby-config.js"),
        )
        .framework(
            FrameworkBuilder::new("NestJS")
                .package("@nestjs/core")
                .source("package.json", &manifest_key("@nestjs/core"))
                .source("*.ts", r#"from\s+['"]@nestjs/"#),
        )
        .framework(
            FrameworkBuilder::new("Angular")
                .package("@angular/core")
                .source("package.json", &manifest_key("@angular/core"))
                .path("angular.json")
                .source("*.ts", r#"from\s+['"]@angular/core['"]"#),
        )
        .framework(
            FrameworkBuilder::new("React")
                .package("react")
                .source("package.json", &manifest_key("react"))
                .source("*.jsx", r#"(import\s+React\b|from\s+['"]react['"])"#)
                .source("*.tsx", r#"(import\s+React\b|from\s+['"]react['"])"#),
        )
        .framework(
            FrameworkBuilder::new("Vue.js")
                .package("vue")
                .source("package.json", &manifest_key("vue"))
                .source("*.vue", r"<template>"),
        )
        .framework(
            FrameworkBuilder::new("Svelte")
                .package("svelte")
                .source("package.json", &manifest_key("svelte"))
                .path("svelte.config.js")
                .source("*.svelte", r"<script"),
        )
        .framework(
            FrameworkBuilder::new("Express")
                .package("express")
                .source("package.json", &manifest_key("express"))
                .source("*.js", r#"require\(\s*['"]express['"]\s*\)"#)
                .source("*.ts", r#"from\s+['"]express['"]"#),
        )
        .framework(
            FrameworkBuilder::new("Fastify")
                .package("fastify")
                .source("package.json", &manifest_key("fastify"))
                .source("*.js", r#"require\(\s*['"]fastify['"]\s*\)"#),
        )
        .framework(FrameworkBuilder::new("Koa").package("koa"))
        .framework(FrameworkBuilder::new("Electron").package("electron"))
        .build_tool("pnpm-lock.yaml", "pnpm")
        .build_tool("yarn.lock", "yarn")
        .build_tool("package-lock.json", "npm")
        .default_build_tool("npm")
        .build_required(true)
        .exclude_dirs(&[".next", ".nuxt", ".turbo", "coverage"]);

    for (tool, install, build) in [
        ("npm", "npm install", "npm run build"),
        ("yarn", "yarn install", "yarn build"),
        ("pnpm", "pnpm install", "pnpm build"),
    ] {
        builder = builder.command(CommandRule::for_tool(tool).build(build).install(install));
        // Server frameworks run straight from source.
        for server in ["Express", "Fastify", "Koa"] {
            builder = builder.command(CommandRule::for_framework(server).with_tool(tool).install(install));
        }
    }

    builder.build().expect("built-in nodejs rules are valid")
}
