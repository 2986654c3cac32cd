//! Ruby (Bundler)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn ruby() -> PlatformRules {
    PlatformRules::builder("ruby", "Ruby")
        .primary(&["Gemfile"])
        .secondary(&["Gemfile.lock", "Rakefile", "config.ru", ".ruby-version"])
        .structure(&["app/models", "app/controllers", "db/migrate", "config/initializers"])
        .config(&["config/application.rb", "config/environment.rb", "config/database.yml"])
        .manifests(&["Gemfile"])
        .framework(
            FrameworkBuilder::new("Ruby on Rails")
                .package("rails")
                .path("app/controllers")
                .source("*.rb", r"\bRails\.application\b|class\s+ApplicationController\b"),
        )
        .framework(
            FrameworkBuilder::new("Sinatra")
                .package("sinatra")
                .source("*.rb", r#"require\s+['"]sinatra(/base)?['"]"#),
        )
        .framework(FrameworkBuilder::new("Hanami").package("hanami"))
        .framework(FrameworkBuilder::new("Jekyll").package("jekyll").path("_config.yml"))
        .default_build_tool("bundler")
        .command(CommandRule::for_tool("bundler").install("bundle install"))
        .command(
            CommandRule::for_framework("Ruby on Rails")
                .with_tool("bundler")
                .build("bundle exec rake assets:precompile")
                .install("bundle install"),
        )
        .command(
            CommandRule::for_framework("Jekyll")
                .with_tool("bundler")
                .build("bundle exec jekyll build")
                .install("bundle install"),
        )
        .build_required(false)
        .exclude_dirs(&[".bundle"])
        .build()
        .expect("built-in ruby rules are valid")
}
