//! PHP (Composer)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn php() -> PlatformRules {
    PlatformRules::builder("php", "PHP")
        .primary(&["composer.json"])
        .secondary(&["composer.lock", "index.php", "artisan", "wp-config.php"])
        .structure(&["app/Http", "app/Console", "bootstrap/cache"])
        .config(&[".env", "config.php", "phpunit.xml", "php.ini"])
        .manifests(&["composer.json"])
        .framework(
            FrameworkBuilder::new("Laravel")
                .package("laravel/framework")
                .path("artisan")
                .path("app/Http")
                .source("*.php", r"\buse\s+Illuminate\\"),
        )
        .framework(
            FrameworkBuilder::new("Symfony")
                .package("symfony/framework-bundle")
                .package("symfony/symfony")
                .path("config/bundles.php")
                .source("*.php", r"\buse\s+Symfony\\"),
        )
        .framework(
            FrameworkBuilder::new("WordPress")
                .path("wp-config.php")
                .path("wp-content")
                .path("wp-includes"),
        )
        .framework(
            FrameworkBuilder::new("CodeIgniter")
                .package("codeigniter4/framework")
                .path("system/core"),
        )
        .framework(FrameworkBuilder::new("CakePHP").package("cakephp/cakephp"))
        .framework(FrameworkBuilder::new("Yii").package("yiisoft/yii2"))
        .content("*.php", r"<\?php")
        .default_build_tool("composer")
        .command(CommandRule::for_tool("composer").install("composer install --no-dev"))
        .build_required(false)
        .build()
        .expect("built-in php rules are valid")
}
