//! Java (Maven and Gradle)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn java() -> PlatformRules {
    PlatformRules::builder("java", "Java")
        .primary(&["pom.xml", "build.gradle", "build.gradle.kts"])
        .secondary(&["mvnw", "mvnw.cmd", "gradlew", "gradlew.bat", "settings.gradle", "settings.gradle.kts"])
        .structure(&["src/main/java", "src/main/resources", "src/test/java", "src/main/webapp"])
        .config(&["application.properties", "application.yml", "application.yaml"])
        .manifests(&["pom.xml", "build.gradle", "build.gradle.kts"])
        .framework(
            FrameworkBuilder::new("Spring Boot")
                .package_containing("org.springframework.boot:")
                .package_containing("spring-boot-starter")
                .source("*.java", r"@SpringBootApplication\b"),
        )
        .framework(
            FrameworkBuilder::new("Spring")
                .package_containing("org.springframework:")
                .source("*.java", r"import\s+org\.springframework\."),
        )
        .framework(
            FrameworkBuilder::new("Quarkus")
                .package_containing("io.quarkus:")
                .source("*.java", r"import\s+io\.quarkus\."),
        )
        .framework(
            FrameworkBuilder::new("Micronaut")
                .package_containing("io.micronaut:")
                .package_containing("io.micronaut.application")
                .source("*.java", r"import\s+io\.micronaut\."),
        )
        .framework(
            FrameworkBuilder::new("Jakarta EE")
                .package_containing("jakarta.platform:")
                .package_containing("jakarta.servlet:")
                .path("src/main/resources/META-INF/persistence.xml")
                .path("src/main/webapp/WEB-INF/beans.xml")
                .source("*.java", r"import\s+jakarta\.(servlet|ws\.rs|enterprise)\."),
        )
        .content("*.java", r"(?m)^\s*public\s+static\s+void\s+main\s*\(")
        .build_tool("pom.xml", "Maven")
        .build_tool("build.gradle", "Gradle")
        .build_tool("build.gradle.kts", "Gradle")
        .command(CommandRule::for_tool("Maven").build("mvn clean package").install("mvn dependency:go-offline"))
        .command(CommandRule::for_tool("Gradle").build("gradle build").install("gradle dependencies"))
        .build_required(true)
        .exclude_dirs(&[".gradle", ".mvn"])
        .build()
        .expect("built-in java rules are valid")
}
