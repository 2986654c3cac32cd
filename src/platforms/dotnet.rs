//! .NET (C#, F#, VB project files)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn dotnet() -> PlatformRules {
    PlatformRules::builder("dotnet", ".NET")
        .primary(&["*.csproj", "*.sln", "*.fsproj", "*.vbproj"])
        .secondary(&[
            "Program.cs",
            "Startup.cs",
            "global.json",
            "nuget.config",
            "NuGet.Config",
            "Directory.Build.props",
        ])
        .structure(&["Controllers", "Models", "Views", "Properties", "wwwroot"])
        .config(&[
            "appsettings.json",
            "appsettings.Development.json",
            "launchSettings.json",
            "web.config",
        ])
        .manifests(&["*.csproj", "*.fsproj", "*.vbproj"])
        .framework(
            FrameworkBuilder::new("Blazor")
                .package("Microsoft.NET.Sdk.BlazorWebAssembly")
                .package_containing("Microsoft.AspNetCore.Components")
                .path("*.razor"),
        )
        .framework(
            FrameworkBuilder::new("ASP.NET Core")
                .package("Microsoft.NET.Sdk.Web")
                .package_containing("Microsoft.AspNetCore")
                .source("Program.cs", r"WebApplication\.CreateBuilder"),
        )
        .framework(
            FrameworkBuilder::new("gRPC")
                .package("Grpc.AspNetCore")
                .path("*.proto"),
        )
        .framework(
            FrameworkBuilder::new("WPF")
                .path("App.xaml")
                .source("*.csproj", r"<UseWPF>\s*true\s*</UseWPF>"),
        )
        .framework(
            FrameworkBuilder::new("WinForms")
                .source("*.csproj", r"<UseWindowsForms>\s*true\s*</UseWindowsForms>"),
        )
        .content("*.cs", r"static\s+(async\s+)?(void|Task|int)\s+Main\s*\(")
        .default_build_tool("dotnet")
        .command(CommandRule::for_tool("dotnet").build("dotnet build").install("dotnet restore"))
        .build_required(true)
        .exclude_dirs(&[".vs"])
        .build()
        .expect("built-in dotnet rules are valid")
}
