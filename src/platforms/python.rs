//! Python (pip, Poetry and Pipenv)

use super::{CommandRule, FrameworkBuilder, PlatformRules};

pub fn python() -> PlatformRules {
    PlatformRules::builder("python", "Python")
        .primary(&["requirements.txt", "pyproject.toml", "setup.py", "Pipfile", "poetry.lock"])
        .secondary(&[
            "manage.py",
            "app.py",
            "main.py",
            "wsgi.py",
            "__init__.py",
            "Pipfile.lock",
            "requirements-dev.txt",
        ])
        .structure(&["migrations", "templatetags", "notebooks"])
        .config(&["setup.cfg", "tox.ini", "pytest.ini", ".flake8", "mypy.ini", ".python-version"])
        .manifests(&["requirements.txt", "requirements-dev.txt", "pyproject.toml", "Pipfile"])
        .framework(
            FrameworkBuilder::new("Django")
                .package("django")
                .path("manage.py")
                .source("*.py", r"(?m)^\s*(from|import)\s+django\b"),
        )
        .framework(
            FrameworkBuilder::new("FastAPI")
                .package("fastapi")
                .source("*.py", r"(?m)^\s*from\s+fastapi\s+import\b|\bFastAPI\(\)"),
        )
        .framework(
            FrameworkBuilder::new("Flask")
                .package("flask")
                .source("*.py", r"(?m)^\s*from\s+flask\s+import\b|\bFlask\(__name__\)"),
        )
        .framework(
            FrameworkBuilder::new("Tornado")
                .package("tornado")
                .source("*.py", r"(?m)^\s*(from|import)\s+tornado\b"),
        )
        .framework(FrameworkBuilder::new("Pyramid").package("pyramid"))
        .framework(FrameworkBuilder::new("Bottle").package("bottle"))
        .framework(
            FrameworkBuilder::new("Streamlit")
                .package("streamlit")
                .source("*.py", r"(?m)^\s*import\s+streamlit\b"),
        )
        .framework(
            FrameworkBuilder::new("Celery")
                .package("celery")
                .source("*.py", r"(?m)^\s*from\s+celery\s+import\b"),
        )
        .framework(
            FrameworkBuilder::new("Scrapy")
                .package("scrapy")
                .path("scrapy.cfg"),
        )
        .framework(FrameworkBuilder::new("Jupyter").package("jupyter").path("*.ipynb"))
        .content("*.py", r#"(?m)^if\s+__name__\s*==\s*['"]__main__['"]\s*:"#)
        .build_tool("poetry.lock", "poetry")
        .build_tool("Pipfile", "pipenv")
        .build_tool("requirements.txt", "pip")
        .build_tool("pyproject.toml", "pip")
        .build_tool("setup.py", "pip")
        .default_build_tool("pip")
        .command(CommandRule::platform_default().install("pip install -r requirements.txt"))
        .command(CommandRule::for_tool("poetry").install("poetry install"))
        .command(CommandRule::for_tool("pipenv").install("pipenv install"))
        .build_required(false)
        .exclude_dirs(&[".tox", ".mypy_cache", ".pytest_cache", "site-packages", ".eggs"])
        .build()
        .expect("built-in python rules are valid")
}
