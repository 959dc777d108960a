use crate::models::{Ecosystem, FileType};

/// Filenames recognized for one ecosystem.
///
/// The table is defined once at startup and never mutated; detection and
/// sniffing only read it.
#[derive(Debug)]
pub struct EcosystemDefinition {
    pub ecosystem: Ecosystem,
    /// Manifests declaring direct dependencies.
    pub primary: &'static [&'static str],
    /// Lockfiles pinning resolved versions.
    pub lockfiles: &'static [&'static str],
    /// Ancillary configuration files.
    pub config: &'static [&'static str],
}

/// The full registry, one entry per supported ecosystem.
pub const REGISTRY: &[EcosystemDefinition] = &[
    EcosystemDefinition {
        ecosystem: Ecosystem::Npm,
        primary: &["package.json"],
        lockfiles: &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"],
        config: &[".npmrc"],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Pypi,
        primary: &["requirements.txt", "pyproject.toml", "setup.py", "Pipfile"],
        lockfiles: &["Pipfile.lock", "poetry.lock"],
        config: &["setup.cfg", "tox.ini"],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Maven,
        primary: &["pom.xml", "build.gradle", "build.gradle.kts"],
        lockfiles: &["gradle.lockfile"],
        config: &["settings.gradle", "settings.gradle.kts", "gradle.properties"],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Nuget,
        // .csproj / .fsproj / .vbproj / .sln are named after the project,
        // so they are matched by extension in the detector instead.
        primary: &["packages.config"],
        lockfiles: &["packages.lock.json"],
        config: &["nuget.config", "NuGet.Config"],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Rubygems,
        primary: &["Gemfile", "gems.rb"],
        lockfiles: &["Gemfile.lock", "gems.locked"],
        config: &[".ruby-version"],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Composer,
        primary: &["composer.json"],
        lockfiles: &["composer.lock"],
        config: &[],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Go,
        primary: &["go.mod"],
        lockfiles: &["go.sum"],
        config: &[],
    },
    EcosystemDefinition {
        ecosystem: Ecosystem::Cargo,
        primary: &["Cargo.toml"],
        lockfiles: &["Cargo.lock"],
        config: &["rust-toolchain.toml"],
    },
];

/// Project-file extensions that always classify as NuGet primaries.
pub const NUGET_PROJECT_EXTENSIONS: &[&str] = &["csproj", "fsproj", "vbproj", "sln"];

/// Classify a filename against the registry.
pub fn classify_filename(file_name: &str) -> Option<(Ecosystem, FileType)> {
    for def in REGISTRY {
        if def.primary.contains(&file_name) {
            return Some((def.ecosystem, FileType::Primary));
        }
        if def.lockfiles.contains(&file_name) {
            return Some((def.ecosystem, FileType::Lockfile));
        }
        if def.config.contains(&file_name) {
            return Some((def.ecosystem, FileType::Config));
        }
    }
    None
}

/// True when the filename carries a NuGet project-file extension.
pub fn is_nuget_project_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| NUGET_PROJECT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_ecosystems() {
        for eco in Ecosystem::ALL {
            assert!(
                REGISTRY.iter().any(|d| d.ecosystem == eco),
                "missing registry entry for {eco}"
            );
        }
    }

    #[test]
    fn test_classify_known_filenames() {
        assert_eq!(
            classify_filename("package.json"),
            Some((Ecosystem::Npm, FileType::Primary))
        );
        assert_eq!(
            classify_filename("Cargo.lock"),
            Some((Ecosystem::Cargo, FileType::Lockfile))
        );
        assert_eq!(
            classify_filename(".npmrc"),
            Some((Ecosystem::Npm, FileType::Config))
        );
        assert_eq!(classify_filename("README.md"), None);
    }

    #[test]
    fn test_nuget_project_extensions() {
        assert!(is_nuget_project_file("MyApp.csproj"));
        assert!(is_nuget_project_file("Solution.sln"));
        assert!(!is_nuget_project_file("csproj"));
        assert!(!is_nuget_project_file("main.rs"));
    }
}
