//! Skill management: directory-based extensions cloned from git.
//!
//! A skill is a directory under a scope's skills root (for example
//! `~/.agents/skills/superpowers`). Skills are installed by cloning their
//! repository and uninstalled by deleting the directory; no manifest is
//! kept, the filesystem is the source of truth.
//!
//! # Scopes
//!
//! Each tool reads its own skills directory, and every tool additionally
//! shares the `agents` scope (`~/.agents/skills`), which is where catalog
//! installs go. `scope_dir` maps a scope name to its root.
//!
//! # Metadata
//!
//! Skills describe themselves loosely. Description resolution probes, in
//! order: `SKILL.md` (YAML frontmatter when present, else the first
//! non-heading line), `AGENTS.md`, `README.md`, then the `description`
//! field of `package.json`. Skills with none of these get a fixed marker
//! string so listings stay uniform.

use crate::core::AxmError;
use crate::tools::{SHARED_SKILLS_PATH, find_tool};
use crate::utils::fs::{ensure_dir, read_json_file};
use crate::utils::platform::{command_exists, get_git_command, resolve_path};
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker used when a skill ships no recognizable metadata file.
pub const NO_METADATA_MARKER: &str = "No metadata file found (SKILL.md, AGENTS.md, README.md)";

/// Metadata files probed for a description, in priority order.
const METADATA_CANDIDATES: &[&str] = &["SKILL.md", "AGENTS.md", "README.md"];

/// An installed skill directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    /// Directory name, which is the skill's identity
    pub name: String,
    /// Absolute path of the skill directory
    pub path: PathBuf,
}

/// Metadata resolved from a skill directory's files.
#[derive(Debug, Clone, Default)]
pub struct SkillMetadata {
    /// One-line description
    pub description: String,
    /// Version from SKILL.md frontmatter, when present
    pub version: Option<String>,
    /// Author from SKILL.md frontmatter, when present
    pub author: Option<String>,
}

/// YAML frontmatter of a SKILL.md file. All fields optional: skills in the
/// wild are far sloppier than the format suggests.
#[derive(Debug, Clone, Deserialize)]
struct SkillFrontmatter {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    description: Option<String>,
}

/// Resolve a scope name to its skills root directory.
///
/// `agents` (the default scope) maps to the shared directory; any tool id
/// maps to that tool's skills directory. Unknown scopes are an error.
pub fn scope_dir(scope: &str) -> Result<PathBuf> {
    if scope.eq_ignore_ascii_case("agents") {
        return resolve_path(SHARED_SKILLS_PATH);
    }
    match find_tool(scope) {
        Some(tool) => tool.skills_dir(),
        None => Err(AxmError::ToolNotFound { name: scope.to_string() }.into()),
    }
}

/// List the skills installed under a root directory.
///
/// An absent root means no skills. Non-directory entries are ignored.
pub fn list_skills(root: &Path) -> Result<Vec<SkillInfo>> {
    let mut skills = Vec::new();

    if !root.exists() {
        return Ok(skills);
    }

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir()
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            skills.push(SkillInfo { name: name.to_string(), path });
        }
    }

    skills.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(skills)
}

/// Resolve the metadata of a skill directory.
///
/// Never fails; a skill with no readable metadata gets the
/// [`NO_METADATA_MARKER`] description.
#[must_use]
pub fn resolve_metadata(skill_dir: &Path) -> SkillMetadata {
    for candidate in METADATA_CANDIDATES {
        let path = skill_dir.join(candidate);
        let Ok(content) = std::fs::read_to_string(&path) else { continue };

        if *candidate == "SKILL.md"
            && let Some(meta) = from_frontmatter(&content)
        {
            return meta;
        }

        if let Some(line) = first_meaningful_line(&content) {
            return SkillMetadata { description: line, ..Default::default() };
        }
    }

    // Last resort: package.json description
    if let Ok(pkg) = read_json_file::<PackageJson>(&skill_dir.join("package.json"))
        && let Some(description) = pkg.description.filter(|d| !d.trim().is_empty())
    {
        return SkillMetadata { description, ..Default::default() };
    }

    SkillMetadata { description: NO_METADATA_MARKER.to_string(), ..Default::default() }
}

/// Parse SKILL.md YAML frontmatter, if the file carries any.
fn from_frontmatter(content: &str) -> Option<SkillMetadata> {
    if !content.trim_start().starts_with("---") {
        return None;
    }

    let parts: Vec<&str> = content.splitn(3, "---").collect();
    if parts.len() < 3 {
        return None;
    }

    let frontmatter: SkillFrontmatter = serde_yaml::from_str(parts[1].trim()).ok()?;
    let description = frontmatter
        .description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| first_meaningful_line(parts[2]))?;

    Some(SkillMetadata {
        description,
        version: frontmatter.version,
        author: frontmatter.author,
    })
}

/// First non-empty line that is not a markdown heading.
fn first_meaningful_line(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
}

/// Clone a skill repository into `root/name`.
///
/// Fails if the target directory already exists or the clone fails.
pub async fn install_skill(url: &str, name: &str, root: &Path) -> Result<PathBuf> {
    ensure_dir(root)?;

    let target = root.join(name);
    if target.exists() {
        return Err(AxmError::SkillAlreadyInstalled {
            name: name.to_string(),
            path: target.display().to_string(),
        }
        .into());
    }

    let git = get_git_command();
    if !command_exists(git) {
        return Err(AxmError::GitNotFound.into());
    }

    debug!(url, target = %target.display(), "cloning skill");

    let output = tokio::process::Command::new(git)
        .arg("clone")
        .arg(url)
        .arg(&target)
        .output()
        .await
        .map_err(|e| AxmError::GitCloneFailed { url: url.to_string(), reason: e.to_string() })?;

    if !output.status.success() {
        return Err(AxmError::GitCloneFailed {
            url: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(target)
}

/// Derive a skill directory name from a clone URL: `owner-repo`, with the
/// `.git` suffix stripped.
#[must_use]
pub fn folder_name_from_url(url: &str) -> String {
    let parts: Vec<&str> = url.trim_end_matches(".git").split('/').collect();
    if parts.len() >= 2 {
        format!("{}-{}", parts[parts.len() - 2], parts[parts.len() - 1])
    } else {
        url.trim_end_matches(".git").to_string()
    }
}

/// Remove an installed skill directory.
pub fn remove_skill(skill: &SkillInfo) -> Result<()> {
    if !skill.path.exists() {
        return Err(AxmError::SkillNotFound { name: skill.name.clone() }.into());
    }
    std::fs::remove_dir_all(&skill.path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_skills_absent_root() {
        let temp = tempfile::tempdir().unwrap();
        let skills = list_skills(&temp.path().join("missing")).unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn test_list_skills_only_directories() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("beta")).unwrap();
        std::fs::create_dir(temp.path().join("alpha")).unwrap();
        std::fs::write(temp.path().join("stray.md"), "x").unwrap();

        let skills = list_skills(temp.path()).unwrap();
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_metadata_from_skill_md_frontmatter() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("SKILL.md"),
            "---\nname: demo\ndescription: Does demo things\nversion: 1.2.0\nauthor: someone\n---\n# Demo\n",
        )
        .unwrap();

        let meta = resolve_metadata(temp.path());
        assert_eq!(meta.description, "Does demo things");
        assert_eq!(meta.version.as_deref(), Some("1.2.0"));
        assert_eq!(meta.author.as_deref(), Some("someone"));
    }

    #[test]
    fn test_metadata_from_skill_md_body() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("SKILL.md"), "# Title\n\nFirst real line.\nSecond.\n")
            .unwrap();

        let meta = resolve_metadata(temp.path());
        assert_eq!(meta.description, "First real line.");
        assert!(meta.version.is_none());
    }

    #[test]
    fn test_metadata_candidate_order() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("README.md"), "Readme line\n").unwrap();
        std::fs::write(temp.path().join("AGENTS.md"), "Agents line\n").unwrap();

        // AGENTS.md wins over README.md
        assert_eq!(resolve_metadata(temp.path()).description, "Agents line");
    }

    #[test]
    fn test_metadata_package_json_fallback() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"description": "From pkg"}"#)
            .unwrap();

        assert_eq!(resolve_metadata(temp.path()).description, "From pkg");
    }

    #[test]
    fn test_metadata_marker_when_nothing_found() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(resolve_metadata(temp.path()).description, NO_METADATA_MARKER);
    }

    #[test]
    fn test_folder_name_from_url() {
        assert_eq!(
            folder_name_from_url("https://github.com/superpowers/superpowers.git"),
            "superpowers-superpowers"
        );
        assert_eq!(folder_name_from_url("weird"), "weird");
    }

    #[test]
    fn test_remove_skill() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("demo");
        std::fs::create_dir(&dir).unwrap();

        let skill = SkillInfo { name: "demo".to_string(), path: dir.clone() };
        remove_skill(&skill).unwrap();
        assert!(!dir.exists());

        // Second removal reports SkillNotFound
        let err = remove_skill(&skill).unwrap_err();
        assert!(matches!(err.downcast_ref::<AxmError>(), Some(AxmError::SkillNotFound { .. })));
    }

    #[tokio::test]
    async fn test_install_skill_rejects_existing_target() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("demo")).unwrap();

        let err = install_skill("https://example.com/demo.git", "demo", temp.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AxmError>(),
            Some(AxmError::SkillAlreadyInstalled { .. })
        ));
    }
}
