//! End-to-end tests driving the axm binary against an isolated home.

mod common;

use common::TestEnv;

#[test]
fn test_help_and_version() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    Command::cargo_bin("axm")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("inspect"));

    Command::cargo_bin("axm")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("axm"));
}

#[cfg(unix)]
mod with_fake_home {
    use super::TestEnv;

    #[test]
    fn test_list_shows_curated_catalog() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["list"]).unwrap();

        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("composio"));
        assert!(output.stdout.contains("superpowers"));
        assert!(output.stdout.contains("mem"));
    }

    #[test]
    fn test_list_filters_by_kind() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["list", "--kind", "skill"]).unwrap();

        assert!(output.success);
        assert!(output.stdout.contains("superpowers"));
        assert!(!output.stdout.contains("composio"));
    }

    #[test]
    fn test_install_and_uninstall_round_trip() {
        let env = TestEnv::new().unwrap();

        let output = env.run_axm(&["install", "mem"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let config = env.read_config(".claude.json").unwrap();
        assert!(config.contains("\"mcpServers\""));
        assert!(config.contains("\"mem\""));
        assert!(config.contains("@claudemem/mcp-server"));

        let output = env.run_axm(&["list", "--installed"]).unwrap();
        assert!(output.stdout.contains("mem"));

        let output = env.run_axm(&["uninstall", "mem"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let config = env.read_config(".claude.json").unwrap();
        assert!(!config.contains("\"mem\""));

        // Removing again is a no-op, not an error
        let output = env.run_axm(&["uninstall", "mem"]).unwrap();
        assert!(output.success);
    }

    #[test]
    fn test_install_preserves_existing_settings() {
        let env = TestEnv::new().unwrap();
        env.write_config(".claude.json", "{\n  \"theme\": \"dark\",\n  \"model\": \"opus\"\n}")
            .unwrap();

        let output = env.run_axm(&["install", "mem"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let config = env.read_config(".claude.json").unwrap();
        assert!(config.contains("\"theme\": \"dark\""));
        assert!(config.contains("\"model\": \"opus\""));
        assert!(config.contains("\"mem\""));
    }

    #[test]
    fn test_install_into_codex_preserves_toml_comments() {
        let env = TestEnv::new().unwrap();
        env.write_config(".codex/config.toml", "# my codex settings\nmodel = \"o3\"\n")
            .unwrap();

        let output = env.run_axm(&["install", "mem", "--tool", "codex"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let config = env.read_config(".codex/config.toml").unwrap();
        assert!(config.contains("# my codex settings"));
        assert!(config.contains("model = \"o3\""));
        assert!(config.contains("[mcp_servers.mem]"));
        assert!(config.contains("command = \"npx\""));
    }

    #[test]
    fn test_install_unknown_key_fails() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["install", "does-not-exist"]).unwrap();

        assert!(!output.success);
        assert!(output.stderr.contains("does-not-exist"));
    }

    #[test]
    fn test_install_refuses_broken_config() {
        let env = TestEnv::new().unwrap();
        env.write_config(".claude.json", "{ not json").unwrap();

        let output = env.run_axm(&["install", "mem"]).unwrap();
        assert!(!output.success);

        // The broken file is left exactly as it was
        assert_eq!(env.read_config(".claude.json").unwrap(), "{ not json");
    }

    #[test]
    fn test_broken_config_does_not_hide_other_tools() {
        let env = TestEnv::new().unwrap();
        env.write_config(".claude.json", "{ broken").unwrap();
        env.run_axm(&["install", "mem", "--tool", "codex"]).unwrap();

        // The scan skips the unreadable Claude config but still reports
        // the Codex install
        let output = env.run_axm(&["list", "--installed"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("mem"));
    }

    #[test]
    fn test_plugin_add_edit_remove() {
        let env = TestEnv::new().unwrap();

        let output = env
            .run_axm(&[
                "plugin",
                "add",
                "my-server",
                "--url",
                "npx -y my-mcp-server",
                "--name",
                "My Server",
            ])
            .unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let store = env.read_config(".axm/plugins.json").unwrap();
        assert!(store.contains("\"my-server\""));
        assert!(store.contains("\"isCustom\": true"));

        let output = env.run_axm(&["list"]).unwrap();
        assert!(output.stdout.contains("my-server"));
        assert!(output.stdout.contains("(custom)"));

        let output =
            env.run_axm(&["plugin", "edit", "my-server", "--desc", "Does things"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);
        let store = env.read_config(".axm/plugins.json").unwrap();
        assert!(store.contains("Does things"));

        let output = env.run_axm(&["plugin", "remove", "my-server"]).unwrap();
        assert!(output.success);
        let output = env.run_axm(&["list"]).unwrap();
        assert!(!output.stdout.contains("my-server"));
    }

    #[test]
    fn test_custom_plugin_installs_from_url() {
        let env = TestEnv::new().unwrap();

        env.run_axm(&["plugin", "add", "my-server", "--url", "npx -y my-mcp-server"]).unwrap();
        let output = env.run_axm(&["install", "my-server", "--tool", "claude"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);

        let config = env.read_config(".claude.json").unwrap();
        assert!(config.contains("\"my-server\""));
        assert!(config.contains("\"command\": \"npx\""));
        assert!(config.contains("my-mcp-server"));
    }

    #[test]
    fn test_plugin_patch_overrides_curated_entry() {
        let env = TestEnv::new().unwrap();

        // Same key as a curated entry: acts as a patch, not a shadow
        env.run_axm(&["plugin", "add", "mem", "--name", "Renamed Mem"]).unwrap();

        let output = env.run_axm(&["list"]).unwrap();
        assert!(output.stdout.contains("Renamed Mem"));
        assert!(!output.stdout.contains("(custom)"));
    }

    #[test]
    fn test_status_reports_missing_configs() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["status"]).unwrap();

        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("Claude"));
        assert!(output.stdout.contains("Codex"));
        assert!(output.stdout.contains("no config file"));
    }

    #[test]
    fn test_status_lists_configured_servers() {
        let env = TestEnv::new().unwrap();
        env.run_axm(&["install", "mem"]).unwrap();

        let output = env.run_axm(&["status"]).unwrap();
        assert!(output.stdout.contains("mem"));
        assert!(output.stdout.contains("npx"));
    }

    #[test]
    fn test_status_tool_filter() {
        let env = TestEnv::new().unwrap();
        env.run_axm(&["install", "mem", "--tool", "codex"]).unwrap();

        let output = env.run_axm(&["status", "--tool", "codex"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("Codex"));
        assert!(output.stdout.contains("mem"));
        assert!(!output.stdout.contains("Claude"));
    }

    #[test]
    fn test_skills_list_empty() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["skills", "list"]).unwrap();

        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("No skills installed"));
    }

    #[test]
    fn test_skills_list_shows_metadata() {
        let env = TestEnv::new().unwrap();
        let skill_dir = env.home().join(".agents/skills/helper");
        std::fs::create_dir_all(&skill_dir).unwrap();
        std::fs::write(
            skill_dir.join("SKILL.md"),
            "---\ndescription: Helps with things\nversion: \"1.2.0\"\n---\n# Helper\n",
        )
        .unwrap();

        let output = env.run_axm(&["skills", "list"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("helper"));
        assert!(output.stdout.contains("Helps with things"));
        assert!(output.stdout.contains("v1.2.0"));
    }

    #[test]
    fn test_skills_remove() {
        let env = TestEnv::new().unwrap();
        let skill_dir = env.home().join(".agents/skills/helper");
        std::fs::create_dir_all(&skill_dir).unwrap();
        std::fs::write(skill_dir.join("SKILL.md"), "# Helper\n").unwrap();

        let output = env.run_axm(&["skills", "remove", "helper"]).unwrap();
        assert!(output.success, "stderr: {}", output.stderr);
        assert!(!skill_dir.exists());

        let output = env.run_axm(&["skills", "remove", "helper"]).unwrap();
        assert!(!output.success);
    }

    #[test]
    fn test_docs_print_url() {
        let env = TestEnv::new().unwrap();
        let output = env.run_axm(&["docs", "composio", "--print"]).unwrap();

        assert!(output.success, "stderr: {}", output.stderr);
        assert!(output.stdout.contains("https://github.com/ComposioHQ/composio"));
    }

    #[test]
    fn test_installed_skill_counts_for_catalog_entry() {
        let env = TestEnv::new().unwrap();
        // A skill cloned under its repo name, before being cataloged
        let skill_dir = env.home().join(".agents/skills/superpowers");
        std::fs::create_dir_all(&skill_dir).unwrap();

        let output = env.run_axm(&["list", "--installed"]).unwrap();
        assert!(output.stdout.contains("superpowers"));
    }
}
