// tests/integration_test.rs
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gitflow-changelog"))
}

#[test]
fn test_gitflow_changelog_help() {
    let output = binary()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("gitflow-changelog"));
    assert!(stdout.contains("Compute the next version and changelog"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_gitflow_changelog_version() {
    let output = binary()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_exits_with_config_code() {
    let output = binary()
        .args(["--config", "/nonexistent/gitflow-changelog.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Configuration error"));
}

mod git_tests {
    use super::*;
    use git2::{Oid, Repository};
    use gitflow_changelog::cli::{ReleaseAction, Workflow, WorkflowArgs};
    use gitflow_changelog::config::Config;
    use gitflow_changelog::git::Git2Repository;
    use gitflow_changelog::ChangelogError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const PACKAGE: &str = r#"{
  "name": "app",
  "version": "1.2.3",
  "repository": {
    "type": "git",
    "url": "git+https://git.example.com/acme/app.git"
  }
}
"#;

    const LOCK: &str = r#"{
  "name": "app",
  "version": "1.2.3",
  "lockfileVersion": 3
}
"#;

    fn commit_files(repo: &Repository, root: &Path, files: &[(&str, &str)], message: &str) -> Oid {
        let mut index = repo.index().expect("Could not get index");
        for (name, content) in files {
            fs::write(root.join(name), content).expect("Could not write file");
            index
                .add_path(Path::new(name))
                .expect("Could not add file to index");
        }
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let sig = repo.signature().expect("Could not get sig");
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    fn branch_here(repo: &Repository, name: &str) {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch(name, &head, false).expect("Could not create branch");
        repo.set_head(&format!("refs/heads/{}", name))
            .expect("Could not switch branch");
    }

    // 1.2.3 tag, then develop with a feature and a merged feature branch,
    // then release/1.3.0 with a fix.
    fn setup_test_repo() -> TempDir {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let root = temp_dir.path();
        let repo = Repository::init(root).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        let initial = commit_files(
            &repo,
            root,
            &[("package.json", PACKAGE), ("package-lock.json", LOCK)],
            "chore: initial commit",
        );
        repo.tag_lightweight("1.2.3", &repo.find_object(initial, None).unwrap(), false)
            .expect("Could not create tag");

        branch_here(&repo, "develop");
        commit_files(&repo, root, &[("api.txt", "endpoint")], "feat(api): add endpoint");
        commit_files(
            &repo,
            root,
            &[("login.txt", "login")],
            "Merge branch 'feature/login' into develop",
        );

        branch_here(&repo, "release/1.3.0");
        commit_files(&repo, root, &[("ui.txt", "button")], "fix(ui): align button");

        temp_dir
    }

    fn open(root: &Path) -> Git2Repository {
        Git2Repository::from_git2(Repository::open(root).unwrap())
    }

    #[test]
    fn test_release_branch_end_to_end() {
        let temp = setup_test_repo();
        let repo = open(temp.path());
        let config = Config::default();

        let outcome = Workflow::new(&config, &repo, temp.path())
            .run(&WorkflowArgs::default())
            .unwrap();

        assert_eq!(outcome.version.to_string(), "1.3.0");
        assert_eq!(outcome.previous_tag.as_deref(), Some("1.2.3"));
        assert_eq!(outcome.commits.len(), 3);
        assert!(matches!(outcome.action, ReleaseAction::Released { .. }));

        let changelog = fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
        assert!(changelog.contains("## 1.3.0 ("));
        assert!(changelog.contains("* login ("));
        assert!(changelog.contains("**fix - ui**: align button"));
        assert!(changelog.contains("https://git.example.com/acme/app/commit/"));

        let package: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("package.json")).unwrap())
                .unwrap();
        assert_eq!(package["version"], "1.3.0");
        let lock: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp.path().join("package-lock.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(lock["version"], "1.3.0");

        let git = Repository::open(temp.path()).unwrap();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("chore(release): bump version to 1.3.0"));
        let tree = head.tree().unwrap();
        assert!(tree.get_name("CHANGELOG.md").is_some());
    }

    #[test]
    fn test_develop_branch_mutates_nothing() {
        let temp = setup_test_repo();
        let git = Repository::open(temp.path()).unwrap();
        git.set_head("refs/heads/develop").unwrap();
        let before = git.head().unwrap().peel_to_commit().unwrap().id();

        let repo = open(temp.path());
        let config = Config::default();
        let outcome = Workflow::new(&config, &repo, temp.path())
            .run(&WorkflowArgs::default())
            .unwrap();

        assert_eq!(outcome.version.to_string(), "1.3.0");
        match outcome.action {
            ReleaseAction::Previewed { preview } => {
                assert!(preview.contains("### Features Merged\nlogin ("));
                assert!(preview.contains("api -> add endpoint ("));
            }
            other => panic!("unexpected action: {:?}", other),
        }

        assert!(!temp.path().join("CHANGELOG.md").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            PACKAGE
        );
        let after = git.head().unwrap().peel_to_commit().unwrap().id();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unsupported_branch_is_rejected() {
        let temp = setup_test_repo();
        let git = Repository::open(temp.path()).unwrap();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        git.branch("feature/search", &head, false).unwrap();
        git.set_head("refs/heads/feature/search").unwrap();

        let repo = open(temp.path());
        let config = Config::default();
        let err = Workflow::new(&config, &repo, temp.path())
            .run(&WorkflowArgs::default())
            .unwrap_err();

        assert!(matches!(err, ChangelogError::Branch(_)));
    }

    #[test]
    fn test_binary_dry_run_on_release_branch() {
        let temp = setup_test_repo();

        let output = binary()
            .arg("--dry-run")
            .current_dir(temp.path())
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("## 1.3.0 ("));
        assert!(!temp.path().join("CHANGELOG.md").exists());
    }
}
