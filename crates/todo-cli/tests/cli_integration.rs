use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn todo(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("todo").unwrap();
    cmd.env_remove("TODO_FILE")
        .env_remove("TODO_DEBUG_LOG")
        .args(["--file", file.to_str().unwrap()]);
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn run_ok(file: &Path, args: &[&str]) -> Value {
    let output = todo(file)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert!(json["success"].as_bool().unwrap());
    json
}

fn run_err(file: &Path, args: &[&str]) -> Value {
    let output = todo(file)
        .args(args)
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let json = parse_json_output(&output);
    assert!(!json["success"].as_bool().unwrap());
    json
}

fn create_list(file: &Path, name: &str) -> String {
    let json = run_ok(file, &["list", "create", "--name", name]);
    json["data"]["result"]["id"].as_str().unwrap().to_string()
}

fn add_task(file: &Path, list_id: &str, text: &str) -> String {
    let json = run_ok(file, &["task", "add", "--list", list_id, "--text", text]);
    json["data"]["result"]["id"].as_str().unwrap().to_string()
}

fn task_texts(file: &Path, list_id: &str) -> Vec<String> {
    let json = run_ok(file, &["task", "ls", "--list", list_id]);
    json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

mod list_tests {
    use super::*;

    #[test]
    fn test_list_create() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_ok(&file, &["list", "create", "--name", "  Groceries "]);
        assert_eq!(json["data"]["result"]["name"], "Groceries");
        assert_eq!(json["data"]["view"]["view"], "dashboard");
        assert_eq!(json["data"]["view"]["lists"][0]["summary"], "0 of 0 tasks completed");
        assert!(file.exists());
    }

    #[test]
    fn test_list_create_empty_name_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_err(&file, &["list", "create", "--name", "   "]);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Please enter a list name"));
        assert!(!file.exists());
    }

    #[test]
    fn test_list_create_duplicate_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        create_list(&file, "Groceries");
        let json = run_err(&file, &["list", "create", "--name", "groceries"]);
        assert!(json["error"].as_str().unwrap().contains("already exists"));

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 1);
    }

    #[test]
    fn test_list_list_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_ok(&file, &["list", "list"]);
        assert_eq!(json["data"]["count"], 0);
    }

    #[test]
    fn test_list_get_and_not_found() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let id = create_list(&file, "Work");

        let json = run_ok(&file, &["list", "get", "--id", &id]);
        assert_eq!(json["data"]["name"], "Work");
        assert!(json["data"]["createdAt"].is_string());

        todo(&file)
            .args(["list", "get", "--id", "missing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("List not found: missing"));
    }

    #[test]
    fn test_list_rename() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let id = create_list(&file, "Groceries");
        create_list(&file, "Work");

        let json = run_ok(&file, &["list", "rename", "--id", &id, "--name", "Shopping"]);
        assert_eq!(json["data"]["result"]["name"], "Shopping");
        assert_eq!(json["data"]["view"]["view"], "list");

        run_err(&file, &["list", "rename", "--id", &id, "--name", "WORK"]);
    }

    #[test]
    fn test_list_delete_cascades() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let id = create_list(&file, "Groceries");
        add_task(&file, &id, "Milk");

        let json = run_ok(&file, &["list", "delete", "--id", &id]);
        assert_eq!(json["data"]["result"]["deleted"], id);
        assert_eq!(json["data"]["view"]["is_empty"], true);

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 0);
    }

    #[test]
    fn test_list_show() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let id = create_list(&file, "Groceries");
        add_task(&file, &id, "Milk");

        let json = run_ok(&file, &["list", "show", "--id", &id]);
        assert_eq!(json["data"]["view"], "list");
        assert_eq!(json["data"]["tasks"][0]["text"], "Milk");
        assert_eq!(json["data"]["tasks"][0]["position"], 0);

        run_err(&file, &["list", "show", "--id", "missing"]);
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn test_groceries_scenario() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Groceries");
        let milk = add_task(&file, &list, "Milk");
        let eggs = add_task(&file, &list, "Eggs");

        let json = run_ok(&file, &["task", "toggle", "--list", &list, "--id", &milk]);
        assert_eq!(json["data"]["result"]["completed"], true);
        assert_eq!(json["data"]["view"]["completed"], 1);

        run_ok(&file, &["task", "delete", "--list", &list, "--id", &eggs]);

        let json = run_ok(&file, &["list", "get", "--id", &list]);
        let tasks = json["data"]["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["text"], "Milk");
        assert_eq!(tasks[0]["completed"], true);

        let json = run_ok(&file, &["dashboard"]);
        assert_eq!(json["data"]["lists"][0]["summary"], "1 of 1 tasks completed");
    }

    #[test]
    fn test_task_add_rejections() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Groceries");

        run_err(&file, &["task", "add", "--list", &list, "--text", "  "]);
        let json = run_err(&file, &["task", "add", "--list", "ghost", "--text", "Milk"]);
        assert!(json["error"].as_str().unwrap().contains("Not found"));
        assert!(task_texts(&file, &list).is_empty());
    }

    #[test]
    fn test_task_reorder() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Letters");
        for text in ["A", "B", "C"] {
            add_task(&file, &list, text);
        }

        run_ok(&file, &["task", "reorder", "--list", &list, "--from", "0", "--to", "2"]);
        assert_eq!(task_texts(&file, &list), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_task_reorder_out_of_range() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Letters");
        for text in ["A", "B", "C"] {
            add_task(&file, &list, text);
        }

        let json = run_err(
            &file,
            &["task", "reorder", "--list", &list, "--from", "0", "--to", "3"],
        );
        assert!(json["error"].as_str().unwrap().contains("list has 3 tasks"));
        assert_eq!(task_texts(&file, &list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_task_move() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Letters");
        let a = add_task(&file, &list, "A");
        add_task(&file, &list, "B");

        let json = run_ok(
            &file,
            &["task", "move", "--list", &list, "--id", &a, "--direction", "up"],
        );
        assert_eq!(json["data"]["result"]["position"], 0);

        let json = run_ok(
            &file,
            &["task", "move", "--list", &list, "--id", &a, "--direction", "down"],
        );
        assert_eq!(json["data"]["result"]["position"], 1);
        assert_eq!(task_texts(&file, &list), vec!["B", "A"]);
    }
}

mod theme_tests {
    use super::*;

    #[test]
    fn test_theme_defaults_and_toggles() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_ok(&file, &["theme", "get"]);
        assert_eq!(json["data"]["theme"], "light");

        let json = run_ok(&file, &["theme", "toggle"]);
        assert_eq!(json["data"]["theme"], "dark");

        let json = run_ok(&file, &["theme", "get"]);
        assert_eq!(json["data"]["theme"], "dark");
    }

    #[test]
    fn test_theme_write_reports_persisted() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_ok(&file, &["theme", "set", "dark"]);
        assert_eq!(json["data"]["persisted"], true);

        let json = run_ok(&file, &["theme", "get"]);
        assert!(json["data"].get("persisted").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_theme_write_refused_by_quota() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let config_home = dir.path().join("config");
        fs::create_dir_all(config_home.join("todo-lists")).unwrap();
        fs::write(
            config_home.join("todo-lists/config.toml"),
            "storage_quota_bytes = 5\n",
        )
        .unwrap();

        let output = todo(&file)
            .env("XDG_CONFIG_HOME", &config_home)
            .args(["theme", "toggle"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&output);
        assert_eq!(json["data"]["theme"], "dark");
        assert_eq!(json["data"]["persisted"], false);

        let json = run_ok(&file, &["theme", "get"]);
        assert_eq!(json["data"]["theme"], "light");
    }

    #[test]
    fn test_theme_set_invalid() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        run_ok(&file, &["theme", "set", "dark"]);
        run_err(&file, &["theme", "set", "sepia"]);

        let json = run_ok(&file, &["theme", "get"]);
        assert_eq!(json["data"]["theme"], "dark");
    }
}

mod storage_tests {
    use super::*;

    #[test]
    fn test_default_command_shows_dashboard() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");

        let json = run_ok(&file, &[]);
        assert_eq!(json["data"]["view"], "dashboard");
        assert_eq!(json["data"]["is_empty"], true);
    }

    #[test]
    fn test_file_from_env() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env.json");

        Command::cargo_bin("todo")
            .unwrap()
            .env("TODO_FILE", &file)
            .args(["list", "create", "--name", "From env"])
            .assert()
            .success();

        assert!(file.exists());
    }

    #[test]
    fn test_corrupt_lists_payload_loads_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        fs::write(
            &file,
            r#"{
                "version": 1,
                "metadata": {"instance_id": "6f1c2f3e-8d5b-4a57-9d44-3f3d3b6f2a10", "saved_at": "2024-02-14T10:00:00Z"},
                "entries": {"todoLists": "{broken", "theme": "dark"}
            }"#,
        )
        .unwrap();

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 0);

        create_list(&file, "Fresh start");
        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 1);

        let json = run_ok(&file, &["theme", "get"]);
        assert_eq!(json["data"]["theme"], "dark");
    }

    #[test]
    fn test_storage_file_layout() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Groceries");
        add_task(&file, &list, "Milk");

        let envelope: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(envelope["version"], 1);
        let raw = envelope["entries"]["todoLists"].as_str().unwrap();
        let lists: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(lists[0]["name"], "Groceries");
        assert_eq!(lists[0]["tasks"][0]["text"], "Milk");

        let created = lists[0]["createdAt"].as_str().unwrap();
        let (_, fraction) = created.rsplit_once('.').unwrap();
        assert_eq!(fraction.len(), 4);
        assert!(fraction.ends_with('Z'));
    }

    #[test]
    fn test_completions() {
        Command::cargo_bin("todo")
            .unwrap()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("todo"));
    }
}

mod watch_tests {
    use super::*;
    use assert_cmd::cargo::CommandCargoExt;
    use std::io::{BufRead, BufReader};
    use std::process::{Child, Stdio};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    const LINE_TIMEOUT: Duration = Duration::from_secs(10);

    struct KillOnDrop(Child);

    impl Drop for KillOnDrop {
        fn drop(&mut self) {
            let _ = self.0.kill();
            let _ = self.0.wait();
        }
    }

    fn next_line(rx: &mpsc::Receiver<String>) -> Value {
        let line = rx
            .recv_timeout(LINE_TIMEOUT)
            .expect("watch printed nothing before the timeout");
        serde_json::from_str(&line).expect("watch output is not JSON")
    }

    #[test]
    fn test_watch_prints_view_after_external_change() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("storage.json");
        let list = create_list(&file, "Groceries");

        let child = std::process::Command::cargo_bin("todo")
            .unwrap()
            .env_remove("TODO_FILE")
            .env_remove("TODO_DEBUG_LOG")
            .args(["--file", file.to_str().unwrap(), "watch", "--list", &list])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let mut watcher = KillOnDrop(child);
        let stdout = watcher.0.stdout.take().unwrap();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let first = next_line(&rx);
        assert_eq!(first["data"]["refresh"]["changed"], false);
        assert_eq!(first["data"]["view"]["view"], "list");
        assert_eq!(first["data"]["view"]["total"], 0);

        // The watch is registered on a background task after the first line.
        thread::sleep(Duration::from_secs(1));
        add_task(&file, &list, "Milk");

        let second = next_line(&rx);
        assert_eq!(second["data"]["refresh"]["changed"], true);
        assert_eq!(second["data"]["view"]["view"], "list");
        assert_eq!(second["data"]["view"]["tasks"][0]["text"], "Milk");
    }
}
