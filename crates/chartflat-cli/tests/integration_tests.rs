//! Integration tests for CLI commands

use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

/// Spawning while a fake helm script is still open for writing fails with
/// ETXTBSY, so script writes and spawns are serialized.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Helper to run chartflat command with a clean environment
fn chartflat(args: &[&str]) -> Output {
    let _guard = lock();
    Command::new(env!("CARGO_BIN_EXE_chartflat"))
        .args(args)
        .env_remove("CHARTFLAT_KUBE_VERSION")
        .env_remove("CHARTFLAT_HELM")
        .env_remove("CHARTFLAT_LOG")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("chartflat-tests-no-config"))
        .output()
        .expect("Failed to execute chartflat")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_chart(root: &Path, chart_yaml: &str) {
    std::fs::create_dir_all(root.join("templates")).unwrap();
    std::fs::write(root.join("Chart.yaml"), chart_yaml).unwrap();
    std::fs::write(root.join("values.yaml"), "replicas: 1\n").unwrap();
    std::fs::write(
        root.join("templates/configmap.yaml"),
        "kind: ConfigMap\nmetadata:\n  name: {{ .Release.Name }}\n",
    )
    .unwrap();
}

mod convert_command {
    use super::*;

    #[test]
    fn test_convert_yaml_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "kind:   Namespace\n").unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{"kind": "Service"}"#).unwrap();

        let output = chartflat(&["convert", dir.path().to_str().unwrap()]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "---\nkind: Namespace\n---\nkind: Service\n---\n");
        assert!(stderr(&output).contains("2 file(s)"));
    }

    #[test]
    fn test_convert_several_paths_to_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ns.yaml"), "kind: Namespace\n").unwrap();
        std::fs::write(dir.path().join("svc.yaml"), "kind: Service\n").unwrap();
        let out_file = dir.path().join("out.yaml");

        let output = chartflat(&[
            "convert",
            dir.path().join("ns.yaml").to_str().unwrap(),
            dir.path().join("svc.yaml").to_str().unwrap(),
            "-o",
            out_file.to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).is_empty());
        assert_eq!(
            std::fs::read_to_string(&out_file).unwrap(),
            "---\nkind: Namespace\n---\nkind: Service\n---\n"
        );
    }

    #[test]
    fn test_convert_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let output = chartflat(&["convert", missing.to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(5));
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn test_convert_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("list.yaml"), "- a\n- b\n").unwrap();

        let output = chartflat(&["convert", dir.path().to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Invalid manifest"));
    }

    #[test]
    fn test_convert_unsupported_file() {
        let dir = TempDir::new().unwrap();
        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "# hello\n").unwrap();

        let output = chartflat(&["convert", readme.to_str().unwrap()]);
        assert!(output.status.success());
        assert!(stdout(&output).is_empty());
        assert!(stderr(&output).contains("skipped"));

        let output = chartflat(&["convert", "--strict", readme.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Nothing to convert"));
    }

    #[test]
    fn test_convert_rejects_bad_kube_version() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "kind: Namespace\n").unwrap();

        let output = chartflat(&[
            "convert",
            "--kube-version",
            "latest",
            dir.path().to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(64));
    }

    #[test]
    fn test_convert_chart_without_helm() {
        let dir = TempDir::new().unwrap();
        write_chart(dir.path(), "apiVersion: v2\nname: web\nversion: 0.1.0\n");

        let output = chartflat(&[
            "convert",
            "--helm",
            dir.path().join("no-such-helm").to_str().unwrap(),
            dir.path().to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(3));
        assert!(stdout(&output).is_empty());
    }
}

#[cfg(unix)]
mod fake_helm {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Shell stand-in for helm: records its arguments next to itself and
    /// renders one ConfigMap with a nil artifact
    fn fake_helm(dir: &Path) -> PathBuf {
        let _guard = lock();
        let path = dir.join("helm");
        let body = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/args.log"
case "$1" in
  template)
    printf 'apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: %s\n  labels: %%!s(<nil>)\n' "$2"
    ;;
  dependency)
    mkdir -p "$3/charts/redis"
    printf 'name: redis\nversion: 17.3.0\n' > "$3/charts/redis/Chart.yaml"
    echo "Saving 1 charts"
    ;;
  *)
    exit 1
    ;;
esac
"#;
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn args_log(dir: &Path) -> String {
        std::fs::read_to_string(dir.join("args.log")).unwrap_or_default()
    }

    #[test]
    fn test_convert_chart() {
        let tools = TempDir::new().unwrap();
        let helm = fake_helm(tools.path());
        let chart = TempDir::new().unwrap();
        write_chart(
            chart.path(),
            "apiVersion: v2\nname: web\nversion: 0.1.0\nkubeVersion: \">=1.27.0\"\n",
        );

        let output = chartflat(&[
            "convert",
            "--helm",
            helm.to_str().unwrap(),
            "--kube-version",
            "1.29.0",
            chart.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let manifests = stdout(&output);
        assert!(manifests.starts_with("---\napiVersion: v1\nkind: ConfigMap\n"));
        assert!(manifests.contains("name: web"));
        assert!(!manifests.contains("<nil>"));

        let args = args_log(tools.path());
        assert!(args.contains("template web"));
        // the chart's own constraint wins over --kube-version
        assert!(args.contains("--kube-version 1.27.0"));
        assert!(!args.contains("dependency"));
    }

    #[test]
    fn test_convert_chart_with_dependencies() {
        let tools = TempDir::new().unwrap();
        let helm = fake_helm(tools.path());
        let chart = TempDir::new().unwrap();
        write_chart(
            chart.path(),
            "apiVersion: v2\nname: shop\nversion: 0.1.0\ndependencies:\n  - name: redis\n    version: 17.x\n    repository: https://charts.example.com\n",
        );

        let output = chartflat(&[
            "convert",
            "--helm",
            helm.to_str().unwrap(),
            "--skip-refresh",
            chart.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let manifests = stdout(&output);
        assert!(manifests.starts_with("---\nSaving 1 charts\n"));
        assert!(manifests.contains("name: shop"));
        assert!(chart.path().join("charts/redis/Chart.yaml").is_file());

        let args = args_log(tools.path());
        assert!(args.contains("dependency update"));
        assert!(args.contains("--skip-refresh"));
        assert!(!args.contains("--kube-version"));
    }

    #[test]
    fn test_helm_from_config_file() {
        let tools = TempDir::new().unwrap();
        let helm = fake_helm(tools.path());
        let chart = TempDir::new().unwrap();
        write_chart(chart.path(), "apiVersion: v2\nname: web\nversion: 0.1.0\n");
        let config = tools.path().join("config.yaml");
        std::fs::write(
            &config,
            format!("kubeVersion: 1.25.4\nhelmBinary: {}\n", helm.display()),
        )
        .unwrap();

        let output = chartflat(&[
            "--config",
            config.to_str().unwrap(),
            "convert",
            chart.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(args_log(tools.path()).contains("--kube-version 1.25.4"));
    }
}

mod inspect_command {
    use super::*;

    #[test]
    fn test_inspect_chart_json() {
        let dir = TempDir::new().unwrap();
        write_chart(dir.path(), "apiVersion: v2\nname: web\nversion: 0.3.1\n");

        let output = chartflat(&[
            "inspect",
            dir.path().to_str().unwrap(),
            "--kube-version",
            "1.29.0",
            "--json",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let json: serde_json::Value =
            serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");
        assert_eq!(json["kind"], "chart");
        assert_eq!(json["chart"]["name"], "web");
        assert_eq!(json["chart"]["version"], "0.3.1");
        assert_eq!(json["chart"]["effectiveKubeVersion"], "1.29.0");
    }

    #[test]
    fn test_inspect_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "kind: Namespace\n").unwrap();

        let output = chartflat(&["inspect", dir.path().to_str().unwrap()]);

        assert!(output.status.success());
        assert!(stdout(&output).contains("directory of manifests"));
    }

    #[test]
    fn test_inspect_invalid_chart() {
        let dir = TempDir::new().unwrap();
        write_chart(dir.path(), "apiVersion: v2\nversion: 0.3.1\n");

        let output = chartflat(&["inspect", dir.path().to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(4));
    }
}
