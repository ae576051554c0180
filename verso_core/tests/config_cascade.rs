use std::fs;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use verso_core::config::load_config;
use verso_core::HighlightPolicy;

// Single test: it changes the process working directory and XDG_CONFIG_HOME.
#[test]
fn explicit_file_overrides_local_which_overrides_platform() {
    let root = TempDir::new().expect("temp dir");
    let platform_dir = root.path().join("xdg");
    let work_dir = root.path().join("work");
    fs::create_dir_all(platform_dir.join("verso")).expect("platform dir");
    fs::create_dir_all(&work_dir).expect("work dir");

    fs::write(
        platform_dir.join("verso").join("config.toml"),
        r#"
        [extractor]
        max_tokens = 100

        [suggestions]
        strategy = "counterpart"

        [output]
        include_segments = true
        "#,
    )
    .expect("write platform config");
    fs::write(
        work_dir.join(".verso.toml"),
        r#"
        [extractor]
        highlight_policy = "unique"
        max_tokens = 200

        [suggestions]
        strategy = "placeholder"
        "#,
    )
    .expect("write local config");
    let explicit = Utf8PathBuf::from_path_buf(root.path().join("explicit.toml")).expect("utf8");
    fs::write(&explicit, "[extractor]\nmax_tokens = 300\n").expect("write explicit config");

    let previous_dir = std::env::current_dir().expect("current dir");
    std::env::set_var("XDG_CONFIG_HOME", &platform_dir);
    std::env::set_current_dir(&work_dir).expect("enter work dir");

    let local_only = load_config(None);
    let layered = load_config(Some(&explicit));

    std::env::set_current_dir(previous_dir).expect("restore dir");
    std::env::remove_var("XDG_CONFIG_HOME");

    let local_only = local_only.expect("local config");
    assert_eq!(local_only.extractor.max_tokens, 200);
    assert_eq!(local_only.extractor.highlight_policy, HighlightPolicy::Unique);
    assert_eq!(local_only.suggestions.strategy, "placeholder");

    let layered = layered.expect("layered config");
    assert_eq!(layered.extractor.max_tokens, 300);
    assert_eq!(layered.extractor.highlight_policy, HighlightPolicy::Unique);
    assert_eq!(layered.suggestions.strategy, "placeholder");

    // dirs only honours XDG_CONFIG_HOME on Linux.
    if cfg!(target_os = "linux") {
        assert!(local_only.output.include_segments);
        assert!(layered.output.include_segments);
    }
}
