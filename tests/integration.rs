use cc_hookkit::gate::Verdict;
use cc_hookkit::settings::{merge, SettingsDoc};
use serde_json::json;

fn verdict_for(command: &str) -> Verdict {
    cc_hookkit::evaluate(command).verdict
}

fn reason_for(command: &str) -> String {
    cc_hookkit::evaluate(command).reason
}

macro_rules! verdict_test {
    ($name:ident, $cmd:expr, $verdict:ident) => {
        #[test]
        fn $name() {
            assert_eq!(verdict_for($cmd), Verdict::$verdict, "command: {}", $cmd,);
        }
    };
}

// ── BLOCK: force+recursive deletes, any target ──

verdict_test!(block_rf_root, "rm -rf /", Block);
verdict_test!(block_rf_root_glob, "rm -rf /*", Block);
verdict_test!(block_rf_tmp_path, "rm -rf /tmp/foo", Block);
verdict_test!(block_rf_relative, "rm -rf ./scratch", Block);
verdict_test!(block_rf_bare_dir, "rm -rf node_modules", Block);
verdict_test!(block_fr_merged, "rm -fr build", Block);
verdict_test!(block_r_then_f, "rm -r -f build", Block);
verdict_test!(block_f_then_r, "rm -f -r build", Block);
verdict_test!(block_long_recursive_force, "rm --recursive --force dist", Block);
verdict_test!(block_long_force_recursive, "rm --force --recursive dist", Block);
verdict_test!(block_merged_with_verbose, "rm -rfv cache", Block);
verdict_test!(block_verbose_first, "rm -vrf cache", Block);
verdict_test!(block_rf_uppercase, "RM -RF /tmp/x", Block);
verdict_test!(block_rf_mixed_case, "rm -Rf /tmp/x", Block);
verdict_test!(block_rf_extra_spacing, "rm   -rf    spaced/dir", Block);
verdict_test!(block_rf_no_target, "rm -rf", Block);
verdict_test!(block_long_no_target, "rm --force --recursive", Block);
verdict_test!(block_rf_multiple_targets, "rm -rf a b c", Block);
verdict_test!(block_sudo_rf, "sudo rm -rf /var", Block);
verdict_test!(block_time_rf, "time rm -rf ./junk", Block);
verdict_test!(block_rf_with_redirect, "rm -rf build 2>/dev/null", Block);
verdict_test!(block_separate_flags_many, "rm -v -r -f logs", Block);

// ── BLOCK: recursive-only deletes against protected paths ──

verdict_test!(block_r_root, "rm -r /", Block);
verdict_test!(block_r_root_glob, "rm -r /*", Block);
verdict_test!(block_r_home_dir, "rm -r /home", Block);
verdict_test!(block_r_under_etc, "rm -r /etc/nginx", Block);
verdict_test!(block_r_usr_glob, "rm -r /usr/*", Block);
verdict_test!(block_r_var_log, "rm -r /var/log", Block);
verdict_test!(block_r_sys_subdir, "rm -r /sys/kernel", Block);
verdict_test!(block_r_boot, "rm -r /boot", Block);
verdict_test!(block_r_srv, "rm -r /srv", Block);
verdict_test!(block_r_opt, "rm -r /opt", Block);
verdict_test!(block_r_tilde, "rm -r ~", Block);
verdict_test!(block_r_tilde_subdir, "rm -r ~/projects", Block);
verdict_test!(block_r_home_var, "rm -r $HOME/src", Block);
verdict_test!(block_r_env_var, "rm -r $WORKDIR", Block);
verdict_test!(block_long_recursive_protected, "rm --recursive /home", Block);
verdict_test!(block_r_second_target_protected, "rm -r ./ok /etc", Block);

// ── BLOCK: compound commands ──

verdict_test!(block_after_cd, "cd /tmp && rm -rf /", Block);
verdict_test!(block_after_make, "make clean && rm -rf /var", Block);
verdict_test!(block_second_statement, "rm -f a.txt ; rm -r /srv", Block);
verdict_test!(block_after_pipe, "yes | rm -r /boot", Block);
verdict_test!(block_in_or_chain, "test -d /x || rm -rf /x", Block);
verdict_test!(block_piped_into_rm, "cat list.txt | rm -rf", Block);

// ── ALLOW: ordinary deletes ──

verdict_test!(allow_plain_rm, "rm notes.txt", Allow);
verdict_test!(allow_force_single_file, "rm -f stale.lock", Allow);
verdict_test!(allow_long_force, "rm --force stale.lock", Allow);
verdict_test!(allow_interactive, "rm -i old.txt", Allow);
verdict_test!(allow_verbose_only, "rm -v tmp.txt", Allow);
verdict_test!(allow_r_relative_build, "rm -r ./build", Allow);
verdict_test!(allow_r_bare_target, "rm -r target", Allow);
verdict_test!(allow_r_tmp_scratch, "rm -r /tmp/scratch", Allow);
verdict_test!(allow_r_parent_relative, "rm -r ../scratch", Allow);
verdict_test!(allow_r_unprotected_abs, "rm -r /data/cache", Allow);
verdict_test!(allow_r_varnish_boundary, "rm -r /varnish", Allow);
verdict_test!(allow_r_quoted_spaces, "rm -r 'my docs'", Allow);

// ── ALLOW: split invocations and non-delete commands ──

verdict_test!(allow_flags_split_by_operator, "rm -r build && rm -f notes.txt", Allow);
verdict_test!(allow_r_then_pipe, "rm -r build | tee removed.log", Allow);
verdict_test!(allow_ls_rf, "ls -rf /", Allow);
verdict_test!(allow_grep_rf, "grep -rf pattern /etc", Allow);
verdict_test!(allow_cargo_build, "cargo build --release", Allow);
verdict_test!(allow_git_status, "git status", Allow);
verdict_test!(allow_find_delete, "find . -name '*.tmp' -delete", Allow);
verdict_test!(allow_quoted_rm_text, "echo \"rm -rf /\"", Allow);
verdict_test!(allow_rmdir, "rmdir empty-dir", Allow);
verdict_test!(allow_tar_cf, "tar -cf backup.tar ./src", Allow);
verdict_test!(allow_empty_command, "", Allow);

// ── Reasons ──

#[test]
fn force_recursive_reason_names_flags() {
    let reason = reason_for("rm -rf /tmp/foo");
    assert!(reason.contains("force"), "reason: {reason}");
    assert!(reason.contains("recursive"), "reason: {reason}");
}

#[test]
fn protected_path_reason_names_target() {
    let reason = reason_for("rm -r /etc/nginx");
    assert!(reason.contains("/etc/nginx"), "reason: {reason}");
}

#[test]
fn allow_reason_is_benign() {
    assert_eq!(reason_for("git status"), "no destructive deletion pattern");
}

// ── Settings merge through the public API ──

fn doc(value: serde_json::Value) -> SettingsDoc {
    serde_json::from_value(value).unwrap()
}

#[test]
fn merge_unions_permissions_and_keeps_existing_hooks() {
    let existing = doc(json!({
        "permissions": {"allow": ["Bash(uv run:*)", "Bash(ls:*)"]},
        "hooks": {"SessionStart": {"command": "mine"}}
    }));
    let incoming = doc(json!({
        "permissions": {"allow": ["Bash(ls:*)", "Bash(cargo build:*)"]},
        "hooks": {"SessionStart": {"command": "theirs"}, "Stop": {"command": "stop"}}
    }));

    let merged = merge(Some(existing), incoming);

    let allow: Vec<&str> = merged.permissions.allow.iter().map(String::as_str).collect();
    assert_eq!(allow, vec!["Bash(cargo build:*)", "Bash(ls:*)", "Bash(uv run:*)"]);
    assert_eq!(merged.hooks["SessionStart"], json!({"command": "mine"}));
    assert_eq!(merged.hooks["Stop"], json!({"command": "stop"}));
}

#[test]
fn merge_into_absent_settings_adopts_incoming() {
    let incoming = doc(json!({"permissions": {"allow": ["Bash(ls:*)"]}}));
    assert_eq!(merge(None, incoming.clone()), incoming);
}

#[test]
fn merge_applied_twice_is_stable() {
    let incoming = doc(json!({
        "permissions": {"allow": ["Bash(ls:*)"], "deny": ["WebFetch"]},
        "statusLine": {"type": "command", "command": "bar"}
    }));
    let existing = doc(json!({"permissions": {"allow": ["Bash(docker:*)"]}}));

    let once = merge(Some(existing), incoming.clone());
    let twice = merge(Some(once.clone()), incoming);
    assert_eq!(once, twice);
}

#[test]
fn merge_round_trips_unknown_fields() {
    let existing = doc(json!({"model": "opus", "includeCoAuthoredBy": false}));
    let incoming = doc(json!({"model": "sonnet", "env": {"X": "1"}}));
    let merged = merge(Some(existing), incoming);

    let rendered = serde_json::to_value(&merged).unwrap();
    assert_eq!(rendered["model"], "opus");
    assert_eq!(rendered["includeCoAuthoredBy"], false);
    assert_eq!(rendered["env"], json!({"X": "1"}));
}
