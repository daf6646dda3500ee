use std::fs;
use std::io::Cursor;
use std::path::Path;

use filedeck_core::{ConflictResolution, ControllerConfig};
use filedeck_session::FileOperationController;
use filedeck_shell::{Shell, ShellOptions};
use tempfile::TempDir;

async fn run_script(dir: &Path, script: &str) -> (FileOperationController, String) {
    let controller = FileOperationController::new(ControllerConfig::new(dir)).unwrap();
    let options = ShellOptions {
        dirs_first: true,
        prompt: false,
    };

    let mut shell = Shell::new(controller, Vec::new(), options);
    shell.run(Cursor::new(script.to_string())).await.unwrap();

    let (controller, output) = shell.into_parts();
    (controller.unwrap(), String::from_utf8(output).unwrap())
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "alpha").unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    temp
}

#[tokio::test]
async fn test_copy_paste_session() {
    let temp = fixture();
    let script = "select a.txt\ncopy\ncd sub\npaste\nls\n";

    let (controller, output) = run_script(temp.path(), script).await;

    assert!(output.contains("Selected 'a.txt'"));
    assert!(output.contains("Copied 'a.txt' to clipboard"));
    assert!(output.contains("Copied 'a.txt'\n"));
    assert_eq!(
        fs::read_to_string(temp.path().join("sub/a.txt")).unwrap(),
        "alpha"
    );
    assert!(temp.path().join("a.txt").exists());
    assert_eq!(
        controller.current_dir(),
        temp.path().join("sub").canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_cut_move_session() {
    let temp = fixture();
    let script = "s a.txt\nx\ncd sub\nmv\n";

    let (controller, output) = run_script(temp.path(), script).await;

    assert!(output.contains("Moved 'a.txt'"));
    assert!(!temp.path().join("a.txt").exists());
    assert!(temp.path().join("sub/a.txt").exists());
    assert!(controller.clipboard().is_empty());
}

#[tokio::test]
async fn test_listing_shows_directories_first() {
    let temp = fixture();
    fs::write(temp.path().join("0-first.txt"), "0").unwrap();

    let (_, output) = run_script(temp.path(), "ls\n").await;

    let sub = output.find("sub/").unwrap();
    let file = output.find("0-first.txt").unwrap();
    assert!(sub < file);
}

#[tokio::test]
async fn test_folder_rename_and_delete() {
    let temp = fixture();
    let script = "mkdir my docs\nsel my docs\nren archive\nrm\npwd\n";

    let (controller, output) = run_script(temp.path(), script).await;

    assert!(output.contains("Created directory 'my docs'"));
    assert!(output.contains("Renamed 'my docs' to 'archive'"));
    assert!(output.contains("Deleted 'archive'"));
    assert!(!temp.path().join("archive").exists());
    assert!(controller.listing().find("archive").is_none());
}

#[tokio::test]
async fn test_failures_are_notifications() {
    let temp = fixture();
    fs::write(temp.path().join("sub/keep.txt"), "k").unwrap();
    let script = "sel sub\ndelete\nmkdir   \ncd missing\nsel a.txt\nren sub\n";

    let (controller, output) = run_script(temp.path(), script).await;

    assert!(output.contains("error: Directory is not empty"));
    assert!(output.contains("error: Invalid name"));
    assert!(output.contains("error: Not found"));
    assert!(output.contains("error: "));
    assert!(temp.path().join("sub/keep.txt").exists());
    assert!(temp.path().join("a.txt").exists());
    assert_eq!(
        controller.current_dir(),
        temp.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_policy_changes_paste_behaviour() {
    let temp = fixture();
    let script = "sel a.txt\ncopy\npolicy auto-rename\npaste\n";

    let (controller, output) = run_script(temp.path(), script).await;

    assert!(output.contains("Conflict policy: auto-rename"));
    assert!(output.contains("Copied 'a.txt' as 'a (1).txt'"));
    assert_eq!(
        controller.config().conflict_resolution,
        ConflictResolution::AutoRename
    );
    assert!(temp.path().join("a (1).txt").exists());
}

#[tokio::test]
async fn test_empty_clipboard_and_no_selection() {
    let temp = fixture();

    let (_, output) = run_script(temp.path(), "paste\ncopy\nrm\n").await;

    assert!(output.contains("Clipboard is empty"));
    assert!(output.contains("Nothing selected"));
    assert!(temp.path().join("a.txt").exists());
}
