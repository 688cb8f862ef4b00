//! Drives the `logveil` binary end to end.

use std::fs;
use std::process::Command;

fn logveil() -> Command {
    Command::new(env!("CARGO_BIN_EXE_logveil"))
}

#[test]
fn test_convert_restore_explicit_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("archive.zip");
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    fs::write(&input, &data).unwrap();

    let status = logveil()
        .arg("convert")
        .arg(&input)
        .arg("--out-dir")
        .arg(tmp.path())
        .args(["--codec", "base64", "--max-kb", "2", "--name", "mail"])
        .args(["--start", "2024/05/01 09:00", "--end", "2024/05/01 12:00"])
        .args(["--seed", "17"])
        .status()
        .unwrap();
    assert!(status.success());

    let first = fs::read_to_string(tmp.path().join("mail_1.txt")).unwrap();
    assert!(first.starts_with("2024/05/01 09:00:00."));

    let mut chunks: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "txt"))
        .collect();
    chunks.sort_by_key(|p| {
        let stem = p.file_stem().unwrap().to_str().unwrap().to_string();
        stem.rsplit('_').next().unwrap().parse::<usize>().unwrap()
    });
    assert!(chunks.len() > 1);

    let out = tmp.path().join("back.zip");
    let status = logveil()
        .arg("restore")
        .args(&chunks)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(out).unwrap(), data);
}

#[test]
fn test_detect_reports_codec() {
    let tmp = tempfile::tempdir().unwrap();
    let chunk = tmp.path().join("x_1.txt");
    fs::write(&chunk, "2024/01/01 00:00:00.123 01000001 01000010\n").unwrap();

    let output = logveil().arg("detect").arg(&chunk).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Codec: Binary"));
    assert!(stdout.contains("Tokens: 2"));
}

#[test]
fn test_reversed_window_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("a.txt");
    fs::write(&input, b"abc").unwrap();

    let output = logveil()
        .arg("convert")
        .arg(&input)
        .arg("--out-dir")
        .arg(tmp.path())
        .args(["--start", "2024/05/01 12:00", "--end", "2024/05/01 09:00"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("EmptyWindow"));
}
