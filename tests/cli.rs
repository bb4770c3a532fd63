use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn dumps_each_argument() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.arg("myIdent").arg("foo := 42");

    let headers = predicate::str::contains("  --------  [Source - Arg #0]  --------")
        .and(predicate::str::contains("  --------  [Source - Arg #1]  --------"))
        .and(predicate::str::contains("\"myIdent\""))
        .and(predicate::str::contains("Assign"))
        .and(predicate::str::contains("[Formatted").not());

    cmd.assert().success().stdout(headers);
}

#[test]
fn formats_with_flag() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.arg("-f").arg("1+2");

    let output = predicate::str::contains("  --------  [Formatted - Arg #0]  --------")
        .and(predicate::str::contains("\n1 + 2\n"));

    cmd.assert().success().stdout(output);
}

#[test]
fn reads_stdin_for_a_dash() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.arg("--fmt").arg("-").write_stdin("type foo string\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("type foo string"));
}

#[test]
fn reads_stdin_without_arguments() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.write_stdin("x");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[Source - Arg #0]"));
}

#[test]
fn stdin_can_only_be_read_once() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.arg("-").arg("-").write_stdin("x");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "attempt to perform multiple reads from stdin",
        ));
}

#[test]
fn unparseable_fragments_still_dump() {
    let mut cmd = cargo_bin_cmd!("astdump");
    cmd.arg("func (");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("expected 'package', found 'func'"))
        .stderr(predicate::str::contains("<arg 0>:1:1 - expected 'package'"));
}
