use assert_fs::prelude::*;
use predicates::prelude::*;

fn budget_analyst(state: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("budget-analyst");
    cmd.arg("--state").arg(state);
    cmd
}

fn seed_small_budget(state: &std::path::Path) {
    // One standard iteration: 5 days * 2 people * 8h * 50 = 4000.
    budget_analyst(state)
        .args([
            "set-params",
            "--cost-per-hour",
            "50",
            "--budget-size",
            "10000",
            "--team-size",
            "2",
            "--working-days",
            "5",
        ])
        .assert()
        .success();
}

#[test]
fn add_edit_and_mark_current_then_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");
    seed_small_budget(state.path());

    budget_analyst(state.path())
        .arg("add-iteration")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added iteration 1"));
    budget_analyst(state.path())
        .arg("add-iteration")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added iteration 2"));
    budget_analyst(state.path())
        .args(["edit-iteration", "-n", "1", "--total-hours", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated iteration 1"));
    budget_analyst(state.path())
        .args(["set-current", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Iteration 1 marked as current"));

    budget_analyst(state.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Consumed budget: USD 5,000"))
        .stdout(predicate::str::contains("Consumption rate: 50.0%"))
        .stdout(predicate::str::contains("IT 1 | USD 5,000 | USD 4,000 | USD 5,000"))
        .stdout(predicate::str::contains("IT 2 | USD 0 | USD 8,000 | USD 9,000"))
        .stdout(predicate::str::contains("IT 3 | USD 0 | USD 12,000 | USD 13,000"));
}

#[test]
fn report_without_iterations_projects_to_cap() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");
    seed_small_budget(state.path());

    budget_analyst(state.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Start | USD 0 | USD 0 | USD 0 | USD 10,000"))
        .stdout(predicate::str::contains("IT 3 | USD 0 | USD 12,000 | USD 12,000"))
        .stdout(predicate::str::contains("IT 4").not());
}

#[test]
fn delete_renumbers_remaining_iterations() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");
    seed_small_budget(state.path());
    for _ in 0..3 {
        budget_analyst(state.path()).arg("add-iteration").assert().success();
    }
    budget_analyst(state.path())
        .args(["edit-iteration", "-n", "3", "--total-hours", "12"])
        .assert()
        .success();

    budget_analyst(state.path())
        .args(["delete-iteration", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted iteration 1"));

    budget_analyst(state.path())
        .arg("list-iterations")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 | 5 | 2 | 12 | USD 600"))
        .stdout(predicate::str::contains("3 | ").not());
}

#[test]
fn unknown_iteration_is_reported_on_stderr() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");

    budget_analyst(state.path())
        .args(["set-current", "-n", "4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to update iterations: UnknownIteration(4)"));
}

#[test]
fn iterations_csv_round_trip_through_cli() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");
    let csv = temp.child("iterations.csv");
    seed_small_budget(state.path());
    budget_analyst(state.path())
        .arg("generate-iterations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 iterations"));
    budget_analyst(state.path())
        .args(["set-current", "-n", "2"])
        .assert()
        .success();

    budget_analyst(state.path())
        .args(["export-iterations", "-o", csv.path().to_str().unwrap()])
        .assert()
        .success();
    csv.assert(predicate::str::contains(
        "Iteration Number,Days,Team Size,Total Hours,Is Current\n1,5,2,80,false\n2,5,2,80,true\n3,3,2,40,false\n",
    ));

    let other_state = temp.child("other.json");
    budget_analyst(other_state.path())
        .args(["import-iterations", "-i", csv.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 iterations"));
    budget_analyst(other_state.path())
        .arg("list-iterations")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 | 5 | 2 | 80 | USD 4,000 | yes"));
}

#[test]
fn empty_iterations_import_is_rejected() {
    let temp = assert_fs::TempDir::new().unwrap();
    let state = temp.child("state.json");
    let csv = temp.child("empty.csv");
    csv.write_str("Iteration Number,Days,Team Size,Total Hours,Is Current\n,1,1,1,false\n")
        .unwrap();

    budget_analyst(state.path())
        .args(["import-iterations", "-i", csv.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to import iterations: NoIterations"));

    state.assert(predicate::path::missing());
}
