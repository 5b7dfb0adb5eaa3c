//! Checks against the bundled 50-state record file.

use std::path::PathBuf;

use state_info::io::loader::load_table;

fn bundled() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/state_data.csv")
}

#[test]
fn bundled_file_has_fifty_alphabetical_states() {
    let table = load_table(&bundled()).expect("load bundled data");
    assert_eq!(table.len(), 50);
    let names: Vec<&str> = table.list_all().iter().map(|r| r.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn bundled_top_five_by_population() {
    let table = load_table(&bundled()).expect("load bundled data");
    let top: Vec<&str> = table
        .top_n_by_population(5)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        top,
        vec!["California", "Texas", "Florida", "New York", "Pennsylvania"]
    );
}

#[test]
fn california_scenario_on_bundled_data() {
    let mut table = load_table(&bundled()).expect("load bundled data");
    assert_eq!(table.top_n_by_population(1)[0].name, "California");
    table
        .update_population("California", 100)
        .expect("update california");
    assert_eq!(table.top_n_by_population(1)[0].name, "Texas");
    assert_eq!(
        table.find_by_name("California").expect("find").population,
        100
    );
}
